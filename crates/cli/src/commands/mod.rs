//! Command implementations, one module per subcommand group.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;

use thiserror::Error;

use pocket_bazaar_storefront::{
    AuthError, AuthService, CartError, CartService, ConfigError, KvStore, StorageError,
    StorefrontConfig,
};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The key-value store could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An authentication operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A cart or order operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A command argument did not parse.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Product id not present in the catalog.
    #[error("No product with id {0}")]
    ProductNotFound(String),

    /// Checkout needs a delivery address but the account has none.
    #[error("No saved address; add one before checking out")]
    NoAddress,
}

/// Configured store handle shared by every command.
///
/// Each invocation runs exactly one command, so commands open the store
/// themselves rather than receiving a long-lived handle.
pub struct Env {
    config: StorefrontConfig,
    store: KvStore,
}

impl Env {
    /// Read the environment and open the data directory.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` for a malformed environment variable and
    /// `CliError::Storage` if the data directory cannot be created.
    pub async fn load() -> Result<Self, CliError> {
        let config = StorefrontConfig::from_env()?;
        let store = KvStore::open(&config.data_dir).await?;
        Ok(Self { config, store })
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        match self.config.simulated_latency {
            Some(latency) => AuthService::with_latency(&self.store, latency),
            None => AuthService::new(&self.store),
        }
    }

    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        match self.config.simulated_latency {
            Some(latency) => CartService::with_latency(&self.store, latency),
            None => CartService::new(&self.store),
        }
    }
}
