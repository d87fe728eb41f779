//! Per-user cart repository.
//!
//! One `cart-<userId>` key per user, holding the cart's line array.
//! Every mutation in the cart service loads and rewrites the whole value.

use pocket_bazaar_core::UserId;

use super::RepositoryError;
use crate::models::Cart;
use crate::storage::{KvStore, keys};

/// Repository for per-user carts.
pub struct CartRepository<'a> {
    store: &'a KvStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a KvStore) -> Self {
        Self { store }
    }

    /// Load a user's cart; empty if never written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn load(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        Ok(self
            .store
            .get(&keys::cart(user_id))
            .await?
            .unwrap_or_default())
    }

    /// Persist a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub async fn save(&self, user_id: &UserId, cart: &Cart) -> Result<(), RepositoryError> {
        self.store.put(&keys::cart(user_id), cart).await?;
        Ok(())
    }

    /// Delete a user's cart key entirely.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the deletion fails.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.store.delete(&keys::cart(user_id)).await?;
        Ok(())
    }
}
