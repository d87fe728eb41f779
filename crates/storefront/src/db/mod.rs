//! Data access over the key-value store.
//!
//! One repository per record family, each holding a borrowed
//! [`KvStore`](crate::storage::KvStore):
//!
//! - [`users::UserRepository`] - the `users` array
//! - [`session::SessionRepository`] - `userToken`, `userData`,
//!   `otp-<email>`, `hasSeenOnboarding`
//! - [`carts::CartRepository`] - `cart-<userId>`
//! - [`orders::OrderRepository`] - `orders-<userId>`
//!
//! Repositories read and rewrite whole values; there is no partial
//! update, no batching, and no transaction spanning two keys.

pub mod carts;
pub mod orders;
pub mod session;
pub mod users;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}
