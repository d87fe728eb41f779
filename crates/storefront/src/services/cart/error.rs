//! Cart and checkout error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during cart and order operations.
///
/// As with authentication, variant messages are the user-facing banner
/// text and every failure is terminal per call.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout was attempted with no signed-in user.
    #[error("Please sign in to place an order")]
    NotSignedIn,

    /// Checkout was attempted on an empty cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Order id not present in the user's history.
    #[error("Order not found")]
    OrderNotFound,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
