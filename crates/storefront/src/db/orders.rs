//! Per-user order history repository.
//!
//! One `orders-<userId>` key per user holding the full order array.
//! Orders are append-only: nothing here mutates or deletes an existing
//! record.

use pocket_bazaar_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::Order;
use crate::storage::{KvStore, keys};

/// Repository for per-user order lists.
pub struct OrderRepository<'a> {
    store: &'a KvStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a KvStore) -> Self {
        Self { store }
    }

    /// A user's orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn all(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .store
            .get(&keys::orders(user_id))
            .await?
            .unwrap_or_default())
    }

    /// Append an order to a user's history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read or write fails.
    pub async fn append(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.all(&order.user_id).await?;
        orders.push(order.clone());
        self.store.put(&keys::orders(&order.user_id), &orders).await?;
        Ok(())
    }

    /// Find one of a user's orders by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub async fn find(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .all(user_id)
            .await?
            .into_iter()
            .find(|o| &o.id == order_id))
    }
}
