//! Cart and order service.
//!
//! Owns the per-user cart and the per-user order history. Every cart
//! mutation loads `cart-<userId>`, applies the change, and writes the
//! whole value back - no batching, no debouncing, matching the client
//! this replaces.
//!
//! Checkout appends the order before clearing the cart. There is no
//! partial-failure handling between those two writes; a failure after
//! the append leaves the cart populated alongside the new order.

mod error;

pub use error::CartError;

use std::time::Duration;

use tracing::{debug, info};

use pocket_bazaar_core::{OrderId, PaymentMethod, ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;
use crate::db::session::SessionRepository;
use crate::models::user::Address;
use crate::models::{Cart, CartItem, Order};
use crate::storage::KvStore;

/// Cart and order service.
///
/// Cart operations take the owning user's id explicitly (the cart key is
/// per-user); checkout resolves the user from the persisted session so an
/// unauthenticated checkout fails uniformly.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    orders: OrderRepository<'a>,
    sessions: SessionRepository<'a>,
    latency: Option<Duration>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a KvStore) -> Self {
        Self {
            carts: CartRepository::new(store),
            orders: OrderRepository::new(store),
            sessions: SessionRepository::new(store),
            latency: None,
        }
    }

    /// Create a service that sleeps before each call, imitating the
    /// backend round-trip of the mobile client.
    #[must_use]
    pub const fn with_latency(store: &'a KvStore, latency: Duration) -> Self {
        Self {
            carts: CartRepository::new(store),
            orders: OrderRepository::new(store),
            sessions: SessionRepository::new(store),
            latency: Some(latency),
        }
    }

    async fn simulate_call(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// A user's cart; empty if never written.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read fails.
    pub async fn cart(&self, user_id: &UserId) -> Result<Cart, CartError> {
        Ok(self.carts.load(user_id).await?)
    }

    /// Add a line, merging by product id with a quantity increment.
    ///
    /// Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read or write fails.
    pub async fn add_item(&self, user_id: &UserId, item: CartItem) -> Result<Cart, CartError> {
        self.simulate_call().await;

        let mut cart = self.carts.load(user_id).await?;
        debug!(user = %user_id, product = %item.id, qty = item.qty, "cart add");
        cart.add(item);
        self.carts.save(user_id, &cart).await?;
        Ok(cart)
    }

    /// Remove the line for a product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read or write fails.
    pub async fn remove_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<Cart, CartError> {
        self.simulate_call().await;

        let mut cart = self.carts.load(user_id).await?;
        cart.remove(product_id);
        self.carts.save(user_id, &cart).await?;
        Ok(cart)
    }

    /// Set a line's quantity; zero removes it.
    ///
    /// Quantities are unsigned - the UI clamps a below-zero stepper to 0
    /// before calling in.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read or write fails.
    pub async fn set_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Cart, CartError> {
        self.simulate_call().await;

        let mut cart = self.carts.load(user_id).await?;
        cart.set_quantity(product_id, qty);
        self.carts.save(user_id, &cart).await?;
        Ok(cart)
    }

    /// Drop every line and delete the cart key.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the deletion fails.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), CartError> {
        self.simulate_call().await;
        self.carts.clear(user_id).await?;
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Place an order from the signed-in user's cart.
    ///
    /// Computes subtotal, 5% tax, and total; snapshots the items into an
    /// [`Order`] with an embedded receipt; appends it to the user's order
    /// history; then clears the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotSignedIn` with no session and
    /// `CartError::EmptyCart` when there is nothing to buy - both before
    /// anything is written.
    pub async fn create_order(
        &self,
        payment_method: PaymentMethod,
        delivery_address: Address,
    ) -> Result<Order, CartError> {
        self.simulate_call().await;

        let user = self
            .sessions
            .current_user()
            .await?
            .ok_or(CartError::NotSignedIn)?;

        let cart = self.carts.load(&user.id).await?;
        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let order = Order::place(
            user.id.clone(),
            cart.items,
            payment_method,
            delivery_address,
        );

        self.orders.append(&order).await?;
        self.carts.clear(&user.id).await?;

        info!(
            user = %user.id,
            order = %order.id,
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }

    // =========================================================================
    // Order history
    // =========================================================================

    /// A user's orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read fails.
    pub async fn orders(&self, user_id: &UserId) -> Result<Vec<Order>, CartError> {
        Ok(self.orders.all(user_id).await?)
    }

    /// One of a user's orders by id.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OrderNotFound` for an unknown id.
    pub async fn order(&self, user_id: &UserId, order_id: &OrderId) -> Result<Order, CartError> {
        self.orders
            .find(user_id, order_id)
            .await?
            .ok_or(CartError::OrderNotFound)
    }
}
