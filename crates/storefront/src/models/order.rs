//! Order and receipt records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pocket_bazaar_core::{OrderId, OrderStatus, PaymentMethod, UserId, tax_for};

use super::cart::CartItem;
use super::user::Address;

/// An immutable record of a completed checkout.
///
/// Appended to the `orders-<userId>` list at creation and never mutated
/// or deleted afterwards. The status is fixed at creation; nothing in
/// this client transitions it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Snapshot of the cart lines at checkout time.
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    /// Flat 5% tax on the subtotal.
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub delivery_address: Address,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Nested receipt snapshot duplicating totals and items.
    pub receipt: Receipt,
}

impl Order {
    /// Build an order from a cart snapshot.
    ///
    /// Computes the subtotal from per-item line totals, applies the flat
    /// tax, and embeds the receipt. Callers are responsible for rejecting
    /// empty snapshots before getting here.
    #[must_use]
    pub fn place(
        user_id: UserId,
        items: Vec<CartItem>,
        payment_method: PaymentMethod,
        delivery_address: Address,
    ) -> Self {
        let id = OrderId::generate();
        let subtotal: Decimal = items.iter().map(CartItem::total).sum();
        let tax = tax_for(subtotal);
        let total = subtotal + tax;
        let created_at = Utc::now();

        let receipt = Receipt {
            receipt_number: receipt_number(&id),
            items: items.clone(),
            subtotal,
            tax,
            total,
            issued_at: created_at,
        };

        Self {
            id,
            user_id,
            items,
            subtotal,
            tax,
            total,
            payment_method,
            delivery_address,
            status: OrderStatus::Processing,
            created_at,
            receipt,
        }
    }

    /// Total unit count across the snapshot.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }
}

/// The printable receipt embedded in an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub issued_at: DateTime<Utc>,
}

/// Short human-readable receipt number derived from the order id.
fn receipt_number(id: &OrderId) -> String {
    let short: String = id
        .as_str()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(8)
        .collect::<String>()
        .to_uppercase();
    format!("PB-{short}")
}
