//! Cart records and line-item arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pocket_bazaar_core::{ProductId, line_total};

/// A single cart line.
///
/// Snapshots the product's name and unit price at the moment it was
/// added; a later catalog price change does not reprice a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id; unique within a cart.
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Quantity, always >= 1 for a stored line.
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        line_total(self.price, self.qty)
    }
}

/// The active user's cart: lines unique by product id.
///
/// Persisted as a bare JSON array under `cart-<userId>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add a line, merging by product id with a quantity increment.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.qty += item.qty;
        } else {
            self.items.push(item);
        }
    }

    /// Remove the line for `id`. Returns `true` if a line existed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() != before
    }

    /// Set the quantity for `id`; zero removes the line.
    ///
    /// A missing id with a positive quantity is a no-op, matching the
    /// original quantity stepper which only operates on existing lines.
    pub fn set_quantity(&mut self, id: &ProductId, qty: u32) {
        if qty == 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.id == id) {
            item.qty = qty;
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::total).sum()
    }
}
