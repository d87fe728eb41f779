//! Catalog product record.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pocket_bazaar_core::{Category, ProductId};

use super::cart::CartItem;

/// A product in the seeded catalog.
///
/// Catalog data ships with the app; products are read-only and never
/// persisted to the key-value store (carts and orders snapshot the fields
/// they need).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Struck-through comparison price on the product card, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    pub category: Category,
    pub subcategory: String,
    pub brand: String,
    /// Average review rating out of 5.
    pub rating: f32,
    /// Review count shown next to the rating.
    pub reviews: u32,
    /// Units on hand; drives the stock progress bar.
    pub stock: u32,
    /// Social-proof blurb, e.g. "12 bought in last hour".
    pub recent_sales: String,
    /// Primary image asset reference.
    pub image: String,
    /// Gallery image asset references.
    pub images: Vec<String>,
    /// Spec sheet rows, keyed by label.
    pub specs: BTreeMap<String, String>,
}

impl Product {
    /// The price a buyer pays right now.
    ///
    /// The seeded data stores the selling price in `price`; when a
    /// `discount_price` exists it is the struck-through comparison price,
    /// so `price` is already the effective one.
    #[must_use]
    pub const fn effective_price(&self) -> Decimal {
        self.price
    }

    /// Snapshot this product into a cart line with the given quantity.
    #[must_use]
    pub fn to_cart_item(&self, qty: u32) -> CartItem {
        CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.effective_price(),
            qty,
            image: Some(self.image.clone()),
        }
    }
}
