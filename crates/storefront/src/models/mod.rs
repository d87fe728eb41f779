//! Persisted domain records.
//!
//! Field names serialize in camelCase so an existing data directory
//! written by the original mobile client keeps loading.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{Order, Receipt};
pub use product::Product;
pub use user::{Address, NewAddress, ProfileUpdate, User};
