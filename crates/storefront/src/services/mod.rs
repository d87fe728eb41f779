//! Application services.
//!
//! Two services back every screen: [`auth`] owns users and the current
//! session, [`cart`] owns the per-user cart and order history. Both are
//! cheap, borrow the shared [`KvStore`](crate::storage::KvStore), and
//! optionally sleep before each call to imitate a backend round-trip.

pub mod auth;
pub mod cart;
