//! Pocket Bazaar storefront core.
//!
//! Everything the mobile screens need sits behind two services:
//!
//! - [`services::auth::AuthService`] - registered users, the current
//!   session, OTP issuance, profile and address management
//! - [`services::cart::CartService`] - the per-user cart and the per-user
//!   order history, including checkout
//!
//! Both persist flat JSON values through [`storage::KvStore`], a directory
//! of one-file-per-key JSON blobs. There is no backend: "API calls" run
//! in-process, optionally behind a configurable artificial delay
//! ([`config::StorefrontConfig::simulated_latency`]).
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`storage`] - JSON key-value store and the fixed key names
//! - [`db`] - Repositories over the key-value store
//! - [`models`] - Persisted domain records
//! - [`services`] - Auth and cart/order services
//! - [`catalog`] - The seeded in-process product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod storage;

pub use config::{ConfigError, StorefrontConfig};
pub use services::auth::{AuthError, AuthService};
pub use services::cart::{CartError, CartService};
pub use storage::{KvStore, StorageError};
