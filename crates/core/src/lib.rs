//! Pocket Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Pocket Bazaar components:
//! - `storefront` - The application core (storage, repositories, services)
//! - `cli` - Command-line front end standing in for the mobile screens
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, phone numbers,
//!   money, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
