//! Perfumery Core - Shared types library.
//!
//! This crate provides common types used across all Perfumery components:
//! - `storefront` - Catalog, search, cart, wishlist and checkout logic
//! - `cli` - Command-line front end for browsing and shopping
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no persistence,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, categories, products, cart lines and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
