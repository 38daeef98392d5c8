//! Core types for Perfumery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use cart::CartLine;
pub use category::{Category, CategoryError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{FragranceNotes, Product};
pub use status::*;
