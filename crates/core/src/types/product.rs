//! Canonical product schema.
//!
//! Every product in the application has this shape. Data sources with looser
//! or older record layouts are normalized into it at the catalog boundary.

use serde::{Deserialize, Serialize};

use super::{Category, Price, ProductId};

/// The three-tier fragrance pyramid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragranceNotes {
    /// Opening notes, in listed order.
    #[serde(default)]
    pub top: Vec<String>,
    /// Heart notes, in listed order.
    #[serde(default)]
    pub middle: Vec<String>,
    /// Base notes, in listed order.
    #[serde(default)]
    pub base: Vec<String>,
}

/// A fragrance for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    /// Image reference (URI or site-relative path).
    pub image: String,
    pub description: String,
    /// Average rating in `0.0..=5.0`.
    pub rating: f64,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub notes: FragranceNotes,
    /// Bottle size label, e.g. `100ml`.
    pub volume: String,
    /// Units on hand.
    pub stock: u32,
}

impl Product {
    /// Highest allowed rating.
    pub const MAX_RATING: f64 = 5.0;

    /// Whether any units are on hand.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether stock is strictly below `threshold`.
    #[must_use]
    pub const fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock < threshold
    }
}
