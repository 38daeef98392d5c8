//! Wire-level product records and their normalization.
//!
//! Product data arrives in two layouts:
//!
//! - the static dataset layout, with a nested `notes { top, middle, base }`
//!   object and a capitalized category (`"Men"`), and
//! - the backend table layout, with flat `notes_top` / `notes_middle` /
//!   `notes_base` columns and a `category_slug` column.
//!
//! [`ProductRecord`] accepts both; `Product::try_from` validates a record
//! into the canonical [`Product`].
//!
//! Payloads are decoded row by row with `decode_rows`, so a row with a
//! null or mistyped column is dropped without failing the whole payload.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use perfumery_core::{
    Category, CategoryError, FragranceNotes, Price, PriceError, Product, ProductId,
};

/// Reasons a record cannot become a [`Product`].
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product {id}: name is empty")]
    MissingName { id: ProductId },

    #[error("product {id}: no category")]
    MissingCategory { id: ProductId },

    #[error("product {id}: {source}")]
    Category {
        id: ProductId,
        #[source]
        source: CategoryError,
    },

    #[error("product {id}: {source}")]
    Price {
        id: ProductId,
        #[source]
        source: PriceError,
    },

    #[error("product {id}: rating {rating} is outside 0-5")]
    Rating { id: ProductId, rating: f64 },

    #[error("product {id}: stock {stock} is negative or too large")]
    Stock { id: ProductId, stock: i64 },
}

/// A product as supplied by a data source, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub bestseller: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub notes: Option<FragranceNotes>,
    #[serde(default)]
    pub notes_top: Option<Vec<String>>,
    #[serde(default)]
    pub notes_middle: Option<Vec<String>>,
    #[serde(default)]
    pub notes_base: Option<Vec<String>>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = ProductId::new(record.id);

        let name = record.name.trim().to_string();
        if name.is_empty() {
            return Err(ProductError::MissingName { id });
        }

        // The slug column wins when a row carries both
        let category: Category = [record.category_slug, record.category]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .ok_or(ProductError::MissingCategory { id })?
            .parse()
            .map_err(|source| ProductError::Category { id, source })?;

        let price = Price::new(record.price).map_err(|source| ProductError::Price { id, source })?;

        let rating = record.rating.unwrap_or(0.0);
        if !(0.0..=Self::MAX_RATING).contains(&rating) {
            return Err(ProductError::Rating { id, rating });
        }

        let raw_stock = record.stock.unwrap_or(0);
        let stock =
            u32::try_from(raw_stock).map_err(|_| ProductError::Stock { id, stock: raw_stock })?;

        // Nested notes win over flat columns when a record carries both
        let notes = record.notes.unwrap_or_else(|| FragranceNotes {
            top: record.notes_top.unwrap_or_default(),
            middle: record.notes_middle.unwrap_or_default(),
            base: record.notes_base.unwrap_or_default(),
        });

        Ok(Self {
            id,
            name,
            price,
            category,
            image: record.image.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            rating,
            bestseller: record.bestseller.unwrap_or(false),
            featured: record.featured.unwrap_or(false),
            notes,
            volume: record.volume.unwrap_or_default(),
            stock,
        })
    }
}

/// Decode each row of a JSON array independently.
///
/// Rows that do not fit `T` are logged and skipped.
pub(crate) fn decode_rows<T: DeserializeOwned>(
    rows: Vec<serde_json::Value>,
    kind: &'static str,
) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(index, kind, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}
