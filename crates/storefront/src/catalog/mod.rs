//! Product catalog.
//!
//! The catalog is a read-only list of products loaded once from a
//! [`ProductSource`]. Records are validated at this boundary; invalid ones
//! are logged and skipped so one bad row never hides the rest of the store.
//! After loading, the product list is shared behind an `Arc` and never
//! mutated.

mod backend;
mod category;
mod file;
mod record;
pub(crate) mod seed;

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use perfumery_core::{Category, Product, ProductId};

use crate::config::CatalogSource;
use crate::search::CategoryFilter;

pub use backend::BackendSource;
pub use category::{CategoryRecord, load_categories};
pub use file::JsonFileSource;
pub use record::{ProductError, ProductRecord};
pub use seed::SeedSource;

/// Maximum number of related products shown on a product page.
pub const RELATED_LIMIT: usize = 4;

/// Default stock level below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Errors raised while fetching product data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload was not a JSON array.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Backend URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Credentials could not be encoded as a header.
    #[error("Invalid header: {0}")]
    Header(String),
}

/// A supplier of raw product records.
pub trait ProductSource {
    /// Short description of where products come from, for logs.
    fn describe(&self) -> String;

    /// Fetch every product record.
    fn fetch_products(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductRecord>, CatalogError>> + Send;
}

/// The read-only product collection.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Arc<[Product]>,
}

impl ProductCatalog {
    /// Build a catalog from already-validated products.
    ///
    /// Later duplicates of an ID are dropped.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        let products: Vec<Product> = products
            .into_iter()
            .filter(|product| {
                let fresh = seen.insert(product.id);
                if !fresh {
                    warn!(id = %product.id, name = %product.name, "Dropping duplicate product ID");
                }
                fresh
            })
            .collect();

        Self {
            products: products.into(),
        }
    }

    /// Validate raw records into a catalog, skipping invalid ones.
    #[must_use]
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let total = records.len();
        let products: Vec<Product> = records
            .into_iter()
            .filter_map(|record| match Product::try_from(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(error = %e, "Skipping invalid product record");
                    None
                }
            })
            .collect();

        let catalog = Self::new(products);
        if catalog.len() < total {
            warn!(
                kept = catalog.len(),
                skipped = total - catalog.len(),
                "Some product records were not loaded"
            );
        }
        catalog
    }

    /// Fetch records from `source` and build a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read. Individual invalid
    /// records are skipped, not reported as errors.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn load(source: &impl ProductSource) -> Result<Self, CatalogError> {
        let records = source.fetch_products().await?;
        let catalog = Self::from_records(records);
        info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Load from whichever source the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected source cannot be read.
    pub async fn load_configured(source: &CatalogSource) -> Result<Self, CatalogError> {
        match source {
            CatalogSource::Seed => Self::load(&SeedSource).await,
            CatalogSource::File(path) => Self::load(&JsonFileSource::new(path.clone())).await,
            CatalogSource::Backend(config) => Self::load(&BackendSource::new(config)?).await,
        }
    }

    /// Every product, in source order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products flagged as featured.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Products flagged as bestsellers.
    #[must_use]
    pub fn bestsellers(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.bestseller).collect()
    }

    /// Products admitted by a category filter.
    #[must_use]
    pub fn by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.admits(p)).collect()
    }

    /// Up to [`RELATED_LIMIT`] other products in the same category.
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Products whose stock is strictly below `threshold`.
    #[must_use]
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    /// Number of products in each category, in display order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&category| {
                let count = self
                    .products
                    .iter()
                    .filter(|p| p.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }
}
