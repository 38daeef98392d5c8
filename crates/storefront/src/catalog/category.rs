//! The category directory: name, slug, blurb and product count per category.

use serde::{Deserialize, Serialize};

use perfumery_core::{Category, CategoryError, CategoryId};

use super::{BackendSource, CatalogError, ProductCatalog};
use crate::config::CatalogSource;

/// A row of the category directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_count: Option<i64>,
}

impl CategoryRecord {
    /// The storefront category this row describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug does not name a known category.
    pub fn category(&self) -> Result<Category, CategoryError> {
        self.slug.parse()
    }
}

impl ProductCatalog {
    /// Category directory derived from the loaded products, ordered by name.
    ///
    /// IDs follow display order starting at 1.
    #[must_use]
    pub fn category_directory(&self) -> Vec<CategoryRecord> {
        let mut records: Vec<CategoryRecord> = (1..)
            .zip(self.category_counts())
            .map(|(id, (category, count))| CategoryRecord {
                id: CategoryId::new(id),
                name: category.label().to_string(),
                slug: category.slug().to_string(),
                description: None,
                product_count: i64::try_from(count).ok(),
            })
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }
}

/// Load the category directory for the configured source.
///
/// The backend keeps its own `categories` table; other sources derive the
/// directory from `catalog`.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or answers with an
/// error.
pub async fn load_categories(
    source: &CatalogSource,
    catalog: &ProductCatalog,
) -> Result<Vec<CategoryRecord>, CatalogError> {
    match source {
        CatalogSource::Backend(config) => BackendSource::new(config)?.fetch_categories().await,
        CatalogSource::Seed | CatalogSource::File(_) => Ok(catalog.category_directory()),
    }
}
