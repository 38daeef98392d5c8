//! Catalog loaded from a JSON file on disk.

use std::path::PathBuf;

use tracing::debug;

use super::record::decode_rows;
use super::{CatalogError, ProductRecord, ProductSource};

/// Reads a JSON array of product records from a file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = raw.len(), "Read catalog file");
        let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        Ok(decode_rows(rows, "product"))
    }
}
