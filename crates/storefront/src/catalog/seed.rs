//! The bundled static dataset.

use super::record::decode_rows;
use super::{CatalogError, ProductRecord, ProductSource};

const SEED_CATALOG: &str = include_str!("../../data/perfumes.json");

/// Serves the eight-perfume dataset compiled into the binary.
///
/// Used when no catalog file or backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

/// Parse the bundled dataset.
pub(crate) fn records() -> Result<Vec<ProductRecord>, CatalogError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(SEED_CATALOG)?;
    Ok(decode_rows(rows, "product"))
}

impl ProductSource for SeedSource {
    fn describe(&self) -> String {
        "bundled dataset".to_string()
    }

    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        records()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let records = records().unwrap();
        assert_eq!(records.len(), 8);
        assert!(records.iter().any(|r| r.name == "Velvet Rose"));
    }
}
