//! Catalog fetched from the hosted backend's REST interface.
//!
//! Products live in one table exposed at `{base}/rest/v1/{table}`; the
//! category directory lives in `{base}/rest/v1/categories`, ordered by name.
//! Requests carry the project's anonymous key both as the `apikey` header
//! and as a bearer token.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::debug;
use url::Url;

use super::category::CategoryRecord;
use super::record::decode_rows;
use super::{CatalogError, ProductRecord, ProductSource};
use crate::config::BackendConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const CATEGORIES_TABLE: &str = "categories";

/// Fetches product records from the backend's REST endpoint.
#[derive(Debug, Clone)]
pub struct BackendSource {
    client: reqwest::Client,
    endpoint: Url,
    categories_endpoint: Url,
}

impl BackendSource {
    /// Create a source for the configured backend table.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be built, the key cannot
    /// be used as a header value, or the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, CatalogError> {
        let key = config.anon_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| CatalogError::Header(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| CatalogError::Header(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let endpoint = table_url(&config.url, &config.table, None)?;
        let categories_endpoint = table_url(&config.url, CATEGORIES_TABLE, Some("name.asc"))?;

        Ok(Self {
            client,
            endpoint,
            categories_endpoint,
        })
    }

    /// The full product request URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The full category request URL.
    #[must_use]
    pub const fn categories_endpoint(&self) -> &Url {
        &self.categories_endpoint
    }

    /// Fetch the category directory, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or the body is not a JSON array.
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>, CatalogError> {
        let rows = self.fetch_rows(&self.categories_endpoint).await?;
        Ok(decode_rows(rows, "category"))
    }

    async fn fetch_rows(&self, url: &Url) -> Result<Vec<serde_json::Value>, CatalogError> {
        debug!(endpoint = %url, "Fetching rows from backend");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Vec<serde_json::Value>>().await?)
    }
}

/// `{base}/rest/v1/{table}?select=*`, optionally ordered.
fn table_url(base: &Url, table: &str, order: Option<&str>) -> Result<Url, CatalogError> {
    let mut url = base.join(&format!("rest/v1/{table}"))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("select", "*");
        if let Some(order) = order {
            query.append_pair("order", order);
        }
    }
    Ok(url)
}

impl ProductSource for BackendSource {
    fn describe(&self) -> String {
        format!("backend {}", self.endpoint.path())
    }

    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let rows = self.fetch_rows(&self.endpoint).await?;
        Ok(decode_rows(rows, "product"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: Url::parse(url).unwrap(),
            anon_key: SecretString::from("eyJhbGciOiJIUzI1NiJ9.k3Y.9fQ"),
            table: "perfumes".to_string(),
        }
    }

    #[test]
    fn test_endpoint_includes_table_and_select() {
        let source = BackendSource::new(&config("https://project.example.co")).unwrap();
        assert_eq!(
            source.endpoint().as_str(),
            "https://project.example.co/rest/v1/perfumes?select=*"
        );
        assert_eq!(
            source.categories_endpoint().as_str(),
            "https://project.example.co/rest/v1/categories?select=*&order=name.asc"
        );
    }

    #[test]
    fn test_key_with_newline_is_rejected() {
        let mut bad = config("https://project.example.co");
        bad.anon_key = SecretString::from("line\nbreak");
        assert!(matches!(
            BackendSource::new(&bad),
            Err(CatalogError::Header(_))
        ));
    }
}
