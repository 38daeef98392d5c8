//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PERFUMERY_DATA_DIR` - Directory for persisted shopper state (default: .perfumery)
//! - `PERFUMERY_CATALOG_PATH` - JSON file with product records
//! - `PERFUMERY_BACKEND_URL` - Base URL of the hosted backend
//! - `PERFUMERY_BACKEND_ANON_KEY` - Backend anonymous key (required with `PERFUMERY_BACKEND_URL`)
//! - `PERFUMERY_PRODUCTS_TABLE` - Backend products table (default: perfumes)
//! - `PERFUMERY_SUGGESTION_LIMIT` - Search dropdown size (default: 5)
//! - `PERFUMERY_LOW_STOCK_THRESHOLD` - Low stock cutoff (default: 10)
//! - `PERFUMERY_CURRENCY_SYMBOL` - Currency symbol for display (default: ₹)
//! - `PERFUMERY_ASSET_BASE_URL` - Base URL for site-relative image paths
//!
//! The catalog comes from the backend when it is configured, otherwise from
//! `PERFUMERY_CATALOG_PATH`, otherwise from the bundled seed data.

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::catalog::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::search::DEFAULT_SUGGESTION_LIMIT;

const DEFAULT_DATA_DIR: &str = ".perfumery";
const DEFAULT_PRODUCTS_TABLE: &str = "perfumes";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding persisted cart, wishlist and theme
    pub data_dir: PathBuf,
    /// Where products are loaded from
    pub catalog: CatalogSource,
    /// Maximum number of search suggestions
    pub suggestion_limit: usize,
    /// Stock level below which a product counts as low stock
    pub low_stock_threshold: u32,
    /// Currency symbol shown before prices
    pub currency_symbol: String,
    /// Base URL for resolving site-relative image paths
    pub asset_base_url: Option<Url>,
}

/// Product data source selection.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Bundled seed data
    Seed,
    /// JSON file on disk
    File(PathBuf),
    /// Hosted backend REST table
    Backend(BackendConfig),
}

/// Hosted backend connection settings.
///
/// Implements `Debug` manually to redact the key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL (e.g., <https://project.example.co>)
    pub url: Url,
    /// Anonymous API key
    pub anon_key: SecretString,
    /// Products table name
    pub table: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .field("table", &self.table)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog: CatalogSource::Seed,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            asset_base_url: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the backend key
    /// fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let data_dir = env
            .optional("PERFUMERY_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let catalog = match env.optional("PERFUMERY_BACKEND_URL") {
            Some(raw_url) => CatalogSource::Backend(BackendConfig {
                url: parse_url("PERFUMERY_BACKEND_URL", &raw_url)?,
                anon_key: env.validated_secret("PERFUMERY_BACKEND_ANON_KEY")?,
                table: env.or_default("PERFUMERY_PRODUCTS_TABLE", DEFAULT_PRODUCTS_TABLE),
            }),
            None => env
                .optional("PERFUMERY_CATALOG_PATH")
                .map_or(CatalogSource::Seed, |path| {
                    CatalogSource::File(PathBuf::from(path))
                }),
        };

        let suggestion_limit = env.parsed("PERFUMERY_SUGGESTION_LIMIT", DEFAULT_SUGGESTION_LIMIT)?;
        let low_stock_threshold =
            env.parsed("PERFUMERY_LOW_STOCK_THRESHOLD", DEFAULT_LOW_STOCK_THRESHOLD)?;
        let currency_symbol = env.or_default("PERFUMERY_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL);
        let asset_base_url = env
            .optional("PERFUMERY_ASSET_BASE_URL")
            .map(|raw| parse_url("PERFUMERY_ASSET_BASE_URL", &raw))
            .transpose()?;

        Ok(Self {
            data_dir,
            catalog,
            suggestion_limit,
            low_stock_threshold,
            currency_symbol,
            asset_base_url,
        })
    }

    /// Resolve a product image reference to a URL string.
    ///
    /// Absolute URLs are returned as-is. Site-relative paths are joined onto
    /// the asset base URL when one is configured.
    #[must_use]
    pub fn image_url(&self, image: &str) -> String {
        if Url::parse(image).is_ok() {
            return image.to_string();
        }
        self.asset_base_url
            .as_ref()
            .and_then(|base| base.join(image).ok())
            .map_or_else(|| image.to_string(), String::from)
    }

    /// Format an amount with the configured currency symbol.
    #[must_use]
    pub fn format_price(&self, price: perfumery_core::Price) -> String {
        format!("{}{price}", self.currency_symbol)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the loading helpers attached.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, using `default` when unset.
    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Load and validate a secret.
    fn validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    // A trailing slash keeps `Url::join` from replacing the last path segment
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the backend."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GOOD_KEY: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.aB3xY9mK2nL5";

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = StorefrontConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".perfumery"));
        assert!(matches!(config.catalog, CatalogSource::Seed));
        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.currency_symbol, "₹");
        assert!(config.asset_base_url.is_none());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config =
            StorefrontConfig::from_vars(vars(&[("PERFUMERY_CATALOG_PATH", "   ")])).unwrap();
        assert!(matches!(config.catalog, CatalogSource::Seed));
    }

    #[test]
    fn test_file_catalog_source() {
        let config =
            StorefrontConfig::from_vars(vars(&[("PERFUMERY_CATALOG_PATH", "data/p.json")]))
                .unwrap();
        match config.catalog {
            CatalogSource::File(path) => assert_eq!(path, PathBuf::from("data/p.json")),
            other => panic!("expected file source, got {other:?}"),
        }
    }

    #[test]
    fn test_backend_wins_over_file() {
        let config = StorefrontConfig::from_vars(vars(&[
            ("PERFUMERY_CATALOG_PATH", "data/p.json"),
            ("PERFUMERY_BACKEND_URL", "https://project.example.co"),
            ("PERFUMERY_BACKEND_ANON_KEY", GOOD_KEY),
        ]))
        .unwrap();
        match config.catalog {
            CatalogSource::Backend(backend) => {
                assert_eq!(backend.url.as_str(), "https://project.example.co/");
                assert_eq!(backend.table, "perfumes");
            }
            other => panic!("expected backend source, got {other:?}"),
        }
    }

    #[test]
    fn test_backend_requires_key() {
        let result = StorefrontConfig::from_vars(vars(&[(
            "PERFUMERY_BACKEND_URL",
            "https://project.example.co",
        )]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(key)) if key == "PERFUMERY_BACKEND_ANON_KEY"));
    }

    #[test]
    fn test_backend_rejects_placeholder_key() {
        let result = StorefrontConfig::from_vars(vars(&[
            ("PERFUMERY_BACKEND_URL", "https://project.example.co"),
            ("PERFUMERY_BACKEND_ANON_KEY", "your-anon-key"),
        ]));
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_invalid_numbers_are_reported() {
        let result =
            StorefrontConfig::from_vars(vars(&[("PERFUMERY_SUGGESTION_LIMIT", "five")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "PERFUMERY_SUGGESTION_LIMIT"));

        let result = StorefrontConfig::from_vars(vars(&[("PERFUMERY_LOW_STOCK_THRESHOLD", "-1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let result = StorefrontConfig::from_vars(vars(&[("PERFUMERY_ASSET_BASE_URL", "not a url")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_image_url_resolution() {
        let config = StorefrontConfig::from_vars(vars(&[(
            "PERFUMERY_ASSET_BASE_URL",
            "https://cdn.example.co/shop",
        )]))
        .unwrap();
        assert_eq!(
            config.image_url("/images/oud.png"),
            "https://cdn.example.co/images/oud.png"
        );
        assert_eq!(
            config.image_url("images/oud.png"),
            "https://cdn.example.co/shop/images/oud.png"
        );
        assert_eq!(
            config.image_url("https://img.example.co/a.png"),
            "https://img.example.co/a.png"
        );

        let bare = StorefrontConfig::default();
        assert_eq!(bare.image_url("/images/oud.png"), "/images/oud.png");
    }

    #[test]
    fn test_format_price_uses_symbol() {
        let config = StorefrontConfig::default();
        assert_eq!(
            config.format_price(perfumery_core::Price::whole(2500)),
            "₹2,500"
        );
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(GOOD_KEY, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_backend_config_debug_redacts_key() {
        let config = BackendConfig {
            url: Url::parse("https://project.example.co/").unwrap(),
            anon_key: SecretString::from("super_private_anon_key"),
            table: "perfumes".to_string(),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("project.example.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_private_anon_key"));
    }
}
