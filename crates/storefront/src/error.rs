//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends that drive the
//! storefront. Module operations return their own error types; `AppError`
//! collects them so callers can use `?` across modules.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Product data could not be fetched.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Order could not be placed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error was caused by caller input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Checkout(_) | Self::NotFound(_) | Self::BadRequest(_)
        )
    }
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = AppError::NotFound("product 42".to_string());
        assert_eq!(err.to_string(), "Not found: product 42");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_from_checkout_error() {
        let err: AppError = CheckoutError::EmptyCart.into();
        assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_config_error_is_not_user_error() {
        let err: AppError = ConfigError::MissingEnvVar("PERFUMERY_BACKEND_ANON_KEY".to_string()).into();
        assert!(!err.is_user_error());
        assert!(err.to_string().contains("PERFUMERY_BACKEND_ANON_KEY"));
    }
}
