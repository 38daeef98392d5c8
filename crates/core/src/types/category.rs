//! Fragrance categories.
//!
//! The canonical form of a category is its lowercase slug (`men`, `women`,
//! `unisex`). Input in any casing is accepted and normalized, which lets
//! records with capitalized labels (`"Men"`) and slugged records (`"men"`)
//! flow through the same code.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when a string does not name a known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Unisex,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Men, Self::Women, Self::Unisex];

    /// Lowercase slug used for storage and comparison.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Unisex => "unisex",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Unisex => "Unisex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "unisex" => Ok(Self::Unisex),
            _ => Err(CategoryError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
