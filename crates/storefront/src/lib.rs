//! Perfumery storefront library.
//!
//! Catalog loading, the search/filter/sort pipeline, the cart and wishlist
//! containers, theme preference and checkout. Front ends (the CLI, tests)
//! drive everything through a [`session::ShopperSession`] and a
//! [`catalog::ProductCatalog`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod search;
pub mod session;
pub mod storage;
pub mod theme;
pub mod wishlist;

pub use error::{AppError, Result};

#[cfg(test)]
pub(crate) mod fixtures {
    use perfumery_core::{Category, FragranceNotes, Price, Product, ProductId};

    use crate::catalog::{ProductCatalog, seed};

    /// The bundled eight-perfume catalog.
    #[allow(clippy::unwrap_used)]
    pub fn catalog() -> ProductCatalog {
        ProductCatalog::from_records(seed::records().unwrap())
    }

    /// A minimal product for container tests.
    pub fn product(id: i32, name: &str, price: u32, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::whole(price),
            category,
            image: format!("/images/{id}.png"),
            description: format!("{name} eau de parfum"),
            rating: 4.5,
            bestseller: false,
            featured: false,
            notes: FragranceNotes::default(),
            volume: "100ml".to_string(),
            stock: 10,
        }
    }
}
