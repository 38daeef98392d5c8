//! Catalog loading from the hosted backend, against a mock server.

#![allow(clippy::unwrap_used)]

use perfumery_core::{Category, CategoryId, Price, ProductId};
use perfumery_storefront::catalog::{
    BackendSource, CatalogError, ProductCatalog, load_categories,
};
use perfumery_storefront::config::{BackendConfig, CatalogSource};
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "eyJhbGciOiJIUzI1NiJ9.mock-anon.Qx7";

fn backend_config(server: &MockServer) -> BackendConfig {
    BackendConfig {
        url: Url::parse(&server.uri()).unwrap(),
        anon_key: SecretString::from(ANON_KEY),
        table: "perfumes".to_string(),
    }
}

#[tokio::test]
async fn test_backend_rows_are_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/perfumes"))
        .and(query_param("select", "*"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 3,
                "name": "Noir Essence",
                "price": 2600,
                "category_slug": "men",
                "image": "https://cdn.example.co/noir.png",
                "description": "Dark spices, leather and smoky vetiver",
                "rating": 4.7,
                "bestseller": true,
                "featured": true,
                "notes_top": ["Black Pepper", "Cardamom"],
                "notes_middle": ["Leather", "Iris"],
                "notes_base": ["Vetiver", "Tobacco", "Patchouli"],
                "volume": "100ml",
                "stock": 18,
                "created_at": "2025-10-18T09:00:00Z",
                "updated_at": "2025-10-18T09:00:00Z"
            },
            {
                "id": 6,
                "name": "Oceanic Breeze",
                "price": "1900.00",
                "category_slug": "men",
                "image": null,
                "description": "Aquatic notes and driftwood",
                "rating": 4.5,
                "bestseller": null,
                "featured": null,
                "notes_top": null,
                "notes_middle": null,
                "notes_base": null,
                "volume": "50ml",
                "stock": 30
            },
            {
                "id": 99,
                "name": "Broken Row",
                "price": 100,
                "category_slug": "kids"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = BackendSource::new(&backend_config(&server)).unwrap();
    let catalog = ProductCatalog::load(&source).await.unwrap();

    assert_eq!(catalog.len(), 2);
    let noir = catalog.get(ProductId::new(3)).unwrap();
    assert_eq!(noir.category, Category::Men);
    assert_eq!(noir.notes.base.len(), 3);
    assert!(noir.featured);

    let ocean = catalog.get(ProductId::new(6)).unwrap();
    assert_eq!(ocean.price, Price::whole(1900));
    assert!(!ocean.bestseller);
    assert!(ocean.notes.top.is_empty());
    assert!(catalog.get(ProductId::new(99)).is_none());
}

#[tokio::test]
async fn test_backend_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/perfumes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let result = ProductCatalog::load_configured(&CatalogSource::Backend(backend_config(&server))).await;

    match result {
        Err(CatalogError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_backend_custom_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/fragrances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = backend_config(&server);
    config.table = "fragrances".to_string();
    let catalog = ProductCatalog::load(&BackendSource::new(&config).unwrap())
        .await
        .unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/perfumes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let source = BackendSource::new(&backend_config(&server)).unwrap();
    let result = ProductCatalog::load(&source).await;
    assert!(matches!(result, Err(CatalogError::Http(_))));
}

#[tokio::test]
async fn test_null_name_row_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/perfumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Golden Oud", "price": 2500, "category_slug": "unisex" },
            { "id": 2, "name": null, "price": 2200, "category_slug": "women" },
            { "id": 3, "name": "Noir Essence", "price": 2600, "category": "Men", "category_slug": "men" }
        ])))
        .mount(&server)
        .await;

    let source = BackendSource::new(&backend_config(&server)).unwrap();
    let catalog = ProductCatalog::load(&source).await.unwrap();

    let ids: Vec<i32> = catalog.all().iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_categories_are_fetched_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("select", "*"))
        .and(query_param("order", "name.asc"))
        .and(header("apikey", ANON_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Men", "slug": "men", "description": "Woody and spicy", "product_count": 2 },
            { "id": 3, "name": "Unisex", "slug": "unisex", "description": null, "product_count": 3 },
            { "id": null, "name": "Broken", "slug": "broken" },
            { "id": 2, "name": "Women", "slug": "women", "description": "Floral", "product_count": 3 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = CatalogSource::Backend(backend_config(&server));
    let catalog = ProductCatalog::new(Vec::new());
    let directory = load_categories(&source, &catalog).await.unwrap();

    let slugs: Vec<&str> = directory.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["men", "unisex", "women"]);

    let women = directory.last().unwrap();
    assert_eq!(women.id, CategoryId::new(2));
    assert_eq!(women.category().unwrap(), Category::Women);
    assert_eq!(women.product_count, Some(3));
}

#[tokio::test]
async fn test_categories_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(404).set_body_string("relation does not exist"))
        .mount(&server)
        .await;

    let source = BackendSource::new(&backend_config(&server)).unwrap();
    let result = source.fetch_categories().await;
    assert!(matches!(result, Err(CatalogError::Api { status: 404, .. })));
}
