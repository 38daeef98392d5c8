//! Search, filter and sort over the in-memory catalog.
//!
//! Everything here is a pure function of the product slice and the request.
//! Matching is a case-insensitive substring test against name, category and
//! description. There is no relevance ranking: results keep catalog order
//! unless an explicit sort key is chosen, and every sort is stable.

use std::str::FromStr;

use perfumery_core::{Category, CategoryError, Product};

/// Result cap for the live-typing suggestion dropdown.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A trimmed, lowercased, non-empty search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize raw input. Returns `None` for empty or whitespace-only
    /// input, which means "no active search".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// The normalized query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the product's name, category or description contains the query.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.0.as_str();
        product.name.to_lowercase().contains(needle)
            || product.category.slug().contains(needle)
            || product.description.to_lowercase().contains(needle)
    }
}

/// Products matching `query`, in catalog order, at most `limit` of them.
///
/// An empty or whitespace-only query yields no results.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str, limit: usize) -> Vec<&'a Product> {
    let Some(query) = SearchQuery::parse(query) else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|product| query.matches(product))
        .take(limit)
        .collect()
}

/// Suggestions for the search dropdown.
#[must_use]
pub fn suggestions<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    search(products, query, DEFAULT_SUGGESTION_LIMIT)
}

/// Category selector for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filtering.
    #[default]
    All,
    /// Only products of this category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether the filter lets `product` through.
    #[must_use]
    pub fn admits(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }

    /// Value for display and URLs: `all` or a category slug.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.slug(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Listing sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// Parse from a request value. Unknown values fall back to `Default`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "price-low" | "price-ascending" => Self::PriceAsc,
            "price-high" | "price-descending" => Self::PriceDesc,
            "rating" => Self::Rating,
            _ => Self::Default,
        }
    }

    /// Convert to a request value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-low",
            Self::PriceDesc => "price-high",
            Self::Rating => "rating",
        }
    }
}

/// Stable in-place sort of a listing.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Default => {}
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

/// Parameters of the shop listing page.
#[derive(Debug, Clone, Default)]
pub struct ShopQuery {
    /// Free-text query; `None` or blank means no search.
    pub query: Option<String>,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl ShopQuery {
    /// The normalized query, if a search is active.
    #[must_use]
    pub fn search_query(&self) -> Option<SearchQuery> {
        self.query.as_deref().and_then(SearchQuery::parse)
    }
}

/// The shop listing: text search (uncapped) AND category filter, then sort.
#[must_use]
pub fn shop_listing<'a>(products: &'a [Product], request: &ShopQuery) -> Vec<&'a Product> {
    let mut listing: Vec<&Product> = match request.search_query() {
        Some(query) => products
            .iter()
            .filter(|p| query.matches(p) && request.category.admits(p))
            .collect(),
        None => products
            .iter()
            .filter(|p| request.category.admits(p))
            .collect(),
    };
    sort_products(&mut listing, request.sort);
    listing
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use perfumery_core::{Price, ProductId};

    use super::*;
    use crate::fixtures;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let catalog = fixtures::catalog();
        assert!(search(catalog.all(), "", 10).is_empty());
        assert!(search(catalog.all(), "   \t", 10).is_empty());
        assert!(SearchQuery::parse("  ").is_none());
    }

    #[test]
    fn test_rose_finds_velvet_rose() {
        let catalog = fixtures::catalog();
        let results = search(catalog.all(), "rose", 10);
        assert!(results.iter().any(|p| p.name == "Velvet Rose"));
        assert!(search(catalog.all(), "zzz", 10).is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive_across_fields() {
        let catalog = fixtures::catalog();
        // name
        assert_eq!(ids(&search(catalog.all(), "  NOIR ", 10)), vec![3, 7]);
        // category
        assert_eq!(ids(&search(catalog.all(), "Men", 10)), vec![2, 3, 5, 6, 7]);
        // description only
        assert_eq!(ids(&search(catalog.all(), "driftwood", 10)), vec![6]);
    }

    #[test]
    fn test_every_result_matches_and_limit_holds() {
        let catalog = fixtures::catalog();
        for query in ["a", "wood", "amber", "e"] {
            for limit in [0, 1, 3, 100] {
                let results = search(catalog.all(), query, limit);
                assert!(results.len() <= limit);
                let q = SearchQuery::parse(query).unwrap();
                assert!(results.iter().all(|p| q.matches(p)));
            }
        }
    }

    #[test]
    fn test_results_preserve_catalog_order() {
        let catalog = fixtures::catalog();
        let results = ids(&search(catalog.all(), "a", 100));
        let mut sorted = results.clone();
        sorted.sort_unstable();
        assert_eq!(results, sorted);
    }

    #[test]
    fn test_suggestions_cap_at_five() {
        let catalog = fixtures::catalog();
        let results = suggestions(catalog.all(), "a");
        assert_eq!(results.len(), DEFAULT_SUGGESTION_LIMIT);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Women".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Women)
        );
        assert!("kids".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::Only(Category::Men).as_str(), "men");
    }

    #[test]
    fn test_sort_key_parse_round_trip() {
        for key in [
            SortKey::Default,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::Rating,
        ] {
            assert_eq!(SortKey::parse(key.as_str()), key);
        }
        assert_eq!(SortKey::parse("newest"), SortKey::Default);
    }

    #[test]
    fn test_price_sort_is_ascending_and_stable() {
        let a = fixtures::product(1, "Alpha", 100, Category::Men);
        let b = fixtures::product(2, "Bravo", 50, Category::Men);
        let c = fixtures::product(3, "Charlie", 100, Category::Men);
        let d = fixtures::product(4, "Delta", 50, Category::Men);
        let products = [a, b, c, d];

        let mut listing: Vec<&Product> = products.iter().collect();
        sort_products(&mut listing, SortKey::PriceAsc);
        assert_eq!(ids(&listing), vec![2, 4, 1, 3]);
        assert!(listing.windows(2).all(|w| match w {
            [x, y] => x.price <= y.price,
            _ => true,
        }));

        sort_products(&mut listing, SortKey::PriceDesc);
        assert_eq!(ids(&listing), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_rating_sort_descending_stable() {
        let catalog = fixtures::catalog();
        let mut listing: Vec<&Product> = catalog.all().iter().collect();
        sort_products(&mut listing, SortKey::Rating);
        // 4.9, 4.8 (1 before 5), 4.7 (3 before 7), 4.6 (4 before 8), 4.5
        assert_eq!(ids(&listing), vec![2, 1, 5, 3, 7, 4, 8, 6]);
    }

    #[test]
    fn test_default_sort_keeps_order() {
        let catalog = fixtures::catalog();
        let listing = shop_listing(catalog.all(), &ShopQuery::default());
        assert_eq!(ids(&listing), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_shop_listing_combines_search_and_category() {
        let catalog = fixtures::catalog();
        let request = ShopQuery {
            query: Some("amber".to_string()),
            category: CategoryFilter::Only(Category::Women),
            sort: SortKey::Default,
        };
        // "amber" matches 1 (unisex) and 5 (women); only 5 survives
        assert_eq!(ids(&shop_listing(catalog.all(), &request)), vec![5]);
    }

    #[test]
    fn test_shop_listing_search_is_uncapped() {
        let catalog = fixtures::catalog();
        let request = ShopQuery {
            query: Some("a".to_string()),
            ..ShopQuery::default()
        };
        assert!(shop_listing(catalog.all(), &request).len() > DEFAULT_SUGGESTION_LIMIT);
    }

    #[test]
    fn test_shop_listing_category_then_price_sort() {
        let catalog = fixtures::catalog();
        let request = ShopQuery {
            query: Some("   ".to_string()),
            category: CategoryFilter::Only(Category::Unisex),
            sort: SortKey::PriceAsc,
        };
        let listing = shop_listing(catalog.all(), &request);
        assert_eq!(ids(&listing), vec![4, 8, 1]);
        assert_eq!(
            listing.first().map(|p| p.price),
            Some(Price::whole(1800))
        );
    }

    #[test]
    fn test_empty_result_is_valid() {
        let catalog = fixtures::catalog();
        let request = ShopQuery {
            query: Some("oud".to_string()),
            category: CategoryFilter::Only(Category::Men),
            sort: SortKey::Rating,
        };
        assert!(shop_listing(catalog.all(), &request).is_empty());
        assert!(catalog.get(ProductId::new(99)).is_none());
    }
}
