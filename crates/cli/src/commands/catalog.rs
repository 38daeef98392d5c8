//! Browsing commands: search, shop listing, product page, catalog stats
//! and the category directory.

use perfumery_core::ProductId;
use perfumery_storefront::catalog::load_categories;
use perfumery_storefront::search::{self, CategoryFilter, ShopQuery, SortKey};
use perfumery_storefront::{AppError, Result};

use crate::context::{Context, find};
use crate::output;

/// Print search suggestions.
pub fn search(ctx: &Context, query: &str, limit: Option<usize>) {
    let limit = limit.unwrap_or(ctx.config.suggestion_limit);
    let results = search::search(ctx.catalog.all(), query, limit);
    output::listing(&ctx.config, &results);
}

/// Print the shop listing.
pub fn shop(ctx: &Context, query: Option<String>, category: &str, sort: &str) -> Result<()> {
    let category: CategoryFilter = category
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;
    let request = ShopQuery {
        query,
        category,
        sort: SortKey::parse(sort),
    };

    let listing = search::shop_listing(ctx.catalog.all(), &request);
    output::line(format!(
        "{} products ({}, sorted by {})",
        listing.len(),
        request.category.as_str(),
        request.sort.as_str()
    ));
    output::listing(&ctx.config, &listing);
    Ok(())
}

/// Print one product and its related products.
pub fn product(ctx: &Context, id: ProductId) -> Result<()> {
    let product = find(&ctx.catalog, id)?;
    output::product_detail(&ctx.config, product);

    let cart = ctx.session.cart();
    if let Some(quantity) = cart.quantity_of(id) {
        output::line(format!("  In cart: {quantity}"));
    }
    if ctx.session.wishlist().contains(id) {
        output::line("  In wishlist");
    }

    let related = ctx.catalog.related(product);
    if !related.is_empty() {
        output::line("");
        output::line("You may also like:");
        output::listing(&ctx.config, &related);
    }
    Ok(())
}

/// Print catalog counts.
pub fn stats(ctx: &Context) {
    let catalog = &ctx.catalog;
    output::line(format!("Products:    {}", catalog.len()));
    for (category, count) in catalog.category_counts() {
        output::line(format!("  {:<9} {count}", category.label()));
    }
    output::line(format!("Featured:    {}", catalog.featured().len()));
    output::line(format!("Bestsellers: {}", catalog.bestsellers().len()));

    let low = catalog.low_stock(ctx.config.low_stock_threshold);
    output::line(format!(
        "Low stock (< {}): {}",
        ctx.config.low_stock_threshold,
        low.len()
    ));
    output::listing(&ctx.config, &low);
}

/// Print the category directory.
pub async fn categories(ctx: &Context) -> Result<()> {
    let directory = load_categories(&ctx.config.catalog, &ctx.catalog).await?;
    if directory.is_empty() {
        output::line("No categories found.");
        return Ok(());
    }
    for record in &directory {
        let count = record
            .product_count
            .map_or_else(|| "-".to_string(), |count| count.to_string());
        output::line(format!("{:<10} {:<8} {count:>4}", record.name, record.slug));
        if let Some(description) = &record.description {
            output::line(format!("  {description}"));
        }
    }
    Ok(())
}
