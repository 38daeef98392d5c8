//! Plain-text rendering of command results on stdout.

#![allow(clippy::print_stdout)]

use std::fmt::Display;

use perfumery_core::Product;
use perfumery_storefront::cart::Cart;
use perfumery_storefront::checkout::{OrderSummary, PlacedOrder};
use perfumery_storefront::config::StorefrontConfig;
use perfumery_storefront::notify::Toast;
use perfumery_storefront::wishlist::Wishlist;

pub fn line(text: impl Display) {
    println!("{text}");
}

pub fn toast(toast: &Toast) {
    println!("* {}: {}", toast.title, toast.description);
}

/// One product per row: id, name, category, price, rating.
pub fn listing(config: &StorefrontConfig, products: &[&Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        println!(
            "{:>4}  {:<20} {:<7} {:>10}  {:.1}",
            product.id.as_i32(),
            product.name,
            product.category.label(),
            config.format_price(product.price),
            product.rating,
        );
    }
}

pub fn product_detail(config: &StorefrontConfig, product: &Product) {
    println!("{} ({})", product.name, product.volume);
    println!("  {}", product.category.label());
    println!("  {}", config.format_price(product.price));
    println!("  Rating {:.1}/5", product.rating);
    println!("  {}", product.description);
    println!("  Image: {}", config.image_url(&product.image));

    let notes = &product.notes;
    for (tier, list) in [("Top", &notes.top), ("Middle", &notes.middle), ("Base", &notes.base)] {
        if !list.is_empty() {
            println!("  {tier} notes: {}", list.join(", "));
        }
    }

    if !product.is_in_stock() {
        println!("  Out of stock");
    } else if product.is_low_stock(config.low_stock_threshold) {
        println!("  Only {} left", product.stock);
    }
}

pub fn cart(config: &StorefrontConfig, cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.lines() {
        println!(
            "{:>4}  {:<20} x{:<3} {:>10}",
            line.id().as_i32(),
            line.product.name,
            line.quantity,
            config.format_price(line.line_total()),
        );
    }
    let summary = OrderSummary::from_cart(cart);
    println!("Items:    {}", cart.item_count());
    println!("Subtotal: {}", config.format_price(summary.subtotal));
    println!("Shipping: {}", summary.shipping_label());
    println!("Total:    {}", config.format_price(summary.total));
}

pub fn wishlist(config: &StorefrontConfig, wishlist: &Wishlist) {
    if wishlist.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    let items: Vec<&Product> = wishlist.items().iter().collect();
    listing(config, &items);
}

pub fn order(config: &StorefrontConfig, order: &PlacedOrder) {
    println!("Order {} ({})", order.reference, order.status);
    println!("  Placed:  {}", order.placed_at.to_rfc3339());
    println!("  For:     {} <{}>", order.customer, order.customer_email);
    println!("  Ship to: {}", order.shipping_address);
    for item in &order.items {
        println!(
            "  {:<20} x{:<3} {:>10}",
            item.name,
            item.quantity,
            config.format_price(item.line_total())
        );
    }
    println!("  Total:   {}", config.format_price(order.total));
}
