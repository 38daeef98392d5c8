//! Perfumery CLI - browse the catalog and manage a shopper's cart.
//!
//! # Usage
//!
//! ```bash
//! # Search suggestions
//! pf-cli search rose
//!
//! # Shop listing: unisex scents, cheapest first
//! pf-cli shop --category unisex --sort price-low
//!
//! # Add product 1 to the cart, then check out
//! pf-cli cart add 1
//! pf-cli checkout --first-name Asha --last-name Rao --email asha@mail.co \
//!     --phone "+91 98765 43210" --address "12 MG Road" --city Bengaluru \
//!     --postal-code 560001
//! ```
//!
//! # Commands
//!
//! - `search` - Search suggestions
//! - `shop` - Filtered and sorted product listing
//! - `product` - Product details and related products
//! - `cart` - Show and edit the cart
//! - `wishlist` - Show and edit the wishlist
//! - `checkout` - Place an order for the cart
//! - `theme` - Show or change the theme preference
//! - `catalog stats` - Catalog overview
//! - `catalog categories` - Category directory
//!
//! State is kept in `PERFUMERY_DATA_DIR` (default `.perfumery`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use perfumery_core::{ProductId, Theme};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;

use context::Context;

const DEFAULT_LOG_FILTER: &str = "perfumery_storefront=info,perfumery_cli=info";

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(author, version, about = "Perfumery storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show search suggestions for a query
    Search {
        /// Text to search for in names, categories and descriptions
        query: String,

        /// Maximum number of results (default: `PERFUMERY_SUGGESTION_LIMIT`)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List products with optional search, category filter and sort
    Shop {
        /// Text search
        #[arg(short, long)]
        query: Option<String>,

        /// Category (`all`, `men`, `women`, `unisex`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Sort order (`default`, `price-low`, `price-high`, `rating`)
        #[arg(short, long, default_value = "default")]
        sort: String,
    },
    /// Show one product and related products
    Product {
        /// Product ID
        id: ProductId,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Catalog information
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
    /// Set a product's quantity (0 or less removes it)
    Update {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product, or remove it if already saved
    Toggle { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
    /// Remove everything
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme (`light` or `dark`)
    Set { theme: Theme },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Counts per category, featured, bestsellers and low stock
    Stats,
    /// Category directory, ordered by name
    Categories,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    postal_code: String,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::load().await?;

    let result = match cli.command {
        Commands::Search { query, limit } => {
            commands::catalog::search(&ctx, &query, limit);
            Ok(())
        }
        Commands::Shop {
            query,
            category,
            sort,
        } => commands::catalog::shop(&ctx, query, &category, &sort),
        Commands::Product { id } => commands::catalog::product(&ctx, id),
        Commands::Catalog { action } => match action {
            CatalogAction::Stats => {
                commands::catalog::stats(&ctx);
                Ok(())
            }
            CatalogAction::Categories => commands::catalog::categories(&ctx).await,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&ctx);
                Ok(())
            }
            CartAction::Add { id } => commands::cart::add(&mut ctx, id),
            CartAction::Remove { id } => {
                commands::cart::remove(&mut ctx, id);
                Ok(())
            }
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut ctx, id, quantity);
                Ok(())
            }
            CartAction::Clear => {
                commands::cart::clear(&mut ctx);
                Ok(())
            }
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => {
                commands::wishlist::show(&ctx);
                Ok(())
            }
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&mut ctx, id),
            WishlistAction::Remove { id } => {
                commands::wishlist::remove(&mut ctx, id);
                Ok(())
            }
            WishlistAction::Clear => {
                commands::wishlist::clear(&mut ctx);
                Ok(())
            }
        },
        Commands::Checkout(args) => commands::checkout::place(&mut ctx, args.into()),
        Commands::Theme { action } => {
            match action {
                ThemeAction::Show => commands::theme::show(&ctx),
                ThemeAction::Toggle => commands::theme::toggle(&mut ctx),
                ThemeAction::Set { theme } => commands::theme::set(&mut ctx, theme),
            }
            Ok(())
        }
    };

    // Toasts raised before a failure are still worth showing
    ctx.flush_toasts();
    result?;
    Ok(())
}

impl From<CheckoutArgs> for perfumery_storefront::checkout::ShippingForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            postal_code: args.postal_code,
        }
    }
}
