//! Wishlist commands.

use perfumery_core::ProductId;
use perfumery_storefront::Result;
use perfumery_storefront::wishlist::WishlistToggle;

use crate::context::{Context, find};
use crate::output;

pub fn show(ctx: &Context) {
    output::wishlist(&ctx.config, ctx.session.wishlist());
}

/// Save a catalog product, or remove it if it is already saved.
pub fn toggle(ctx: &mut Context, id: ProductId) -> Result<()> {
    let product = find(&ctx.catalog, id)?;
    let state = match ctx.session.wishlist_mut().add(product) {
        WishlistToggle::Added => "saved",
        WishlistToggle::Removed => "removed",
    };
    output::line(format!("{} {state}", product.name));
    Ok(())
}

/// Remove a product. Works for products no longer in the catalog.
pub fn remove(ctx: &mut Context, id: ProductId) {
    let name = ctx
        .catalog
        .get(id)
        .or_else(|| ctx.session.wishlist().items().iter().find(|p| p.id == id))
        .map_or_else(|| format!("Product {id}"), |p| p.name.clone());

    let remaining = ctx.session.wishlist_mut().remove(id, &name).len();
    output::line(format!("{remaining} saved"));
}

pub fn clear(ctx: &mut Context) {
    ctx.session.wishlist_mut().clear();
}
