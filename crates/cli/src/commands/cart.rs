//! Cart commands.

use perfumery_core::ProductId;
use perfumery_storefront::Result;
use perfumery_storefront::cart::AddOutcome;
use tracing::debug;

use crate::context::{Context, find};
use crate::output;

pub fn show(ctx: &Context) {
    output::cart(&ctx.config, ctx.session.cart());
}

/// Add one unit of a catalog product.
pub fn add(ctx: &mut Context, id: ProductId) -> Result<()> {
    let product = find(&ctx.catalog, id)?;
    let outcome = ctx.session.cart_mut().add(product);
    if let AddOutcome::Incremented { quantity } = outcome {
        debug!(%id, %quantity, "Cart line incremented");
    }
    output::cart(&ctx.config, ctx.session.cart());
    Ok(())
}

pub fn remove(ctx: &mut Context, id: ProductId) {
    ctx.session.cart_mut().remove(id);
    output::cart(&ctx.config, ctx.session.cart());
}

pub fn update(ctx: &mut Context, id: ProductId, quantity: i64) {
    ctx.session.cart_mut().update_quantity(id, quantity);
    output::cart(&ctx.config, ctx.session.cart());
}

pub fn clear(ctx: &mut Context) {
    ctx.session.cart_mut().clear();
}
