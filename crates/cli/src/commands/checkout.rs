//! Checkout command.

use perfumery_storefront::Result;
use perfumery_storefront::checkout::{ShippingForm, place_order};

use crate::context::Context;
use crate::output;

/// Place an order for the cart and print the receipt.
pub fn place(ctx: &mut Context, form: ShippingForm) -> Result<()> {
    let order = place_order(ctx.session.cart_mut(), form)?;
    output::order(&ctx.config, &order);
    Ok(())
}
