//! Theme commands.

use perfumery_core::Theme;

use crate::context::Context;
use crate::output;

pub fn show(ctx: &Context) {
    output::line(ctx.session.theme().current());
}

pub fn toggle(ctx: &mut Context) {
    let theme = ctx.session.theme_mut().toggle();
    output::line(format!("Theme set to {theme}"));
}

pub fn set(ctx: &mut Context, theme: Theme) {
    ctx.session.theme_mut().set(theme);
    output::line(format!("Theme set to {theme}"));
}
