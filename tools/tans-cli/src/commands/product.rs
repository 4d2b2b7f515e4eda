//! Show one card in detail.

use anyhow::{Context as _, Result};
use tans_commerce::ids::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{category_badge, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id: ProductId = args
        .id
        .parse()
        .with_context(|| format!("'{}' is not a product ID", args.id))?;
    let product = ctx.catalog.require(id)?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Category", &category_badge(product.category));
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Stock", &stock_badge(product.in_stock));

    if !product.description.is_empty() {
        ctx.output.blank();
        ctx.output.info(&product.description);
    }

    ctx.output.blank();
    ctx.output.info("Photos:");
    for image in &product.images {
        ctx.output.list_item(image);
    }

    Ok(())
}
