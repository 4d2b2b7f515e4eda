//! Browse the catalog.

use anyhow::{Context as _, Result};
use serde::Serialize;
use tans_commerce::catalog::{CategoryFilter, Product};

use super::ProductsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ProductRow<'a> {
    id: u32,
    name: &'a str,
    category: &'a str,
    price: String,
    in_stock: bool,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            id: p.id.get(),
            name: &p.name,
            category: p.category.as_str(),
            price: p.price.display(),
            in_stock: p.in_stock,
        }
    }
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let filter: CategoryFilter = args
        .category
        .parse()
        .with_context(|| format!("Unknown category '{}'", args.category))?;

    let products: Vec<&Product> = ctx
        .catalog
        .filter(filter)
        .into_iter()
        .filter(|p| !args.in_stock || p.is_available())
        .collect();

    if ctx.output.is_json() {
        let rows: Vec<ProductRow> = products.iter().map(|p| ProductRow::from(*p)).collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!("Cards - {}", filter.label()));

    if products.is_empty() {
        ctx.output.info("No cards in this category");
        return Ok(());
    }

    let widths = [4, 28, 14, 10, 12];
    ctx.output
        .table_row(&["ID", "Name", "Category", "Price", "Stock"], &widths);
    for product in &products {
        let id = product.id.to_string();
        let price = product.price.display();
        let stock = if product.in_stock { "in stock" } else { "sold out" };
        ctx.output.table_row(
            &[&id, &product.name, product.category.as_str(), &price, stock],
            &widths,
        );
    }

    ctx.output.blank();
    let categories: Vec<&str> = ctx.catalog.categories().iter().map(|c| c.as_str()).collect();
    ctx.output.kv("Categories", &format!("All, {}", categories.join(", ")));

    Ok(())
}
