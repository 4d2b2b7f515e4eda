//! CLI command implementations.

pub mod checkout;
pub mod config;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show this category (e.g. "wedding", "thank you", "all").
    #[arg(short = 'C', long, default_value = "all")]
    pub category: String,

    /// Hide cards that are out of stock.
    #[arg(long)]
    pub in_stock: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Item to order as ID or IDxQTY (e.g. `3x2`). Repeatable.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,

    /// Customer name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Customer email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Customization request.
    #[arg(long)]
    pub note: Option<String>,

    /// Log the order email instead of sending it.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip prompts and confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
