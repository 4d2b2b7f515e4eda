//! Product catalog module.
//!
//! Contains the card records, their categories and the read-only catalog.

mod category;
mod product;
mod seed;
mod store;

pub use category::{Category, CategoryFilter};
pub use product::{Product, MAX_UNIT_PRICE_CENTS};
pub use store::Catalog;
