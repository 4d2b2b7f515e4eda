//! Shopping cart module.
//!
//! Contains the cart store, its lines, change events and the order summary.

mod cart;
mod events;
mod pricing;

pub use cart::{CartLine, CartStore, MAX_QUANTITY_PER_ITEM};
pub use events::CartEvent;
pub use pricing::{CartPricing, LinePricing};
