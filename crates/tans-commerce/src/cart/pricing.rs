//! Order summary calculations.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order summary for the cart page.
///
/// No tax is computed and shipping is always free.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost (always zero).
    pub shipping_total: Money,
    /// Amount the customer pays.
    pub grand_total: Money,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    /// Label for the shipping row ("Free" when nothing is charged).
    pub fn shipping_label(&self) -> String {
        if self.shipping_total.is_zero() {
            "Free".to_string()
        } else {
            self.shipping_total.display()
        }
    }
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity
    pub total: Money,
}
