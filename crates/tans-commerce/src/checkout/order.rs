//! Order submission built at checkout time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartStore};
use crate::checkout::ValidContact;
use crate::money::Money;

/// Everything sent for one checkout attempt.
///
/// Built when the customer presses submit and dropped once the delivery call
/// resolves, whatever the outcome. It is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSubmission {
    /// Client-generated reference, e.g. "ORD-1736260200".
    pub reference: String,
    /// Snapshot of the cart lines, in cart order.
    pub lines: Vec<CartLine>,
    /// Sum of line totals.
    pub total: Money,
    /// Validated customer details.
    pub contact: ValidContact,
    /// When the customer submitted.
    pub placed_at: DateTime<Utc>,
}

impl OrderSubmission {
    pub fn new(cart: &CartStore, contact: ValidContact, placed_at: DateTime<Utc>) -> Self {
        Self {
            reference: format!("ORD-{}", placed_at.timestamp()),
            lines: cart.lines().to_vec(),
            total: cart.total_price(),
            contact,
            placed_at,
        }
    }

    /// Total number of cards ordered.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
