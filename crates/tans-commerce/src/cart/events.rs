//! Change notifications for cart subscribers.

use crate::ids::ProductId;

/// An effective change to the cart, delivered to every subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added; `quantity` is the line quantity afterwards.
    ItemAdded { product_id: ProductId, quantity: u32 },
    /// A line's quantity was set directly.
    QuantityChanged { product_id: ProductId, quantity: u32 },
    /// A line was removed.
    ItemRemoved { product_id: ProductId },
    /// Every line was removed.
    Cleared,
}

pub(crate) type Listener = Box<dyn FnMut(&CartEvent) + Send>;
