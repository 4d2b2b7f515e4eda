//! Cart store and cart line types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::events::{CartEvent, Listener};
use crate::cart::{CartPricing, LinePricing};
use crate::catalog::{Category, Product};
use crate::error::CommerceError;
use crate::ids::{ProductId, SubscriptionId};
use crate::money::{Currency, Money};

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// One product-quantity pair in the cart.
///
/// Display fields are copied from the product when it is first added, so the
/// line renders the same even if the catalog changes later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: String,
    pub category: Category,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity: 1,
        }
    }

    /// unit_price * quantity
    ///
    /// Exact for catalog products, whose prices are bounded by
    /// [`MAX_UNIT_PRICE_CENTS`](crate::catalog::MAX_UNIT_PRICE_CENTS). An overflow is logged and the total pinned
    /// at the largest representable amount.
    pub fn line_total(&self) -> Money {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .unwrap_or_else(|| {
                tracing::error!(product = %self.product_id, "line total overflows");
                Money::new(i64::MAX, self.unit_price.currency)
            })
    }
}

/// The shopping cart for one browsing session.
///
/// Owned by whoever drives the session and passed by reference to the
/// checkout flow. Dropping it ends the session; nothing is persisted.
pub struct CartStore {
    lines: Vec<CartLine>,
    currency: Currency,
    notification_pending: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            notification_pending: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line if there is one, otherwise appends a new
    /// line with quantity 1. Always raises the "just added" notification.
    pub fn add_item(&mut self, product: &Product) {
        self.notification_pending = true;

        let quantity = match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                if line.quantity >= MAX_QUANTITY_PER_ITEM {
                    tracing::warn!(
                        product_id = %product.id,
                        max = MAX_QUANTITY_PER_ITEM,
                        "line already at maximum quantity"
                    );
                    return;
                }
                line.quantity += 1;
                line.quantity
            }
            None => {
                self.lines.push(CartLine::from_product(product));
                1
            }
        };

        tracing::debug!(product_id = %product.id, quantity, "item added to cart");
        self.emit(CartEvent::ItemAdded {
            product_id: product.id,
            quantity,
        });
    }

    /// Remove a line. Returns false (and changes nothing) if it was not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(%product_id, "item removed from cart");
            self.emit(CartEvent::ItemRemoved { product_id });
        }
        removed
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// for `product_id` existed.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if !self.contains(product_id) {
            return Ok(false);
        }

        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_QUANTITY_PER_ITEM)
            .ok_or(CommerceError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_ITEM))?;

        let mut changed = false;
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            changed = line.quantity != quantity;
            line.quantity = quantity;
        }
        if changed {
            tracing::debug!(%product_id, quantity, "cart quantity updated");
            self.emit(CartEvent::QuantityChanged {
                product_id,
                quantity,
            });
        }
        Ok(true)
    }

    /// The "+" control.
    pub fn increment(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        let Some(quantity) = self.line(product_id).map(|l| l.quantity) else {
            return Ok(false);
        };
        self.update_quantity(product_id, i64::from(quantity) + 1)
    }

    /// The "-" control. Decrementing a line at quantity 1 removes it.
    pub fn decrement(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        let Some(quantity) = self.line(product_id).map(|l| l.quantity) else {
            return Ok(false);
        };
        self.update_quantity(product_id, i64::from(quantity) - 1)
    }

    /// Empty the cart and drop any pending notification.
    pub fn clear(&mut self) {
        self.notification_pending = false;
        if self.lines.is_empty() {
            return;
        }
        self.lines.clear();
        tracing::debug!("cart cleared");
        self.emit(CartEvent::Cleared);
    }

    /// Sum of quantities across all lines (the header badge count).
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of unit_price * quantity across all lines.
    pub fn total_price(&self) -> Money {
        let totals: Vec<Money> = self.lines.iter().map(CartLine::line_total).collect();
        Money::try_sum(totals.iter(), self.currency).unwrap_or_else(|| {
            tracing::error!(lines = self.lines.len(), "cart total overflows");
            Money::new(i64::MAX, self.currency)
        })
    }

    /// Order summary with per-line totals.
    pub fn pricing(&self) -> CartPricing {
        let subtotal = self.total_price();
        CartPricing {
            subtotal,
            shipping_total: Money::zero(self.currency),
            grand_total: subtotal,
            lines: self
                .lines
                .iter()
                .map(|l| LinePricing {
                    product_id: l.product_id,
                    name: l.name.clone(),
                    unit_price: l.unit_price,
                    quantity: l.quantity,
                    total: l.line_total(),
                })
                .collect(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Whether an add-to-cart notification is waiting to be shown.
    pub fn notification_pending(&self) -> bool {
        self.notification_pending
    }

    /// Read and reset the notification flag.
    pub fn take_notification(&mut self) -> bool {
        std::mem::take(&mut self.notification_pending)
    }

    /// Headline for the add-to-cart notification.
    pub fn notification_title(&self) -> String {
        match self.lines.len() {
            1 => "Item Added!".to_string(),
            n => format!("{n} Items in Cart"),
        }
    }

    /// Register a listener called after every effective change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    fn emit(&mut self, event: CartEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("currency", &self.currency)
            .field("notification_pending", &self.notification_pending)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn card(id: u32, price_cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Card {id}"),
            Money::new(price_cents, Currency::USD),
            format!("/images/{id}.jpg"),
            Category::Birthday,
        )
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartStore::new(Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::zero(Currency::USD));
        assert!(!cart.notification_pending());
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = CartStore::new(Currency::USD);
        let product = card(1, 2499);

        cart.add_item(&product);
        cart.add_item(&product);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(product.id).unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_snapshot_survives_catalog_change() {
        let mut cart = CartStore::new(Currency::USD);
        let mut product = card(1, 2499);
        cart.add_item(&product);

        product.name = "Renamed".to_string();
        product.price = Money::new(9999, Currency::USD);
        cart.add_item(&product);

        let line = cart.line(product.id).unwrap();
        assert_eq!(line.name, "Card 1");
        assert_eq!(line.unit_price.amount_cents, 2499);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = CartStore::new(Currency::USD);
        let product = card(1, 1000);
        cart.add_item(&product);

        assert!(cart.update_quantity(product.id, 5).unwrap());
        assert_eq!(cart.total_items(), 5);

        assert!(!cart.update_quantity(ProductId::new(42), 3).unwrap());
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes_line() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_item(&card(1, 1000));
        cart.add_item(&card(2, 1000));

        assert!(cart.update_quantity(ProductId::new(1), 0).unwrap());
        assert!(cart.update_quantity(ProductId::new(2), -3).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_limit() {
        let mut cart = CartStore::new(Currency::USD);
        let product = card(1, 1000);
        cart.add_item(&product);

        let result = cart.update_quantity(product.id, i64::from(MAX_QUANTITY_PER_ITEM) + 1);
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(..))));
        assert_eq!(cart.line(product.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = CartStore::new(Currency::USD);
        let product = card(1, 1000);
        cart.add_item(&product);

        cart.increment(product.id).unwrap();
        assert_eq!(cart.line(product.id).unwrap().quantity, 2);

        cart.decrement(product.id).unwrap();
        cart.decrement(product.id).unwrap();
        assert!(!cart.contains(product.id));
        assert!(!cart.decrement(product.id).unwrap());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_item(&card(1, 1000));

        assert!(!cart.remove_item(ProductId::new(7)));
        assert_eq!(cart.line_count(), 1);
        assert!(cart.remove_item(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pricing() {
        let mut cart = CartStore::new(Currency::USD);
        let a = card(1, 34900);
        let b = card(2, 19900);
        cart.add_item(&a);
        cart.add_item(&b);
        cart.add_item(&b);

        let pricing = cart.pricing();
        assert_eq!(pricing.subtotal.amount_cents, 74700);
        assert_eq!(pricing.grand_total.amount_cents, 74700);
        assert_eq!(pricing.lines[1].total.amount_cents, 39800);
        assert_eq!(pricing.shipping_label(), "Free");
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_totals_are_exact_at_the_price_ceiling() {
        let max = crate::catalog::MAX_UNIT_PRICE_CENTS;
        let mut cart = CartStore::new(Currency::USD);
        let a = card(1, max);
        let b = card(2, max);
        cart.add_item(&a);
        cart.add_item(&b);
        cart.update_quantity(a.id, i64::from(MAX_QUANTITY_PER_ITEM)).unwrap();
        cart.update_quantity(b.id, i64::from(MAX_QUANTITY_PER_ITEM)).unwrap();

        let line = max * i64::from(MAX_QUANTITY_PER_ITEM);
        assert_eq!(cart.line(a.id).unwrap().line_total().amount_cents, line);
        assert_eq!(cart.total_price().amount_cents, 2 * line);
        assert_eq!(cart.pricing().grand_total.amount_cents, 2 * line);
    }

    #[test]
    fn test_clear_resets_notification() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_item(&card(1, 1000));
        assert!(cart.notification_pending());

        cart.clear();
        assert!(cart.is_empty());
        assert!(!cart.notification_pending());
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_take_notification() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_item(&card(1, 1000));
        assert_eq!(cart.notification_title(), "Item Added!");

        assert!(cart.take_notification());
        assert!(!cart.take_notification());

        cart.add_item(&card(2, 1000));
        assert_eq!(cart.notification_title(), "2 Items in Cart");
    }

    #[test]
    fn test_subscribers_see_effective_changes_only() {
        let mut cart = CartStore::new(Currency::USD);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = cart.subscribe(move |event| sink.lock().unwrap().push(*event));

        let product = card(1, 1000);
        cart.add_item(&product);
        cart.update_quantity(product.id, 1).unwrap(); // unchanged
        cart.remove_item(ProductId::new(9)); // absent
        cart.update_quantity(product.id, 3).unwrap();
        cart.clear();
        cart.clear(); // already empty

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CartEvent::ItemAdded { product_id: product.id, quantity: 1 },
                CartEvent::QuantityChanged { product_id: product.id, quantity: 3 },
                CartEvent::Cleared,
            ]
        );

        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));
        cart.add_item(&product);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }
}
