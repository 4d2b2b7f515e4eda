//! Domain types and logic for the TansGallery card storefront.
//!
//! - **Catalog**: the product range, categories and filtering
//! - **Cart**: the session cart store with change notifications
//! - **Checkout**: contact validation, order submission, post-order clear
//! - **Delivery**: order emails via EmailJS
//!
//! # Example
//!
//! ```rust
//! use tans_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let mut cart = CartStore::new(Currency::USD);
//! cart.add_item(catalog.require(ProductId::new(1)).unwrap());
//! cart.add_item(catalog.require(ProductId::new(1)).unwrap());
//!
//! assert_eq!(cart.total_items(), 2);
//! println!("Total: {}", cart.total_price());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod delivery;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, CategoryFilter, Product};

    // Cart
    pub use crate::cart::{CartEvent, CartLine, CartPricing, CartStore, MAX_QUANTITY_PER_ITEM};

    // Checkout
    pub use crate::checkout::{
        CheckoutError, CheckoutFlow, CheckoutOutcome, CheckoutState, ContactForm, OrderSubmission,
        ValidationErrors,
    };

    // Delivery
    pub use crate::delivery::{
        DeliveryError, DeliveryErrorKind, DeliveryService, DryRunDelivery, EmailJsClient, OrderEmail,
    };

    pub use crate::config::StorefrontConfig;
}
