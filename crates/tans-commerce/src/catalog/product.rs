//! Product types.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Highest accepted unit price, in minor units (1,000,000.00).
///
/// With quantities capped per line, a cart total stays well inside `i64`.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;

/// A card in the catalog. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Description shown on cards and the detail view.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Primary image reference.
    pub image: String,
    /// Gallery images; never empty.
    pub images: Vec<String>,
    /// Category.
    pub category: Category,
    /// Whether the card can currently be ordered.
    pub in_stock: bool,
}

impl Product {
    /// Create an in-stock product whose gallery is just the primary image.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        category: Category,
    ) -> Self {
        let image = image.into();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            images: vec![image.clone()],
            image,
            category,
            in_stock: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the gallery. The primary image is left as is.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Check the record invariants the catalog relies on.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            id: self.id,
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.images.is_empty() {
            return Err(invalid("at least one image is required"));
        }
        if self.price.amount_cents < 0 {
            return Err(invalid("price is negative"));
        }
        if self.price.amount_cents > MAX_UNIT_PRICE_CENTS {
            return Err(invalid("price is above the supported maximum"));
        }
        Ok(())
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.in_stock
    }
}

/// On-disk product record, in the shape of the storefront's data file
/// (decimal `price`, camelCase `inStock`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl ProductRecord {
    /// A record without `images` gets a gallery of just its primary image.
    pub(crate) fn into_product(self, currency: Currency) -> Product {
        let images = if self.images.is_empty() {
            vec![self.image.clone()]
        } else {
            self.images
        };
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::from_decimal(self.price, currency),
            image: self.image,
            images,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Product {
        Product::new(
            ProductId::new(1),
            "Elegant Wedding Invitation",
            Money::new(2499, Currency::USD),
            "/images/wedding.jpg",
            Category::Wedding,
        )
    }

    #[test]
    fn test_product_creation() {
        let product = card();
        assert_eq!(product.images, vec!["/images/wedding.jpg".to_string()]);
        assert!(product.is_available());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_gallery() {
        let product = card().with_images(Vec::new());
        assert!(matches!(
            product.validate(),
            Err(CommerceError::InvalidProduct { .. })
        ));
    }

    #[test]
    fn test_record_conversion() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": 4, "name": "Thank You Card Set", "price": 18.99,
                "image": "a.jpg", "images": ["a.jpg", "b.jpg"],
                "category": "Thank You", "inStock": false}"#,
        )
        .unwrap();
        let product = record.into_product(Currency::USD);
        assert_eq!(product.price.amount_cents, 1899);
        assert_eq!(product.category, Category::ThankYou);
        assert!(!product.in_stock);
        assert_eq!(product.images.len(), 2);
    }

    #[test]
    fn test_validate_bounds_price() {
        let at_max = Product {
            price: Money::new(MAX_UNIT_PRICE_CENTS, Currency::USD),
            ..card()
        };
        assert!(at_max.validate().is_ok());

        let over = Product {
            price: Money::new(MAX_UNIT_PRICE_CENTS + 1, Currency::USD),
            ..card()
        };
        let Err(CommerceError::InvalidProduct { reason, .. }) = over.validate() else {
            panic!("expected an oversized price to be rejected");
        };
        assert!(reason.contains("maximum"));
    }

    #[test]
    fn test_record_without_gallery_uses_primary_image() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": 7, "name": "Baby Shower Card", "price": 6.5,
                "image": "baby.jpg", "category": "Baby Shower"}"#,
        )
        .unwrap();
        let product = record.into_product(Currency::USD);
        assert_eq!(product.images, vec!["baby.jpg".to_string()]);
        assert!(product.in_stock);
        assert!(product.validate().is_ok());
    }
}
