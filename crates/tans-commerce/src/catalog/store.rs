//! The product catalog: a fixed, insertion-ordered list of cards.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::product::ProductRecord;
use crate::catalog::{seed, Category, CategoryFilter, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Read-only product catalog.
///
/// Lookups are linear scans; the catalog holds a handful of cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product and id uniqueness.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(CommerceError::DuplicateProduct(product.id));
            }
        }
        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// The store's own card range, priced in USD.
    pub fn builtin() -> Self {
        Self::builtin_in(Currency::USD)
    }

    /// The store's own card range, priced in `currency`.
    pub fn builtin_in(currency: Currency) -> Self {
        Self {
            products: seed::products(currency),
        }
    }

    /// Parse a JSON array of product records.
    pub fn from_json_str(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Self::new(
            records
                .into_iter()
                .map(|r| r.into_product(currency))
                .collect(),
        )
    }

    /// Load a JSON catalog file.
    pub fn load(path: impl AsRef<Path>, currency: Currency) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CommerceError::CatalogIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content, currency)
    }

    /// All products in insertion order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products of one category, in insertion order.
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.filter(CategoryFilter::Only(category))
    }

    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::get`], but a miss is an error.
    pub fn require(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id).ok_or(CommerceError::ProductNotFound(id))
    }

    /// Distinct categories present, in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for product in &self.products {
            if !out.contains(&product.category) {
                out.push(product.category);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
