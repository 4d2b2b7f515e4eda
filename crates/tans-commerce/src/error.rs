//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors raised by the catalog and the cart store.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Two catalog entries share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),

    /// Catalog entry failed validation.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },

    /// Unknown category name.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, u32),

    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
