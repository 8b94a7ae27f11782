//! Storage error types.

use common::ProductId;
use thiserror::Error;

use crate::status::InvalidStatus;

/// Errors surfaced by storage gateway implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A delete was refused because orders still reference the record.
    #[error("{entity} is still referenced by existing orders")]
    ForeignKey { entity: &'static str },

    /// A unique constraint was violated.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A stock adjustment would have taken a product's stock below zero.
    ///
    /// The lifecycle engine validates stock before committing; this fires
    /// only when a concurrent writer drained the stock in between.
    #[error("stock adjustment would take product {product_id} below zero")]
    NegativeStock { product_id: ProductId },

    /// A stock adjustment referenced a product that no longer exists.
    #[error("product {product_id} does not exist")]
    MissingProduct { product_id: ProductId },

    /// A stored status column held an unknown token.
    #[error(transparent)]
    Status(#[from] InvalidStatus),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for storage results.
pub type Result<T> = std::result::Result<T, StoreError>;
