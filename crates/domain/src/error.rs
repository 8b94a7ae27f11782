//! Domain error taxonomy.

use store::StoreError;
use thiserror::Error;

/// Errors surfaced by the domain services.
///
/// All of these reach the API boundary untouched; none are retried or
/// recovered from internally.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An entity lookup by id came back empty.
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A stock reservation would take a product's stock below zero.
    #[error("Insufficient stock for product: {name}")]
    InsufficientStock { name: String },

    /// A status change was requested on a cancelled order.
    #[error("{reason}")]
    InvalidTransition { reason: &'static str },

    /// The order is in a state that forbids the requested operation.
    #[error("{reason}")]
    InvalidState { reason: &'static str },

    /// The email is already taken by another customer.
    #[error("Email already exists: {email}")]
    DuplicateEmail { email: String },

    /// A request field failed validation.
    #[error("{field} {constraint}")]
    Validation {
        field: &'static str,
        constraint: &'static str,
    },

    /// Storage gateway failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Builds a [`DomainError::NotFound`] for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience type alias for domain results.
pub type Result<T> = std::result::Result<T, DomainError>;
