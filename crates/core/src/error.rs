//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// uniqueness, lookups). Persistence concerns belong elsewhere.
///
/// Display strings double as the user-facing messages of the menu program,
/// which is why they are in Spanish.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (blank name, negative quantity/price).
    #[error("{0}")]
    Validation(String),

    /// An `add` collided with an already-registered product id.
    #[error("ya existe un producto con ID '{0}'")]
    DuplicateId(String),

    /// A `remove`/`update` referenced an unknown product id.
    #[error("no existe producto con ID '{0}'")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}
