//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog layers.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Keep this focused on the failures the API boundary needs to distinguish:
/// missing records, rejected input, and backend faults. Notifier failures are
/// deliberately absent — they are swallowed inside the notifier and never
/// reach callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A requested product does not exist.
    #[error("product not found")]
    NotFound,

    /// A value failed validation (e.g. blank name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The storage backend failed (pool, SQL, poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
