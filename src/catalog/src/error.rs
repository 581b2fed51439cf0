//! Error types for the catalog services

use catalog_authz::AuthzError;
use thiserror::Error;

/// Catalog service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The referenced team, product, contract or service is not stored
    #[error("Object does not exist: {0}")]
    ObjectDoesNotExist(String),

    /// The request is well-formed but not allowed, e.g. supplying an id
    #[error("Illegal operation: {0}")]
    IllegalOperation(String),

    /// Submitted data does not describe a valid object
    #[error("Validation error: {0}")]
    Validation(String),

    /// Denials and authorization wiring defects, unchanged
    #[error(transparent)]
    Authorization(#[from] AuthzError),
}

impl CatalogError {
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CatalogError::ObjectDoesNotExist(msg.into())
    }

    pub fn illegal<S: Into<String>>(msg: S) -> Self {
        CatalogError::IllegalOperation(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        CatalogError::Validation(msg.into())
    }

    /// Whether the caller was denied by a guard
    pub fn is_denial(&self) -> bool {
        matches!(self, CatalogError::Authorization(e) if e.is_denial())
    }

    /// HTTP status the web boundary should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::ObjectDoesNotExist(_) => 404,
            CatalogError::IllegalOperation(_) | CatalogError::Validation(_) => 400,
            CatalogError::Authorization(e) => e.status_code(),
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
