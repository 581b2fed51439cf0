//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
///
/// `Denied` is the only error a caller may recover from (by presenting other
/// scopes). `Configuration` marks a wiring defect and must never be handled as
/// an ordinary denial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The presented scopes do not satisfy any check guarding the operation
    #[error("Not authorized: {0}")]
    Denied(String),

    /// A rule, guard or call site is wired incorrectly
    #[error("Authorization configuration error: {0}")]
    Configuration(String),

    /// The ownership data backing the snapshot could not be loaded
    #[error("Authorization repository error: {0}")]
    Repository(String),
}

impl AuthzError {
    /// Create a denial with the default end-user message
    pub fn denied() -> Self {
        AuthzError::Denied("You are not authorized to perform this operation".to_string())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        AuthzError::Configuration(msg.into())
    }

    /// Create a repository error
    pub fn repository<S: Into<String>>(msg: S) -> Self {
        AuthzError::Repository(msg.into())
    }

    pub fn is_denial(&self) -> bool {
        matches!(self, AuthzError::Denied(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AuthzError::Configuration(_))
    }

    /// HTTP status class the web boundary should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AuthzError::Denied(_) => 401,
            AuthzError::Configuration(_) | AuthzError::Repository(_) => 500,
        }
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
