//! Core authorization types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team identifier
pub type TeamId = i64;

/// Product identifier
pub type ProductId = i64;

/// Field name of a partial update
pub type FieldName = String;

/// Coarse authorization category derived from presented scopes
///
/// A role is never stored on a caller; it is recomputed for every decision
/// from the scopes the caller presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Holder of the process-wide admin scope
    Admin,
    /// Holder of a team scope
    TeamMember,
    /// Caller without standing
    Anonymous,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::TeamMember => "team_member",
            Role::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a decision primitive
///
/// Primitives never fail on a denial; raising is left to the authorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizationResult {
    Granted,
    Denied,
}

impl AuthorizationResult {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorizationResult::Granted)
    }
}

impl From<bool> for AuthorizationResult {
    fn from(granted: bool) -> Self {
        if granted {
            AuthorizationResult::Granted
        } else {
            AuthorizationResult::Denied
        }
    }
}

/// Resource an ownership check is narrowed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ResourceRef {
    Team(TeamId),
    Product(ProductId),
    ProductName(String),
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Team(id) => write!(f, "team:{}", id),
            ResourceRef::Product(id) => write!(f, "product:{}", id),
            ResourceRef::ProductName(name) => write!(f, "product:{:?}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::TeamMember.to_string(), "team_member");
        assert_eq!(
            serde_json::to_string(&Role::Anonymous).unwrap(),
            "\"anonymous\""
        );
    }

    #[test]
    fn test_result_from_bool() {
        assert_eq!(AuthorizationResult::from(true), AuthorizationResult::Granted);
        assert!(!AuthorizationResult::from(false).is_granted());
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(ResourceRef::Team(1).to_string(), "team:1");
        assert_eq!(ResourceRef::Product(7).to_string(), "product:7");
        assert_eq!(
            ResourceRef::ProductName("bomen".to_string()).to_string(),
            "product:\"bomen\""
        );
    }
}
