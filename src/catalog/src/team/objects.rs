//! Team aggregate

use crate::error::{CatalogError, Result};
use catalog_authz::{Scope, TeamId};
use serde::{Deserialize, Serialize};

/// An organisational unit owning data products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: Option<TeamId>,
    pub name: String,
    pub description: String,
    pub acronym: String,
    pub po_name: String,
    pub po_email: String,
    pub contact_email: String,
    /// Scope whose holders are members of this team
    pub scope: String,
}

impl Team {
    /// Keys a partial update never writes
    pub const SKIP_KEYS: &'static [&'static str] = &[];

    /// Membership scope as an authorization token
    pub fn membership_scope(&self) -> Result<Scope> {
        Scope::new(self.scope.trim())
            .map_err(|e| CatalogError::validation(format!("team scope: {}", e)))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::validation("team name cannot be empty"));
        }
        self.membership_scope().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_requires_every_field() {
        let missing_scope = json!({
            "name": "Beheer Openbare Ruimte",
            "description": "",
            "acronym": "BOR",
            "po_name": "Jan Bor",
            "po_email": "j.bor@example.com",
            "contact_email": "bor@example.com",
        });
        assert!(serde_json::from_value::<Team>(missing_scope).is_err());
    }

    #[test]
    fn test_validate_scope() {
        let mut team = Team {
            id: None,
            name: "Data Diensten".into(),
            description: String::new(),
            acronym: "DADI".into(),
            po_name: "Ada".into(),
            po_email: "ada@example.com".into(),
            contact_email: "dadi@example.com".into(),
            scope: "scope_dadi".into(),
        };
        assert!(team.validate().is_ok());
        assert_eq!(team.membership_scope().unwrap().as_str(), "scope_dadi");

        team.scope = "  ".into();
        assert!(matches!(team.validate(), Err(CatalogError::Validation(_))));
    }
}
