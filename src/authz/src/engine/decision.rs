//! Authorization context and decision types

use crate::scope::Scopes;
use crate::types::{FieldName, ProductId, ResourceRef, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Live arguments of one guarded call
///
/// Carries the presented scopes, the field names of the submitted data and the
/// resource the call acts on.
#[derive(Debug, Clone)]
pub struct AuthContext<'a> {
    scopes: &'a Scopes,
    fields: BTreeSet<FieldName>,
    resource: Option<ResourceRef>,
}

impl<'a> AuthContext<'a> {
    pub fn new(scopes: &'a Scopes) -> Self {
        Self {
            scopes,
            fields: BTreeSet::new(),
            resource: None,
        }
    }

    /// Use the keys of a submitted JSON object as the requested fields
    pub fn with_data(mut self, data: &serde_json::Map<String, serde_json::Value>) -> Self {
        self.fields.extend(data.keys().cloned());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_resource(mut self, resource: ResourceRef) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn for_team(self, team_id: TeamId) -> Self {
        self.with_resource(ResourceRef::Team(team_id))
    }

    pub fn for_product(self, product_id: ProductId) -> Self {
        self.with_resource(ResourceRef::Product(product_id))
    }

    pub fn scopes(&self) -> &Scopes {
        self.scopes
    }

    pub fn fields(&self) -> &BTreeSet<FieldName> {
        &self.fields
    }

    pub fn resource(&self) -> Option<&ResourceRef> {
        self.resource.as_ref()
    }
}

/// State of a guard while its checks are evaluated
///
/// `Pending` means the current check failed and the next one decides.
/// `Allowed` and `Denied` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionState {
    Allowed,
    Pending,
    Denied,
}

/// Outcome of one guarded call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Guard that was evaluated
    pub guard: String,

    /// Terminal state, never `Pending`
    pub state: DecisionState,

    /// Rule whose check granted the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<String>,

    /// Granted because enforcement is disabled
    #[serde(default)]
    pub bypassed: bool,
}

impl Decision {
    pub fn allowed_by(guard: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            guard: guard.into(),
            state: DecisionState::Allowed,
            granted_by: Some(rule.into()),
            bypassed: false,
        }
    }

    pub fn bypassed(guard: impl Into<String>) -> Self {
        Self {
            guard: guard.into(),
            state: DecisionState::Allowed,
            granted_by: None,
            bypassed: true,
        }
    }

    pub fn denied(guard: impl Into<String>) -> Self {
        Self {
            guard: guard.into(),
            state: DecisionState::Denied,
            granted_by: None,
            bypassed: false,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.state == DecisionState::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_fields_from_data() {
        let scopes: Scopes = ["scope_a"].into_iter().collect();
        let data = json!({ "po_name": "x", "po_email": "y" });
        let ctx = AuthContext::new(&scopes)
            .with_data(data.as_object().unwrap())
            .for_team(1);

        let fields: Vec<&str> = ctx.fields().iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["po_email", "po_name"]);
        assert_eq!(ctx.resource(), Some(&ResourceRef::Team(1)));
    }

    #[test]
    fn test_decisions() {
        let allowed = Decision::allowed_by("update_team", "is_admin");
        assert!(allowed.is_allowed());
        assert_eq!(allowed.granted_by.as_deref(), Some("is_admin"));

        let bypassed = Decision::bypassed("update_team");
        assert!(bypassed.is_allowed());
        assert!(bypassed.bypassed);

        let denied = Decision::denied("update_team");
        assert!(!denied.is_allowed());
        assert_eq!(denied.state, DecisionState::Denied);
    }
}
