//! Authorization predicates and their interpreter

use super::decision::AuthContext;
use crate::config::AuthorizationConfiguration;
use crate::error::{AuthzError, Result};
use crate::permission::Permission;
use crate::service;
use crate::types::{AuthorizationResult, ResourceRef, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A check that gates an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationPredicate {
    /// Some presented scope resolves to the role
    RequireRole(Role),
    /// The caller holds the permission's role for the referenced team and
    /// submitted only allowed fields
    PermitFields(Permission),
    /// The caller presented the scope owning the referenced resource
    IsTeamMember,
    /// At least one inner predicate grants
    AnyOf(Vec<AuthorizationPredicate>),
}

impl AuthorizationPredicate {
    pub fn name(&self) -> &'static str {
        match self {
            AuthorizationPredicate::RequireRole(_) => "require",
            AuthorizationPredicate::PermitFields(_) => "permit",
            AuthorizationPredicate::IsTeamMember => "is_team_member",
            AuthorizationPredicate::AnyOf(_) => "any_of",
        }
    }

    /// Check that `ctx` carries the resource reference this predicate needs
    ///
    /// Composites check every member, so a missing reference is reported no
    /// matter which member would have granted first.
    pub fn validate(&self, ctx: &AuthContext<'_>) -> Result<()> {
        match self {
            AuthorizationPredicate::RequireRole(_) => Ok(()),
            AuthorizationPredicate::PermitFields(_) => match ctx.resource() {
                Some(ResourceRef::Team(_)) => Ok(()),
                other => Err(AuthzError::configuration(format!(
                    "permit check needs a team reference, got {:?}",
                    other
                ))),
            },
            AuthorizationPredicate::IsTeamMember => match ctx.resource() {
                Some(_) => Ok(()),
                None => Err(AuthzError::configuration(
                    "is_team_member check needs a resource reference",
                )),
            },
            AuthorizationPredicate::AnyOf(predicates) => {
                predicates.iter().try_for_each(|p| p.validate(ctx))
            }
        }
    }
}

/// Evaluate `predicate` for `ctx` against one snapshot
///
/// A predicate missing the resource reference it needs is a configuration
/// error, never a denial.
pub fn evaluate(
    predicate: &AuthorizationPredicate,
    config: &AuthorizationConfiguration,
    ctx: &AuthContext<'_>,
) -> Result<AuthorizationResult> {
    let result = match predicate {
        AuthorizationPredicate::RequireRole(role) => {
            service::is_allowed(config, ctx.scopes(), *role).into()
        }
        AuthorizationPredicate::PermitFields(permission) => {
            let team_id = match ctx.resource() {
                Some(ResourceRef::Team(team_id)) => *team_id,
                other => {
                    return Err(AuthzError::configuration(format!(
                        "permit check needs a team reference, got {:?}",
                        other
                    )))
                }
            };
            service::permit(
                config,
                team_id,
                ctx.scopes(),
                ctx.fields().iter().map(String::as_str),
                permission,
            )
        }
        AuthorizationPredicate::IsTeamMember => {
            let resource = ctx.resource().ok_or_else(|| {
                AuthzError::configuration("is_team_member check needs a resource reference")
            })?;
            service::is_team_member(config, ctx.scopes(), resource)
        }
        AuthorizationPredicate::AnyOf(predicates) => {
            evaluate_any(predicates, config, ctx)?.is_some().into()
        }
    };

    debug!("Predicate {} evaluated to {:?}", predicate.name(), result);
    Ok(result)
}

/// Evaluate predicates in order until one grants
///
/// Returns the index of the granting predicate, or `None` when all denied.
/// Every predicate is validated first, so neither the verdict nor a
/// configuration error depends on the order; it only decides which index is
/// reported.
pub fn evaluate_any(
    predicates: &[AuthorizationPredicate],
    config: &AuthorizationConfiguration,
    ctx: &AuthContext<'_>,
) -> Result<Option<usize>> {
    predicates.iter().try_for_each(|p| p.validate(ctx))?;
    for (idx, predicate) in predicates.iter().enumerate() {
        if evaluate(predicate, config, ctx)?.is_granted() {
            return Ok(Some(idx));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use crate::scope::Scopes;

    fn config() -> AuthorizationConfiguration {
        AuthorizationConfiguration::builder(AuthSettings::new("admin", true))
            .team(1, "scope_a")
            .team(2, "scope_b")
            .product(10, None, 1)
            .build()
    }

    fn scopes(list: &[&str]) -> Scopes {
        list.iter().copied().collect()
    }

    #[test]
    fn test_require_role() {
        let config = config();
        let presented = scopes(&["admin"]);
        let ctx = AuthContext::new(&presented);

        let result = evaluate(&AuthorizationPredicate::RequireRole(Role::Admin), &config, &ctx).unwrap();
        assert!(result.is_granted());
    }

    #[test]
    fn test_permit_fields_needs_team() {
        let config = config();
        let presented = scopes(&["scope_a"]);
        let ctx = AuthContext::new(&presented).for_product(10).with_fields(["po_name"]);
        let predicate = AuthorizationPredicate::PermitFields(Permission::fields(Role::TeamMember, ["po_name"]));

        let err = evaluate(&predicate, &config, &ctx).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_is_team_member_needs_resource() {
        let config = config();
        let presented = scopes(&["scope_a"]);
        let ctx = AuthContext::new(&presented);

        let err = evaluate(&AuthorizationPredicate::IsTeamMember, &config, &ctx).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_any_of_reports_granting_index() {
        let config = config();
        let presented = scopes(&["scope_a"]);
        let ctx = AuthContext::new(&presented).for_product(10);
        let predicates = vec![
            AuthorizationPredicate::RequireRole(Role::Admin),
            AuthorizationPredicate::IsTeamMember,
        ];

        assert_eq!(evaluate_any(&predicates, &config, &ctx).unwrap(), Some(1));
        assert!(evaluate(&AuthorizationPredicate::AnyOf(predicates), &config, &ctx)
            .unwrap()
            .is_granted());
    }

    #[test]
    fn test_any_of_validates_every_member() {
        let config = config();
        let presented = scopes(&["admin"]);
        let ctx = AuthContext::new(&presented).for_product(10).with_fields(["acronym"]);
        let permit = AuthorizationPredicate::PermitFields(Permission::fields(Role::TeamMember, ["po_name"]));

        for predicates in [
            vec![AuthorizationPredicate::RequireRole(Role::Admin), permit.clone()],
            vec![permit.clone(), AuthorizationPredicate::RequireRole(Role::Admin)],
        ] {
            let err = evaluate_any(&predicates, &config, &ctx).unwrap_err();
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn test_empty_any_of_denies() {
        let config = config();
        let presented = scopes(&["admin"]);
        let ctx = AuthContext::new(&presented);

        let result = evaluate(&AuthorizationPredicate::AnyOf(vec![]), &config, &ctx).unwrap();
        assert_eq!(result, AuthorizationResult::Denied);
    }

    #[test]
    fn test_predicate_serde() {
        let predicate = AuthorizationPredicate::AnyOf(vec![
            AuthorizationPredicate::RequireRole(Role::Admin),
            AuthorizationPredicate::IsTeamMember,
        ]);
        let json = serde_json::to_value(&predicate).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "any_of": [{ "require_role": "admin" }, "is_team_member"] })
        );
    }
}
