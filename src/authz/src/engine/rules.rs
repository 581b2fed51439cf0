//! Named authorization rules
//!
//! A rule binds a public name to one service check plus its static argument.
//! Adding a rule is a table edit; the authorizer needs no code change.

use super::predicate::AuthorizationPredicate;
use crate::error::{AuthzError, Result};
use crate::permission::Permission;
use crate::types::Role;

/// Service check names a rule may bind to
pub const REQUIRE: &str = "require";
pub const PERMIT: &str = "permit";
pub const IS_TEAM_MEMBER: &str = "is_team_member";

/// Rule names of the default table
pub const IS_ADMIN: &str = "is_admin";
pub const CAN_UPDATE_TEAM: &str = "can_update_team";

/// Team fields a team member may change on their own team
pub const TEAM_MEMBER_EDITABLE_FIELDS: [&str; 3] = ["po_name", "po_email", "contact_email"];

/// Static binding of a name to a service check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Name operations refer to
    pub decorator_name: &'static str,
    /// Service check invoked; defaults to `decorator_name`
    pub method_name: &'static str,
    /// Argument of `permit`
    pub permission: Option<Permission>,
    /// Argument of `require`
    pub role: Option<Role>,
}

impl Rule {
    pub fn new(decorator_name: &'static str) -> Self {
        Self {
            decorator_name,
            method_name: decorator_name,
            permission: None,
            role: None,
        }
    }

    pub fn method(mut self, method_name: &'static str) -> Self {
        self.method_name = method_name;
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Predicate this rule stands for
    ///
    /// Fails with a configuration error when the rule names an unknown check
    /// or lacks the argument its check needs.
    pub fn predicate(&self) -> Result<AuthorizationPredicate> {
        match self.method_name {
            REQUIRE => self
                .role
                .map(AuthorizationPredicate::RequireRole)
                .ok_or_else(|| {
                    AuthzError::configuration(format!(
                        "rule '{}' invokes '{}' without a role",
                        self.decorator_name, REQUIRE
                    ))
                }),
            PERMIT => self
                .permission
                .clone()
                .map(AuthorizationPredicate::PermitFields)
                .ok_or_else(|| {
                    AuthzError::configuration(format!(
                        "rule '{}' invokes '{}' without a permission",
                        self.decorator_name, PERMIT
                    ))
                }),
            IS_TEAM_MEMBER => Ok(AuthorizationPredicate::IsTeamMember),
            other => Err(AuthzError::configuration(format!(
                "rule '{}' references unknown check '{}'",
                self.decorator_name, other
            ))),
        }
    }
}

/// The default rule table
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(IS_ADMIN).method(REQUIRE).role(Role::Admin),
        Rule::new(IS_TEAM_MEMBER),
        Rule::new(CAN_UPDATE_TEAM)
            .method(PERMIT)
            .permission(Permission::fields(Role::TeamMember, TEAM_MEMBER_EDITABLE_FIELDS)),
    ]
}
