//! Authorization primitives
//!
//! [`AuthorizationService`] is stateless apart from the repository it reads
//! snapshots from. Each primitive loads the current snapshot once and answers
//! with an [`AuthorizationResult`]; none of them raise on a denial.

use crate::config::AuthorizationConfiguration;
use crate::permission::Permission;
use crate::repository::AuthorizationRepository;
use crate::scope::Scopes;
use crate::types::{AuthorizationResult, ResourceRef, Role, TeamId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Evaluates role, permission and ownership checks against the current snapshot
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn AuthorizationRepository> {
        &self.repository
    }

    /// Current snapshot
    pub fn config(&self) -> Arc<AuthorizationConfiguration> {
        self.repository.get_config()
    }

    /// Granted iff some presented scope resolves to exactly `role`
    pub fn require(&self, role: Role, scopes: &Scopes) -> AuthorizationResult {
        self.is_allowed(scopes, role).into()
    }

    /// Roles the caller holds with respect to `team_id`
    ///
    /// TeamMember is kept only when the team's own scope was presented; Admin
    /// is global and never narrowed. A caller left without any role is
    /// Anonymous with respect to the team.
    ///
    /// Anonymous means "no standing", not a baseline every caller holds: a
    /// `Permission` for `Role::Anonymous` grants only callers without another
    /// role over the team, and denies admins and the team's own members.
    pub fn get_applicable_roles(&self, team_id: TeamId, scopes: &Scopes) -> BTreeSet<Role> {
        applicable_roles(&self.config(), team_id, scopes)
    }

    /// Field-restricted write gate for partial updates
    pub fn permit<'a, I>(
        &self,
        team_id: TeamId,
        scopes: &Scopes,
        fields: I,
        permission: &Permission,
    ) -> AuthorizationResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        permit(&self.config(), team_id, scopes, fields, permission)
    }

    /// Granted iff the scope owning `resource` was presented
    ///
    /// A resource without a recognised owner matches no scope.
    pub fn is_team_member(&self, scopes: &Scopes, resource: &ResourceRef) -> AuthorizationResult {
        is_team_member(&self.config(), scopes, resource)
    }

    /// Whether any presented scope resolves to `role`
    pub fn is_allowed(&self, scopes: &Scopes, role: Role) -> bool {
        is_allowed(&self.config(), scopes, role)
    }
}

// Snapshot-level primitives. The authorizer calls these directly so that one
// decision reads exactly one snapshot.

pub(crate) fn is_allowed(config: &AuthorizationConfiguration, scopes: &Scopes, role: Role) -> bool {
    scopes
        .iter()
        .any(|scope| config.scope_to_role(scope) == Some(role))
}

pub(crate) fn applicable_roles(
    config: &AuthorizationConfiguration,
    team_id: TeamId,
    scopes: &Scopes,
) -> BTreeSet<Role> {
    let mut roles: BTreeSet<Role> = scopes
        .iter()
        .filter_map(|scope| config.scope_to_role(scope))
        .collect();

    let owns_team = config
        .team_id_to_scope(team_id)
        .is_some_and(|team_scope| scopes.contains(team_scope));
    if !owns_team {
        roles.remove(&Role::TeamMember);
    }

    if roles.is_empty() {
        roles.insert(Role::Anonymous);
    }
    roles
}

pub(crate) fn permit<'a, I>(
    config: &AuthorizationConfiguration,
    team_id: TeamId,
    scopes: &Scopes,
    fields: I,
    permission: &Permission,
) -> AuthorizationResult
where
    I: IntoIterator<Item = &'a str>,
{
    let roles = applicable_roles(config, team_id, scopes);
    (roles.contains(&permission.role) && permission.can_access_fields(fields)).into()
}

pub(crate) fn is_team_member(
    config: &AuthorizationConfiguration,
    scopes: &Scopes,
    resource: &ResourceRef,
) -> AuthorizationResult {
    config
        .resource_scope(resource)
        .is_some_and(|owner| scopes.contains(owner))
        .into()
}
