//! Authorization settings and the configuration snapshot
//!
//! [`AuthSettings`] is the process configuration (admin scope, feature flag).
//! [`AuthorizationConfiguration`] is the immutable snapshot of scope ownership
//! every decision is evaluated against. A snapshot is never patched: it is
//! rebuilt wholesale and swapped in by the repository.

use crate::error::{AuthzError, Result};
use crate::repository::Ownership;
use crate::scope::Scope;
use crate::types::{ProductId, ResourceRef, Role, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Environment variable holding the admin scope
pub const ADMIN_SCOPE_ENV: &str = "ADMIN_ROLE_NAME";

/// Environment variable holding the enforcement feature flag
pub const FEATURE_FLAG_ENV: &str = "FEATURE_FLAG_USE_AUTH";

/// Process-level authorization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Scope that grants the global admin role
    pub admin_scope: Scope,

    /// When false every guarded operation is granted
    #[serde(default = "default_feature_enabled")]
    pub feature_enabled: bool,
}

fn default_feature_enabled() -> bool {
    true
}

impl AuthSettings {
    pub fn new(admin_scope: impl Into<Scope>, feature_enabled: bool) -> Self {
        Self {
            admin_scope: admin_scope.into(),
            feature_enabled,
        }
    }

    /// Load settings from the process environment
    ///
    /// Environment variables:
    /// - `ADMIN_ROLE_NAME` - admin scope (required)
    /// - `FEATURE_FLAG_USE_AUTH` - enforce authorization (default: true)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_scope = lookup(ADMIN_SCOPE_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AuthzError::configuration(format!("{} must be set to a non-empty scope", ADMIN_SCOPE_ENV))
            })?;

        let feature_enabled = match lookup(FEATURE_FLAG_ENV) {
            None => default_feature_enabled(),
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AuthzError::configuration(format!(
                    "{} must be a boolean, got '{}'",
                    FEATURE_FLAG_ENV, raw
                ))
            })?,
        };

        Ok(Self::new(admin_scope, feature_enabled))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Normalise a product name for lookup: lower-case, `_` as space, trimmed
pub fn normalize_product_name(name: &str) -> String {
    name.trim().replace('_', " ").to_lowercase()
}

/// Immutable snapshot of scope ownership
///
/// Invariant: every product scope equals the scope of the product's owning
/// team at the time the snapshot was built.
#[derive(Debug, Clone)]
pub struct AuthorizationConfiguration {
    admin_scope: Scope,
    team_scopes: HashMap<TeamId, Scope>,
    product_scopes: HashMap<ProductId, Scope>,
    product_name_scopes: HashMap<String, Scope>,
    member_scopes: HashSet<Scope>,
    feature_enabled: bool,
}

impl AuthorizationConfiguration {
    /// Start building a snapshot
    pub fn builder(settings: AuthSettings) -> ConfigurationBuilder {
        ConfigurationBuilder {
            settings,
            team_scopes: HashMap::new(),
            products: Vec::new(),
        }
    }

    /// Build a snapshot from ownership records
    ///
    /// Products owned by a team missing from `ownership.teams` get no scope.
    pub fn from_ownership(settings: AuthSettings, ownership: &Ownership) -> Self {
        let mut builder = Self::builder(settings);
        for team in &ownership.teams {
            builder = builder.team(team.id, team.scope.clone());
        }
        for product in &ownership.products {
            builder = builder.product(product.id, product.name.as_deref(), product.team_id);
        }
        builder.build()
    }

    pub fn admin_scope(&self) -> &Scope {
        &self.admin_scope
    }

    pub fn feature_enabled(&self) -> bool {
        self.feature_enabled
    }

    pub fn team_scopes(&self) -> &HashMap<TeamId, Scope> {
        &self.team_scopes
    }

    pub fn product_scopes(&self) -> &HashMap<ProductId, Scope> {
        &self.product_scopes
    }

    /// Role a single scope resolves to, if any
    pub fn scope_to_role(&self, scope: &Scope) -> Option<Role> {
        if *scope == self.admin_scope {
            Some(Role::Admin)
        } else if self.member_scopes.contains(scope) {
            Some(Role::TeamMember)
        } else {
            None
        }
    }

    pub fn team_id_to_scope(&self, team_id: TeamId) -> Option<&Scope> {
        self.team_scopes.get(&team_id)
    }

    pub fn product_id_to_scope(&self, product_id: ProductId) -> Option<&Scope> {
        self.product_scopes.get(&product_id)
    }

    pub fn product_name_to_scope(&self, name: &str) -> Option<&Scope> {
        self.product_name_scopes.get(&normalize_product_name(name))
    }

    /// Scope owning `resource`; `None` means no recognised owner, which can
    /// never match a presented scope
    pub fn resource_scope(&self, resource: &ResourceRef) -> Option<&Scope> {
        match resource {
            ResourceRef::Team(id) => self.team_id_to_scope(*id),
            ResourceRef::Product(id) => self.product_id_to_scope(*id),
            ResourceRef::ProductName(name) => self.product_name_to_scope(name),
        }
    }
}

/// Incremental builder for [`AuthorizationConfiguration`]
#[derive(Debug)]
pub struct ConfigurationBuilder {
    settings: AuthSettings,
    team_scopes: HashMap<TeamId, Scope>,
    products: Vec<(ProductId, Option<String>, TeamId)>,
}

impl ConfigurationBuilder {
    pub fn team(mut self, team_id: TeamId, scope: impl Into<Scope>) -> Self {
        self.team_scopes.insert(team_id, scope.into());
        self
    }

    /// Register a product; its scope is resolved against the owning team on build
    pub fn product(mut self, product_id: ProductId, name: Option<&str>, team_id: TeamId) -> Self {
        self.products
            .push((product_id, name.map(str::to_string), team_id));
        self
    }

    /// Resolve product scopes against the registered teams
    ///
    /// When several products share a normalised name, the one with the lowest
    /// id owns the name.
    pub fn build(mut self) -> AuthorizationConfiguration {
        let mut product_scopes = HashMap::with_capacity(self.products.len());
        let mut product_name_scopes = HashMap::new();

        self.products.sort_by_key(|(product_id, _, _)| *product_id);
        for (product_id, name, team_id) in self.products {
            let Some(scope) = self.team_scopes.get(&team_id) else {
                debug!("Product {} owned by unknown team {}, no scope", product_id, team_id);
                continue;
            };
            product_scopes.insert(product_id, scope.clone());
            if let Some(name) = name {
                product_name_scopes
                    .entry(normalize_product_name(&name))
                    .or_insert_with(|| scope.clone());
            }
        }

        let member_scopes = self.team_scopes.values().cloned().collect();

        AuthorizationConfiguration {
            admin_scope: self.settings.admin_scope,
            team_scopes: self.team_scopes,
            product_scopes,
            product_name_scopes,
            member_scopes,
            feature_enabled: self.settings.feature_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ProductOwnership, TeamOwnership};

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_settings_from_lookup() {
        let settings = AuthSettings::from_lookup(lookup(&[
            ("ADMIN_ROLE_NAME", "test_admin"),
            ("FEATURE_FLAG_USE_AUTH", "False"),
        ]))
        .unwrap();

        assert_eq!(settings.admin_scope, Scope::from("test_admin"));
        assert!(!settings.feature_enabled);
    }

    #[test]
    fn test_settings_feature_flag_defaults_on() {
        let settings = AuthSettings::from_lookup(lookup(&[("ADMIN_ROLE_NAME", "admin")])).unwrap();
        assert!(settings.feature_enabled);
    }

    #[test]
    fn test_settings_missing_admin_scope() {
        let err = AuthSettings::from_lookup(lookup(&[("ADMIN_ROLE_NAME", "  ")])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_settings_bad_flag() {
        let err = AuthSettings::from_lookup(lookup(&[
            ("ADMIN_ROLE_NAME", "admin"),
            ("FEATURE_FLAG_USE_AUTH", "maybe"),
        ]))
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_scope_to_role() {
        let config = AuthorizationConfiguration::builder(AuthSettings::new("admin", true))
            .team(1, "scope_a")
            .build();

        assert_eq!(config.scope_to_role(&Scope::from("admin")), Some(Role::Admin));
        assert_eq!(config.scope_to_role(&Scope::from("scope_a")), Some(Role::TeamMember));
        assert_eq!(config.scope_to_role(&Scope::from("scope_z")), None);
    }

    #[test]
    fn test_product_scope_follows_owning_team() {
        let ownership = Ownership {
            teams: vec![
                TeamOwnership { id: 1, scope: Scope::from("scope_a") },
                TeamOwnership { id: 2, scope: Scope::from("scope_b") },
            ],
            products: vec![
                ProductOwnership { id: 10, name: Some("Bomen".to_string()), team_id: 2 },
                ProductOwnership { id: 11, name: None, team_id: 99 },
            ],
        };
        let config = AuthorizationConfiguration::from_ownership(AuthSettings::new("admin", true), &ownership);

        assert_eq!(config.product_id_to_scope(10), Some(&Scope::from("scope_b")));
        assert_eq!(config.product_name_to_scope("bomen"), Some(&Scope::from("scope_b")));
        assert_eq!(config.product_id_to_scope(11), None);
        assert_eq!(config.team_id_to_scope(3), None);
    }

    #[test]
    fn test_shared_product_name_resolves_to_lowest_id() {
        let config = AuthorizationConfiguration::builder(AuthSettings::new("admin", true))
            .team(1, "scope_a")
            .team(2, "scope_b")
            .product(7, Some("Bomen"), 2)
            .product(3, Some("bomen"), 1)
            .build();

        assert_eq!(config.product_name_to_scope("Bomen"), Some(&Scope::from("scope_a")));
    }

    #[test]
    fn test_product_name_normalisation() {
        let config = AuthorizationConfiguration::builder(AuthSettings::new("admin", true))
            .team(1, "scope_a")
            .product(5, Some("Beheer Bomen"), 1)
            .build();

        assert_eq!(normalize_product_name(" Beheer_Bomen "), "beheer bomen");
        assert!(config.product_name_to_scope("beheer_bomen").is_some());
        assert!(config
            .resource_scope(&ResourceRef::ProductName("BEHEER BOMEN".to_string()))
            .is_some());
    }
}
