//! Authorizer: named rules attached to business operations
//!
//! Operations declare which rules gate them by asking the [`Authorizer`] for a
//! [`Guard`] once, when they are wired, and enforcing it on every call:
//!
//! ```text
//! operation(args) → Guard(is_admin | can_update_team) → snapshot → Allowed → body
//!                                                              └→ Denied  → AuthzError::Denied
//! ```
//!
//! Several rules in one guard compose as logical OR. The verdict depends only
//! on the rule table, not on the order the names are listed in.

pub mod decision;
pub mod metrics;
pub mod predicate;
pub mod rules;

pub use decision::{AuthContext, Decision, DecisionState};
pub use metrics::{EngineMetrics, MetricsCollector};
pub use predicate::{evaluate, evaluate_any, AuthorizationPredicate};
pub use rules::{default_rules, Rule};

use crate::error::{AuthzError, Result};
use crate::service::AuthorizationService;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Rules resolved for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    name: String,
    checks: Vec<(&'static str, AuthorizationPredicate)>,
}

impl Guard {
    /// Display name, the rule names joined with `|`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|(name, _)| *name)
    }

    /// The guard as a single composite predicate
    pub fn predicate(&self) -> AuthorizationPredicate {
        AuthorizationPredicate::AnyOf(self.checks.iter().map(|(_, p)| p.clone()).collect())
    }

    /// Check that `ctx` satisfies what every rule of the guard needs
    pub fn validate(&self, ctx: &AuthContext<'_>) -> Result<()> {
        for (name, predicate) in &self.checks {
            predicate.validate(ctx).inspect_err(|e| {
                error!("Guard {} cannot evaluate rule '{}': {}", self.name, name, e);
            })?;
        }
        Ok(())
    }
}

/// Builds guards from the rule table and enforces them
pub struct Authorizer {
    service: AuthorizationService,
    rules: HashMap<&'static str, Rule>,
    metrics: Arc<MetricsCollector>,
}

impl Authorizer {
    /// Authorizer over the default rule table
    pub fn new(service: AuthorizationService) -> Self {
        Self::with_rules(service, default_rules())
    }

    /// Authorizer over a custom rule table
    ///
    /// Rules are not validated here: a misconfigured rule surfaces as a
    /// configuration error when an operation asks for it.
    pub fn with_rules<I>(service: AuthorizationService, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut table = HashMap::new();
        for rule in rules {
            if let Some(previous) = table.insert(rule.decorator_name, rule) {
                warn!("Rule '{}' defined twice, keeping the last definition", previous.decorator_name);
            }
        }

        info!("Authorizer initialized with {} rules", table.len());

        Self {
            service,
            rules: table,
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    pub fn service(&self) -> &AuthorizationService {
        &self.service
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Resolve rule names into a guard
    ///
    /// Unknown names, misconfigured rules and empty name lists are
    /// configuration errors.
    pub fn guard(&self, names: &[&str]) -> Result<Guard> {
        if names.is_empty() {
            return Err(AuthzError::configuration("a guard needs at least one rule"));
        }

        let mut checks = Vec::with_capacity(names.len());
        for name in names {
            let rule = self.rules.get(*name).ok_or_else(|| {
                error!("Unknown authorization rule '{}'", name);
                AuthzError::configuration(format!("unknown authorization rule '{}'", name))
            })?;
            let predicate = rule.predicate().inspect_err(|e| {
                error!("Misconfigured authorization rule '{}': {}", name, e);
            })?;
            checks.push((rule.decorator_name, predicate));
        }

        Ok(Guard {
            name: names.join("|"),
            checks,
        })
    }

    /// Evaluate a guard without raising on a denial
    ///
    /// 1. Enforcement disabled: allowed without evaluating anything
    /// 2. Context missing a reference some rule needs: configuration error,
    ///    whatever the other rules would have decided
    /// 3. Each check in turn: the first grant ends the decision as `Allowed`,
    ///    a failed check leaves it `Pending` for the next one
    /// 4. Still pending after the last check: `Denied`
    pub fn decide(&self, guard: &Guard, ctx: &AuthContext<'_>) -> Result<Decision> {
        let config = self.service.config();

        if !config.feature_enabled() {
            debug!("Authorization disabled, bypassing guard {}", guard.name());
            self.metrics.record_bypassed();
            return Ok(Decision::bypassed(guard.name()));
        }

        if let Err(e) = guard.validate(ctx) {
            self.metrics.record_configuration_error();
            return Err(e);
        }

        let mut state = DecisionState::Pending;
        let mut granted_by = None;

        for (name, predicate) in &guard.checks {
            let result = match evaluate(predicate, &config, ctx) {
                Ok(result) => result,
                Err(e) => {
                    error!("Guard {} failed on rule '{}': {}", guard.name(), name, e);
                    self.metrics.record_configuration_error();
                    return Err(e);
                }
            };

            if result.is_granted() {
                state = DecisionState::Allowed;
                granted_by = Some(*name);
                break;
            }
            debug!("Rule '{}' did not grant, passing to next check", name);
        }

        if state == DecisionState::Pending {
            state = DecisionState::Denied;
        }

        match (state, granted_by) {
            (DecisionState::Allowed, Some(rule)) => {
                debug!("Guard {} granted by '{}'", guard.name(), rule);
                self.metrics.record_granted();
                Ok(Decision::allowed_by(guard.name(), rule))
            }
            _ => {
                self.metrics.record_denied();
                Ok(Decision::denied(guard.name()))
            }
        }
    }

    /// Evaluate a guard, raising `AuthzError::Denied` when no check grants
    pub fn enforce(&self, guard: &Guard, ctx: &AuthContext<'_>) -> Result<Decision> {
        let decision = self.decide(guard, ctx)?;
        if !decision.is_allowed() {
            warn!(
                "Denied guard {} for scopes {} on {:?}",
                guard.name(),
                ctx.scopes(),
                ctx.resource()
            );
            return Err(AuthzError::denied());
        }
        Ok(decision)
    }

    /// Resolve and enforce in one step
    pub fn check(&self, names: &[&str], ctx: &AuthContext<'_>) -> Result<Decision> {
        let guard = self.guard(names)?;
        self.enforce(&guard, ctx)
    }

    /// Rebuild the snapshot after an ownership change
    pub async fn refresh_from_db(&self) -> Result<()> {
        self.service.repository().refresh_from_db().await
    }

    pub fn metrics(&self) -> EngineMetrics {
        self.metrics.get_metrics()
    }
}
