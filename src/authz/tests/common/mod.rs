//! Shared fixtures for the authorization integration tests

#![allow(dead_code)]

use catalog_authz::{
    AuthSettings, AuthorizationService, Authorizer, Scopes, SnapshotRepository, StaticOwnership,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const ADMIN: &str = "admin";

/// Install a fmt subscriber once per test binary; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

pub fn scopes(list: &[&str]) -> Scopes {
    list.iter().copied().collect()
}

/// Ownership with teams 1 → scope_a and 2 → scope_b, product 10 owned by team 1
pub fn ownership() -> StaticOwnership {
    let ownership = StaticOwnership::default();
    ownership.put_team(1, "scope_a");
    ownership.put_team(2, "scope_b");
    ownership.put_product(10, Some("Bomen"), 1);
    ownership
}

pub async fn authorizer_with(ownership: StaticOwnership, feature_enabled: bool) -> Authorizer {
    init_tracing();
    let settings = AuthSettings::new(ADMIN, feature_enabled);
    let repository = SnapshotRepository::new(settings, ownership)
        .await
        .expect("static ownership never fails");
    Authorizer::new(AuthorizationService::new(Arc::new(repository)))
}

pub async fn authorizer() -> Authorizer {
    authorizer_with(ownership(), true).await
}
