//! # Catalog Authorization Engine
//!
//! Scope-driven authorization for the data-product catalog.
//!
//! ## Features
//!
//! - **Opaque scopes** presented by the caller, mapped to roles per team
//! - **Immutable snapshots** of team and product ownership, swapped atomically on refresh
//! - **Named rules** (`is_admin`, `is_team_member`, `can_update_team`) attached to operations
//! - **OR composition** when an operation names several rules
//! - **Kill switch** (`FEATURE_FLAG_USE_AUTH`) that grants every check
//!
//! ## Example
//!
//! ```rust
//! use catalog_authz::{
//!     AuthContext, AuthSettings, AuthorizationService, Authorizer, SnapshotRepository,
//!     StaticOwnership, Scopes,
//! };
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let ownership = StaticOwnership::default();
//! ownership.put_team(1, "scope_a");
//!
//! let settings = AuthSettings::new("admin", true);
//! let repository = SnapshotRepository::new(settings, ownership).await.unwrap();
//! let authorizer = Authorizer::new(AuthorizationService::new(Arc::new(repository)));
//!
//! let guard = authorizer.guard(&["is_admin", "can_update_team"]).unwrap();
//! let scopes: Scopes = ["scope_a"].into_iter().collect();
//! let ctx = AuthContext::new(&scopes).for_team(1).with_fields(["po_name"]);
//!
//! assert!(authorizer.enforce(&guard, &ctx).is_ok());
//! # });
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod permission;
pub mod repository;
pub mod scope;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::{AuthSettings, AuthorizationConfiguration, ConfigurationBuilder};
pub use engine::{
    AuthContext, AuthorizationPredicate, Authorizer, Decision, DecisionState, EngineMetrics,
    Guard, Rule,
};
pub use error::{AuthzError, Result};
pub use permission::{AllowedFields, Permission};
pub use repository::{
    AuthorizationRepository, Ownership, OwnershipSource, ProductOwnership, SnapshotHandle,
    SnapshotRepository, StaticOwnership, TeamOwnership,
};
pub use scope::{Scope, ScopeError, Scopes};
pub use service::AuthorizationService;
pub use types::{AuthorizationResult, FieldName, ProductId, ResourceRef, Role, TeamId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
