//! Snapshot supply and refresh
//!
//! The [`AuthorizationRepository`] hands out the current
//! [`AuthorizationConfiguration`] and rebuilds it on request. Decisions only
//! ever read an `Arc` to a finished snapshot; a refresh builds the new
//! snapshot off to the side and swaps the reference under a short write lock.
//! Refreshes are serialized, so a slow load can never overwrite the snapshot
//! of a refresh that started after it.

use crate::config::{AuthSettings, AuthorizationConfiguration};
use crate::error::Result;
use crate::scope::Scope;
use crate::types::{ProductId, TeamId};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Team ownership record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOwnership {
    pub id: TeamId,
    pub scope: Scope,
}

/// Product ownership record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOwnership {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    pub team_id: TeamId,
}

/// Everything a snapshot is derived from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    #[serde(default)]
    pub teams: Vec<TeamOwnership>,
    #[serde(default)]
    pub products: Vec<ProductOwnership>,
}

/// Supplies and refreshes the configuration snapshot
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Current snapshot; cheap, never blocks on I/O
    fn get_config(&self) -> Arc<AuthorizationConfiguration>;

    /// Rebuild the snapshot from persisted ownership data
    ///
    /// Must be called whenever team or product ownership changes; the
    /// snapshot never refreshes itself.
    async fn refresh_from_db(&self) -> Result<()>;
}

/// Storage-facing source of ownership records
#[async_trait]
pub trait OwnershipSource: Send + Sync {
    async fn load_ownership(&self) -> Result<Ownership>;
}

/// Shared, atomically swappable handle to the current snapshot
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    current: Arc<RwLock<Arc<AuthorizationConfiguration>>>,
}

impl SnapshotHandle {
    pub fn new(config: AuthorizationConfiguration) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    pub fn load(&self) -> Arc<AuthorizationConfiguration> {
        self.current.read().clone()
    }

    /// Replace the snapshot, returning the one it supersedes
    pub fn store(&self, config: AuthorizationConfiguration) -> Arc<AuthorizationConfiguration> {
        let next = Arc::new(config);
        std::mem::replace(&mut *self.current.write(), next)
    }
}

/// Repository building snapshots from an [`OwnershipSource`]
pub struct SnapshotRepository<S> {
    settings: AuthSettings,
    source: S,
    snapshot: SnapshotHandle,
    refresh: Mutex<()>,
}

impl<S: OwnershipSource> SnapshotRepository<S> {
    /// Load ownership once and build the initial snapshot
    pub async fn new(settings: AuthSettings, source: S) -> Result<Self> {
        let ownership = source.load_ownership().await?;
        let config = AuthorizationConfiguration::from_ownership(settings.clone(), &ownership);

        info!(
            "Authorization snapshot built: {} teams, {} products, enforcement={}",
            ownership.teams.len(),
            ownership.products.len(),
            settings.feature_enabled
        );
        if !settings.feature_enabled {
            warn!("Authorization enforcement is disabled, every guarded operation will be granted");
        }

        Ok(Self {
            settings,
            source,
            snapshot: SnapshotHandle::new(config),
            refresh: Mutex::new(()),
        })
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: OwnershipSource> AuthorizationRepository for SnapshotRepository<S> {
    fn get_config(&self) -> Arc<AuthorizationConfiguration> {
        self.snapshot.load()
    }

    async fn refresh_from_db(&self) -> Result<()> {
        // Held across load and store; readers never take it
        let _refresh = self.refresh.lock().await;

        // A failed load keeps the previous snapshot in place
        let ownership = match self.source.load_ownership().await {
            Ok(ownership) => ownership,
            Err(e) => {
                warn!("Authorization snapshot refresh failed: {}", e);
                return Err(e);
            }
        };

        let config = AuthorizationConfiguration::from_ownership(self.settings.clone(), &ownership);
        self.snapshot.store(config);

        info!(
            "Authorization snapshot refreshed: {} teams, {} products",
            ownership.teams.len(),
            ownership.products.len()
        );
        Ok(())
    }
}

/// In-memory, mutable ownership source
#[derive(Debug, Clone, Default)]
pub struct StaticOwnership {
    ownership: Arc<RwLock<Ownership>>,
}

impl StaticOwnership {
    pub fn new(ownership: Ownership) -> Self {
        Self {
            ownership: Arc::new(RwLock::new(ownership)),
        }
    }

    /// Add or replace a team's scope
    pub fn put_team(&self, id: TeamId, scope: impl Into<Scope>) {
        let scope = scope.into();
        let mut ownership = self.ownership.write();
        ownership.teams.retain(|team| team.id != id);
        ownership.teams.push(TeamOwnership { id, scope });
    }

    /// Add or reassign a product
    pub fn put_product(&self, id: ProductId, name: Option<&str>, team_id: TeamId) {
        let mut ownership = self.ownership.write();
        ownership.products.retain(|product| product.id != id);
        ownership.products.push(ProductOwnership {
            id,
            name: name.map(str::to_string),
            team_id,
        });
    }

    pub fn remove_team(&self, id: TeamId) {
        self.ownership.write().teams.retain(|team| team.id != id);
    }

    pub fn remove_product(&self, id: ProductId) {
        self.ownership.write().products.retain(|product| product.id != id);
    }
}

#[async_trait]
impl OwnershipSource for StaticOwnership {
    async fn load_ownership(&self) -> Result<Ownership> {
        Ok(self.ownership.read().clone())
    }
}
