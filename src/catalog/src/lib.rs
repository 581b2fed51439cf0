//! # Catalog Domain
//!
//! Teams and data products of the municipal data catalog, with every mutating
//! operation gated by [`catalog_authz`].
//!
//! ## Example
//!
//! ```rust
//! use catalog_authz::{AuthSettings, Scopes};
//! use catalog_domain::Catalog;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let catalog = Catalog::in_memory(AuthSettings::new("admin", true)).await.unwrap();
//! let admin: Scopes = ["admin"].into_iter().collect();
//!
//! let data = json!({
//!     "name": "Data Diensten", "description": "", "acronym": "DADI",
//!     "po_name": "Ada", "po_email": "ada@example.com",
//!     "contact_email": "dadi@example.com", "scope": "scope_dadi",
//! });
//! let team = catalog.teams().create_team(data.as_object().unwrap(), &admin).await.unwrap();
//! assert_eq!(team.id, Some(1));
//! # });
//! ```

pub mod error;
pub mod object;
pub mod ownership;
pub mod product;
pub mod team;

pub use error::{CatalogError, Result};
pub use object::Data;
pub use ownership::CatalogOwnership;
pub use product::{
    DataContract, DataService, Distribution, InMemoryProductRepository, Product,
    ProductRepository, ProductService, RefreshPeriod,
};
pub use team::{InMemoryTeamRepository, Team, TeamRepository, TeamService};

use catalog_authz::{AuthSettings, AuthorizationService, Authorizer, SnapshotRepository};
use std::sync::Arc;
use tracing::info;

/// Team and product services sharing one authorizer
pub struct Catalog {
    authorizer: Arc<Authorizer>,
    teams: TeamService,
    products: ProductService,
}

impl Catalog {
    /// Wire the services over the given repositories
    ///
    /// The authorization snapshot is built from the same repositories and
    /// refreshed by the services whenever ownership changes.
    pub async fn new(
        settings: AuthSettings,
        teams: Arc<dyn TeamRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Result<Self> {
        let source = CatalogOwnership::new(Arc::clone(&teams), Arc::clone(&products));
        let repository = SnapshotRepository::new(settings, source).await?;
        let authorizer = Arc::new(Authorizer::new(AuthorizationService::new(Arc::new(repository))));

        let catalog = Self {
            teams: TeamService::new(teams, Arc::clone(&authorizer))?,
            products: ProductService::new(products, Arc::clone(&authorizer))?,
            authorizer,
        };
        info!("Catalog services initialized");
        Ok(catalog)
    }

    /// Catalog over empty in-memory repositories
    pub async fn in_memory(settings: AuthSettings) -> Result<Self> {
        Self::new(
            settings,
            Arc::new(InMemoryTeamRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
        )
        .await
    }

    pub fn teams(&self) -> &TeamService {
        &self.teams
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }

    pub fn authorizer(&self) -> &Arc<Authorizer> {
        &self.authorizer
    }
}
