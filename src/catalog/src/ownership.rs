//! Catalog-backed ownership source for the authorization snapshot

use crate::product::ProductRepository;
use crate::team::TeamRepository;
use async_trait::async_trait;
use catalog_authz::{
    Authorizer, AuthzError, Ownership, OwnershipSource, ProductOwnership, Result, TeamOwnership,
};
use std::fmt::Display;
use std::sync::Arc;
use tracing::warn;

/// Reads team scopes and product ownership from the catalog repositories
#[derive(Clone)]
pub struct CatalogOwnership {
    teams: Arc<dyn TeamRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CatalogOwnership {
    pub fn new(teams: Arc<dyn TeamRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { teams, products }
    }
}

#[async_trait]
impl OwnershipSource for CatalogOwnership {
    async fn load_ownership(&self) -> Result<Ownership> {
        let teams = self
            .teams
            .list()
            .await
            .map_err(|e| AuthzError::repository(e.to_string()))?;
        let products = self
            .products
            .list()
            .await
            .map_err(|e| AuthzError::repository(e.to_string()))?;

        let mut ownership = Ownership::default();
        for team in teams {
            let (Some(id), Ok(scope)) = (team.id, team.membership_scope()) else {
                warn!("Skipping team {:?} without a usable scope", team.id);
                continue;
            };
            ownership.teams.push(TeamOwnership { id, scope });
        }
        for product in products {
            let (Some(id), Some(team_id)) = (product.id, product.team_id) else {
                continue;
            };
            ownership.products.push(ProductOwnership {
                id,
                name: product.name,
                team_id,
            });
        }
        Ok(ownership)
    }
}

/// Rebuild the snapshot after a committed ownership change
///
/// The write has already been stored, so a failed refresh is logged and the
/// caller still gets the stored object. The snapshot stays stale until the
/// next successful refresh.
pub(crate) async fn refresh_after_write(authorizer: &Authorizer, change: impl Display) {
    if let Err(e) = authorizer.refresh_from_db().await {
        warn!("{} stored, authorization snapshot left stale: {}", change, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{InMemoryProductRepository, Product};
    use crate::team::{InMemoryTeamRepository, Team};

    fn team(scope: &str) -> Team {
        Team {
            id: None,
            name: scope.to_string(),
            description: String::new(),
            acronym: scope.to_uppercase(),
            po_name: "Ada".into(),
            po_email: "ada@example.com".into(),
            contact_email: "team@example.com".into(),
            scope: scope.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_ownership() {
        let teams = InMemoryTeamRepository::with_teams([team("scope_a"), team("")]).await.unwrap();
        let products = InMemoryProductRepository::with_products([
            Product {
                name: Some("Bomen".into()),
                team_id: Some(1),
                ..Default::default()
            },
            Product::default(),
        ])
        .await
        .unwrap();

        let source = CatalogOwnership::new(Arc::new(teams), Arc::new(products));
        let ownership = source.load_ownership().await.unwrap();

        assert_eq!(ownership.teams.len(), 1);
        assert_eq!(ownership.teams[0].scope.as_str(), "scope_a");
        assert_eq!(
            ownership.products,
            vec![ProductOwnership { id: 1, name: Some("Bomen".into()), team_id: 1 }]
        );
    }
}
