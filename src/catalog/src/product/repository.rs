//! Product storage

use super::objects::Product;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use catalog_authz::config::normalize_product_name;
use catalog_authz::ProductId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Product storage trait
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, id: ProductId) -> Result<Product>;

    /// Find a product by name, ignoring case and treating `_` as a space
    async fn get_by_name(&self, name: &str) -> Result<Product>;

    async fn list(&self) -> Result<Vec<Product>>;

    /// Store a product, assigning ids to it and to every nested contract,
    /// distribution and service that has none
    ///
    /// Names are unique after normalisation; saving a product under a name
    /// another product already holds is a validation error.
    async fn save(&self, product: Product) -> Result<Product>;

    async fn delete(&self, id: ProductId) -> Result<ProductId>;
}

fn not_found(id: ProductId) -> CatalogError {
    CatalogError::not_found(format!("Product with id {} does not exist", id))
}

/// Next free id after the ones already taken
fn next_id<I: Iterator<Item = Option<i64>>>(ids: I) -> i64 {
    ids.flatten().max().unwrap_or(0) + 1
}

fn assign_nested_ids(product: &mut Product) {
    if let Some(contracts) = product.contracts.as_mut() {
        let mut next = next_id(contracts.iter().map(|c| c.id));
        for contract in contracts.iter_mut() {
            if contract.id.is_none() {
                contract.id = Some(next);
                next += 1;
            }

            if let Some(distributions) = contract.distributions.as_mut() {
                let mut next = next_id(distributions.iter().map(|d| d.id));
                for distribution in distributions.iter_mut().filter(|d| d.id.is_none()) {
                    distribution.id = Some(next);
                    next += 1;
                }
            }
        }
    }

    if let Some(services) = product.services.as_mut() {
        let mut next = next_id(services.iter().map(|s| s.id));
        for service in services.iter_mut().filter(|s| s.id.is_none()) {
            service.id = Some(next);
            next += 1;
        }
    }
}

/// In-memory product repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_products(products: impl IntoIterator<Item = Product>) -> Result<Self> {
        let repository = Self::new();
        for product in products {
            repository.save(product).await?;
        }
        Ok(repository)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get(&self, id: ProductId) -> Result<Product> {
        let products = self.products.read().await;
        products.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_by_name(&self, name: &str) -> Result<Product> {
        let wanted = normalize_product_name(name);
        let products = self.products.read().await;
        products
            .values()
            .find(|product| {
                product
                    .name
                    .as_deref()
                    .is_some_and(|n| normalize_product_name(n) == wanted)
            })
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("Product with name {} does not exist", name)))
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn save(&self, mut product: Product) -> Result<Product> {
        let mut products = self.products.write().await;
        let id = match product.id {
            Some(id) => id,
            None => products.keys().next_back().map_or(1, |max| max + 1),
        };

        if let Some(name) = product.name.as_deref() {
            let wanted = normalize_product_name(name);
            let taken = products.values().any(|other| {
                other.id != Some(id)
                    && other
                        .name
                        .as_deref()
                        .is_some_and(|n| normalize_product_name(n) == wanted)
            });
            if taken {
                return Err(CatalogError::validation(format!(
                    "Product with name {} already exists",
                    name
                )));
            }
        }
        product.id = Some(id);
        assign_nested_ids(&mut product);

        products.insert(id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<ProductId> {
        let mut products = self.products.write().await;
        products.remove(&id).map(|_| id).ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::objects::{DataContract, DataService, Distribution};

    #[tokio::test]
    async fn test_save_assigns_nested_ids() {
        let repository = InMemoryProductRepository::new();
        let product = Product {
            name: Some("Bomen".into()),
            contracts: Some(vec![
                DataContract {
                    id: Some(4),
                    ..Default::default()
                },
                DataContract {
                    distributions: Some(vec![Distribution::default(), Distribution::default()]),
                    ..Default::default()
                },
            ]),
            services: Some(vec![DataService::default()]),
            ..Default::default()
        };

        let saved = repository.save(product).await.unwrap();
        assert_eq!(saved.id, Some(1));

        let contracts = saved.contracts.unwrap();
        assert_eq!(contracts[0].id, Some(4));
        assert_eq!(contracts[1].id, Some(5));
        let distribution_ids: Vec<_> = contracts[1]
            .distributions
            .as_ref()
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(distribution_ids, vec![Some(1), Some(2)]);
        assert_eq!(saved.services.unwrap()[0].id, Some(1));
    }

    #[tokio::test]
    async fn test_get_by_name_normalises() {
        let repository = InMemoryProductRepository::with_products([Product {
            name: Some("Bomen Register".into()),
            ..Default::default()
        }])
        .await
        .unwrap();

        assert!(repository.get_by_name("bomen_register").await.is_ok());
        assert!(repository.get_by_name("BOMEN REGISTER").await.is_ok());
        assert!(matches!(
            repository.get_by_name("bomen").await,
            Err(CatalogError::ObjectDoesNotExist(_))
        ));
    }

    #[tokio::test]
    async fn test_save_rejects_taken_name() {
        let repository = InMemoryProductRepository::with_products([
            Product {
                name: Some("Bomen Register".into()),
                ..Default::default()
            },
            Product {
                name: Some("Parkeren".into()),
                ..Default::default()
            },
        ])
        .await
        .unwrap();

        let err = repository
            .save(Product {
                name: Some("bomen_register".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        // Renaming onto another product's name is rejected too
        let mut parkeren = repository.get(2).await.unwrap();
        parkeren.name = Some("BOMEN REGISTER".into());
        assert!(repository.save(parkeren).await.is_err());

        // Saving a product under its own name is fine
        let bomen = repository.get(1).await.unwrap();
        assert!(repository.save(bomen).await.is_ok());
        assert_eq!(repository.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let repository = InMemoryProductRepository::new();
        assert_eq!(
            repository.delete(1337).await.unwrap_err(),
            CatalogError::not_found("Product with id 1337 does not exist")
        );
    }
}
