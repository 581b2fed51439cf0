//! Product service
//!
//! Every mutation is gated by membership of the team owning the product. The
//! ownership check runs before the product is looked up, so a product that
//! does not exist is reported as a denial: it has no owner to match.

use super::objects::{ContractId, DataContract, DataService, Distribution, Product, ServiceId};
use super::repository::ProductRepository;
use crate::error::{CatalogError, Result};
use crate::object::{self, Data};
use crate::ownership::refresh_after_write;
use catalog_authz::engine::rules::IS_TEAM_MEMBER;
use catalog_authz::{AuthContext, Authorizer, Guard, ProductId, Scopes, TeamId};
use std::sync::Arc;
use tracing::{debug, info};

const DISTRIBUTIONS: &str = "distributions";

pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    authorizer: Arc<Authorizer>,
    member_guard: Guard,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>, authorizer: Arc<Authorizer>) -> Result<Self> {
        let member_guard = authorizer.guard(&[IS_TEAM_MEMBER])?;
        Ok(Self {
            repository,
            authorizer,
            member_guard,
        })
    }

    fn authorize_product(&self, product_id: ProductId, scopes: &Scopes) -> Result<()> {
        let ctx = AuthContext::new(scopes).for_product(product_id);
        self.authorizer.enforce(&self.member_guard, &ctx)?;
        Ok(())
    }

    fn authorize_team(&self, team_id: TeamId, scopes: &Scopes, data: &Data) -> Result<()> {
        let ctx = AuthContext::new(scopes).for_team(team_id).with_data(data);
        self.authorizer.enforce(&self.member_guard, &ctx)?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    pub async fn get_products(&self) -> Result<Vec<Product>> {
        self.repository.list().await
    }

    pub async fn get_product(&self, product_id: ProductId) -> Result<Product> {
        self.repository.get(product_id).await
    }

    pub async fn get_product_by_name(&self, name: &str) -> Result<Product> {
        self.repository.get_by_name(name).await
    }

    /// Create a product for the team named by `team_id` in `data`
    pub async fn create_product(&self, data: &Data, scopes: &Scopes) -> Result<Product> {
        let team_id = object::get_i64(data, "team_id")?
            .ok_or_else(|| CatalogError::validation("team_id is required to create a product"))?;
        self.authorize_team(team_id, scopes, data)?;

        object::reject_id(data)?;
        let product: Product = object::from_data(data)?;

        let product = self.repository.save(product).await?;
        info!("Created product {:?} for team {}", product.id, team_id);

        refresh_after_write(&self.authorizer, format!("Product {:?}", product.id)).await;
        Ok(product)
    }

    /// Partial update; moving the product to another team also needs
    /// membership of that team
    pub async fn update_product(&self, product_id: ProductId, data: &Data, scopes: &Scopes) -> Result<Product> {
        self.authorize_product(product_id, scopes)?;
        object::check_id(data, product_id, "product")?;

        let existing = self.repository.get(product_id).await?;
        let updated: Product = object::merge(&existing, data, Product::SKIP_KEYS)?;

        let reassigned = updated.team_id != existing.team_id;
        if reassigned {
            let team_id = updated
                .team_id
                .ok_or_else(|| CatalogError::validation("a product cannot be detached from its team"))?;
            self.authorize_team(team_id, scopes, data)?;
        }
        let renamed = updated.name != existing.name;

        let product = self.repository.save(updated).await?;
        debug!("Updated product {} fields {:?}", product_id, data.keys().collect::<Vec<_>>());

        if reassigned || renamed {
            info!("Ownership of product {} changed, refreshing authorization snapshot", product_id);
            refresh_after_write(&self.authorizer, format!("Product {}", product_id)).await;
        }
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: ProductId, scopes: &Scopes) -> Result<ProductId> {
        self.authorize_product(product_id, scopes)?;

        let deleted = self.repository.delete(product_id).await?;
        info!("Deleted product {}", deleted);

        refresh_after_write(&self.authorizer, format!("Deletion of product {}", deleted)).await;
        Ok(deleted)
    }

    // ------------------------------------------------------------------------
    // Contracts
    // ------------------------------------------------------------------------

    pub async fn get_contracts(&self, product_id: ProductId) -> Result<Vec<DataContract>> {
        Ok(self.get_product(product_id).await?.contracts.unwrap_or_default())
    }

    pub async fn get_contract(&self, product_id: ProductId, contract_id: ContractId) -> Result<DataContract> {
        let product = self.get_product(product_id).await?;
        product
            .contract(contract_id)
            .cloned()
            .ok_or_else(|| contract_not_found(product_id, contract_id))
    }

    pub async fn create_contract(&self, product_id: ProductId, data: &Data, scopes: &Scopes) -> Result<DataContract> {
        self.authorize_product(product_id, scopes)?;
        object::reject_id(data)?;

        let mut product = self.get_product(product_id).await?;
        let contract: DataContract = object::from_data(data)?;
        product.contracts.get_or_insert_with(Vec::new).push(contract);

        let saved = self.repository.save(product).await?;
        saved
            .contracts
            .and_then(|mut contracts| contracts.pop())
            .ok_or_else(|| CatalogError::not_found(format!("Contract was not stored on Product {}", product_id)))
    }

    pub async fn update_contract(
        &self,
        product_id: ProductId,
        contract_id: ContractId,
        data: &Data,
        scopes: &Scopes,
    ) -> Result<DataContract> {
        self.authorize_product(product_id, scopes)?;
        object::check_id(data, contract_id, "contract")?;

        let mut product = self.get_product(product_id).await?;
        let contract = product
            .contracts
            .as_mut()
            .and_then(|contracts| contracts.iter_mut().find(|c| c.id == Some(contract_id)))
            .ok_or_else(|| contract_not_found(product_id, contract_id))?;

        let mut updated: DataContract = object::merge(&*contract, data, DataContract::SKIP_KEYS)?;
        if let Some(distributions) = data.get(DISTRIBUTIONS) {
            let distributions: Vec<Distribution> = serde_json::from_value(distributions.clone())
                .map_err(|e| CatalogError::validation(e.to_string()))?;
            updated.distributions = Some(distributions);
        }
        *contract = updated;

        let saved = self.repository.save(product).await?;
        saved
            .contract(contract_id)
            .cloned()
            .ok_or_else(|| contract_not_found(product_id, contract_id))
    }

    pub async fn delete_contract(&self, product_id: ProductId, contract_id: ContractId, scopes: &Scopes) -> Result<ContractId> {
        self.authorize_product(product_id, scopes)?;

        let mut product = self.get_product(product_id).await?;
        let contracts = product.contracts.get_or_insert_with(Vec::new);
        let before = contracts.len();
        contracts.retain(|c| c.id != Some(contract_id));
        if contracts.len() == before {
            return Err(contract_not_found(product_id, contract_id));
        }

        self.repository.save(product).await?;
        Ok(contract_id)
    }

    // ------------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------------

    pub async fn get_services(&self, product_id: ProductId) -> Result<Vec<DataService>> {
        Ok(self.get_product(product_id).await?.services.unwrap_or_default())
    }

    pub async fn get_service(&self, product_id: ProductId, service_id: ServiceId) -> Result<DataService> {
        let product = self.get_product(product_id).await?;
        product
            .service(service_id)
            .cloned()
            .ok_or_else(|| service_not_found(product_id, service_id))
    }

    pub async fn create_service(&self, product_id: ProductId, data: &Data, scopes: &Scopes) -> Result<DataService> {
        self.authorize_product(product_id, scopes)?;
        object::reject_id(data)?;

        let mut product = self.get_product(product_id).await?;
        let service: DataService = object::from_data(data)?;
        product.services.get_or_insert_with(Vec::new).push(service);

        let saved = self.repository.save(product).await?;
        saved
            .services
            .and_then(|mut services| services.pop())
            .ok_or_else(|| CatalogError::not_found(format!("Service was not stored on Product {}", product_id)))
    }

    pub async fn update_service(
        &self,
        product_id: ProductId,
        service_id: ServiceId,
        data: &Data,
        scopes: &Scopes,
    ) -> Result<DataService> {
        self.authorize_product(product_id, scopes)?;
        object::check_id(data, service_id, "service")?;

        let mut product = self.get_product(product_id).await?;
        let service = product
            .services
            .as_mut()
            .and_then(|services| services.iter_mut().find(|s| s.id == Some(service_id)))
            .ok_or_else(|| service_not_found(product_id, service_id))?;
        *service = object::merge(&*service, data, DataService::SKIP_KEYS)?;

        let saved = self.repository.save(product).await?;
        saved
            .service(service_id)
            .cloned()
            .ok_or_else(|| service_not_found(product_id, service_id))
    }

    pub async fn delete_service(&self, product_id: ProductId, service_id: ServiceId, scopes: &Scopes) -> Result<ServiceId> {
        self.authorize_product(product_id, scopes)?;

        let mut product = self.get_product(product_id).await?;
        let services = product.services.get_or_insert_with(Vec::new);
        let before = services.len();
        services.retain(|s| s.id != Some(service_id));
        if services.len() == before {
            return Err(service_not_found(product_id, service_id));
        }

        self.repository.save(product).await?;
        Ok(service_id)
    }
}

fn contract_not_found(product_id: ProductId, contract_id: ContractId) -> CatalogError {
    CatalogError::not_found(format!(
        "Contract with id {} does not exist on Product {}",
        contract_id, product_id
    ))
}

fn service_not_found(product_id: ProductId, service_id: ServiceId) -> CatalogError {
    CatalogError::not_found(format!(
        "Service with id {} does not exist on Product {}",
        service_id, product_id
    ))
}
