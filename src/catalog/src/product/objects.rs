//! Data products and their contracts, distributions and services

use super::enums::{
    ConfidentialityLevel, CoordRefSystem, DataServiceType, DistributionType, Language,
    ProductType, PublicationStatus, Theme, TimeUnit,
};
use catalog_authz::{ProductId, TeamId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type ContractId = i64;
pub type ServiceId = i64;
pub type DistributionId = i64;

/// Endpoint through which a product is served
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataService {
    pub id: Option<ServiceId>,
    #[serde(rename = "type")]
    pub kind: Option<DataServiceType>,
    pub endpoint_url: Option<String>,
}

impl DataService {
    pub const SKIP_KEYS: &'static [&'static str] = &[];
}

/// One way a contract's data is made available
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distribution {
    pub id: Option<DistributionId>,
    pub access_service_id: Option<ServiceId>,
    pub access_url: Option<String>,
    pub download_url: Option<String>,
    pub format: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<DistributionType>,
    pub refresh_period: Option<String>,
}

/// Terms under which (part of) a product is shared
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataContract {
    pub id: Option<ContractId>,
    pub publication_status: Option<PublicationStatus>,
    pub purpose: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub data_steward: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub has_personal_data: Option<bool>,
    pub has_special_personal_data: Option<bool>,
    pub scope: Option<String>,
    pub confidentiality: Option<ConfidentialityLevel>,
    pub start_date: Option<NaiveDate>,
    pub retainment_period: Option<i64>,
    pub distributions: Option<Vec<Distribution>>,
}

impl DataContract {
    /// `distributions` is replaced wholesale, never merged
    pub const SKIP_KEYS: &'static [&'static str] = &["contact_email", "distributions"];
}

/// How often a product's data is refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPeriod {
    pub frequency: u32,
    pub unit: TimeUnit,
}

/// A data or information product owned by one team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub team_id: Option<TeamId>,
    pub language: Option<Language>,
    pub is_geo: Option<bool>,
    pub crs: Option<CoordRefSystem>,
    pub schema_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ProductType>,
    pub contracts: Option<Vec<DataContract>>,
    pub themes: Option<Vec<Theme>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub has_personal_data: Option<bool>,
    pub has_special_personal_data: Option<bool>,
    pub refresh_period: Option<RefreshPeriod>,
    pub publication_status: Option<PublicationStatus>,
    pub owner: Option<String>,
    pub services: Option<Vec<DataService>>,
    pub sources: Option<Vec<ProductId>>,
    pub sinks: Option<Vec<ProductId>>,
}

impl Product {
    /// Nested collections and lineage have their own operations
    pub const SKIP_KEYS: &'static [&'static str] =
        &["contracts", "team", "owner", "sources", "sinks", "services"];

    pub fn contract(&self, contract_id: ContractId) -> Option<&DataContract> {
        self.contracts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|contract| contract.id == Some(contract_id))
    }

    pub fn service(&self, service_id: ServiceId) -> Option<&DataService> {
        self.services
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|service| service.id == Some(service_id))
    }
}
