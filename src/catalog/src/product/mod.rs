//! Data products, their contracts and services

pub mod enums;
mod objects;
mod repository;
mod service;

pub use objects::{
    ContractId, DataContract, DataService, Distribution, DistributionId, Product, RefreshPeriod,
    ServiceId,
};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
