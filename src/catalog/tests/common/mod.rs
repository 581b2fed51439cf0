//! Shared fixtures for the catalog service tests

#![allow(dead_code)]

use catalog_authz::{AuthSettings, Scopes};
use catalog_domain::{
    Catalog, Data, DataContract, DataService, InMemoryProductRepository, InMemoryTeamRepository,
    Product, Team,
};
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const ADMIN: &str = "admin";
pub const UNAUTHORIZED: &str = "unauthorized_scope";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

pub fn scopes(list: &[&str]) -> Scopes {
    list.iter().copied().collect()
}

pub fn data(value: Value) -> Data {
    value.as_object().cloned().expect("test data must be a JSON object")
}

pub fn team() -> Team {
    Team {
        id: Some(1),
        name: "Data Diensten".into(),
        description: "Data en informatie".into(),
        acronym: "DADI".into(),
        po_name: "Ada Lovelace".into(),
        po_email: "a.lovelace@example.com".into(),
        contact_email: "dadi@example.com".into(),
        scope: "scope_dadi".into(),
    }
}

pub fn other_team() -> Team {
    Team {
        id: Some(2),
        name: "Beheer Openbare Ruimte".into(),
        description: String::new(),
        acronym: "BOR".into(),
        po_name: "Jan Bor".into(),
        po_email: "j.bor@example.com".into(),
        contact_email: "bor@example.com".into(),
        scope: "scope_bor".into(),
    }
}

/// Product 1 of `team()`, with one contract and one service
pub fn product() -> Product {
    Product {
        id: Some(1),
        name: Some("Bomen".into()),
        description: Some("Alle bomen in de stad".into()),
        team_id: Some(1),
        contracts: Some(vec![DataContract {
            name: Some("bomen contract".into()),
            ..Default::default()
        }]),
        services: Some(vec![DataService::default()]),
        ..Default::default()
    }
}

pub async fn catalog(teams: Vec<Team>, products: Vec<Product>) -> Catalog {
    init_tracing();
    let teams = InMemoryTeamRepository::with_teams(teams).await.unwrap();
    let products = InMemoryProductRepository::with_products(products).await.unwrap();
    Catalog::new(AuthSettings::new(ADMIN, true), Arc::new(teams), Arc::new(products))
        .await
        .unwrap()
}
