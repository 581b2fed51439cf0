//! Coded product vocabularies
//!
//! Each variant serializes to the short code stored and exchanged by the
//! catalog, e.g. `PublicationStatus::Published` is `"P"`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "D")]
    Dataproduct,
    #[serde(rename = "I")]
    Informatieproduct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "B")]
    Bestuur,
    #[serde(rename = "CR")]
    CultuurEnRecreatie,
    #[serde(rename = "E")]
    Economie,
    #[serde(rename = "F")]
    Financien,
    #[serde(rename = "H")]
    Huisvesting,
    #[serde(rename = "I")]
    Internationaal,
    #[serde(rename = "L")]
    Landbouw,
    #[serde(rename = "MI")]
    MigratieEnIntegratie,
    #[serde(rename = "NM")]
    NatuurEnMilieu,
    #[serde(rename = "OW")]
    OnderwijsEnWetenschap,
    #[serde(rename = "OOV")]
    OpenbareOrdeEnVeiligheid,
    #[serde(rename = "R")]
    Recht,
    #[serde(rename = "RI")]
    RuimteEnInfrastructuur,
    #[serde(rename = "SZ")]
    SocialeZekerheid,
    #[serde(rename = "V")]
    Verkeer,
    #[serde(rename = "W")]
    Werk,
    #[serde(rename = "ZG")]
    ZorgEnGezondheid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "NL")]
    Nederlands,
    #[serde(rename = "EN")]
    English,
}

/// Lifecycle of a product or contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationStatus {
    #[serde(rename = "D")]
    Draft,
    #[serde(rename = "R")]
    InReview,
    #[serde(rename = "A")]
    Approved,
    #[serde(rename = "P")]
    Published,
    #[serde(rename = "E")]
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidentialityLevel {
    #[serde(rename = "O")]
    Openbaar,
    #[serde(rename = "I")]
    Intern,
    #[serde(rename = "V")]
    Vertrouwelijk,
    #[serde(rename = "G")]
    Geheim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataServiceType {
    Rest,
    Wms,
    Wfs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionType {
    #[serde(rename = "D")]
    Dashboard,
    #[serde(rename = "M")]
    Folder,
    #[serde(rename = "F")]
    File,
    #[serde(rename = "C")]
    Custom,
    #[serde(rename = "A")]
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoordRefSystem {
    Rd,
    Etrs89,
    Wgs84,
    Utm35s,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}
