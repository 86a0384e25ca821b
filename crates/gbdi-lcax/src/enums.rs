//! Categorical vocabularies of the ingest schema

use serde::{Deserialize, Serialize};

/// EN 15978 life cycle stages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LifeCycleStage {
    A0,
    A1A3,
    A4,
    A5,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    C1,
    C2,
    C3,
    C4,
    D,
}

impl LifeCycleStage {
    /// Parse a stage from its EN 15978 label as found in source exports
    /// (`A1-3`, `a4`, `D`, ...).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "a0" => Some(Self::A0),
            "a1-3" | "a1a3" | "a1-a3" => Some(Self::A1A3),
            "a4" => Some(Self::A4),
            "a5" => Some(Self::A5),
            "b1" => Some(Self::B1),
            "b2" => Some(Self::B2),
            "b3" => Some(Self::B3),
            "b4" => Some(Self::B4),
            "b5" => Some(Self::B5),
            "b6" => Some(Self::B6),
            "b7" => Some(Self::B7),
            "b8" => Some(Self::B8),
            "c1" => Some(Self::C1),
            "c2" => Some(Self::C2),
            "c3" => Some(Self::C3),
            "c4" => Some(Self::C4),
            "d" => Some(Self::D),
            _ => None,
        }
    }
}

/// Environmental impact categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ImpactCategoryKey {
    Gwp,
    GwpFos,
    GwpBio,
    GwpLul,
    Odp,
    Ap,
    EpFw,
    EpMar,
    EpTer,
    Pocp,
    AdpMime,
    AdpFos,
    Wdp,
    Pm,
    Irp,
    EtpFw,
    HtpC,
    HtpNc,
    Sqp,
}

/// Measurement units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    M,
    M2,
    M3,
    Kg,
    Pcs,
    Unknown,
}

/// ISO 3166-1 alpha-3 country code (lowercase), with an `unknown` fallback
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    /// Wrap an alpha-3 code; normalized to lowercase
    pub fn new(alpha3: impl Into<String>) -> Self {
        Self(alpha3.into().to_lowercase())
    }

    /// The unresolved-country fallback
    #[must_use]
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    /// The alpha-3 code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether the country could not be resolved
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == "unknown"
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of construction works the project covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    NewConstructionWorks,
    DeconstructionAndNewConstructionWorks,
    RetrofitWorks,
    Operations,
    #[default]
    Other,
}

/// Building use typology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingTypology {
    Office,
    Residential,
    Public,
    Commercial,
    Industrial,
    Infrastructure,
    Agricultural,
    Other,
    Unknown,
}

/// Roof geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    Flat,
    Pitched,
    Saddle,
    Pyramid,
    Other,
    #[default]
    Unknown,
}

/// General energy performance class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneralEnergyClass {
    Standard,
    Advanced,
    Existing,
    #[default]
    Unknown,
}

/// Phase of the project at assessment time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPhase {
    Design,
    Construction,
    InUse,
    #[default]
    Other,
}
