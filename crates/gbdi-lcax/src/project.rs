//! Project documents

use crate::assembly::Assembly;
use crate::enums::{
    BuildingType, BuildingTypology, Country, GeneralEnergyClass, ImpactCategoryKey,
    LifeCycleStage, ProjectPhase, RoofType, Unit,
};
use crate::results::Results;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A converted project document in the ingest schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_study_period: Option<u32>,
    pub life_cycle_stages: Vec<LifeCycleStage>,
    pub impact_categories: Vec<ImpactCategoryKey>,
    pub assemblies: BTreeMap<String, Assembly>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
    pub project_info: ProjectInfo,
    pub project_phase: ProjectPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_info: Option<SoftwareInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
}

impl Project {
    /// Create a minimal project with defaults for everything but id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            location: Location::country(Country::unknown()),
            owner: None,
            format_version: crate::FORMAT_VERSION.to_string(),
            classification_system: None,
            reference_study_period: None,
            life_cycle_stages: Vec::new(),
            impact_categories: Vec::new(),
            assemblies: BTreeMap::new(),
            results: None,
            project_info: ProjectInfo::default(),
            project_phase: ProjectPhase::Other,
            software_info: None,
            meta_data: None,
        }
    }
}

/// Where the building stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: Country,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    /// Location known only down to the country
    #[must_use]
    pub fn country(country: Country) -> Self {
        Self {
            country,
            city: None,
            address: None,
        }
    }

    /// Location with an optional city
    #[must_use]
    pub fn with_city(country: Country, city: Option<String>) -> Self {
        Self {
            country,
            city,
            address: None,
        }
    }
}

/// Building information block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_floor_area: Option<AreaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heated_floor_area: Option<AreaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_footprint: Option<ValueUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_height: Option<ValueUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_completion_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_users: Option<i64>,
    pub building_type: BuildingType,
    pub building_typology: Vec<BuildingTypology>,
    pub floors_above_ground: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors_below_ground: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_type: Option<String>,
    pub general_energy_class: GeneralEnergyClass,
    pub roof_type: RoofType,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            kind: "buildingInfo".to_string(),
            gross_floor_area: None,
            heated_floor_area: None,
            building_footprint: None,
            building_height: None,
            building_completion_year: None,
            building_users: None,
            building_type: BuildingType::Other,
            building_typology: vec![BuildingTypology::Unknown],
            floors_above_ground: 0,
            floors_below_ground: None,
            frame_type: None,
            general_energy_class: GeneralEnergyClass::Unknown,
            roof_type: RoofType::Unknown,
        }
    }
}

/// An area with its measurement definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaType {
    pub unit: Unit,
    pub value: f64,
    pub definition: String,
}

impl AreaType {
    /// Square-meter area with a definition label
    pub fn m2(value: f64, definition: impl Into<String>) -> Self {
        Self {
            unit: Unit::M2,
            value,
            definition: definition.into(),
        }
    }
}

/// A plain value with a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueUnit {
    pub unit: Unit,
    pub value: f64,
}

impl ValueUnit {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { unit, value }
    }
}

/// Information about the LCA software used for the assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareInfo {
    pub lca_software: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_and_scope_definition: Option<String>,
}

impl SoftwareInfo {
    /// Software name only
    pub fn named(lca_software: impl Into<String>) -> Self {
        Self {
            lca_software: lca_software.into(),
            goal_and_scope_definition: None,
        }
    }
}
