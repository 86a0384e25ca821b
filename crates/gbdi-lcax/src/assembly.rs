//! Assemblies, products, and techflow impact data

use crate::enums::{Country, Unit};
use crate::results::Results;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A building assembly (element group) within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assembly {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Vec<Classification>>,
    pub quantity: f64,
    pub unit: Unit,
    pub products: BTreeMap<String, Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Assembly {
    /// Create an `actual`-type assembly with no products
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            classification: None,
            quantity,
            unit,
            products: BTreeMap::new(),
            results: None,
            meta_data: None,
            kind: "actual".to_string(),
        }
    }
}

/// A classification reference (e.g. SfB element class)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub system: String,
    pub code: String,
    pub name: String,
}

/// A product within an assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub reference_service_life: u32,
    pub impact_data: TechFlow,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Impact data for a product (a techflow in the source taxonomy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechFlow {
    pub id: String,
    pub name: String,
    pub declared_unit: Unit,
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub location: Country,
    pub impacts: Results,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TechFlow {
    /// Create an `actual`-type techflow with empty impacts
    pub fn new(id: impl Into<String>, name: impl Into<String>, declared_unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            declared_unit,
            format_version: crate::FORMAT_VERSION.to_string(),
            source: None,
            comment: None,
            location: Country::unknown(),
            impacts: Results::new(),
            meta_data: None,
            kind: "actual".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{ImpactCategoryKey, LifeCycleStage};
    use crate::results::add_impact;

    #[test]
    fn assembly_serializes_camel_case_with_type_tag() {
        let assembly = Assembly::new("a1", "Building", 1.0, Unit::Pcs);
        let json = serde_json::to_value(&assembly).unwrap();
        assert_eq!(json["type"], "actual");
        assert_eq!(json["unit"], "pcs");
        assert!(json.get("results").is_none());
        assert!(json.get("metaData").is_none());
    }

    #[test]
    fn techflow_carries_format_version_and_impacts() {
        let mut tf = TechFlow::new("t1", "steel", Unit::Kg);
        add_impact(&mut tf.impacts, ImpactCategoryKey::Gwp, LifeCycleStage::A1A3, 1.0);

        let json = serde_json::to_value(&tf).unwrap();
        assert_eq!(json["formatVersion"], crate::FORMAT_VERSION);
        assert_eq!(json["declaredUnit"], "kg");
        assert_eq!(json["location"], "unknown");
        assert_eq!(json["impacts"]["gwp"]["a1a3"], 1.0);
    }
}
