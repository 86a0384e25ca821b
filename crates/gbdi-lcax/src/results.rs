//! Impact results
//!
//! Results are nested ordered maps: impact category → life cycle stage →
//! value. `BTreeMap` keeps serialization order deterministic.

use crate::assembly::Assembly;
use crate::enums::{ImpactCategoryKey, LifeCycleStage};
use crate::project::Project;
use std::collections::BTreeMap;

/// Per-stage values for one impact category
pub type StageResults = BTreeMap<LifeCycleStage, f64>;

/// Full results map: impact category → stage → value
pub type Results = BTreeMap<ImpactCategoryKey, StageResults>;

/// Add a value to a results map, summing with any existing entry
pub fn add_impact(results: &mut Results, key: ImpactCategoryKey, stage: LifeCycleStage, value: f64) {
    *results.entry(key).or_default().entry(stage).or_insert(0.0) += value;
}

/// Merge `source` into `target`, scaling every value by `factor`
pub fn merge_scaled(target: &mut Results, source: &Results, factor: f64) {
    for (key, stages) in source {
        for (stage, value) in stages {
            add_impact(target, *key, *stage, value * factor);
        }
    }
}

/// Aggregate results bottom-up: techflow impacts × product quantity become
/// product results, products sum into assembly results (scaled by assembly
/// quantity), and assemblies sum into the project results.
///
/// Overwrites any results already present on the touched nodes.
pub fn calculate_results(project: &mut Project) {
    let mut project_results = Results::new();

    for assembly in project.assemblies.values_mut() {
        let assembly_results = calculate_assembly(assembly);
        merge_scaled(&mut project_results, &assembly_results, 1.0);
        assembly.results = Some(assembly_results);
    }

    project.results = if project_results.is_empty() {
        None
    } else {
        Some(project_results)
    };
}

fn calculate_assembly(assembly: &mut Assembly) -> Results {
    let mut assembly_results = Results::new();

    for product in assembly.products.values_mut() {
        let mut product_results = Results::new();
        merge_scaled(&mut product_results, &product.impact_data.impacts, product.quantity);
        merge_scaled(&mut assembly_results, &product_results, assembly.quantity);
        product.results = Some(product_results);
    }

    assembly_results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{Product, TechFlow};
    use crate::enums::{Country, Unit};
    use crate::project::Project;

    fn techflow(gwp_a1a3: f64) -> TechFlow {
        let mut impacts = Results::new();
        add_impact(&mut impacts, ImpactCategoryKey::Gwp, LifeCycleStage::A1A3, gwp_a1a3);
        TechFlow {
            id: "tf".to_string(),
            name: "concrete".to_string(),
            declared_unit: Unit::Kg,
            format_version: crate::FORMAT_VERSION.to_string(),
            source: None,
            comment: None,
            location: Country::unknown(),
            impacts,
            meta_data: None,
            kind: "actual".to_string(),
        }
    }

    fn product(quantity: f64, gwp_a1a3: f64) -> Product {
        Product {
            id: "p".to_string(),
            name: "slab".to_string(),
            description: String::new(),
            reference_service_life: 50,
            impact_data: techflow(gwp_a1a3),
            quantity,
            unit: Unit::Kg,
            results: None,
            meta_data: None,
            kind: "actual".to_string(),
        }
    }

    #[test]
    fn add_impact_sums() {
        let mut results = Results::new();
        add_impact(&mut results, ImpactCategoryKey::Gwp, LifeCycleStage::A4, 1.5);
        add_impact(&mut results, ImpactCategoryKey::Gwp, LifeCycleStage::A4, 2.0);
        assert_eq!(results[&ImpactCategoryKey::Gwp][&LifeCycleStage::A4], 3.5);
    }

    #[test]
    fn merge_scaled_applies_factor() {
        let mut source = Results::new();
        add_impact(&mut source, ImpactCategoryKey::Gwp, LifeCycleStage::B6, 10.0);

        let mut target = Results::new();
        merge_scaled(&mut target, &source, 50.0);
        assert_eq!(target[&ImpactCategoryKey::Gwp][&LifeCycleStage::B6], 500.0);
    }

    #[test]
    fn calculate_rolls_up_to_project() {
        let mut assembly = Assembly {
            id: "a".to_string(),
            name: "frame".to_string(),
            classification: None,
            quantity: 1.0,
            unit: Unit::Kg,
            products: BTreeMap::new(),
            results: None,
            meta_data: None,
            kind: "actual".to_string(),
        };
        assembly.products.insert("p1".to_string(), product(2.0, 3.0));
        assembly.products.insert("p2".to_string(), product(1.0, 4.0));

        let mut project = Project::new("id", "name");
        project.assemblies.insert("a".to_string(), assembly);

        calculate_results(&mut project);

        let results = project.results.as_ref().unwrap();
        assert_eq!(results[&ImpactCategoryKey::Gwp][&LifeCycleStage::A1A3], 10.0);

        let assembly = &project.assemblies["a"];
        let a_results = assembly.results.as_ref().unwrap();
        assert_eq!(a_results[&ImpactCategoryKey::Gwp][&LifeCycleStage::A1A3], 10.0);

        let p1_results = assembly.products["p1"].results.as_ref().unwrap();
        assert_eq!(p1_results[&ImpactCategoryKey::Gwp][&LifeCycleStage::A1A3], 6.0);
    }
}
