//! Validation rules
//!
//! Each rule inspects one aspect of a converted project and records its
//! findings. Rule codes are stable so downstream tooling can filter on them.

use crate::engine::{ValidationError, ValidationResult};
use gbdi_lcax::{Project, Results};

/// Identity rules: ids and names must be present
pub fn check_identity(project: &Project, result: &mut ValidationResult) {
    if project.id.trim().is_empty() {
        result.add(ValidationError::error("EMPTY_ID", "/id", "project id is empty"));
    }
    if project.name.trim().is_empty() {
        result.add(ValidationError::error(
            "EMPTY_NAME",
            "/name",
            "project name is empty",
        ));
    }

    for (key, assembly) in &project.assemblies {
        if assembly.id.trim().is_empty() {
            result.add(ValidationError::error(
                "EMPTY_ID",
                format!("/assemblies/{key}/id"),
                "assembly id is empty",
            ));
        }
        for (product_key, product) in &assembly.products {
            if product.id.trim().is_empty() {
                result.add(ValidationError::error(
                    "EMPTY_ID",
                    format!("/assemblies/{key}/products/{product_key}/id"),
                    "product id is empty",
                ));
            }
        }
    }
}

/// Geometry rules: areas, heights, and floor counts must be plausible
pub fn check_geometry(project: &Project, result: &mut ValidationResult) {
    let info = &project.project_info;

    if let Some(gfa) = &info.gross_floor_area {
        if gfa.value < 0.0 || !gfa.value.is_finite() {
            result.add(ValidationError::error(
                "BAD_AREA",
                "/projectInfo/grossFloorArea",
                format!("gross floor area is {}", gfa.value),
            ));
        }
    }
    if let Some(footprint) = &info.building_footprint {
        if footprint.value < 0.0 || !footprint.value.is_finite() {
            result.add(ValidationError::error(
                "BAD_AREA",
                "/projectInfo/buildingFootprint",
                format!("building footprint is {}", footprint.value),
            ));
        }
    }
    if let Some(height) = &info.building_height {
        if height.value < 0.0 || !height.value.is_finite() {
            result.add(ValidationError::error(
                "BAD_HEIGHT",
                "/projectInfo/buildingHeight",
                format!("building height is {}", height.value),
            ));
        }
    }
    if info.floors_above_ground < 0 {
        result.add(ValidationError::error(
            "BAD_FLOORS",
            "/projectInfo/floorsAboveGround",
            format!("floor count is {}", info.floors_above_ground),
        ));
    }
}

/// Results rules: values must be finite and consistent with the declared
/// impact categories and life cycle stages
pub fn check_results(project: &Project, result: &mut ValidationResult) {
    if let Some(results) = &project.results {
        check_finite(results, "/results", result);

        for category in &project.impact_categories {
            if !results.contains_key(category) {
                result.add(ValidationError::warning(
                    "MISSING_CATEGORY",
                    "/results",
                    format!("declared impact category {category:?} has no results"),
                ));
            }
        }

        for stages in results.values() {
            for stage in stages.keys() {
                if !project.life_cycle_stages.contains(stage) {
                    result.add(ValidationError::warning(
                        "UNDECLARED_STAGE",
                        "/results",
                        format!("results carry undeclared life cycle stage {stage:?}"),
                    ));
                }
            }
        }

        if !results.is_empty() && project.life_cycle_stages.is_empty() {
            result.add(ValidationError::warning(
                "NO_STAGES",
                "/lifeCycleStages",
                "results present but no life cycle stages declared",
            ));
        }
    } else if !project.impact_categories.is_empty() {
        result.add(ValidationError::warning(
            "MISSING_CATEGORY",
            "/results",
            "impact categories declared but project has no results",
        ));
    }

    for (key, assembly) in &project.assemblies {
        if let Some(results) = &assembly.results {
            check_finite(results, &format!("/assemblies/{key}/results"), result);
        }
        for (product_key, product) in &assembly.products {
            check_finite(
                &product.impact_data.impacts,
                &format!("/assemblies/{key}/products/{product_key}/impactData/impacts"),
                result,
            );
        }
    }
}

fn check_finite(results: &Results, path: &str, result: &mut ValidationResult) {
    for (category, stages) in results {
        for (stage, value) in stages {
            if !value.is_finite() {
                result.add(ValidationError::error(
                    "NON_FINITE",
                    path.to_string(),
                    format!("{category:?}/{stage:?} is {value}"),
                ));
            }
        }
    }
}
