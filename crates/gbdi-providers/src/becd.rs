//! BECD converter
//!
//! BECD exports one CSV row per building element, repeating the project-level
//! columns on every row. Rows are grouped by `EntityCode`: the first row of a
//! group creates the project (with the `Total_*` stage results and the
//! assessment metadata), and every row whose emissions are included
//! contributes one assembly/product pair named by `EntityElementName`.

use gbdi_lcax::{
    AreaType, Assembly, BuildingType, ImpactCategoryKey, LifeCycleStage, Location, Product,
    Project, ProjectInfo, Results, SoftwareInfo, TechFlow, Unit, ValueUnit, add_impact,
};
use gbdi_mapping::{Error, RecordFields, Result, country, dates, ident, text};
use gbdi_pipeline::{ConvertOutcome, FormatConverter, InputFormat};
use gbdi_record::{FieldDef, FieldType, Record, SourceSchema};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

/// Project-level stage totals
const TOTAL_STAGE_COLUMNS: &[(&str, LifeCycleStage)] = &[
    ("Total_A1ToA3", LifeCycleStage::A1A3),
    ("Total_A4", LifeCycleStage::A4),
    ("Total_A5", LifeCycleStage::A5),
    ("Total_B1", LifeCycleStage::B1),
    ("Total_B2", LifeCycleStage::B2),
    ("Total_B3", LifeCycleStage::B3),
    ("Total_B4", LifeCycleStage::B4),
    ("Total_B5", LifeCycleStage::B5),
    ("Total_C1", LifeCycleStage::C1),
    ("Total_C2", LifeCycleStage::C2),
    ("Total_C3", LifeCycleStage::C3),
    ("Total_C4", LifeCycleStage::C4),
    ("Total_D", LifeCycleStage::D),
];

/// Per-element stage results
const ELEMENT_STAGE_COLUMNS: &[(&str, LifeCycleStage)] = &[
    ("A1ToA3", LifeCycleStage::A1A3),
    ("A4", LifeCycleStage::A4),
    ("A5", LifeCycleStage::A5),
    ("B1", LifeCycleStage::B1),
    ("B2", LifeCycleStage::B2),
    ("B3", LifeCycleStage::B3),
    ("B4", LifeCycleStage::B4),
    ("B5", LifeCycleStage::B5),
    ("C1", LifeCycleStage::C1),
    ("C2", LifeCycleStage::C2),
    ("C3", LifeCycleStage::C3),
    ("C4", LifeCycleStage::C4),
    ("D", LifeCycleStage::D),
];

const TEXT_COLUMNS: &[&str] = &[
    "EntityDescription",
    "EntityElementName",
    "EmissionsIncluded",
    "Location",
    "Country",
    "ProjectType",
    "ConstructionStartDate",
    "ConstructionEndDate",
    "ConstructionOriginalBuildingDate",
    "DateofAssessment",
    "AssessmentCompliantBS_EN15978",
    "CompliantCarbon",
    "ThirdPartyVerification",
    "ThirdPartyVerificationDetail",
    "AssessorName",
    "AssessorEmail",
    "AssessorAffiliation",
    "MaterialQuantitiesComeFrom",
    "AssessmentSoftware",
    "AssessmentScope",
    "PSCFoundationTypePrimary",
    "PSCVerticalElementStructureTypePrimary",
    "PSCVerticalElementStructureTypeSecondary",
    "PSCHorizontalElementTypePrimary",
    "PSCHorizontalElementTypeSecondary",
];

const AREA_COLUMNS: &[&str] = &[
    "DemolishedGIA",
    "NewBuildGIA",
    "RefurbishedGIA",
    "OverallSiteArea",
    "FacadeArea",
    "RoofArea",
];

/// Converter for BECD exports
pub struct Becd {
    schema: SourceSchema,
}

impl Becd {
    /// Create the converter with its source schema
    #[must_use]
    pub fn new() -> Self {
        let mut schema = SourceSchema::new("becd")
            .null_sentinel("no data")
            .field(FieldDef::new("EntityCode").required())
            .field(FieldDef::new("EntityName").required());
        for column in TEXT_COLUMNS {
            schema = schema.field(FieldDef::new(*column));
        }
        for (column, _) in TOTAL_STAGE_COLUMNS.iter().chain(ELEMENT_STAGE_COLUMNS) {
            schema = schema.field(FieldDef::new(*column).with_type(FieldType::Decimal));
        }
        for column in AREA_COLUMNS {
            schema = schema.field(FieldDef::new(*column).with_type(FieldType::Decimal));
        }
        schema = schema
            .field(FieldDef::new("RefStudyPeriod").with_type(FieldType::Integer))
            .field(FieldDef::new("TotalHeightAboveGround").with_type(FieldType::Decimal))
            .field(FieldDef::new("BuildingFootprint").with_type(FieldType::Decimal))
            .field(FieldDef::new("SizePrimary").with_type(FieldType::Decimal))
            .field(FieldDef::new("AboveGroundStorey").with_type(FieldType::Integer))
            .field(FieldDef::new("UndergroundStorey").with_type(FieldType::Integer))
            .field(FieldDef::new("ConstructionCost").with_type(FieldType::Decimal))
            .field(FieldDef::new("StructuralGridX").with_type(FieldType::Decimal));
        Self { schema }
    }

    fn new_project(record: &Record) -> Result<Project> {
        let code = record.require_text("EntityCode")?;
        let mut project = Project::new(
            code.replace("BECD-", ""),
            record.require_text("EntityName")?,
        );
        project.description = record.optional_text("EntityDescription").map(String::from);
        project.reference_study_period = record
            .optional_integer("RefStudyPeriod")
            .and_then(|v| u32::try_from(v).ok());
        project.impact_categories = vec![ImpactCategoryKey::Gwp];
        project.life_cycle_stages = TOTAL_STAGE_COLUMNS.iter().map(|(_, s)| *s).collect();
        project.location = Location::with_city(
            country::resolve_or_unknown(record.optional_text("Country").unwrap_or_default()),
            record.optional_text("Location").map(String::from),
        );
        project.results = Some(stage_results(record, TOTAL_STAGE_COLUMNS)?);
        project.project_info = ProjectInfo {
            building_completion_year: optional_year(record, "ConstructionEndDate")?,
            building_height: Some(ValueUnit::new(
                record.require_decimal("TotalHeightAboveGround")?,
                Unit::M,
            )),
            building_footprint: Some(ValueUnit::new(
                record.require_decimal("BuildingFootprint")?,
                Unit::M,
            )),
            gross_floor_area: Some(AreaType::m2(record.require_decimal("SizePrimary")?, "GIA")),
            building_type: building_type(record)?,
            floors_above_ground: record.require_integer("AboveGroundStorey")?,
            floors_below_ground: record.optional_integer("UndergroundStorey"),
            ..ProjectInfo::default()
        };
        project.meta_data = Some(meta_data(record)?);
        project.software_info = Some(SoftwareInfo {
            lca_software: text::name_or_unknown(record.optional_text("AssessmentSoftware")),
            goal_and_scope_definition: record.optional_text("AssessmentScope").map(String::from),
        });
        Ok(project)
    }

    /// Attach the row's element to the project unless its emissions are
    /// excluded from the assessment.
    fn add_element(project: &mut Project, record: &Record) -> Result<()> {
        if record.optional_text("EmissionsIncluded") == Some("No") {
            return Ok(());
        }

        let element_name = record.require_text("EntityElementName")?;
        let element_id = ident::id_from_seed(element_name);
        let results = stage_results(record, ELEMENT_STAGE_COLUMNS)?;
        let service_life = record.require_integer("RefStudyPeriod").and_then(|v| {
            u32::try_from(v)
                .map_err(|_| Error::invalid_value(record.row, "RefStudyPeriod", "negative value"))
        })?;

        let mut impact_data = TechFlow::new(element_id.clone(), element_name, Unit::Kg);
        impact_data.impacts = results.clone();

        let product = Product {
            id: element_id.clone(),
            name: element_name.to_string(),
            description: String::new(),
            reference_service_life: service_life,
            impact_data,
            quantity: 1.0,
            unit: Unit::Kg,
            results: Some(results.clone()),
            meta_data: None,
            kind: "actual".to_string(),
        };

        let mut assembly = Assembly::new(element_id.clone(), element_name, 1.0, Unit::Kg);
        assembly.results = Some(results);
        assembly.products.insert(product.id.clone(), product);
        project.assemblies.insert(element_id, assembly);
        Ok(())
    }
}

impl Default for Becd {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatConverter for Becd {
    fn name(&self) -> &'static str {
        "becd"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv { delimiter: b',' }
    }

    fn schema(&self) -> &SourceSchema {
        &self.schema
    }

    fn convert(&self, records: Vec<Record>) -> ConvertOutcome {
        let mut outcome = ConvertOutcome::default();
        let mut order: Vec<String> = Vec::new();
        let mut projects: HashMap<String, Project> = HashMap::new();

        for record in records {
            debug!(row = record.row, "converting row");
            let Ok(code) = record.require_text("EntityCode").map(String::from) else {
                outcome.push_issue(record.row, "missing required field 'EntityCode'");
                continue;
            };

            if !projects.contains_key(&code) {
                match Self::new_project(&record) {
                    Ok(project) => {
                        order.push(code.clone());
                        projects.insert(code.clone(), project);
                    }
                    Err(e) => {
                        outcome.push_issue(e.row(), e.to_string());
                        continue;
                    }
                }
            }

            if let Some(project) = projects.get_mut(&code) {
                if let Err(e) = Self::add_element(project, &record) {
                    outcome.push_issue(e.row(), e.to_string());
                }
            }
        }

        for code in order {
            if let Some(project) = projects.remove(&code) {
                outcome.push_project(project);
            }
        }
        outcome
    }
}

fn stage_results(record: &Record, columns: &[(&str, LifeCycleStage)]) -> Result<Results> {
    let mut results = Results::new();
    for (column, stage) in columns {
        add_impact(
            &mut results,
            ImpactCategoryKey::Gwp,
            *stage,
            record.require_decimal(column)?,
        );
    }
    Ok(results)
}

fn building_type(record: &Record) -> Result<BuildingType> {
    let value = record.require_text("ProjectType")?;
    match text::lookup_key(value).as_str() {
        "new built" => Ok(BuildingType::NewConstructionWorks),
        _ => Err(Error::unknown_category(record.row, "building type", value)),
    }
}

/// Year from an optional day-first timestamp column
fn optional_year(record: &Record, field: &str) -> Result<Option<i32>> {
    match record.optional_text(field) {
        None => Ok(None),
        Some(raw) => dates::year_from_timestamp(raw)
            .map(Some)
            .map_err(|e| Error::invalid_value(record.row, field, e.to_string())),
    }
}

fn meta_data(record: &Record) -> Result<serde_json::Value> {
    // Thermal envelope keeps the source's fallback order: facade area when
    // reported, roof area otherwise.
    let thermal_envelope = record
        .optional_decimal("FacadeArea")
        .or_else(|| record.optional_decimal("RoofArea"))
        .unwrap_or(0.0);

    Ok(json!({
        "source": { "name": "BECD", "url": null },
        "construction_start": record.optional_text("ConstructionStartDate"),
        "construction_year_existing_building":
            optional_year(record, "ConstructionOriginalBuildingDate")?,
        "assessment": {
            "year": optional_year(record, "DateofAssessment")?,
            "date": record.optional_text("DateofAssessment"),
            "en15978_compliance":
                record.optional_text("AssessmentCompliantBS_EN15978") == Some("Fully compliant"),
            "rics_2017_compliance": record.optional_text("CompliantCarbon")
                == Some("Fully compliant with 2017 version"),
            "verified": record.optional_text("ThirdPartyVerification") == Some("Yes"),
            "verified_info": record.optional_text("ThirdPartyVerificationDetail"),
            "assessor": {
                "name": record.optional_text("AssessorName"),
                "email": record.optional_text("AssessorEmail"),
                "organization": record.optional_text("AssessorAffiliation"),
            },
            "quantity_source": record.optional_text("MaterialQuantitiesComeFrom"),
        },
        "cost": {
            "total_cost": record.optional_decimal("ConstructionCost"),
            "currency": "gbp",
        },
        "demolished_area": {
            "value": record.optional_decimal("DemolishedGIA"),
            "unit": "m2",
        },
        "newly_built_area": {
            "value": record.optional_decimal("NewBuildGIA"),
            "unit": "m2",
        },
        "retrofitted_area": {
            "value": record.optional_decimal("RefurbishedGIA"),
            "unit": "m2",
        },
        "project_site_area": {
            "value": record.optional_decimal("OverallSiteArea"),
            "unit": "m2",
        },
        "thermal_envelope_area": {
            "value": thermal_envelope,
            "unit": "m2",
        },
        "structural": {
            "column_grid_long": {
                "value": record.require_decimal("StructuralGridX")?,
                "unit": "m",
            },
            "foundation_type": record.optional_text("PSCFoundationTypePrimary"),
            "vertical_gravity_system":
                record.optional_text("PSCVerticalElementStructureTypePrimary"),
            "secondary_vertical_gravity_system":
                record.optional_text("PSCVerticalElementStructureTypeSecondary"),
            "horizontal_gravity_system":
                record.optional_text("PSCHorizontalElementTypePrimary"),
            "secondary_horizontal_gravity_system":
                record.optional_text("PSCHorizontalElementTypeSecondary"),
        },
    }))
}
