//! CarbEnMats converter
//!
//! One project per row of a CarbEnMats CSV export (semicolon-delimited).
//! The export reports stage totals as per-year intensities; values are scaled
//! by the 50-year reference study period on the way in. Cells holding the
//! literal `no data` read as absent.

use gbdi_lcax::{
    AreaType, BuildingType, BuildingTypology, GeneralEnergyClass, ImpactCategoryKey,
    LifeCycleStage, Location, Project, ProjectInfo, Results, RoofType, SoftwareInfo, Unit,
    ValueUnit, add_impact,
};
use gbdi_mapping::units::{REFERENCE_STUDY_PERIOD_YEARS, per_year_to_study_period};
use gbdi_mapping::{Error, RecordFields, Result, country, ident, text};
use gbdi_pipeline::{ConvertOutcome, FormatConverter, InputFormat};
use gbdi_record::{FieldDef, FieldType, Record, SourceSchema};
use serde_json::json;
use tracing::debug;

/// Stage-total columns and the stage each one feeds
const STAGE_COLUMNS: &[(&str, LifeCycleStage)] = &[
    ("GHG_A123_total", LifeCycleStage::A1A3),
    ("GHG_A45_total", LifeCycleStage::A4),
    ("GHG_B1234_total", LifeCycleStage::B1),
    ("GHG_B67_total", LifeCycleStage::B6),
    ("GHG_C12_total", LifeCycleStage::C1),
    ("GHG_C34_total", LifeCycleStage::C3),
];

/// Converter for CarbEnMats exports
pub struct CarbEnMats {
    schema: SourceSchema,
}

impl CarbEnMats {
    /// Create the converter with its source schema
    #[must_use]
    pub fn new() -> Self {
        let mut schema = SourceSchema::new("carbenmats").null_sentinel("no data");
        for (column, _) in STAGE_COLUMNS {
            schema = schema.field(FieldDef::new(*column).with_type(FieldType::Decimal));
        }
        schema = schema
            .field(FieldDef::new("lca_RSP").with_type(FieldType::Integer))
            .field(FieldDef::new("site_country_iso2").required())
            .field(FieldDef::new("site_region_local"))
            .field(FieldDef::new("meta_title"))
            .field(FieldDef::new("meta_year").with_type(FieldType::Integer))
            .field(FieldDef::new("bldg_year_complete").with_type(FieldType::Integer))
            .field(FieldDef::new("bldg_users_total").with_type(FieldType::Decimal))
            .field(FieldDef::new("bldg_area_gfa").with_type(FieldType::Decimal))
            .field(FieldDef::new("bldg_area_definition"))
            .field(FieldDef::new("bldg_footprint").with_type(FieldType::Decimal))
            .field(FieldDef::new("bldg_project_type"))
            .field(FieldDef::new("bldg_use_subtype"))
            .field(FieldDef::new("bldg_floors_ag").with_type(FieldType::Integer))
            .field(FieldDef::new("bldg_floors_bg").with_type(FieldType::Integer))
            .field(FieldDef::new("bldg_struct_type"))
            .field(FieldDef::new("bldg_energy_class_general"))
            .field(FieldDef::new("bldg_roof_type"))
            .field(FieldDef::new("lca_software"))
            .field(FieldDef::new("lca_goal_scope"));
        Self { schema }
    }

    /// Stage results scaled from per-year intensities; `None` when the row
    /// carries no stage totals at all.
    fn results(record: &Record) -> Option<Results> {
        let mut results = Results::new();
        for (column, stage) in STAGE_COLUMNS {
            if let Some(value) = record.optional_decimal(column) {
                add_impact(
                    &mut results,
                    ImpactCategoryKey::Gwp,
                    *stage,
                    per_year_to_study_period(value, REFERENCE_STUDY_PERIOD_YEARS),
                );
            }
        }
        if results.is_empty() { None } else { Some(results) }
    }

    fn map_record(&self, record: &Record) -> Result<Project> {
        let results = Self::results(record);
        let stages: Vec<LifeCycleStage> = results
            .as_ref()
            .map(|r| r[&ImpactCategoryKey::Gwp].keys().copied().collect())
            .unwrap_or_default();

        let seed = record.fingerprint(&self.schema);
        let mut project = Project::new(
            ident::id_from_seed(&seed),
            text::name_or_unknown(record.optional_text("meta_title")),
        );
        project.reference_study_period = record
            .optional_integer("lca_RSP")
            .and_then(|v| u32::try_from(v).ok());
        project.impact_categories = if results.is_some() {
            vec![ImpactCategoryKey::Gwp]
        } else {
            Vec::new()
        };
        project.life_cycle_stages = stages;
        project.location = location(record)?;
        project.results = results;
        project.project_info = ProjectInfo {
            building_completion_year: record
                .optional_integer("bldg_year_complete")
                .and_then(|v| i32::try_from(v).ok()),
            building_users: building_users(record),
            gross_floor_area: Some(AreaType::m2(
                record.optional_decimal("bldg_area_gfa").unwrap_or(0.0),
                record.optional_text("bldg_area_definition").unwrap_or_default(),
            )),
            building_footprint: record
                .optional_decimal("bldg_footprint")
                .map(|v| ValueUnit::new(v, Unit::M2)),
            building_type: building_type(record)?,
            building_typology: building_typology(record)?,
            floors_above_ground: record.optional_integer("bldg_floors_ag").unwrap_or(0),
            floors_below_ground: record.optional_integer("bldg_floors_bg"),
            frame_type: record.optional_text("bldg_struct_type").map(String::from),
            general_energy_class: energy_class(record)?,
            roof_type: roof_type(record)?,
            ..ProjectInfo::default()
        };
        project.meta_data = Some(json!({
            "assessment_year": record.optional_integer("meta_year"),
        }));
        project.software_info = Some(SoftwareInfo {
            lca_software: text::name_or_unknown(record.optional_text("lca_software")),
            goal_and_scope_definition: record.optional_text("lca_goal_scope").map(String::from),
        });
        Ok(project)
    }
}

impl Default for CarbEnMats {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatConverter for CarbEnMats {
    fn name(&self) -> &'static str {
        "carbenmats"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv { delimiter: b';' }
    }

    fn schema(&self) -> &SourceSchema {
        &self.schema
    }

    fn convert(&self, records: Vec<Record>) -> ConvertOutcome {
        let mut outcome = ConvertOutcome::default();
        for record in records {
            debug!(row = record.row, "converting row");
            match self.map_record(&record) {
                Ok(project) => outcome.push_project(project),
                Err(e) => outcome.push_issue(e.row(), e.to_string()),
            }
        }
        outcome
    }
}

fn location(record: &Record) -> Result<Location> {
    let iso2 = record.require_text("site_country_iso2")?;
    let resolved = country::from_alpha2(iso2)
        .ok_or_else(|| Error::unknown_category(record.row, "country", iso2))?;
    Ok(Location::with_city(
        resolved,
        record.optional_text("site_region_local").map(String::from),
    ))
}

fn building_users(record: &Record) -> Option<i64> {
    // Reported as decimals like "120.0"; only whole users survive.
    #[allow(clippy::cast_possible_truncation)]
    record
        .optional_decimal("bldg_users_total")
        .map(|v| v.trunc() as i64)
}

fn building_type(record: &Record) -> Result<BuildingType> {
    let Some(value) = record.optional_text("bldg_project_type") else {
        return Ok(BuildingType::Other);
    };
    match text::lookup_key(value).as_str() {
        "new construction" => Ok(BuildingType::NewConstructionWorks),
        "refurbishment" => Ok(BuildingType::RetrofitWorks),
        "existing building" => Ok(BuildingType::Operations),
        _ => Err(Error::unknown_category(record.row, "building type", value)),
    }
}

fn building_typology(record: &Record) -> Result<Vec<BuildingTypology>> {
    let Some(value) = record.optional_text("bldg_use_subtype") else {
        return Ok(vec![BuildingTypology::Other]);
    };
    let typology = match text::lookup_key(value).as_str() {
        "single family house" | "multi-family house" | "semi-detached" | "row house" => {
            BuildingTypology::Residential
        }
        "office" => BuildingTypology::Office,
        "school and daycare" | "hospital and health" | "art & culture"
        | "sport & entertainment" => BuildingTypology::Public,
        "hotel & resort" | "retail and restaurant" => BuildingTypology::Commercial,
        "aviation" => BuildingTypology::Infrastructure,
        "technology & science" => BuildingTypology::Industrial,
        "other" | "mixed use" => BuildingTypology::Other,
        _ => {
            return Err(Error::unknown_category(
                record.row,
                "building typology",
                value,
            ));
        }
    };
    Ok(vec![typology])
}

fn energy_class(record: &Record) -> Result<GeneralEnergyClass> {
    let Some(value) = record.optional_text("bldg_energy_class_general") else {
        return Ok(GeneralEnergyClass::Unknown);
    };
    match text::lookup_key(value).as_str() {
        "new standard" => Ok(GeneralEnergyClass::Standard),
        "new advanced" => Ok(GeneralEnergyClass::Advanced),
        "existing standard" => Ok(GeneralEnergyClass::Existing),
        _ => Err(Error::unknown_category(record.row, "energy class", value)),
    }
}

fn roof_type(record: &Record) -> Result<RoofType> {
    let Some(value) = record.optional_text("bldg_roof_type") else {
        return Ok(RoofType::Other);
    };
    match text::lookup_key(value).as_str() {
        "flat roof" => Ok(RoofType::Flat),
        "single pitched roof" => Ok(RoofType::Pitched),
        "gable or saddle roof" => Ok(RoofType::Saddle),
        "pyramid roof" => Ok(RoofType::Pyramid),
        "other" => Ok(RoofType::Other),
        _ => Err(Error::unknown_category(record.row, "roof type", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbdi_record::Value;

    fn record() -> Record {
        let mut r = Record::new(1);
        r.set("GHG_A123_total", Value::Decimal(8.0));
        r.set("GHG_B67_total", Value::Decimal(2.0));
        r.set("lca_RSP", Value::Integer(50));
        r.set("site_country_iso2", Value::Text("DK".into()));
        r.set("site_region_local", Value::Text("Copenhagen".into()));
        r.set("meta_title", Value::Text("Harbour housing".into()));
        r.set("meta_year", Value::Integer(2022));
        r.set("bldg_year_complete", Value::Integer(2019));
        r.set("bldg_users_total", Value::Decimal(120.0));
        r.set("bldg_area_gfa", Value::Decimal(5400.0));
        r.set("bldg_area_definition", Value::Text("GFA".into()));
        r.set("bldg_project_type", Value::Text("New Construction".into()));
        r.set("bldg_use_subtype", Value::Text("Multi-Family House".into()));
        r.set("bldg_floors_ag", Value::Integer(5));
        r.set("bldg_struct_type", Value::Text("Concrete".into()));
        r.set("bldg_energy_class_general", Value::Text("New Standard".into()));
        r.set("bldg_roof_type", Value::Text("Flat Roof".into()));
        r.set("lca_software", Value::Text("LCAbyg".into()));
        r
    }

    #[test]
    fn maps_a_full_row() {
        let converter = CarbEnMats::new();
        let project = converter.map_record(&record()).unwrap();

        assert_eq!(project.name, "Harbour housing");
        assert_eq!(project.location.country.code(), "dnk");
        assert_eq!(project.location.city.as_deref(), Some("Copenhagen"));
        assert_eq!(project.reference_study_period, Some(50));

        // Per-year intensities scaled by the 50-year study period.
        let gwp = &project.results.as_ref().unwrap()[&ImpactCategoryKey::Gwp];
        assert_eq!(gwp[&LifeCycleStage::A1A3], 400.0);
        assert_eq!(gwp[&LifeCycleStage::B6], 100.0);
        assert_eq!(
            project.life_cycle_stages,
            vec![LifeCycleStage::A1A3, LifeCycleStage::B6]
        );

        let info = &project.project_info;
        assert_eq!(info.building_users, Some(120));
        assert_eq!(info.building_type, BuildingType::NewConstructionWorks);
        assert_eq!(info.building_typology, vec![BuildingTypology::Residential]);
        assert_eq!(info.general_energy_class, GeneralEnergyClass::Standard);
        assert_eq!(info.roof_type, RoofType::Flat);
    }

    #[test]
    fn no_stage_totals_means_no_results() {
        let converter = CarbEnMats::new();
        let mut r = record();
        for (column, _) in STAGE_COLUMNS {
            r.set(*column, Value::Null);
        }
        let project = converter.map_record(&r).unwrap();
        assert!(project.results.is_none());
        assert!(project.impact_categories.is_empty());
        assert!(project.life_cycle_stages.is_empty());
    }

    #[test]
    fn missing_categoricals_fall_back() {
        let converter = CarbEnMats::new();
        let mut r = record();
        r.set("bldg_project_type", Value::Null);
        r.set("bldg_use_subtype", Value::Null);
        r.set("bldg_energy_class_general", Value::Null);
        r.set("bldg_roof_type", Value::Null);
        r.set("meta_title", Value::Null);

        let project = converter.map_record(&r).unwrap();
        assert_eq!(project.name, "Unknown");
        let info = &project.project_info;
        assert_eq!(info.building_type, BuildingType::Other);
        assert_eq!(info.building_typology, vec![BuildingTypology::Other]);
        assert_eq!(info.general_energy_class, GeneralEnergyClass::Unknown);
        assert_eq!(info.roof_type, RoofType::Other);
    }

    #[test]
    fn unknown_country_is_rejected() {
        let converter = CarbEnMats::new();
        let mut r = record();
        r.set("site_country_iso2", Value::Text("XX".into()));
        let err = converter.map_record(&r).unwrap_err();
        assert!(err.to_string().contains("unknown country"));
    }

    #[test]
    fn unknown_roof_type_is_rejected() {
        let converter = CarbEnMats::new();
        let mut r = record();
        r.set("bldg_roof_type", Value::Text("Dome".into()));
        let err = converter.map_record(&r).unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[test]
    fn convert_keeps_input_order() {
        let converter = CarbEnMats::new();
        let mut second = record();
        second.row = 2;
        second.set("meta_title", Value::Text("Second".into()));

        let outcome = converter.convert(vec![record(), second]);
        assert_eq!(outcome.projects.len(), 2);
        assert_eq!(outcome.projects[0].name, "Harbour housing");
        assert_eq!(outcome.projects[1].name, "Second");
    }
}
