//! Structural Panda converter
//!
//! One project per row of a Structural Panda CSV export. The export reports
//! whole-building GWP per EN 15978 stage in kgCO2e columns; A5a and A5w are
//! summed into a single A5 result. Every project carries a single "Building"
//! assembly and a fixed GBR location.

use gbdi_lcax::{
    AreaType, Assembly, BuildingType, BuildingTypology, Country, GeneralEnergyClass,
    ImpactCategoryKey, LifeCycleStage, Location, Project, ProjectInfo, Results, RoofType,
    SoftwareInfo, Unit, ValueUnit, add_impact,
};
use gbdi_mapping::{Error, RecordFields, Result, ident};
use gbdi_pipeline::{ConvertOutcome, FormatConverter, InputFormat};
use gbdi_record::{FieldDef, FieldType, Record, SourceSchema};
use serde_json::json;
use tracing::debug;

/// Carbon columns and the stage each one feeds
const STAGE_COLUMNS: &[(&str, LifeCycleStage)] = &[
    ("Carbon A1-A3 (kgCO2e)", LifeCycleStage::A1A3),
    ("Carbon A4 (kgCO2e)", LifeCycleStage::A4),
    ("Carbon B1 (kgCO2e)", LifeCycleStage::B1),
    ("Carbon C1 (kgCO2e)", LifeCycleStage::C1),
    ("Carbon C2 (kgCO2e)", LifeCycleStage::C2),
    ("Carbon D (kgCO2e)", LifeCycleStage::D),
];

/// Converter for Structural Panda exports
pub struct StructuralPanda {
    schema: SourceSchema,
}

impl StructuralPanda {
    /// Create the converter with its source schema
    #[must_use]
    pub fn new() -> Self {
        let mut schema = SourceSchema::new("structural-panda");
        for (column, _) in STAGE_COLUMNS {
            schema = schema.field(
                FieldDef::new(*column)
                    .with_type(FieldType::Decimal)
                    .required(),
            );
        }
        schema = schema
            .field(
                FieldDef::new("Carbon A5a (kgCO2e)")
                    .with_type(FieldType::Decimal)
                    .required(),
            )
            .field(
                FieldDef::new("Carbon A5w (kgCO2e)")
                    .with_type(FieldType::Decimal)
                    .required(),
            )
            .field(
                FieldDef::new("GIFA (Total)")
                    .with_type(FieldType::Decimal)
                    .required(),
            )
            .field(FieldDef::new("Type").required())
            .field(FieldDef::new("Project Sector").required())
            .field(
                FieldDef::new("Storeys (#)")
                    .with_type(FieldType::Integer)
                    .required(),
            )
            .field(FieldDef::new("Superstructure Type"))
            .field(FieldDef::new("Calculation Year").with_type(FieldType::Integer))
            .field(FieldDef::new("Used PANDA"));
        Self { schema }
    }

    fn results(&self, record: &Record) -> Result<Results> {
        let mut results = Results::new();
        for (column, stage) in STAGE_COLUMNS {
            add_impact(
                &mut results,
                ImpactCategoryKey::Gwp,
                *stage,
                record.require_decimal(column)?,
            );
        }
        let a5 = record.require_decimal("Carbon A5a (kgCO2e)")?
            + record.require_decimal("Carbon A5w (kgCO2e)")?;
        add_impact(&mut results, ImpactCategoryKey::Gwp, LifeCycleStage::A5, a5);
        Ok(results)
    }

    fn map_record(&self, record: &Record) -> Result<Project> {
        let results = self.results(record)?;
        let gifa = record.require_decimal("GIFA (Total)")?;

        let seed = record.fingerprint(&self.schema);
        let assembly_id = ident::id_from_seed(&format!("{seed}/assembly"));
        let mut assembly = Assembly::new(assembly_id.clone(), "Building", 1.0, Unit::Pcs);
        assembly.results = Some(results.clone());

        let mut project = Project::new(ident::id_from_seed(&seed), "Undefined");
        project.location = Location::country(Country::new("gbr"));
        project.impact_categories = vec![ImpactCategoryKey::Gwp];
        project.life_cycle_stages = vec![
            LifeCycleStage::A1A3,
            LifeCycleStage::A4,
            LifeCycleStage::A5,
            LifeCycleStage::B1,
            LifeCycleStage::C1,
            LifeCycleStage::C2,
            LifeCycleStage::D,
        ];
        project.assemblies.insert(assembly_id, assembly);
        project.results = Some(results);
        project.project_info = ProjectInfo {
            gross_floor_area: Some(AreaType::m2(gifa, "GIFA")),
            heated_floor_area: Some(AreaType::m2(0.0, "Unknown")),
            building_footprint: Some(ValueUnit::new(gifa, Unit::M2)),
            building_type: building_type(record)?,
            building_typology: building_typology(record)?,
            floors_above_ground: record.require_integer("Storeys (#)")?,
            frame_type: record.optional_text("Superstructure Type").map(String::from),
            general_energy_class: GeneralEnergyClass::Unknown,
            roof_type: RoofType::Other,
            ..ProjectInfo::default()
        };
        project.meta_data = Some(json!({
            "assessment": { "year": record.optional_integer("Calculation Year") },
            "source": { "name": "StructuralPanda", "url": null },
        }));
        project.software_info = Some(SoftwareInfo::named(
            if record.optional_text("Used PANDA") == Some("Yes") {
                "Structural Panda"
            } else {
                "Unknown"
            },
        ));
        Ok(project)
    }
}

impl Default for StructuralPanda {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatConverter for StructuralPanda {
    fn name(&self) -> &'static str {
        "structural-panda"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv { delimiter: b',' }
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

/// Project type → kind of construction works
fn building_type(record: &Record) -> Result<BuildingType> {
    let value = record.require_text("Type")?;
    match value {
        "New Build (Brownfield)" | "New Build (Greenfield)" => {
            Ok(BuildingType::NewConstructionWorks)
        }
        "Mixed New Build/Refurb" => Ok(BuildingType::DeconstructionAndNewConstructionWorks),
        "Full Refurb" => Ok(BuildingType::RetrofitWorks),
        _ => Err(Error::unknown_category(record.row, "building type", value)),
    }
}

/// Project sector → building typologies. Sectors are free text and may name
/// several uses at once ("Commercial & Residential"), so matching is by
/// substring with a handful of exact aliases.
fn building_typology(record: &Record) -> Result<Vec<BuildingTypology>> {
    let value = record.require_text("Project Sector")?;
    let lowered = value.to_lowercase();
    let mut typology = Vec::new();

    const SUBSTRINGS: &[(&str, BuildingTypology)] = &[
        ("office", BuildingTypology::Office),
        ("residential", BuildingTypology::Residential),
        ("public", BuildingTypology::Public),
        ("commercial", BuildingTypology::Commercial),
        ("industrial", BuildingTypology::Industrial),
        ("infrastructure", BuildingTypology::Infrastructure),
        ("agricultural", BuildingTypology::Agricultural),
    ];
    for (needle, result) in SUBSTRINGS {
        if lowered.contains(needle) {
            typology.push(*result);
        }
    }

    match lowered.as_str() {
        "educational" | "healthcare" => typology.push(BuildingTypology::Public),
        "other" | "mixed use" => typology.push(BuildingTypology::Other),
        "science/lab" => typology.push(BuildingTypology::Industrial),
        _ => {}
    }

    if typology.is_empty() {
        return Err(Error::unknown_category(
            record.row,
            "building typology",
            value,
        ));
    }
    Ok(typology)
}
