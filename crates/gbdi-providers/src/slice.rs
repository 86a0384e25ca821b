//! SLiCE converter
//!
//! SLiCE ships one Parquet row per (archetype, element, worksection, stage)
//! combination. Rows are grouped by `building_archetype_code` into one
//! project per archetype; assemblies are keyed by SfB element class and
//! products by worksection class (falling back to the techflow name).
//! Indicator values accumulate per EN 15978 stage across sixteen impact
//! categories, and results are rolled up bottom-up once the whole file has
//! been read.

use gbdi_lcax::{
    AreaType, Assembly, BuildingType, BuildingTypology, Classification, Country,
    GeneralEnergyClass, ImpactCategoryKey, LifeCycleStage, Location, Product, Project,
    ProjectInfo, RoofType, SoftwareInfo, TechFlow, Unit, add_impact, calculate_results,
};
use gbdi_mapping::{Error, RecordFields, Result, ident, text};
use gbdi_pipeline::{ConvertOutcome, FormatConverter, InputFormat};
use gbdi_record::{FieldDef, FieldType, Record, SourceSchema};
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Indicator columns and the impact category each one feeds
const IMPACT_COLUMNS: &[(&str, ImpactCategoryKey)] = &[
    ("ind_GWP_Tot", ImpactCategoryKey::Gwp),
    ("ind_GWP_Bio", ImpactCategoryKey::GwpBio),
    ("ind_GWP_LuLuc", ImpactCategoryKey::GwpLul),
    ("ind_ODP", ImpactCategoryKey::Odp),
    ("ind_AP", ImpactCategoryKey::Ap),
    ("ind_EP_Fw", ImpactCategoryKey::EpFw),
    ("ind_EP_Mar", ImpactCategoryKey::EpMar),
    ("ind_EP_Ter", ImpactCategoryKey::EpTer),
    ("ind_PCOP", ImpactCategoryKey::Pocp),
    ("ind_WDP", ImpactCategoryKey::Wdp),
    ("ind_PM", ImpactCategoryKey::Pm),
    ("ind_IRP", ImpactCategoryKey::Irp),
    ("ind_ETP_Fw", ImpactCategoryKey::EtpFw),
    ("ind_HTP_c", ImpactCategoryKey::HtpC),
    ("ind_HTP_nc", ImpactCategoryKey::HtpNc),
    ("ind_SQP", ImpactCategoryKey::Sqp),
];

/// Stages the SLiCE scenarios cover
const LIFE_CYCLE_STAGES: &[LifeCycleStage] = &[
    LifeCycleStage::A1A3,
    LifeCycleStage::A4,
    LifeCycleStage::A5,
    LifeCycleStage::B2,
    LifeCycleStage::B4,
    LifeCycleStage::B5,
    LifeCycleStage::B6,
    LifeCycleStage::C1,
    LifeCycleStage::C2,
    LifeCycleStage::C3,
    LifeCycleStage::C4,
];

/// Products in SLiCE carry a fixed 50-year reference service life
const REFERENCE_SERVICE_LIFE: u32 = 50;

/// Converter for SLiCE exports
pub struct Slice {
    schema: SourceSchema,
    archetype_pattern: Regex,
}

impl Slice {
    /// Create the converter with its source schema
    ///
    /// # Panics
    ///
    /// Never panics; the archetype pattern is a literal.
    #[must_use]
    pub fn new() -> Self {
        let mut schema = SourceSchema::new("slice")
            .field(FieldDef::new("building_archetype_code").required())
            .field(FieldDef::new("stock_region_name").required())
            .field(FieldDef::new("building_use_subtype_name").required())
            .field(FieldDef::new("stock_activity_type_name").required())
            .field(FieldDef::new("building_energy_performance_name").required())
            .field(FieldDef::new("element_class_generic_name").required())
            .field(FieldDef::new("element_class_sfb").required())
            .field(FieldDef::new("worksection_class_sfb"))
            .field(FieldDef::new("techflow_name_mmg").required())
            .field(FieldDef::new("LCS_EN15978").required());
        for (column, _) in IMPACT_COLUMNS {
            schema = schema.field(
                FieldDef::new(*column)
                    .with_type(FieldType::Decimal)
                    .required(),
            );
        }
        let archetype_pattern =
            Regex::new("^[A-Z]{3}_[A-Z]{3}_[A-Z]{3}_[A-Z]{3}$").expect("literal pattern");
        Self {
            schema,
            archetype_pattern,
        }
    }

    fn new_project(&self, record: &Record, archetype: &str) -> Result<Project> {
        let mut project = Project::new(ident::id_from_seed(archetype), "Unknown");
        project.location = region_location(record);
        project.impact_categories = IMPACT_COLUMNS.iter().map(|(_, key)| *key).collect();
        project.life_cycle_stages = LIFE_CYCLE_STAGES.to_vec();
        project.classification_system = Some("SfB".to_string());
        project.software_info = Some(SoftwareInfo::named("SLiCE"));
        project.project_info = ProjectInfo {
            gross_floor_area: Some(AreaType::m2(1.0, "")),
            building_type: building_type(record)?,
            building_typology: building_typology(record)?,
            floors_above_ground: 1,
            general_energy_class: energy_class(record)?,
            roof_type: RoofType::Unknown,
            ..ProjectInfo::default()
        };
        Ok(project)
    }

    /// Fold one row into its archetype's project.
    fn add_row(&self, project: &mut Project, record: &Record) -> Result<()> {
        let element_sfb = record.require_text("element_class_sfb")?;
        let generic_name = record.require_text("element_class_generic_name")?;
        let techflow_name = record.require_text("techflow_name_mmg")?;
        let product_key = record
            .optional_text("worksection_class_sfb")
            .unwrap_or(techflow_name);

        let label = record.require_text("LCS_EN15978")?;
        let stage = LifeCycleStage::from_label(label)
            .ok_or_else(|| Error::unknown_category(record.row, "life cycle stage", label))?;

        // Read every indicator before touching the project so a bad row
        // leaves the accumulated state untouched.
        let mut impacts = Vec::with_capacity(IMPACT_COLUMNS.len());
        for (column, key) in IMPACT_COLUMNS {
            impacts.push((*key, record.require_decimal(column)?));
        }

        let assembly_id = ident::id_from_seed(element_sfb);
        let assembly = project
            .assemblies
            .entry(assembly_id.clone())
            .or_insert_with(|| {
                let mut assembly =
                    Assembly::new(assembly_id.clone(), generic_name, 1.0, Unit::Kg);
                assembly.classification = Some(vec![Classification {
                    system: "SfB".to_string(),
                    code: element_sfb.to_string(),
                    name: generic_name.to_string(),
                }]);
                assembly
            });

        let product_id = ident::id_from_seed(product_key);
        let product = assembly
            .products
            .entry(product_id.clone())
            .or_insert_with(|| Product {
                id: product_id.clone(),
                name: product_key.to_string(),
                description: String::new(),
                reference_service_life: REFERENCE_SERVICE_LIFE,
                impact_data: TechFlow::new(
                    ident::id_from_seed(techflow_name),
                    techflow_name,
                    Unit::Kg,
                ),
                quantity: 1.0,
                unit: Unit::Kg,
                results: None,
                meta_data: None,
                kind: "actual".to_string(),
            });

        for (key, value) in impacts {
            add_impact(&mut product.impact_data.impacts, key, stage, value);
        }
        Ok(())
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatConverter for Slice {
    fn name(&self) -> &'static str {
        "slice"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Parquet
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
            if let Err(e) = self.fold(&record, &mut order, &mut projects) {
                outcome.push_issue(e.row(), e.to_string());
            }
        }

        for archetype in order {
            if let Some(mut project) = projects.remove(&archetype) {
                calculate_results(&mut project);
                outcome.push_project(project);
            }
        }
        outcome
    }
}

impl Slice {
    fn fold(
        &self,
        record: &Record,
        order: &mut Vec<String>,
        projects: &mut HashMap<String, Project>,
    ) -> Result<()> {
        let archetype = record.require_text("building_archetype_code")?;
        if !self.archetype_pattern.is_match(archetype) {
            return Err(Error::unknown_category(
                record.row,
                "building archetype code",
                archetype,
            ));
        }

        if !projects.contains_key(archetype) {
            let project = self.new_project(record, archetype)?;
            order.push(archetype.to_string());
            projects.insert(archetype.to_string(), project);
        }
        if let Some(project) = projects.get_mut(archetype) {
            self.add_row(project, record)?;
        }
        Ok(())
    }
}

/// Climate region → representative country
fn region_location(record: &Record) -> Location {
    let country = match record
        .optional_text("stock_region_name")
        .map(text::lookup_key)
        .as_deref()
    {
        Some("mediterranean") => Country::new("ita"),
        Some("nordic") => Country::new("swe"),
        Some("oceanic") => Country::new("gbr"),
        // Continental is the modeling default.
        _ => Country::new("deu"),
    };
    Location::country(country)
}

fn building_type(record: &Record) -> Result<BuildingType> {
    let value = record.require_text("stock_activity_type_name")?;
    match text::lookup_key(value).as_str() {
        "new buildings" => Ok(BuildingType::NewConstructionWorks),
        "refurbishment" => Ok(BuildingType::RetrofitWorks),
        "existing buildings" => Ok(BuildingType::Operations),
        _ => Err(Error::unknown_category(record.row, "building type", value)),
    }
}

fn building_typology(record: &Record) -> Result<Vec<BuildingTypology>> {
    let value = record.require_text("building_use_subtype_name")?;
    match text::lookup_key(value).as_str() {
        "single-family house" | "multi-family house" => Ok(vec![BuildingTypology::Residential]),
        "office" => Ok(vec![BuildingTypology::Office]),
        _ => Err(Error::unknown_category(
            record.row,
            "building typology",
            value,
        )),
    }
}

fn energy_class(record: &Record) -> Result<GeneralEnergyClass> {
    let value = record.require_text("building_energy_performance_name")?;
    match text::lookup_key(value).as_str() {
        "standard" => Ok(GeneralEnergyClass::Standard),
        "advanced" => Ok(GeneralEnergyClass::Advanced),
        "average" => Ok(GeneralEnergyClass::Existing),
        _ => Err(Error::unknown_category(record.row, "energy class", value)),
    }
}
