//! End-to-end tests: source file on disk through the runner to ingest JSON

use gbdi_lcax::Project;
use gbdi_pipeline::{Error, Runner};
use gbdi_providers::{Becd, CarbEnMats, StructuralPanda};
use std::path::PathBuf;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn read_projects(path: &std::path::Path) -> Vec<Project> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

const PANDA_HEADER: &str = "Carbon A1-A3 (kgCO2e),Carbon A4 (kgCO2e),Carbon B1 (kgCO2e),\
Carbon C1 (kgCO2e),Carbon C2 (kgCO2e),Carbon D (kgCO2e),Carbon A5a (kgCO2e),\
Carbon A5w (kgCO2e),GIFA (Total),Type,Project Sector,Storeys (#),Superstructure Type,\
Calculation Year,Used PANDA";

#[test]
fn structural_panda_csv_converts_row_for_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        &dir,
        "panda.csv",
        &format!(
            "{PANDA_HEADER}\n\
             10,5,3,2,1,-4,1.5,0.5,1000,New Build (Greenfield),Office,5,Steel,2024,Yes\n\
             20,6,4,3,2,-5,2.5,1.5,2000,Full Refurb,Residential,8,Timber,2023,No\n"
        ),
    );

    let report = Runner::new()
        .run(&StructuralPanda::new(), &input, None)
        .unwrap();
    assert_eq!(report.rows_read, 2);
    assert_eq!(report.projects_written, 2);
    assert!(report.is_clean());

    let projects = read_projects(&report.output);
    assert_eq!(projects.len(), 2);

    // Input order is preserved.
    let first_gwp = &projects[0].results.as_ref().unwrap()
        [&gbdi_lcax::ImpactCategoryKey::Gwp];
    assert_eq!(first_gwp[&gbdi_lcax::LifeCycleStage::A1A3], 10.0);
    assert_eq!(first_gwp[&gbdi_lcax::LifeCycleStage::A5], 2.0);
    assert_eq!(
        projects[1].software_info.as_ref().unwrap().lca_software,
        "Unknown"
    );
}

#[test]
fn carbenmats_semicolon_csv_scales_per_year_totals() {
    let dir = tempfile::tempdir().unwrap();
    let header = "GHG_A123_total;GHG_A45_total;GHG_B1234_total;GHG_B67_total;GHG_C12_total;\
GHG_C34_total;lca_RSP;site_country_iso2;site_region_local;meta_title;meta_year;\
bldg_year_complete;bldg_users_total;bldg_area_gfa;bldg_area_definition;bldg_footprint;\
bldg_project_type;bldg_use_subtype;bldg_floors_ag;bldg_floors_bg;bldg_struct_type;\
bldg_energy_class_general;bldg_roof_type;lca_software;lca_goal_scope";
    let input = write_file(
        &dir,
        "carbenmats.csv",
        &format!(
            "{header}\n\
             8;;;2;;;50;DK;Copenhagen;Harbour housing;2022;2019;120.0;5400;GFA;800;\
             New Construction;Multi-Family House;5;1;Concrete;New Standard;Flat Roof;LCAbyg;\
             Cradle to grave\n\
             no data;;;;;;no data;SE;no data;no data;2021;;no data;1200;GFA;no data;\
             Refurbishment;Office;3;;Timber;New Advanced;Other;OneClick;Scope\n"
        ),
    );

    let report = Runner::new().run(&CarbEnMats::new(), &input, None).unwrap();
    assert_eq!(report.projects_written, 2);
    assert!(report.is_clean());

    let projects = read_projects(&report.output);

    let gwp = &projects[0].results.as_ref().unwrap()[&gbdi_lcax::ImpactCategoryKey::Gwp];
    assert_eq!(gwp[&gbdi_lcax::LifeCycleStage::A1A3], 400.0);
    assert_eq!(gwp[&gbdi_lcax::LifeCycleStage::B6], 100.0);
    assert_eq!(projects[0].location.country.code(), "dnk");

    // Second row has no stage totals at all.
    assert!(projects[1].results.is_none());
    assert!(projects[1].impact_categories.is_empty());
    assert_eq!(projects[1].name, "Unknown");
    assert_eq!(projects[1].location.country.code(), "swe");
}

#[test]
fn becd_rows_group_into_projects_with_assemblies() {
    let dir = tempfile::tempdir().unwrap();
    let header = "EntityCode,EntityName,EntityElementName,EmissionsIncluded,RefStudyPeriod,\
Location,Country,ProjectType,TotalHeightAboveGround,BuildingFootprint,SizePrimary,\
AboveGroundStorey,StructuralGridX,\
Total_A1ToA3,Total_A4,Total_A5,Total_B1,Total_B2,Total_B3,Total_B4,Total_B5,Total_C1,\
Total_C2,Total_C3,Total_C4,Total_D,\
A1ToA3,A4,A5,B1,B2,B3,B4,B5,C1,C2,C3,C4,D";
    let totals = "100,1,2,3,4,5,6,7,8,9,10,11,12";
    let element = "10,1,1,1,1,1,1,1,1,1,1,1,1";
    let input = write_file(
        &dir,
        "becd.csv",
        &format!(
            "{header}\n\
             BECD-0042,City block,Frame,Yes,60,Manchester,United Kingdom,New Built,45,800,\
             12000,12,7.5,{totals},{element}\n\
             BECD-0042,City block,Facade,Yes,60,Manchester,United Kingdom,New Built,45,800,\
             12000,12,7.5,{totals},{element}\n\
             BECD-0042,City block,Fitout,No,60,Manchester,United Kingdom,New Built,45,800,\
             12000,12,7.5,{totals},{element}\n\
             BECD-0077,Warehouse,Slab,Yes,50,Leeds,United Kingdom,New Built,12,2000,\
             8000,2,9.0,{totals},{element}\n"
        ),
    );

    let report = Runner::new().run(&Becd::new(), &input, None).unwrap();
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.projects_written, 2);
    assert!(report.is_clean());

    let projects = read_projects(&report.output);
    assert_eq!(projects[0].id, "0042");
    // Two elements with emissions included; the excluded one adds nothing.
    assert_eq!(projects[0].assemblies.len(), 2);
    assert_eq!(projects[1].id, "0077");
    assert_eq!(projects[1].assemblies.len(), 1);

    let gwp = &projects[0].results.as_ref().unwrap()[&gbdi_lcax::ImpactCategoryKey::Gwp];
    assert_eq!(gwp[&gbdi_lcax::LifeCycleStage::A1A3], 100.0);
}

#[test]
fn unreadable_input_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.csv");

    let err = Runner::new()
        .run(&StructuralPanda::new(), &input, None)
        .unwrap_err();
    assert!(matches!(err, Error::Input { .. }));
    assert!(!input.with_extension("json").exists());
}

#[test]
fn converting_twice_yields_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        &dir,
        "panda.csv",
        &format!(
            "{PANDA_HEADER}\n\
             10,5,3,2,1,-4,1.5,0.5,1000,New Build (Greenfield),Office,5,Steel,2024,Yes\n"
        ),
    );

    let first = Runner::new()
        .run(&StructuralPanda::new(), &input, None)
        .unwrap();
    let first_bytes = std::fs::read(&first.output).unwrap();

    let second = Runner::new()
        .run(&StructuralPanda::new(), &input, None)
        .unwrap();
    assert_eq!(first_bytes, std::fs::read(&second.output).unwrap());
}
