use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_gbdi") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("gbdi{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_gbdi is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

const PANDA_HEADER: &str = "Carbon A1-A3 (kgCO2e),Carbon A4 (kgCO2e),Carbon B1 (kgCO2e),\
Carbon C1 (kgCO2e),Carbon C2 (kgCO2e),Carbon D (kgCO2e),Carbon A5a (kgCO2e),\
Carbon A5w (kgCO2e),GIFA (Total),Type,Project Sector,Storeys (#),Superstructure Type,\
Calculation Year,Used PANDA";

fn panda_row(a1a3: f64, sector: &str) -> String {
    format!("{a1a3},5,3,2,1,-4,1.5,0.5,1000,New Build (Greenfield),{sector},5,Steel,2024,Yes")
}

fn panda_csv(rows: &[String]) -> String {
    let mut csv = String::from(PANDA_HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn converts_three_rows_to_three_projects() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        &dir,
        "panda.csv",
        &panda_csv(&[
            panda_row(10.0, "Office"),
            panda_row(20.0, "Residential"),
            panda_row(30.0, "Commercial"),
        ]),
    );

    let output = Command::new(cargo_bin())
        .args(["convert", "--format", "structural-panda"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 project(s)"), "stdout: {stdout}");

    let written = fs::read_to_string(input.with_extension("json")).unwrap();
    let projects: serde_json::Value = serde_json::from_str(&written).unwrap();
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0]["results"]["gwp"]["a1a3"], 10.0);
    assert_eq!(projects[1]["results"]["gwp"]["a1a3"], 20.0);
    assert_eq!(projects[0]["location"]["country"], "gbr");
}

#[test]
fn bad_row_is_skipped_with_exit_code_zero() {
    let dir = tempfile::tempdir().unwrap();
    let bad = panda_row(10.0, "Spaceport");
    let input = write_file(
        &dir,
        "panda.csv",
        &panda_csv(&[panda_row(10.0, "Office"), bad]),
    );

    let output = Command::new(cargo_bin())
        .args(["convert", "--format", "structural-panda"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 project(s)"), "stdout: {stdout}");
    assert!(stdout.contains("1 skipped"), "stdout: {stdout}");
}

#[test]
fn missing_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir, "panda.csv", "Type,Project Sector\nFull Refurb,Office\n");

    let output = Command::new(cargo_bin())
        .args(["convert", "--format", "structural-panda"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!input.with_extension("json").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required columns"), "stderr: {stderr}");
}

#[test]
fn header_only_input_writes_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir, "panda.csv", &panda_csv(&[]));

    let output = Command::new(cargo_bin())
        .args(["convert", "--format", "structural-panda"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let written = fs::read_to_string(input.with_extension("json")).unwrap();
    let projects: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(projects.as_array().unwrap().len(), 0);
}

#[test]
fn unknown_format_fails_and_lists_formats() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir, "data.csv", &panda_csv(&[]));

    let output = Command::new(cargo_bin())
        .args(["convert", "--format", "edifact"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("structural-panda"), "stderr: {stderr}");
}

#[test]
fn converting_twice_yields_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        &dir,
        "panda.csv",
        &panda_csv(&[panda_row(10.0, "Office"), panda_row(20.0, "Residential")]),
    );

    let run = || {
        let output = Command::new(cargo_bin())
            .args(["convert", "--format", "structural-panda"])
            .arg(&input)
            .output()
            .unwrap();
        assert!(output.status.success());
        fs::read(input.with_extension("json")).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn config_output_dir_is_used_for_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir, "panda.csv", &panda_csv(&[panda_row(10.0, "Office")]));
    let out_dir = dir.path().join("converted");
    fs::create_dir(&out_dir).unwrap();
    let config = write_file(
        &dir,
        "gbdi.yaml",
        &format!("output_dir: {}\n", out_dir.display()),
    );

    let output = Command::new(cargo_bin())
        .args(["convert", "--format", "structural-panda"])
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(out_dir.join("panda.json").exists());
}

#[test]
fn formats_lists_all_converters() {
    let output = Command::new(cargo_bin()).arg("formats").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["structural-panda", "carbenmats", "slice", "becd"] {
        assert!(stdout.contains(name), "missing {name} in {stdout}");
    }
}
