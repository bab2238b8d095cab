use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SALT_CARD: &str = "% NaCl-UCl3 fuel salt\n\
                         mat fuelsalt -3.4856 burn 1 tmp 900.0\n\
                         11023.09c 0.0123\n\
                         17037.09c 0.0456\n";

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mcfr-deck"))
        .args(args)
        .output()
        .expect("binary should launch")
}

fn write_salt_card(dir: &Path) -> String {
    let path = dir.join("salt_card.txt");
    fs::write(&path, SALT_CARD).expect("salt card should be written");
    path.to_string_lossy().into_owned()
}

fn write_fuel_table(dir: &Path) -> String {
    let table = serde_json::json!({
        "materials": {
            "fuelsalt": {
                "days": [0.0, 7.0, 21.0],
                "names": ["total", "Na23", "U235"],
                "zai": [0, 110230, 922350],
                "adens": [
                    [1.0, 1.0, 1.0],
                    [0.5, 0.5, 0.5],
                    [0.1, 0.09, 0.08]
                ]
            },
            "silver": {
                "days": [0.0, 21.0],
                "names": ["total", "Ag107", "Ag109", "Pd108", "Cd111", "lost"],
                "zai": [0, 471070, 471090, 461080, 481110, 666],
                "adens": [
                    [1.0, 1.0],
                    [0.52, 0.50],
                    [0.48, 0.40],
                    [0.0, 0.04],
                    [0.0, 0.02],
                    [0.0, 0.0]
                ]
            }
        }
    });
    let path = dir.join("depletion.json");
    fs::write(&path, serde_json::to_string(&table).expect("serializes"))
        .expect("table should be written");
    path.to_string_lossy().into_owned()
}

#[test]
fn sphere_command_writes_deck_and_run_script() {
    let temp = TempDir::new().expect("tempdir should be created");
    let salt_path = write_salt_card(temp.path());
    let out_dir = temp.path().join("sphere");

    let output = run_cli(&[
        "sphere",
        "--core-radius",
        "300",
        "--reflector-radius",
        "500",
        "--shell-radius",
        "400",
        "--deplete-years",
        "10",
        "--salt-card",
        &salt_path,
        "--out",
        out_dir.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let deck = fs::read_to_string(out_dir.join("mcfr_input")).expect("deck exists");
    assert!(deck.starts_with("set title \"sphMCFR radius 300, reflector 500\""));
    assert!(deck.contains("cell 20  0  silver"));
    assert!(deck.contains("daystep"));

    let script = fs::read_to_string(out_dir.join("run.sh")).expect("script exists");
    assert!(script.contains("sss2 -omp 16 mcfr_input"));
}

#[test]
fn invalid_shell_radius_maps_to_geometry_exit_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let salt_path = write_salt_card(temp.path());

    // shell outside the reflector
    let output = run_cli(&[
        "sphere",
        "--core-radius",
        "300",
        "--reflector-radius",
        "500",
        "--shell-radius",
        "600",
        "--salt-card",
        &salt_path,
        "--out",
        temp.path().to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [GEOM.SHELL_RADIUS]"));
}

#[test]
fn cylinder_command_rejects_unknown_design_as_usage_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let salt_path = write_salt_card(temp.path());

    let output = run_cli(&[
        "cylinder",
        "--design",
        "msfr",
        "--salt-card",
        &salt_path,
        "--out",
        temp.path().to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn wire_command_writes_one_deck_per_interval() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table_path = write_fuel_table(temp.path());
    let out_dir = temp.path().join("wire");

    let output = run_cli(&[
        "wire",
        "--fuel-table",
        &table_path,
        "--out",
        out_dir.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    // three samples, two intervals
    let first = fs::read_to_string(out_dir.join("wire_step-001")).expect("step 1 exists");
    assert!(!first.contains("set rfr"));
    let second = fs::read_to_string(out_dir.join("wire_step-002")).expect("step 2 exists");
    assert!(second.contains("set rfr -7 \"wire_step-001.wrk\""));
    assert!(!out_dir.join("wire_step-003").exists());

    let script = fs::read_to_string(out_dir.join("runwire.sh")).expect("script exists");
    assert!(script.contains("#PBS -N S2-wire"));
}

#[test]
fn top_isotopes_prints_ranked_names() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table_path = write_fuel_table(temp.path());

    let output = run_cli(&[
        "top-isotopes",
        "--table",
        &table_path,
        "--material",
        "silver",
        "--count",
        "3",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names, vec!["Ag107", "Ag109", "Pd108"]);
}

#[test]
fn eoc_resistivity_prints_a_positive_estimate() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table_path = write_fuel_table(temp.path());

    let output = run_cli(&[
        "eoc-resistivity",
        "--wire-table",
        &table_path,
        "--shell-table",
        &table_path,
        "--temp-c",
        "700",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rho: f64 = stdout.trim().parse().expect("numeric output");
    assert!(rho > 0.0);
}

#[test]
fn missing_material_maps_to_input_validation_exit_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table_path = write_fuel_table(temp.path());

    let output = run_cli(&["top-isotopes", "--table", &table_path, "--material", "lead"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.MATERIAL_NAME]"));
}
