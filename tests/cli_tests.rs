//! End-to-end tests of the command-line interface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    Command::cargo_bin("growth-percentile").expect("binary builds")
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

const SMALL_CATALOG: &str = r#"{
  "version": "1.0.0",
  "source": "test",
  "tables": [
    {
      "metric": "height",
      "sex": "male",
      "rows": [
        {"age_months": 0, "l": 1.0, "m": 50.0, "s": 0.1, "p3": 40.6, "p50": 50.0, "p97": 59.4},
        {"age_months": 1, "l": 1.0, "m": 52.0, "s": 0.1, "p3": 42.2, "p50": 52.0, "p97": 61.8},
        {"age_months": 2, "l": 1.0, "m": 54.0, "s": 0.1, "p3": 43.8, "p50": 54.0, "p97": 64.2}
      ]
    }
  ]
}"#;

#[test]
fn test_percentile_text_output() {
    cmd()
        .args([
            "percentile", "--metric", "height", "--sex", "male", "--age", "24", "--value",
            "87.1161",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Percentile: 50.0"))
        .stdout(predicate::str::contains("Z-score:    0.00"));
}

#[test]
fn test_percentile_json_output() {
    let json = stdout_json(cmd().args([
        "percentile", "-m", "weight", "-s", "f", "-a", "24", "--value", "11.4775", "--format",
        "json",
    ]));

    assert_eq!(json["metric"], "weight");
    assert_eq!(json["sex"], "female");
    assert_eq!(json["unit"], "kg");
    assert!((json["percentile"].as_f64().unwrap() - 50.0).abs() < 0.1);
}

#[test]
fn test_percentile_from_dates() {
    let json = stdout_json(cmd().args([
        "percentile",
        "-m",
        "height",
        "-s",
        "2",
        "--birth-date",
        "2022-01-10",
        "--measured-on",
        "2024-01-10",
        "--value",
        "85.7153",
        "--format",
        "json",
    ]));

    assert!((json["age_months"].as_f64().unwrap() - 24.0).abs() < 1e-9);
    assert!((json["percentile"].as_f64().unwrap() - 50.0).abs() < 0.1);
}

#[test]
fn test_blank_sex_uses_default() {
    let json = stdout_json(cmd().args([
        "percentile", "-m", "height", "-a", "24", "--value", "87.1161", "--format", "json",
    ]));
    assert_eq!(json["sex"], "male");

    let json = stdout_json(cmd().args([
        "percentile",
        "-m",
        "height",
        "-a",
        "24",
        "--value",
        "87.1161",
        "--default-sex",
        "female",
        "--format",
        "json",
    ]));
    assert_eq!(json["sex"], "female");
}

#[test]
fn test_blank_sex_rejected_when_configured() {
    cmd()
        .args([
            "percentile", "-m", "height", "-a", "24", "--value", "87", "--default-sex", "reject",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sex"));
}

#[test]
fn test_unknown_sex_code_fails() {
    cmd()
        .args(["percentile", "-m", "height", "-s", "x", "-a", "24", "--value", "87"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("x"));
}

#[test]
fn test_age_policy_reject() {
    cmd()
        .args([
            "percentile", "-m", "height", "-s", "m", "-a", "72", "--value", "110",
        ])
        .assert()
        .success();

    cmd()
        .args([
            "percentile", "-m", "height", "-s", "m", "-a", "72", "--value", "110",
            "--age-policy", "reject",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the reference range"));
}

#[test]
fn test_value_multiple_percentiles() {
    let json = stdout_json(cmd().args([
        "value", "-m", "height", "-s", "male", "-a", "24", "-p", "3", "-p", "50", "-p", "97",
        "--format", "json",
    ]));

    let values = json["values"].as_array().unwrap();
    assert_eq!(values.len(), 3);
    let v: Vec<f64> = values.iter().map(|v| v["value"].as_f64().unwrap()).collect();
    assert!(v[0] < v[1] && v[1] < v[2]);
    assert!((v[1] - 87.1161).abs() < 1e-6);
}

#[test]
fn test_value_rejects_out_of_range_percentile() {
    cmd()
        .args(["value", "-m", "height", "-s", "male", "-a", "24", "-p", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 0-100"));
}

#[test]
fn test_series_with_history_file() {
    let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
    writeln!(file, "age_months\tvalue").unwrap();
    writeln!(file, "3\t61.0").unwrap();
    writeln!(file, "# skipped").unwrap();
    writeln!(file, "9.2\t72.5").unwrap();

    let json = stdout_json(cmd().args([
        "series",
        "-m",
        "height",
        "-s",
        "male",
        "-a",
        "12",
        "--history",
        file.path().to_str().unwrap(),
        "--point",
        "12:76.1",
        "--format",
        "json",
    ]));

    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 61);
    assert_eq!(points[3]["patient"].as_f64(), Some(61.0));
    assert_eq!(points[9]["patient"].as_f64(), Some(72.5));
    assert_eq!(points[12]["patient"].as_f64(), Some(76.1));
    assert!(points[15]["predicted"].is_number());
    assert!(points[16].get("predicted").is_none());
}

#[test]
fn test_series_csv_history() {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(file, "age,weight").unwrap();
    writeln!(file, "1,4.4").unwrap();

    cmd()
        .args(["series", "-m", "weight", "-s", "f", "-a", "2", "--history"])
        .arg(file.path())
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("age_months\tp3\tp50\tp97"))
        .stdout(predicate::str::contains("\t4.4\t"));
}

#[test]
fn test_series_bad_point() {
    cmd()
        .args(["series", "-m", "height", "-a", "12", "--point", "twelve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AGE:VALUE"));
}

#[test]
fn test_custom_table_file() {
    let mut file = NamedTempFile::with_suffix(".json").unwrap();
    file.write_all(SMALL_CATALOG.as_bytes()).unwrap();

    let json = stdout_json(
        cmd()
            .arg("--table")
            .arg(file.path())
            .args([
                "percentile", "-m", "height", "-s", "male", "-a", "1.5", "--value", "53",
                "--format", "json",
            ]),
    );
    assert!((json["percentile"].as_f64().unwrap() - 50.0).abs() < f64::EPSILON);

    // The small catalog has no weight tables
    cmd()
        .arg("--table")
        .arg(file.path())
        .args(["percentile", "-m", "weight", "-s", "male", "-a", "1", "--value", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reference data"));
}

#[test]
fn test_invalid_table_file() {
    let mut file = NamedTempFile::with_suffix(".json").unwrap();
    file.write_all(b"{\"version\": \"1.0.0\", \"tables\": [").unwrap();

    cmd()
        .arg("--table")
        .arg(file.path())
        .args(["table", "list"])
        .assert()
        .failure();
}

#[test]
fn test_table_list_and_show() {
    cmd()
        .args(["table", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 tables"));

    let json = stdout_json(cmd().args([
        "table", "show", "-m", "weight", "-s", "female", "--format", "json",
    ]));
    assert_eq!(json["rows"].as_array().unwrap().len(), 61);
}

#[test]
fn test_table_export_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tables.json");

    cmd()
        .args(["table", "export"])
        .arg(&out)
        .assert()
        .success();

    cmd()
        .arg("--table")
        .arg(&out)
        .args(["table", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("height\tmale\t61\t60"));
}

#[test]
fn test_age_command() {
    cmd()
        .args([
            "age",
            "--birth-date",
            "2024-01-15",
            "--measured-on",
            "2024-03-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.00 months"));

    cmd()
        .args([
            "age",
            "--birth-date",
            "2024-03-15",
            "--measured-on",
            "2024-01-15",
        ])
        .assert()
        .failure();
}
