use std::fs;
use std::path::{Path, PathBuf};

use predicates::prelude::*;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resume.md")
}

#[test]
fn parse_prints_json_to_stdout() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--input"])
        .arg(fixture())
        .output()
        .expect("run folio parse");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["profile"]["name"], "Jane Doe");
    assert_eq!(json["profile"]["skillCategories"][0]["category"], "Languages");
    assert_eq!(json["experience"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["projects"][1].get("link"), None);
}

#[test]
fn parse_missing_input_emits_fallback_and_warns() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.md");

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--input"])
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio Owner"))
        .stderr(predicate::str::contains("using fallback content"));
}

#[test]
fn parse_writes_yaml_and_refuses_to_overwrite() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let out = temp.path().join("nested/content.yaml");

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--format", "yaml", "--input"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout("");
    let yaml = fs::read_to_string(&out).expect("read yaml");
    assert!(yaml.contains("name: Jane Doe"));

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--input"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--force", "--input"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let json = fs::read_to_string(&out).expect("read json");
    assert!(json.starts_with('{'));
}

#[test]
fn parse_applies_metadata_table() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let metadata = temp.path().join("metadata.yaml");
    fs::write(
        &metadata,
        "projects:\n  - pattern: \"PEST\"\n    category: \"Agricultural AI\"\n",
    )
    .expect("write metadata");

    let output = assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--input"])
        .arg(fixture())
        .arg("--metadata")
        .arg(&metadata)
        .output()
        .expect("run folio parse");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["projects"][0]["category"], "Agricultural AI");
}

#[test]
fn parse_rejects_invalid_metadata_table() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let metadata = temp.path().join("metadata.yaml");
    fs::write(&metadata, "projects:\n  - pattern: \"\"\n").expect("write metadata");

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .args(["parse", "--input"])
        .arg(fixture())
        .arg("--metadata")
        .arg(&metadata)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty pattern"));
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() {
    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .env("RUST_LOG", "debug")
        .args(["parse", "--input"])
        .arg(fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
}
