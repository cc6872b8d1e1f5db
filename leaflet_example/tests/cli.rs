use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn default_run_prints_summary() {
    Command::cargo_bin("leaflet_example")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("Layers: 4"))
        .stdout(predicate::str::contains("Markers: 1"))
        .stdout(predicate::str::contains("Controls: 4"))
        .stdout(predicate::str::contains("Selected: Tile"));
}

#[test]
fn dump_prints_object_graph() {
    Command::cargo_bin("leaflet_example")
        .unwrap()
        .arg("--dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"container\": \"map\""))
        .stdout(predicate::str::contains("\"class\": \"LayersControl\""));
}

#[test]
fn config_file_changes_container() {
    let file = assert_fs::NamedTempFile::new("page.json").unwrap();
    file.write_str(r#"{"container": "oslo", "zoom": 12}"#).unwrap();

    Command::cargo_bin("leaflet_example")
        .unwrap()
        .args(["--config", file.path().to_str().unwrap(), "--dump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"container\": \"oslo\""))
        .stdout(predicate::str::contains("\"zoom\": 12.0"));
}

#[test]
fn malformed_config_fails() {
    let file = assert_fs::NamedTempFile::new("page.json").unwrap();
    file.write_str("{ not json").unwrap();

    Command::cargo_bin("leaflet_example")
        .unwrap()
        .args(["--config", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn missing_config_fails() {
    Command::cargo_bin("leaflet_example")
        .unwrap()
        .args(["--config", "does-not-exist.json"])
        .assert()
        .failure();
}

#[test]
fn empty_tile_url_is_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("page.json");
    config.write_str(r#"{"tile_url": ""}"#).unwrap();

    Command::cargo_bin("leaflet_example")
        .unwrap()
        .args(["--config", config.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL template is empty"));
    dir.close().unwrap();
}
