//! End-to-end CLI tests for the iiif-downloader binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmd() -> Command {
    Command::cargo_bin("iiif-downloader").unwrap()
}

/// Test that running without arguments prints usage and exits with code 0.
#[test]
fn test_binary_without_args_prints_usage() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--manifest"));
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IIIF"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("iiif-downloader"));
}

#[test]
fn test_binary_missing_destination_returns_error() {
    cmd()
        .args(["-m", "https://example.org/manifest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--destination"));
}

#[test]
fn test_binary_malformed_criterion_returns_error() {
    let temp_dir = TempDir::new().unwrap();
    cmd()
        .args(["-m", "https://example.org/manifest", "-d"])
        .arg(temp_dir.path())
        .args(["-i", "Strukturtyp=Kapitel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("::"));
}

#[test]
fn test_binary_destination_that_is_a_file_returns_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();
    cmd()
        .args(["-m", "https://example.org/manifest", "-d"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

/// Test a full run against a mock IIIF server.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_downloads_selected_pages() {
    let server = MockServer::start().await;
    let base = server.uri();
    let manifest = json!({
        "sequences": [{"canvases": [
            {
                "@id": format!("{base}/canvas/1"),
                "images": [{"resource": {"@id": format!("{base}/image/p1.tif/full/max/0/default.jpg")}}],
                "seeAlso": {"@id": format!("{base}/alto/p1.xml"), "label": "ALTO"}
            },
            {
                "@id": format!("{base}/canvas/2"),
                "images": [{"resource": {"@id": format!("{base}/image/p2.tif/full/max/0/default.jpg")}}]
            }
        ]}],
        "structures": [
            {"@id": "r1", "canvases": [format!("{base}/canvas/1")], "metadata": [{"label": "Strukturtyp", "value": "Titelseite"}]}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/image/p1.tif/full/max/0/default.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alto/p1.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<alto/>".to_vec()))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let destination = temp_dir.path().join("out");
    let manifest_url = format!("{base}/manifest");
    let dest = destination.clone();
    tokio::task::spawn_blocking(move || {
        cmd()
            .args(["-q", "-a", "-i", "Strukturtyp::Titelseite", "-m"])
            .arg(&manifest_url)
            .arg("-d")
            .arg(&dest)
            .assert()
            .success();
    })
    .await
    .unwrap();

    assert_eq!(std::fs::read(destination.join("p1.jpg")).unwrap(), b"jpeg");
    assert_eq!(std::fs::read(destination.join("p1.xml")).unwrap(), b"<alto/>");
    assert!(!destination.join("p2.jpg").exists());
}

/// Test that a manifest error status fails the run and reports the status.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_manifest_not_found_returns_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(404).set_body_string("record unknown"))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let manifest_url = format!("{}/manifest", server.uri());
    let dest = temp_dir.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        cmd()
            .args(["-q", "-m"])
            .arg(&manifest_url)
            .arg("-d")
            .arg(&dest)
            .assert()
            .failure()
            .stderr(predicate::str::contains("404"))
            .stderr(predicate::str::contains("record unknown"));
    })
    .await
    .unwrap();
}
