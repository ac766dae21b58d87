//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("vitis")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input_json() {
    let output = cmd()
        .args(["--input", &get_fixture_path("producao.html")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["headers"], serde_json::json!(["Produto", "Quantidade (L.)"]));
    assert_eq!(json["data"][0]["Produto"], "VINHO DE MESA");
    assert!(json["source_url"].as_str().unwrap().ends_with("producao.html"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("producao.html")).unwrap();
    cmd()
        .args(["-i", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tinto"));
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text", "-i", &get_fixture_path("producao.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Produto"))
        .stdout(predicate::str::contains("139.320.884"));
}

#[test]
fn test_cli_missing_table_is_not_an_error() {
    cmd()
        .args(["-i", &get_fixture_path("sem_tabela.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("table not found"));
}

#[test]
fn test_cli_headerless_table() {
    cmd()
        .args(["-i", &get_fixture_path("sem_cabecalho.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Column 3"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.json");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .args(["-i", &get_fixture_path("producao.html")])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"data\""));
}

#[test]
fn test_cli_list() {
    cmd()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("commercialization"))
        .stdout(predicate::str::contains("uvas_passas"));
}

#[test]
fn test_cli_invalid_category() {
    cmd()
        .args(["wine", "--base-url", "http://127.0.0.1:9/index.php"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid category"));
}

#[test]
fn test_cli_unreachable_source() {
    cmd()
        .args(["production", "--base-url", "http://127.0.0.1:9/index.php", "--timeout", "5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed to reach data source"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .args(["-i", "nonexistent.html"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed to process data"));
}

#[test]
fn test_cli_requires_category() {
    cmd().assert().failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "-i", &get_fixture_path("producao.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Vitis"))
        .stderr(predicate::str::contains("Rows"));
}
