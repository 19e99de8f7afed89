//! Integration tests for the SIT CLI
//!
//! These tests exercise the CLI end-to-end using assert_cmd. Only offline
//! paths are covered here (template generation, mapping validation, dry-run
//! materialization); paths that need a live inventory service are covered
//! by unit tests against the core types.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a sit command
fn sit() -> Command {
    Command::cargo_bin("sit").unwrap()
}

/// Helper to write a CSV fixture and return its path
fn write_csv(tmp: &TempDir, name: &str, contents: &str) -> String {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    sit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Server Inventory Toolkit"));
}

#[test]
fn test_version_displays() {
    sit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sit"));
}

#[test]
fn test_unknown_command_fails() {
    sit()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unknown_entity_kind_fails() {
    sit()
        .args(["list", "databases"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported entity kind"));
}

// ============================================================================
// Template Generation Tests
// ============================================================================

#[test]
fn test_server_template() {
    sit()
        .args(["import", "--template", "server"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,hostname,port,type,owner_name"));
}

#[test]
fn test_application_template() {
    sit()
        .args(["import", "--template", "app"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,description"));
}

#[test]
fn test_template_requires_entity_kind() {
    sit()
        .args(["import", "--template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity kind required"));
}

// ============================================================================
// Import Argument Tests
// ============================================================================

#[test]
fn test_import_requires_file() {
    sit()
        .args(["import", "server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV file required"));
}

#[test]
fn test_import_missing_file_fails() {
    sit()
        .args(["import", "server", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_import_rejects_unknown_map_field() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "servers.csv", "name,hostname,port,type\nweb1,h1,80,http\n");

    sit()
        .args(["import", "server", &csv, "--map", "rack=Rack", "--yes", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field 'rack'"));
}

// ============================================================================
// Import Dry-Run Tests (parse → map → materialize, no service needed)
// ============================================================================

#[test]
fn test_import_dry_run_materializes_records() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "servers.csv",
        "Name,Host,Port,Type\nweb1,10.0.0.1,80,http\n,,,\nweb2,10.0.0.2,8080,https",
    );

    sit()
        .args([
            "import", "server", &csv, "--map", "hostname=Host", "--yes", "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("web1"))
        .stdout(predicate::str::contains("web2"))
        .stdout(predicate::str::contains("Rows processed:"))
        .stdout(predicate::str::contains("Blank rows dropped: 1"))
        .stdout(predicate::str::contains("Dry run complete"));
}

#[test]
fn test_import_dry_run_auto_maps_headers() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "servers.csv",
        "NAME,hostname,PORT,Type,owner_name\nweb1,10.0.0.1,80,http,Jane\n",
    );

    sit()
        .args(["import", "server", &csv, "--yes", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records imported: 1"));
}

#[test]
fn test_import_missing_required_mappings_lists_all_labels() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "servers.csv", "Name,Hostname\nweb1,10.0.0.1\n");

    sit()
        .args(["import", "server", &csv, "--yes", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Port, Type"));
}

#[test]
fn test_import_empty_file_fails() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "empty.csv", "name,hostname,port,type\n");

    sit()
        .args(["import", "server", &csv, "--yes", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("header line and at least one data row"));
}

#[test]
fn test_import_application_dry_run() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "apps.csv",
        "name,description\nStorefront,Public shop\nBilling,\n",
    );

    sit()
        .args(["import", "app", &csv, "--yes", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records imported: 2"));
}

// ============================================================================
// Bulk Update Validation Tests
// ============================================================================

#[test]
fn test_bulk_update_requires_some_field() {
    sit()
        .args(["bulk", "update", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No updates specified"));
}

#[test]
fn test_bulk_update_rejects_unknown_server_type() {
    sit()
        .args(["bulk", "update", "1", "--server-type", "gopher"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid server type"));
}

#[test]
fn test_bulk_update_all_conflicts_with_ids() {
    sit()
        .args(["bulk", "update", "1", "--all", "--shutdown-status", "Offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used"));
}

// ============================================================================
// Transport Failure Tests
// ============================================================================

#[test]
fn test_unreachable_service_reports_transport_error() {
    sit()
        .args(["list", "servers", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to reach inventory service"));
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn test_completions_generate() {
    sit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sit"));
}
