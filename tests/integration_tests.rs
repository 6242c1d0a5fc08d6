//! Integration tests for the bidkit CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Each test builds its own data directory in a tempdir and pins the
//! reference date with `--today`, so results do not depend on the wall
//! clock.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a bidkit command
fn bidkit() -> Command {
    Command::cargo_bin("bidkit").unwrap()
}

/// Helper to create a data directory with a known fixture set
///
/// With `--today 2026-09-01`: RFP-2026-001 is 30 days out (in window,
/// selected), RFP-2026-002 is 121 days out (filtered). The selected RFP
/// prices to a grand total of 555,000: material 475,000 (5000m at unit
/// 95 after the 5% tier), testing 15,000, certification 15,000, delivery
/// 2,500, margin 47,500.
fn setup_data_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();

    fs::write(
        tmp.path().join("rfps.json"),
        r#"{
            "sample_rfps": [
                {
                    "rfp_id": "RFP-2026-001",
                    "title": "11kV Cable Package",
                    "organization": "City Metro Rail Corporation",
                    "submission_deadline": "2026-10-01",
                    "project_value": 8000000,
                    "requirements": [
                        {
                            "item_no": "1",
                            "description": "11kV XLPE copper cable, armoured",
                            "quantity": 5000,
                            "unit": "meters",
                            "technical_specs": {
                                "voltage_rating": 11,
                                "conductor_material": "copper"
                            }
                        }
                    ],
                    "testing_requirements": ["high_voltage_test"],
                    "acceptance_criteria": [
                        "BIS certification mandatory",
                        "Delivery within 60 days of order"
                    ]
                },
                {
                    "rfp_id": "RFP-2026-002",
                    "title": "Distribution Wire Package",
                    "organization": "Acme Traders",
                    "submission_deadline": "2026-12-31",
                    "project_value": 50000000,
                    "requirements": []
                }
            ]
        }"#,
    )
    .unwrap();

    fs::write(
        tmp.path().join("products.json"),
        r#"{
            "products": [
                {
                    "sku": "CU-11KV-001",
                    "product_name": "11kV XLPE Copper Cable",
                    "category": "cables",
                    "manufacturer": "Sterling Cables",
                    "specifications": {
                        "voltage_rating": 11,
                        "conductor_material": "copper"
                    },
                    "unit_price": 100
                },
                {
                    "sku": "AL-LV-009",
                    "product_name": "LV Aluminium Wire",
                    "category": "wires",
                    "manufacturer": "Apex Conductors",
                    "specifications": {
                        "voltage_rating": 1.1,
                        "conductor_material": "aluminium"
                    },
                    "unit_price": 40
                }
            ]
        }"#,
    )
    .unwrap();

    fs::write(
        tmp.path().join("pricing.json"),
        r#"{
            "material_pricing": {
                "base_prices": {"CU-11KV-001": 100.0, "AL-LV-009": 40.0},
                "quantity_discounts": [
                    {"range": "1000-9999", "rate": 0.05},
                    {"range": "10000+", "rate": 0.08}
                ]
            },
            "testing_services": {
                "routine_tests": {
                    "high_voltage_test": {"cost_per_sample": 1500.0, "samples_per_1000m": 2}
                }
            },
            "logistics_costs": {"transportation_base": 2500.0},
            "margin_settings": {"government_tender_margin": 0.10}
        }"#,
    )
    .unwrap();

    fs::write(
        tmp.path().join("test_requirements.json"),
        r#"{
            "certification_requirements": {
                "bis_certification": {"cost": 15000.0}
            },
            "delivery_requirements": {
                "express_delivery": {"cost_multiplier": 1.25},
                "expedited_delivery": {"cost_multiplier": 1.15}
            }
        }"#,
    )
    .unwrap();

    tmp
}

fn data_arg(tmp: &TempDir) -> String {
    tmp.path().display().to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    bidkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("RFP"));
}

#[test]
fn test_version_displays() {
    bidkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bidkit"));
}

#[test]
fn test_unknown_command_fails() {
    bidkit()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_data_dir_is_an_error() {
    bidkit()
        .args(["rfp", "list", "--data", "/nonexistent/bidkit-data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rfps.json"));
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_selects_and_prices_the_in_window_rfp() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["run", "--today", "2026-09-01", "--data", &data_arg(&tmp)])
        .assert()
        .success()
        .stdout(predicate::str::contains("RFP-2026-001"))
        .stdout(predicate::str::contains("CU-11KV-001"))
        .stdout(predicate::str::contains("₹555,000.00"));
}

#[test]
fn test_run_json_output_is_parseable() {
    let tmp = setup_data_dir();

    let output = bidkit()
        .args([
            "run",
            "--today",
            "2026-09-01",
            "--data",
            &data_arg(&tmp),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["rfp"]["rfp_id"], "RFP-2026-001");
    assert_eq!(doc["commercial"]["summary"]["grand_total"], 555000.0);
    assert_eq!(doc["commercial"]["summary"]["currency"], "INR");
    assert_eq!(doc["technical"]["summary"]["items_matched"], 1);
    assert_eq!(doc["compliance"]["delivery_days"], 60);
}

#[test]
fn test_run_is_deterministic_with_pinned_today() {
    let tmp = setup_data_dir();
    let run = || {
        bidkit()
            .args([
                "run",
                "--today",
                "2026-09-01",
                "--data",
                &data_arg(&tmp),
                "--format",
                "json",
            ])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_run_save_writes_the_response_file() {
    let tmp = setup_data_dir();
    let out = tmp.path().join("response.json");

    bidkit()
        .args(["run", "--today", "2026-09-01", "--data", &data_arg(&tmp)])
        .args(["--save", out.to_str().unwrap()])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved["rfp"]["rfp_id"], "RFP-2026-001");
}

#[test]
fn test_run_export_csv_writes_the_breakdown() {
    let tmp = setup_data_dir();
    let out = tmp.path().join("breakdown.csv");

    bidkit()
        .args(["run", "--today", "2026-09-01", "--data", &data_arg(&tmp)])
        .args(["--export-csv", out.to_str().unwrap()])
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("item_no,sku,quantity"));
    assert!(csv.contains("1,CU-11KV-001,5000"));
}

#[test]
fn test_run_fails_when_no_candidate_in_window() {
    let tmp = setup_data_dir();

    // both deadlines are long past
    bidkit()
        .args(["run", "--today", "2027-06-01", "--data", &data_arg(&tmp)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bid window"));
}

#[test]
fn test_run_narrow_window_filters_candidates() {
    let tmp = setup_data_dir();

    // RFP-2026-001 is 30 days out; a 10-day window leaves nothing
    bidkit()
        .args([
            "run",
            "--today",
            "2026-09-01",
            "--max-days",
            "10",
            "--data",
            &data_arg(&tmp),
        ])
        .assert()
        .failure();
}

// ============================================================================
// Rfp Command Tests
// ============================================================================

#[test]
fn test_rfp_list_hides_out_of_window_candidates() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["rfp", "list", "--today", "2026-09-01", "--data", &data_arg(&tmp)])
        .assert()
        .success()
        .stdout(predicate::str::contains("RFP-2026-001"))
        .stdout(predicate::str::contains("RFP-2026-002").not());
}

#[test]
fn test_rfp_list_all_includes_every_candidate() {
    let tmp = setup_data_dir();

    bidkit()
        .args([
            "rfp", "list", "--all", "--today", "2026-09-01", "--data", &data_arg(&tmp),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("RFP-2026-001"))
        .stdout(predicate::str::contains("RFP-2026-002"));
}

#[test]
fn test_rfp_show_prints_score_breakdown() {
    let tmp = setup_data_dir();

    bidkit()
        .args([
            "rfp",
            "show",
            "RFP-2026-001",
            "--today",
            "2026-09-01",
            "--data",
            &data_arg(&tmp),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECTION SCORE"))
        .stdout(predicate::str::contains("11kV Cable Package"))
        .stdout(predicate::str::contains("voltage_rating: 11"));
}

#[test]
fn test_rfp_show_unknown_id_fails() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["rfp", "show", "RFP-9999-999", "--data", &data_arg(&tmp)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFP-9999-999"));
}

// ============================================================================
// Catalog Command Tests
// ============================================================================

#[test]
fn test_catalog_list_shows_products() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["catalog", "list", "--data", &data_arg(&tmp)])
        .assert()
        .success()
        .stdout(predicate::str::contains("CU-11KV-001"))
        .stdout(predicate::str::contains("AL-LV-009"));
}

#[test]
fn test_catalog_list_category_filter() {
    let tmp = setup_data_dir();

    bidkit()
        .args([
            "catalog", "list", "--category", "wires", "--data", &data_arg(&tmp),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("AL-LV-009"))
        .stdout(predicate::str::contains("CU-11KV-001").not());
}

#[test]
fn test_catalog_list_csv_format() {
    let tmp = setup_data_dir();

    bidkit()
        .args([
            "catalog", "list", "--format", "csv", "--data", &data_arg(&tmp),
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "sku,name,category,manufacturer,price,available",
        ));
}

#[test]
fn test_catalog_show_prints_specifications() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["catalog", "show", "CU-11KV-001", "--data", &data_arg(&tmp)])
        .assert()
        .success()
        .stdout(predicate::str::contains("SPECIFICATIONS"))
        .stdout(predicate::str::contains("conductor_material: copper"));
}

#[test]
fn test_catalog_show_unknown_sku_fails() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["catalog", "show", "GHOST-SKU", "--data", &data_arg(&tmp)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHOST-SKU"));
}

// ============================================================================
// Match Command Tests
// ============================================================================

#[test]
fn test_match_reports_selected_product() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["match", "RFP-2026-001", "--data", &data_arg(&tmp)])
        .assert()
        .success()
        .stdout(predicate::str::contains("CU-11KV-001"))
        .stdout(predicate::str::contains("100.0%"))
        .stdout(predicate::str::contains("1/1 item(s) matched"));
}

#[test]
fn test_match_json_output() {
    let tmp = setup_data_dir();

    let output = bidkit()
        .args([
            "match",
            "RFP-2026-001",
            "--format",
            "json",
            "--data",
            &data_arg(&tmp),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let recs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(recs[0]["selected_sku"], "CU-11KV-001");
    assert_eq!(recs[0]["selected_match_percentage"], 100.0);
}

#[test]
fn test_match_unknown_rfp_fails() {
    let tmp = setup_data_dir();

    bidkit()
        .args(["match", "RFP-9999-999", "--data", &data_arg(&tmp)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFP-9999-999"));
}
