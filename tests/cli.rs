//! E2E tests driving the bov binary against the built-in listing

use std::path::Path;
use std::process::{Command, Output};

fn bov(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bov"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute command")
}

/// Every image path the built-in configuration references
fn configured_images() -> Vec<String> {
    let json = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/src/config/owensmouth.json"
    ))
    .unwrap();
    let config: serde_json::Value = serde_json::from_str(&json).unwrap();
    let mut paths = vec![
        config["branding"]["logo"].as_str().unwrap().to_string(),
        config["photos"]["hero"].as_str().unwrap().to_string(),
    ];
    for p in config["photos"]["grid"].as_array().unwrap() {
        paths.push(p.as_str().unwrap().to_string());
    }
    for member in config["team"].as_array().unwrap() {
        paths.push(member["headshot"].as_str().unwrap().to_string());
    }
    paths
}

fn asset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in configured_images() {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0d, 0x0a]).unwrap();
    }
    dir
}

/// Test that the summary command reports the suggested price figures
#[test]
fn summary_at_suggested_price() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["summary"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("$4,850,000"));
    assert!(stdout.contains("$2,910,000"));
    assert!(stdout.contains("PRO FORMA"));
    assert!(stdout.contains("DCR: 1.31x"));
}

/// Test JSON summary output at an overridden price
#[test]
fn summary_json_with_price() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["summary", "--price", "5000000", "--json"], dir.path());

    assert!(output.status.success(), "Command failed: {:?}", output);
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["price"], "5000000.00");
    assert_eq!(data["loan_amount"], "3000000.00");
    assert_eq!(data["warnings"].as_array().unwrap().len(), 0);
}

/// Test that an off-grid price still succeeds and reports a warning
#[test]
fn summary_off_grid_price_warns() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["summary", "--price", "4862500", "--json"], dir.path());

    assert!(output.status.success(), "Command failed: {:?}", output);
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["warnings"][0]["type"], "SuggestedPriceOffGrid");
}

/// Test that a negative price is rejected
#[test]
fn summary_negative_price_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["summary", "--price=-4850000"], dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("must not be negative"), "stderr: {stderr}");
}

/// Test that an oversized matrix range is an error rather than a crash
#[test]
fn matrix_oversized_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(
        &["matrix", "--high", "100000000000000000000", "--step", "0.0000000001"],
        dir.path(),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("pricing matrix size"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"));
}

/// Test matrix CSV output has a header plus one row per price step
#[test]
fn matrix_csv_rows() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["matrix", "--csv"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with("price,cap_rate_current,cap_rate_market"));
    assert!(lines[0].ends_with("highlight"));
    assert_eq!(lines.iter().filter(|l| l.ends_with(",true")).count(), 1);
    assert!(lines.iter().any(|l| l.starts_with("4850000,") && l.ends_with(",true")));
}

/// Test matrix range overrides
#[test]
fn matrix_custom_range() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(
        &["matrix", "--low", "4000000", "--high", "4500000", "--step", "250000"],
        dir.path(),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("$4,000,000"));
    assert!(stdout.contains("$4,250,000"));
    assert!(stdout.contains("$4,500,000"));
    assert!(!stdout.contains("$4,850,000"));
}

/// Test rent roll replacement from CSV
#[test]
fn rent_roll_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("units.csv");
    std::fs::write(
        &csv,
        "unit,type,sf,current_rent,market_rent\n#1,3 Bed / 1.5 Bath,1100,1800,2950\n#2,4 Bed / 2 Bath,1350,2400,3200\n",
    )
    .unwrap();
    let output = bov(&["rent-roll", "--rent-roll", "units.csv"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Totals / Avg"));
    assert!(stdout.contains("$4,200"));
    assert!(stdout.contains("$6,150"));
}

/// Test schema command prints a JSON schema for the configuration
#[test]
fn schema_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["schema"], dir.path());

    assert!(output.status.success(), "Command failed: {:?}", output);
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "ReportConfig");
    assert!(schema["properties"]["rent_roll"].is_object());
}

/// Test schema csv-header prints the rent roll columns
#[test]
fn schema_csv_header() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["schema", "csv-header"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(stdout.trim(), "unit,type,sf,current_rent,market_rent");
}

/// Test that a missing image fails the build before any output is written
#[test]
fn build_missing_assets_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = bov(&["build", "--assets", "missing"], dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("missing"), "stderr: {stderr}");
    assert!(!dir.path().join("index.html").exists());
}

/// Test a full build with every configured image present
#[test]
fn build_writes_self_contained_report() {
    let assets = asset_dir();
    let out = tempfile::tempdir().unwrap();
    let report = out.path().join("bov.html");
    let output = bov(
        &[
            "build",
            "--assets",
            assets.path().to_str().unwrap(),
            "--output",
            report.to_str().unwrap(),
        ],
        out.path(),
    );

    assert!(output.status.success(), "Command failed: {:?}", output);
    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.contains("Broker Opinion of Value"));
    assert!(html.contains("data:image/png;base64,iVBORw0K"));
    assert!(html.contains("data:image/jpeg;base64,iVBORw0K"));
    assert!(html.contains(r#"<tr class="highlight"><td>$4,850,000</td>"#));
}

/// Test that running with no subcommand builds index.html
#[test]
fn default_command_builds_index() {
    let assets = asset_dir();
    let output = bov(&[], assets.path());

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(assets.path().join("index.html").exists());
}
