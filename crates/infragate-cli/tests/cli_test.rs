//! End-to-end tests of the `infragate` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/reports")
        .join(name)
        .display()
        .to_string()
}

/// A command isolated from the caller's environment and working directory.
fn infragate(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("infragate");
    cmd.current_dir(dir)
        .env_remove("GITHUB_STEP_SUMMARY")
        .env_remove("INFRAGATE_CONFIG")
        .env("INFRAGATE_LOG", "off");
    for (key, _) in std::env::vars() {
        if key.starts_with("INFRAGATE_") && key != "INFRAGATE_LOG" {
            cmd.env_remove(key);
        }
    }
    cmd
}

#[test]
fn blocks_on_critical_findings() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path())
        .args(["--security", &fixture("checkov_mixed.json")])
        .args(["--max-critical", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CRITICAL 1 > 0"))
        .stdout(predicate::str::contains("Result: BLOCKED"));
}

#[test]
fn passes_clean_report_with_saving() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("base.json"), r#"{"totalMonthlyCost": "150"}"#).unwrap();
    fs::write(dir.path().join("proposed.json"), r#"{"totalMonthlyCost": "100"}"#).unwrap();
    infragate(dir.path())
        .args(["--security", &fixture("checkov_clean.json")])
        .args(["--base", "base.json", "--proposed", "proposed.json"])
        .args(["--max-cost-delta", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-50.00 USD"))
        .stdout(predicate::str::contains("Result: PASSED ✓"));
}

#[test]
fn warn_tier_exits_zero_with_json_output() {
    let dir = TempDir::new().unwrap();
    let out = infragate(dir.path())
        .args(["--diff", &fixture("infracost_diff.json")])
        .args(["--cost-warn", "100", "--cost-block", "300", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["status"], "warn");
    assert_eq!(value["cost"]["delta"], 150.5);
}

#[test]
fn lenient_mode_tolerates_missing_reports() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path())
        .args(["--security", "missing.json", "--diff", "missing-diff.json"])
        .args(["--max-high", "0"])
        .assert()
        .success();
}

#[test]
fn strict_mode_fails_on_missing_report() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path())
        .args(["--security", "missing.json", "--mode", "strict", "--max-high", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[LOAD_ERROR]"));
}

#[test]
fn mode_flag_overrides_strict_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("infragate.toml"),
        "[loading]\nmode = \"strict\"\n\n[thresholds]\nmax_high = 0\n",
    )
    .unwrap();

    infragate(dir.path())
        .args(["--security", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[LOAD_ERROR]"));

    infragate(dir.path())
        .args(["--security", "missing.json", "--mode", "lenient"])
        .assert()
        .success();
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path())
        .args(["--mode", "paranoid", "--max-high", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown acquisition mode"));
}

#[test]
fn conflicting_policy_shapes_exit_two() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path())
        .args(["--max-high", "0", "--cost-warn", "1", "--cost-block", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[POLICY_SHAPE_ERROR]"));
}

#[test]
fn missing_policy_exits_two() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path()).assert().code(2);
}

#[test]
fn project_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("infragate.toml"),
        "[thresholds]\ncost_warn = 100.0\ncost_block = 150.0\n\n[report]\ncurrency = \"EUR\"\n",
    )
    .unwrap();
    infragate(dir.path())
        .args(["--diff", &fixture("infracost_diff.json")])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("+150.50 EUR"))
        .stdout(predicate::str::contains("cost delta 150.50 >= block threshold 150.00"));
}

#[test]
fn summary_file_receives_markdown() {
    let dir = TempDir::new().unwrap();
    let summary = dir.path().join("summary.md");
    fs::write(&summary, "# Earlier step\n").unwrap();
    infragate(dir.path())
        .args(["--security", &fixture("checkov_clean.json")])
        .args(["--max-critical", "0"])
        .env("GITHUB_STEP_SUMMARY", &summary)
        .assert()
        .success();
    let contents = fs::read_to_string(&summary).unwrap();
    assert!(contents.starts_with("# Earlier step\n"));
    assert!(contents.contains("## Infrastructure gate: ✅ Passed"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    infragate(dir.path())
        .args(["--max-high", "0", "--format", "sarif"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("report.format"));
}
