use std::io::Write;
use std::process::{Command, Output};

fn dashboard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sait-dashboard"))
        .args(args)
        .env_remove("SAIT_DASHBOARD_CONFIG")
        .env_remove("SAIT_RPC_URL")
        .env_remove("SAIT_TOKEN_ADDRESS")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run sait-dashboard")
}

#[test]
fn test_json_report_from_baseline() {
    let output = dashboard(&["--json"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["snapshot"]["source"], "baseline");
    assert_eq!(report["projection"]["points"].as_array().unwrap().len(), 24);
    assert_eq!(report["milestones"].as_array().unwrap().len(), 4);
    assert_eq!(report["audit"]["rollups"].as_array().unwrap().len(), 3);

    let market_cap = report["metrics"]["market_cap"].as_f64().unwrap();
    assert!((market_cap - 1.65e9).abs() < 1.0);
}

#[test]
fn test_horizon_override() {
    let output = dashboard(&["--json", "--horizon", "6"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["projection"]["points"].as_array().unwrap().len(), 6);
    assert_eq!(report["milestones"].as_array().unwrap().len(), 1);
}

#[test]
fn test_oversized_horizon_fails() {
    let output = dashboard(&["--json", "--horizon", "4294967295"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("horizon_periods"));
}

#[test]
fn test_once_renders_tables() {
    let output = dashboard(&["--once"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SAIT GOVERNANCE DASHBOARD"));
    assert!(stdout.contains("Forward Projection"));
    assert!(stdout.contains("Q4 2025"));
}

#[test]
fn test_grants_file_from_config() {
    let mut grants = tempfile::NamedTempFile::new().unwrap();
    write!(
        grants,
        r#"[{{"id":"G-1","period":"Q1 2026","tier":1,"title":"Only grant","value":250000,
            "status":"applying","voterParticipationPct":30.0,"totalVotes":12}}]"#
    )
    .unwrap();

    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "grants_file = {:?}", grants.path().display().to_string()).unwrap();

    let path = config.path().display().to_string();
    let output = dashboard(&["--json", "--config", &path]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["audit"]["summary"]["total_grants"], 1);
    assert_eq!(report["audit"]["rollups"][0]["applying"], 1);
}

#[test]
fn test_invalid_config_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "refresh_interval_secs = 0").unwrap();

    let path = config.path().display().to_string();
    let output = dashboard(&["--once", "--config", &path]);
    assert!(!output.status.success());
}
