mod support;

use std::process::Command;
use support::fixture;
use tempfile::TempDir;

fn litscout() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_litscout"));
    cmd.env("RUST_LOG", "error")
        .env_remove("LITSCOUT_PROVIDER")
        .env_remove("LITSCOUT_MODEL");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let output = litscout().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("detect"));
}

#[test]
fn test_version() {
    let output = litscout().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_detect_json_on_rag_app() {
    let output = litscout()
        .args(["detect", "--format", "json"])
        .arg(fixture("rag-app"))
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(summary["codebase_name"], "rag-app");
    assert_eq!(summary["files_scanned"], 4);
    let kinds: Vec<&str> = summary["techniques"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["VECTOR_DB", "RAG", "LLM_API", "PROMPT_ENGINEERING"]);
}

#[test]
fn test_offline_analyze_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("report.json");

    let status = litscout()
        .args(["analyze", "--offline", "--format", "json", "--no-progress", "--output"])
        .arg(&target)
        .arg(fixture("plain-app"))
        .status()
        .unwrap();

    assert!(status.success());
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(report["codebase_name"], "plain-app");
    assert_eq!(report["overall_risk"], "Low");
    assert_eq!(report["techniques_detected"], 0);
}

#[test]
fn test_analyze_missing_input_exits_with_failure() {
    let output = litscout()
        .args(["analyze", "--offline", "/nonexistent/app.tar.gz"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_invalid_timeout_is_a_config_error() {
    let output = litscout()
        .args(["analyze", "--offline", "--timeout", "0"])
        .arg(fixture("plain-app"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}
