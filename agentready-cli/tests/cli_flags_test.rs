//! CLI flag contract tests
//!
//! Runs the built binary against throwaway repositories to check output
//! formats, `--output`, `--min-level`, `--pillar`, `init` and `criteria`.

use std::path::Path;
use std::process::{Command, Output};

fn agentready_bin() -> &'static str {
    env!("CARGO_BIN_EXE_agentready")
}

fn setup_test_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("README.md"), "# demo\n").unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name": "demo", "scripts": {"test": "jest"}}"#,
    )
    .unwrap();
    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(agentready_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run agentready")
}

fn run_analyze(dir: &Path, extra_args: &[&str]) -> (i32, String, String) {
    let mut args = vec![
        "analyze",
        dir.to_str().unwrap(),
        "--no-emoji",
        "--evaluator",
        "off",
    ];
    args.extend_from_slice(extra_args);
    let output = run(&args);
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Invalid JSON")
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_json_output_is_valid() {
    let dir = setup_test_repo();
    let (code, stdout, _) = run_analyze(dir.path(), &["--format", "json"]);
    assert_eq!(code, 0);

    let json = parse_json(&stdout);
    assert_eq!(json["level"], 1);
    assert_eq!(json["project"]["detected_types"][0], "javascript");
    assert_eq!(json["pillars"].as_array().unwrap().len(), 9);
    assert!(json["recommendations"].as_array().unwrap().len() <= 10);
}

#[test]
fn test_text_output_has_sections() {
    let dir = setup_test_repo();
    let (code, stdout, _) = run_analyze(dir.path(), &[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Agent Readiness Report"));
    assert!(stdout.contains("PILLARS"));
    assert!(stdout.contains("TOP RECOMMENDATIONS"));
    // Not a terminal, so no ANSI codes
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn test_html_output_to_file() {
    let dir = setup_test_repo();
    let out = dir.path().join("report.html");
    let (code, stdout, _) = run_analyze(
        dir.path(),
        &["--format", "html", "-o", out.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.is_empty());

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<details>"));
}

#[test]
fn test_default_command_is_analyze() {
    let dir = setup_test_repo();
    let output = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Agent Readiness Report"));
}

#[test]
fn test_missing_path_fails() {
    let output = run(&["analyze", "/definitely/not/here", "--evaluator", "off"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path does not exist"));
}

// ============================================================================
// Selection and gating
// ============================================================================

#[test]
fn test_pillar_and_skip_criterion_flags() {
    let dir = setup_test_repo();
    let (code, stdout, _) = run_analyze(
        dir.path(),
        &[
            "--format",
            "json",
            "--pillar",
            "docs",
            "--skip-criterion",
            "docs.changelog",
        ],
    );
    assert_eq!(code, 0);

    let json = parse_json(&stdout);
    let pillars = json["pillars"].as_array().unwrap();
    assert_eq!(pillars.len(), 1);
    assert_eq!(pillars[0]["id"], "docs");
    assert!(pillars[0]["criteria"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["criterion_id"] != "docs.changelog"));
}

#[test]
fn test_min_level_gate() {
    let dir = setup_test_repo();

    let (code, _, stderr) = run_analyze(dir.path(), &["--format", "json", "--min-level", "3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--min-level=3"));

    let (code, _, _) = run_analyze(dir.path(), &["--format", "json", "--min-level", "1"]);
    assert_eq!(code, 0);
}

#[test]
fn test_config_defaults_apply() {
    let dir = setup_test_repo();
    std::fs::write(
        dir.path().join("agentready.toml"),
        "[pillars]\nonly = [\"security\"]\n\n[defaults]\nformat = \"json\"\nmin_level = 5\n",
    )
    .unwrap();

    let (code, stdout, _) = run_analyze(dir.path(), &[]);
    assert_eq!(code, 1);
    let json = parse_json(&stdout);
    assert_eq!(json["pillars"].as_array().unwrap().len(), 1);
    assert_eq!(json["pillars"][0]["id"], "security");
}

#[test]
fn test_requested_evaluator_without_key_warns_on_stderr() {
    let dir = setup_test_repo();
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("agentready.toml"),
        "[evaluator]\nbackend = \"openai\"\n",
    )
    .unwrap();

    let output = Command::new(agentready_bin())
        .args([
            "analyze",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
            "--evaluator",
            "on",
        ])
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .expect("Failed to run agentready");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("evaluator requested but unavailable"), "{stderr}");
    assert!(stderr.contains("OPENAI_API_KEY"));
    let json = parse_json(&String::from_utf8_lossy(&output.stdout));
    assert!(json["summary"]["skipped"].as_u64().unwrap() > 0);
}

// ============================================================================
// init / criteria
// ============================================================================

#[test]
fn test_init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap();

    let first = run(&["init", path]);
    assert_eq!(first.status.code(), Some(0));
    assert!(dir.path().join("agentready.toml").exists());

    let second = run(&["init", path]);
    assert_eq!(second.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&second.stderr).contains("refusing to overwrite"));
}

#[test]
fn test_criteria_json_respects_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".agentready.yaml"),
        "pillars:\n  exclude: [observability]\n",
    )
    .unwrap();

    let output = run(&["criteria", dir.path().to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let json = parse_json(&String::from_utf8_lossy(&output.stdout));
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 8);
    assert!(!ids.contains(&"observability"));
}
