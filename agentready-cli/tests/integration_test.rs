//! Library-level integration tests
//!
//! Runs the built-in catalog and hand-built catalogs through the full
//! pipeline against throwaway repositories.

use agentready::ai::{AiResult, Evaluation, Evaluator};
use agentready::catalog::builtin_pillars;
use agentready::checks::{Check, CheckContext};
use agentready::engine::{ExecutionEngine, MISSING_EVALUATOR_MESSAGE};
use agentready::models::{CheckOutcome, Impact, Pillar, ReadinessReport};
use agentready::pipeline::Pipeline;
use agentready::recommendations::MAX_RECOMMENDATIONS;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A small Rust project that satisfies every level 1 criterion
fn basic_rust_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "Cargo.toml",
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    );
    write(root, "src/main.rs", "fn main() {}\n");
    write(root, "tests/smoke.rs", "#[test]\nfn smoke() {}\n");
    write(root, "README.md", "# demo\n");
    write(root, "LICENSE", "MIT\n");
    write(root, ".gitignore", "/target\n.env\n");
    write(
        root,
        ".github/workflows/ci.yml",
        "jobs:\n  check:\n    steps:\n      - run: cargo fmt --check\n      - run: cargo clippy\n      - run: cargo test\n",
    );
    dir
}

fn run_builtin(dir: &Path) -> ReadinessReport {
    Pipeline::new(builtin_pillars(), ExecutionEngine::new(2))
        .run(dir)
        .unwrap()
}

struct AlwaysPass;

impl Evaluator for AlwaysPass {
    fn evaluate(&self, _prompt: &str, _context: &str) -> AiResult<Evaluation> {
        Ok(Evaluation {
            pass: true,
            message: "Looks actionable".to_string(),
            details: None,
        })
    }
}

#[test]
fn test_empty_repo_is_level_one_with_capped_recommendations() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_builtin(dir.path());

    assert_eq!(report.level, 1);
    assert_eq!(report.progress.next_level, Some(2));
    assert!(report.progress.remaining > 0);
    assert_eq!(report.summary.passed, 0);
    assert_eq!(report.recommendations.len(), MAX_RECOMMENDATIONS);

    // Level 2 failures unlock the next level and come first
    assert_eq!(report.recommendations[0].impact, Impact::High);
    let first_non_high = report
        .recommendations
        .iter()
        .position(|r| r.impact != Impact::High)
        .unwrap_or(report.recommendations.len());
    assert!(report.recommendations[first_non_high..]
        .iter()
        .all(|r| r.impact != Impact::High));
}

#[test]
fn test_basic_repo_clears_level_one() {
    let dir = basic_rust_repo();
    let report = run_builtin(dir.path());

    assert!(report.project.has_type("rust"));
    assert!(report.level >= 1);
    for pillar in &report.pillars {
        for criterion in pillar.criteria.iter().filter(|c| c.level == 1) {
            assert!(
                criterion.result.pass,
                "{} failed: {}",
                criterion.result.criterion_id,
                criterion.result.message
            );
        }
    }
}

#[test]
fn test_evaluator_criteria_skipped_without_evaluator() {
    let dir = basic_rust_repo();
    let report = run_builtin(dir.path());

    let skipped: Vec<_> = report
        .pillars
        .iter()
        .flat_map(|p| &p.criteria)
        .filter(|c| c.result.skipped)
        .collect();
    assert!(!skipped.is_empty());
    assert_eq!(skipped.len(), report.summary.skipped);
    for c in &skipped {
        assert!(c.requires_external_evaluator);
        assert!(!c.result.pass);
        assert_eq!(c.result.message, MISSING_EVALUATOR_MESSAGE);
    }
    assert!(report
        .recommendations
        .iter()
        .all(|r| skipped.iter().all(|s| s.result.criterion_id != r.criterion_id)));
}

#[test]
fn test_injected_evaluator_answers_evaluator_criteria() {
    let dir = basic_rust_repo();
    write(dir.path(), "AGENTS.md", "Run `cargo test` before committing.\n");

    let engine = ExecutionEngine::new(2).with_evaluator(Arc::new(AlwaysPass));
    let report = Pipeline::new(builtin_pillars(), engine)
        .run(dir.path())
        .unwrap();

    let quality = report
        .pillars
        .iter()
        .flat_map(|p| &p.criteria)
        .find(|c| c.result.criterion_id == "docs.agent_instructions_quality")
        .unwrap();
    assert!(quality.result.pass);
    assert!(!quality.result.skipped);
}

#[test]
fn test_failing_and_panicking_checks_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let pillars = vec![Pillar::new("custom", "Custom", "", "")
        .criterion(
            "custom.ok",
            "Always passes",
            1,
            Check::custom(|_ctx: &CheckContext<'_>| Ok(CheckOutcome::pass("fine"))),
        )
        .criterion(
            "custom.error",
            "Returns an error",
            1,
            Check::custom(|_ctx: &CheckContext<'_>| anyhow::bail!("disk on fire")),
        )
        .criterion(
            "custom.panic",
            "Panics",
            1,
            Check::custom(|_ctx: &CheckContext<'_>| -> anyhow::Result<CheckOutcome> {
                panic!("unexpected state")
            }),
        )];

    let report = Pipeline::new(pillars, ExecutionEngine::new(2))
        .run(dir.path())
        .unwrap();
    let criteria = &report.pillars[0].criteria;

    assert!(criteria[0].result.pass);
    for c in &criteria[1..] {
        assert!(!c.result.pass);
        assert!(!c.result.skipped);
        assert!(c.result.message.contains("Check failed"), "{}", c.result.message);
    }
    assert!(criteria[1].result.message.contains("disk on fire"));
    assert!(criteria[2].result.message.contains("unexpected state"));
    // 1 of 3 level 1 criteria pass, below the 80% threshold
    assert_eq!(report.level, 1);
    assert_eq!(report.pillars[0].score.percentage, 33);
}

#[test]
fn test_assessment_is_deterministic() {
    let dir = basic_rust_repo();
    let a = run_builtin(dir.path());
    let b = run_builtin(dir.path());

    assert_eq!(a.level, b.level);
    assert_eq!(a.progress, b.progress);
    assert_eq!(
        serde_json::to_value(&a.pillars).unwrap(),
        serde_json::to_value(&b.pillars).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&a.recommendations).unwrap(),
        serde_json::to_value(&b.recommendations).unwrap()
    );
}

#[test]
fn test_json_report_shape() {
    let dir = basic_rust_repo();
    let report = run_builtin(dir.path());
    let json: serde_json::Value =
        serde_json::from_str(&agentready::reporters::render_json_compact(&report).unwrap())
            .unwrap();

    assert_eq!(json["level"], report.level);
    assert!(json["level_name"].is_string());
    assert!(json["generated_at"].is_string());
    assert_eq!(json["pillars"].as_array().unwrap().len(), 9);
    assert!(json["recommendations"].as_array().unwrap().len() <= MAX_RECOMMENDATIONS);
    assert!(json["progress"]["needed"].is_u64());
}
