//! Core data models for agentready
//!
//! A [`Pillar`] owns an ordered list of [`Criterion`] definitions. One run of the
//! execution engine turns every criterion into exactly one [`CriterionResult`];
//! pillar scores, the maturity level and the recommendations are all derived
//! from those results and never feed back into them.

use crate::checks::Check;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lowest maturity level. Every repository starts here.
pub const MIN_LEVEL: u8 = 1;
/// Highest maturity level.
pub const MAX_LEVEL: u8 = 5;

/// Human-readable name of a maturity level
pub fn level_name(level: u8) -> &'static str {
    match level {
        1 => "Functional",
        2 => "Documented",
        3 => "Standardized",
        4 => "Optimized",
        5 => "Autonomous",
        _ => "Unknown",
    }
}

/// Results of one run, keyed by pillar id in pillar order
pub type ResultsByPillar = IndexMap<String, Vec<CriterionResult>>;

/// A single pass/fail/skip check tied to one pillar and one maturity level
#[derive(Debug, Clone)]
pub struct Criterion {
    /// Stable id, used for config toggling and recommendation lookup
    pub id: String,
    /// Short title shown in reports
    pub name: String,
    /// Owning pillar
    pub pillar_id: String,
    /// Maturity tier (1-5) this criterion contributes to
    pub level: u8,
    /// Never executed without an external evaluator; produced as skipped instead
    pub requires_external_evaluator: bool,
    /// What to check
    pub check: Check,
}

impl Criterion {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pillar_id: impl Into<String>,
        level: u8,
        check: Check,
    ) -> Self {
        let requires_external_evaluator = check.requires_evaluator();
        Self {
            id: id.into(),
            name: name.into(),
            pillar_id: pillar_id.into(),
            level,
            requires_external_evaluator,
            check,
        }
    }

    /// Mark a criterion as evaluator-backed even when its check is custom
    pub fn requiring_evaluator(mut self) -> Self {
        self.requires_external_evaluator = true;
        self
    }
}

/// Thematic grouping of criteria (e.g. Testing, Security)
#[derive(Debug, Clone)]
pub struct Pillar {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub criteria: Vec<Criterion>,
}

impl Pillar {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            criteria: Vec::new(),
        }
    }

    /// Append a criterion owned by this pillar
    pub fn criterion(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        level: u8,
        check: Check,
    ) -> Self {
        let criterion = Criterion::new(id, name, self.id.clone(), level, check);
        self.criteria.push(criterion);
        self
    }

    /// Append an already-built criterion, re-homing it to this pillar
    pub fn with_criterion(mut self, mut criterion: Criterion) -> Self {
        criterion.pillar_id = self.id.clone();
        self.criteria.push(criterion);
        self
    }
}

/// What a check reports before the engine tags it with a criterion id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub pass: bool,
    pub message: String,
    pub details: Option<String>,
    pub skipped: bool,
}

impl CheckOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            pass: true,
            message: message.into(),
            details: None,
            skipped: false,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
            details: None,
            skipped: false,
        }
    }

    pub fn skip(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
            details: None,
            skipped: true,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Outcome of one criterion in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion_id: String,
    pub pass: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// When set, `pass` is meaningless and the result is left out of all scoring
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
}

impl CriterionResult {
    pub fn from_outcome(criterion_id: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            criterion_id: criterion_id.into(),
            pass: outcome.pass,
            message: outcome.message,
            details: outcome.details,
            skipped: outcome.skipped,
        }
    }

    pub fn passed(criterion_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_outcome(criterion_id, CheckOutcome::pass(message))
    }

    pub fn failed(criterion_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_outcome(criterion_id, CheckOutcome::fail(message))
    }

    pub fn skipped(criterion_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_outcome(criterion_id, CheckOutcome::skip(message))
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Passed and counted
    pub fn is_pass(&self) -> bool {
        self.pass && !self.skipped
    }

    /// Failed and counted
    pub fn is_failure(&self) -> bool {
        !self.pass && !self.skipped
    }
}

/// Per-pillar pass ratio over non-skipped results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar_id: String,
    pub passed: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Progress toward the level above the achieved one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextLevelProgress {
    /// Passing criteria in the next level's bucket
    pub current: usize,
    /// Passing criteria required to clear the next level
    pub needed: usize,
    pub remaining: usize,
    /// `None` once level 5 is reached
    pub next_level: Option<u8>,
}

/// Achieved maturity level for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: u8,
    pub next_level_progress: NextLevelProgress,
}

/// Rough cost of fixing a failed criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effort::Low => write!(f, "low"),
            Effort::Medium => write!(f, "medium"),
            Effort::High => write!(f, "high"),
        }
    }
}

/// How much fixing a criterion moves the repository toward its next level.
/// Declaration order is sort order: high impact first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
            Impact::Low => write!(f, "low"),
        }
    }
}

/// A ranked remediation item for one failed criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub reason: String,
    pub effort: Effort,
    pub impact: Impact,
    pub pillar_id: String,
    pub criterion_id: String,
}

/// What was detected about the repository before any criterion runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// e.g. "rust", "typescript", "python"
    pub detected_types: Vec<String>,
    pub is_monorepo: bool,
    /// Workspace member directories, relative to the repository root
    pub packages: Vec<String>,
}

impl ProjectInfo {
    pub fn has_type(&self, kind: &str) -> bool {
        self.detected_types.iter().any(|t| t == kind)
    }
}

/// Counts across every result of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total: usize,
}

impl ResultSummary {
    pub fn from_results(results: &ResultsByPillar) -> Self {
        let mut summary = Self::default();
        for result in results.values().flatten() {
            if result.skipped {
                summary.skipped += 1;
            } else if result.pass {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            summary.total += 1;
        }
        summary
    }
}

/// One criterion row in a report: definition joined with its result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionReport {
    pub name: String,
    pub level: u8,
    pub requires_external_evaluator: bool,
    #[serde(flatten)]
    pub result: CriterionResult,
}

/// One pillar section in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub score: PillarScore,
    pub criteria: Vec<CriterionReport>,
}

/// Full readiness report for a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub repo_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub project: ProjectInfo,
    pub level: u8,
    pub level_name: String,
    pub progress: NextLevelProgress,
    pub summary: ResultSummary,
    pub pillars: Vec<PillarReport>,
    pub recommendations: Vec<Recommendation>,
}

impl ReadinessReport {
    /// Join pillar definitions with their results and derived scores.
    ///
    /// A criterion with no recorded result is shown as failed, matching how
    /// level computation treats it.
    pub fn new(
        repo_path: PathBuf,
        project: ProjectInfo,
        pillars: &[Pillar],
        results: &ResultsByPillar,
        scores: Vec<PillarScore>,
        level: LevelResult,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        let mut scores_by_id: IndexMap<String, PillarScore> = scores
            .into_iter()
            .map(|s| (s.pillar_id.clone(), s))
            .collect();

        let pillar_reports = pillars
            .iter()
            .map(|pillar| {
                let pillar_results = results.get(&pillar.id);
                let criteria = pillar
                    .criteria
                    .iter()
                    .map(|criterion| {
                        let result = pillar_results
                            .and_then(|rs| rs.iter().find(|r| r.criterion_id == criterion.id))
                            .cloned()
                            .unwrap_or_else(|| {
                                CriterionResult::failed(criterion.id.clone(), "No result recorded")
                            });
                        CriterionReport {
                            name: criterion.name.clone(),
                            level: criterion.level,
                            requires_external_evaluator: criterion.requires_external_evaluator,
                            result,
                        }
                    })
                    .collect();

                let score = scores_by_id.shift_remove(&pillar.id).unwrap_or(PillarScore {
                    pillar_id: pillar.id.clone(),
                    passed: 0,
                    total: 0,
                    percentage: 0,
                });

                PillarReport {
                    id: pillar.id.clone(),
                    name: pillar.name.clone(),
                    description: pillar.description.clone(),
                    icon: pillar.icon.clone(),
                    score,
                    criteria,
                }
            })
            .collect();

        Self {
            repo_path,
            generated_at: Utc::now(),
            project,
            level: level.level,
            level_name: level_name(level.level).to_string(),
            progress: level.next_level_progress,
            summary: ResultSummary::from_results(results),
            pillars: pillar_reports,
            recommendations,
        }
    }

    /// Failed, non-skipped criteria in pillar order
    pub fn failures(&self) -> impl Iterator<Item = (&PillarReport, &CriterionReport)> {
        self.pillars.iter().flat_map(|p| {
            p.criteria
                .iter()
                .filter(|c| c.result.is_failure())
                .map(move |c| (p, c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_orders_high_first() {
        let mut impacts = vec![Impact::Low, Impact::High, Impact::Medium];
        impacts.sort();
        assert_eq!(impacts, vec![Impact::High, Impact::Medium, Impact::Low]);
    }

    #[test]
    fn test_effort_orders_low_first() {
        let mut efforts = vec![Effort::High, Effort::Low, Effort::Medium];
        efforts.sort();
        assert_eq!(efforts, vec![Effort::Low, Effort::Medium, Effort::High]);
    }

    #[test]
    fn test_skipped_result_serializes_flag_only_when_set() {
        let passed = CriterionResult::passed("docs.readme", "Found README.md");
        let json = serde_json::to_value(&passed).unwrap();
        assert!(json.get("skipped").is_none());
        assert!(json.get("details").is_none());

        let skipped = CriterionResult::skipped("docs.quality", "Requires external evaluator");
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["skipped"], true);
        assert_eq!(json["pass"], false);
    }

    #[test]
    fn test_summary_counts() {
        let mut results = ResultsByPillar::new();
        results.insert(
            "docs".into(),
            vec![
                CriterionResult::passed("a", "ok"),
                CriterionResult::failed("b", "missing"),
                CriterionResult::skipped("c", "skip"),
            ],
        );
        let summary = ResultSummary::from_results(&results);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(MIN_LEVEL), "Functional");
        assert_eq!(level_name(MAX_LEVEL), "Autonomous");
        assert_eq!(level_name(9), "Unknown");
    }
}
