//! Criterion check predicates
//!
//! A [`Check`] is plain data describing what to look for. Checks never mutate
//! the repository; they read files through the shared [`RepoIndex`] or ask the
//! injected evaluator. Returning `Err` (or panicking) is allowed, the
//! execution engine turns either into a failing result.

mod evaluate;
mod fields;
mod files;

pub use evaluate::{MAX_CONTEXT_BYTES, MAX_CONTEXT_BYTES_PER_FILE};
pub(crate) use fields::load_document;
pub(crate) use files::{is_skipped_dir, to_slash};
pub use files::{RepoIndex, MAX_INDEXED_FILES, MAX_PATTERN_FILE_BYTES};

use crate::ai::Evaluator;
use crate::models::{CheckOutcome, ProjectInfo};
use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Everything a check may look at
pub struct CheckContext<'a> {
    pub repo_path: &'a Path,
    pub project: &'a ProjectInfo,
    pub evaluator: Option<&'a dyn Evaluator>,
    pub index: &'a RepoIndex,
}

/// User-defined check logic
pub trait CriterionCheck: Send + Sync {
    fn check(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome>;
}

impl<F> CriterionCheck for F
where
    F: Fn(&CheckContext<'_>) -> Result<CheckOutcome> + Send + Sync,
{
    fn check(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
        self(ctx)
    }
}

/// Document format of a structured-field lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Json,
    Yaml,
    Toml,
}

/// What a criterion checks
#[derive(Clone)]
pub enum Check {
    /// Any of the paths exists (file or directory)
    FileExists(&'static [&'static str]),
    /// Any indexed file matches any of the globs
    Glob(&'static [&'static str]),
    /// The regex matches inside any file matching the globs
    Pattern {
        files: &'static [&'static str],
        pattern: &'static str,
    },
    /// A JSON pointer resolves to a truthy value
    JsonField {
        file: &'static str,
        pointer: &'static str,
    },
    /// Same as [`Check::JsonField`] on a YAML document
    YamlField {
        file: &'static str,
        pointer: &'static str,
    },
    /// Same as [`Check::JsonField`] on a TOML document
    TomlField {
        file: &'static str,
        pointer: &'static str,
    },
    /// The project was detected as one of these types
    ProjectType(&'static [&'static str]),
    /// First passing sub-check wins
    Any(Vec<Check>),
    /// Qualitative question answered by the external evaluator
    Evaluator {
        prompt: &'static str,
        context_files: &'static [&'static str],
    },
    Custom(Arc<dyn CriterionCheck>),
}

impl Check {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&CheckContext<'_>) -> Result<CheckOutcome> + Send + Sync + 'static,
    {
        Check::Custom(Arc::new(f))
    }

    /// Only evaluator checks need one; `Any` containing one does too
    pub fn requires_evaluator(&self) -> bool {
        match self {
            Check::Evaluator { .. } => true,
            Check::Any(checks) => checks.iter().any(Check::requires_evaluator),
            _ => false,
        }
    }

    /// One-line description, used by `agentready criteria`
    pub fn describe(&self) -> String {
        match self {
            Check::FileExists(paths) => format!("file exists: {}", paths.join(" | ")),
            Check::Glob(patterns) => format!("file matches: {}", patterns.join(" | ")),
            Check::Pattern { files, pattern } => {
                format!("/{}/ in {}", pattern, files.join(" | "))
            }
            Check::JsonField { file, pointer } => format!("{}#{}", file, pointer),
            Check::YamlField { file, pointer } => format!("{}#{}", file, pointer),
            Check::TomlField { file, pointer } => format!("{}#{}", file, pointer),
            Check::ProjectType(types) => format!("project type: {}", types.join(" | ")),
            Check::Any(checks) => checks
                .iter()
                .map(Check::describe)
                .collect::<Vec<_>>()
                .join(" OR "),
            Check::Evaluator { context_files, .. } => {
                format!("evaluator review of {}", context_files.join(" | "))
            }
            Check::Custom(_) => "custom check".to_string(),
        }
    }

    pub fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
        match self {
            Check::FileExists(paths) => Ok(files::file_exists(ctx, paths)),
            Check::Glob(patterns) => files::glob(ctx, patterns),
            Check::Pattern { files, pattern } => files::pattern(ctx, files, pattern),
            Check::JsonField { file, pointer } => {
                fields::field(ctx, file, pointer, FieldFormat::Json)
            }
            Check::YamlField { file, pointer } => {
                fields::field(ctx, file, pointer, FieldFormat::Yaml)
            }
            Check::TomlField { file, pointer } => {
                fields::field(ctx, file, pointer, FieldFormat::Toml)
            }
            Check::ProjectType(types) => Ok(project_type(ctx, types)),
            Check::Any(checks) => run_any(ctx, checks),
            Check::Evaluator {
                prompt,
                context_files,
            } => evaluate::evaluate(ctx, prompt, context_files),
            Check::Custom(check) => check.check(ctx),
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check({})", self.describe())
    }
}

fn project_type(ctx: &CheckContext<'_>, types: &[&str]) -> CheckOutcome {
    match types.iter().find(|t| ctx.project.has_type(t)) {
        Some(t) => CheckOutcome::pass(format!("Detected {} project", t)),
        None => CheckOutcome::fail(format!(
            "Project type is not one of: {}",
            types.join(", ")
        )),
    }
}

fn run_any(ctx: &CheckContext<'_>, checks: &[Check]) -> Result<CheckOutcome> {
    let mut first_error = None;
    let mut misses = Vec::new();

    for check in checks {
        match check.run(ctx) {
            Ok(outcome) if outcome.pass && !outcome.skipped => return Ok(outcome),
            Ok(outcome) => misses.push(outcome.message),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    let outcome = CheckOutcome::fail("None of the alternatives matched");
    Ok(if misses.is_empty() {
        outcome
    } else {
        outcome.with_details(misses.join("; "))
    })
}
