//! Assessment pipeline
//!
//! Orchestrates one full run:
//! 1. Detect the project type and monorepo layout
//! 2. Run the (already filtered) catalog through the execution engine
//! 3. Aggregate pillar scores and the maturity level
//! 4. Rank recommendations
//! 5. Package everything as a [`ReadinessReport`]

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::catalog::builtin_pillars;
use crate::config::ProjectConfig;
use crate::engine::ExecutionEngine;
use crate::models::{Pillar, ProjectInfo, ReadinessReport, ResultsByPillar};
use crate::{project, recommendations, scoring};

/// Full assessment pipeline.
pub struct Pipeline {
    pillars: Vec<Pillar>,
    engine: ExecutionEngine,
}

impl Pipeline {
    /// Create a pipeline over an explicit catalog.
    pub fn new(pillars: Vec<Pillar>, engine: ExecutionEngine) -> Self {
        Self { pillars, engine }
    }

    /// Create a pipeline over the built-in catalog filtered by `config`.
    pub fn from_config(config: &ProjectConfig, engine: ExecutionEngine) -> Self {
        Self::new(catalog_for(config), engine)
    }

    /// Pillars that will run, after filtering.
    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    /// Run the whole assessment against `repo_path`.
    pub fn run(&self, repo_path: &Path) -> Result<ReadinessReport> {
        if !repo_path.is_dir() {
            anyhow::bail!("Path is not a directory: {}", repo_path.display());
        }

        let project = project::detect(repo_path);
        info!(
            "Assessing {} ({} pillars, types: {:?}, monorepo: {})",
            repo_path.display(),
            self.pillars.len(),
            project.detected_types,
            project.is_monorepo
        );

        let results = self
            .engine
            .run(&self.pillars, repo_path, &project)
            .with_context(|| format!("Failed to evaluate {}", repo_path.display()))?;

        let report = assess(repo_path, project, &self.pillars, &results);
        info!(
            "Level {} ({}), {} recommendations",
            report.level,
            report.level_name,
            report.recommendations.len()
        );
        Ok(report)
    }
}

/// Built-in catalog with project config toggles applied.
pub fn catalog_for(config: &ProjectConfig) -> Vec<Pillar> {
    config.filter_pillars(builtin_pillars())
}

/// Aggregate raw results into a report.
///
/// Pure: the same inputs always give the same scores, level and
/// recommendations (only `generated_at` differs between calls).
pub fn assess(
    repo_path: &Path,
    project: ProjectInfo,
    pillars: &[Pillar],
    results: &ResultsByPillar,
) -> ReadinessReport {
    let scores = scoring::pillar_scores(pillars, results);
    let level = scoring::compute_level(pillars, results);
    let recs = recommendations::rank(pillars, results, &scores, &level);

    ReadinessReport::new(
        repo_path.to_path_buf(),
        project,
        pillars,
        results,
        scores,
        level,
        recs,
    )
}
