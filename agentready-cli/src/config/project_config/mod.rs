//! Project-level configuration support
//!
//! Loads per-project configuration from `agentready.toml`, `.agentready.json`,
//! or `.agentready.yaml` files in the repository root.
//!
//! # Configuration Format
//!
//! ```toml
//! # agentready.toml
//!
//! [pillars]
//! exclude = ["observability"]
//!
//! [criteria]
//! exclude = ["docs.changelog"]
//!
//! [criteria.overrides."testing.coverage"]
//! enabled = false
//!
//! [evaluator]
//! enabled = true
//! backend = "anthropic"
//! timeout_secs = 60
//!
//! [defaults]
//! format = "text"
//! min_level = 2
//! ```

use crate::models::Pillar;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "agentready.toml",
    ".agentready.json",
    ".agentready.yaml",
    ".agentready.yml",
];

/// Project-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub pillars: PillarsConfig,

    #[serde(default)]
    pub criteria: CriteriaConfig,

    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Pillar selection
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PillarsConfig {
    /// Pillars to drop entirely
    #[serde(default)]
    pub exclude: Vec<String>,

    /// When non-empty, only these pillars run
    #[serde(default)]
    pub only: Vec<String>,
}

/// Criterion selection
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CriteriaConfig {
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-criterion overrides keyed by criterion id
    #[serde(default)]
    pub overrides: HashMap<String, CriterionOverride>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CriterionOverride {
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// External evaluator settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EvaluatorConfig {
    /// `None` means "use one if credentials are available"
    #[serde(default)]
    pub enabled: Option<bool>,

    /// anthropic, openai or ollama
    #[serde(default)]
    pub backend: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, html)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub no_emoji: Option<bool>,

    /// Fail the run when the achieved level is below this
    #[serde(default)]
    pub min_level: Option<u8>,

    #[serde(default)]
    pub workers: Option<usize>,
}

/// Load project configuration from the repository root.
///
/// Tries each of [`CONFIG_FILE_NAMES`] in order. A file that fails to parse
/// is logged and skipped. Returns the default configuration when nothing
/// usable is found.
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = repo_path.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load one config file, picking the parser from its extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };
    Ok(config)
}

impl ProjectConfig {
    /// A pillar runs unless excluded, or unless an allow-list omits it
    pub fn is_pillar_enabled(&self, id: &str) -> bool {
        let id = normalize_criterion_id(id);
        let listed = |list: &[String]| list.iter().any(|p| normalize_criterion_id(p) == id);

        if listed(self.pillars.exclude.as_slice()) {
            return false;
        }
        self.pillars.only.is_empty() || listed(self.pillars.only.as_slice())
    }

    /// Criteria are enabled unless excluded or overridden with `enabled = false`
    pub fn is_criterion_enabled(&self, id: &str) -> bool {
        let id = normalize_criterion_id(id);

        if self
            .criteria
            .exclude
            .iter()
            .any(|c| normalize_criterion_id(c) == id)
        {
            return false;
        }

        self.criteria
            .overrides
            .iter()
            .find(|(k, _)| normalize_criterion_id(k) == id)
            .and_then(|(_, o)| o.enabled)
            .unwrap_or(true)
    }

    /// Apply pillar and criterion toggles to a catalog.
    ///
    /// Pillars left without criteria are dropped. Ids in the config that
    /// match nothing are reported once as a warning.
    pub fn filter_pillars(&self, pillars: Vec<Pillar>) -> Vec<Pillar> {
        self.warn_unknown_ids(&pillars);

        pillars
            .into_iter()
            .filter(|p| self.is_pillar_enabled(&p.id))
            .filter_map(|mut p| {
                p.criteria.retain(|c| self.is_criterion_enabled(&c.id));
                if p.criteria.is_empty() {
                    debug!("Pillar {} has no enabled criteria", p.id);
                    None
                } else {
                    Some(p)
                }
            })
            .collect()
    }

    fn warn_unknown_ids(&self, pillars: &[Pillar]) {
        let pillar_known = |id: &str| {
            let id = normalize_criterion_id(id);
            pillars.iter().any(|p| p.id == id)
        };
        let criterion_known = |id: &str| {
            let id = normalize_criterion_id(id);
            pillars.iter().flat_map(|p| &p.criteria).any(|c| c.id == id)
        };

        for id in self.pillars.exclude.iter().chain(&self.pillars.only) {
            if !pillar_known(id.as_str()) {
                warn!("Unknown pillar '{}' in config", id);
            }
        }
        for id in self
            .criteria
            .exclude
            .iter()
            .chain(self.criteria.overrides.keys())
        {
            if !criterion_known(id.as_str()) {
                warn!("Unknown criterion '{}' in config", id);
            }
        }
    }
}

/// Normalize an id for config lookup: `Docs.Agent-Instructions` -> `docs.agent_instructions`
pub fn normalize_criterion_id(id: &str) -> String {
    id.trim().to_lowercase().replace('-', "_")
}
