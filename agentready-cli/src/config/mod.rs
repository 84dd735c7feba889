//! Configuration for agentready
//!
//! - Project-level configuration (`agentready.toml`): pillar and criterion
//!   toggles, evaluator settings, CLI defaults
//! - User-level configuration (`~/.config/agentready/config.toml`): API keys
//!   and backend preferences

mod project_config;
mod user_config;

pub use project_config::{
    load_config_file, load_project_config, normalize_criterion_id, CliDefaults, CriteriaConfig,
    CriterionOverride, EvaluatorConfig, PillarsConfig, ProjectConfig, CONFIG_FILE_NAMES,
};
pub use user_config::{AiSettings, UserConfig};
