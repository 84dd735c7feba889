//! Init command - write an example agentready.toml

use crate::config::CONFIG_FILE_NAMES;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r#"# agentready configuration
#
# Ids are case-insensitive and `-` is treated as `_`.
# List every criterion with: agentready criteria

[pillars]
# Pillars to skip entirely
exclude = []
# When non-empty, only these pillars run
# only = ["docs", "testing"]

[criteria]
# Criteria to skip
exclude = []

# [criteria.overrides."docs.changelog"]
# enabled = false

[evaluator]
# LLM-backed criteria run when credentials are available.
# Set enabled = false to always skip them.
# enabled = true
# backend = "anthropic"    # anthropic, openai, ollama
# model = "claude-sonnet-4-20250514"
timeout_secs = 60

[defaults]
# Default output format (text, json, html)
format = "text"
no_emoji = false
# Exit with code 1 below this level (CI gate)
# min_level = 2
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !repo_path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", repo_path.display());
    }

    if let Some(existing) = CONFIG_FILE_NAMES
        .iter()
        .map(|name| repo_path.join(name))
        .find(|p| p.exists())
    {
        anyhow::bail!(
            "Config already exists at {}; refusing to overwrite",
            existing.display()
        );
    }

    let config_path = repo_path.join(CONFIG_FILE_NAMES[0]);
    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} List criteria", style("agentready criteria").cyan());
    println!("  {} Run analysis", style("agentready analyze .").cyan());

    Ok(())
}
