//! Built-in criterion catalog
//!
//! The catalog is plain data built by [`builtin_pillars`]. Nothing registers
//! itself at runtime; config filtering works on the returned list before the
//! engine sees it.

mod pillars;

use crate::models::Pillar;

/// CI definitions across the common hosted runners
pub(crate) const CI_FILES: &[&str] = &[
    ".github/workflows/*.yml",
    ".github/workflows/*.yaml",
    ".gitlab-ci.yml",
    ".gitlab/ci/*.yml",
    ".circleci/config.yml",
    "azure-pipelines.yml",
    "Jenkinsfile",
    ".travis.yml",
    "bitbucket-pipelines.yml",
    ".buildkite/*.yml",
    ".woodpecker.yml",
    ".drone.yml",
];

/// Dependency manifests at the repository root
pub(crate) const MANIFESTS: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "Pipfile",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "Gemfile",
    "*.csproj",
    "composer.json",
];

/// Files an agent reads for project-specific instructions
pub(crate) const AGENT_DOCS: &[&str] = &[
    "AGENTS.md",
    "CLAUDE.md",
    "GEMINI.md",
    ".cursorrules",
    ".cursor/rules/*",
    ".windsurfrules",
    ".github/copilot-instructions.md",
];

/// Every built-in pillar, in display order
pub fn builtin_pillars() -> Vec<Pillar> {
    vec![
        pillars::style(),
        pillars::build(),
        pillars::testing(),
        pillars::docs(),
        pillars::dev_env(),
        pillars::security(),
        pillars::observability(),
        pillars::task_discovery(),
        pillars::code_quality(),
    ]
}
