//! Repository file index plus the existence, glob and regex checks built on it

use super::CheckContext;
use crate::models::CheckOutcome;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::RegexBuilder;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Hard cap on indexed files so huge monorepos stay bounded
pub const MAX_INDEXED_FILES: usize = 50_000;
/// Pattern checks ignore files larger than this
pub const MAX_PATTERN_FILE_BYTES: u64 = 1024 * 1024;

const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "vendor",
    "dist",
    "build",
    ".venv",
    "venv",
    "__pycache__",
    ".next",
    ".tox",
];

/// Read-only listing of repository files, relative to the root with `/` separators
#[derive(Debug, Clone, Default)]
pub struct RepoIndex {
    files: Vec<String>,
}

impl RepoIndex {
    pub fn build(root: &Path) -> Self {
        let mut files = Vec::new();
        let mut truncated = false;

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if files.len() >= MAX_INDEXED_FILES {
                truncated = true;
                break;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                files.push(to_slash(rel));
            }
        }

        if truncated {
            warn!(
                "Repository has more than {} files; only the first {} are indexed",
                MAX_INDEXED_FILES, MAX_INDEXED_FILES
            );
        }
        files.sort();
        debug!("Indexed {} files under {}", files.len(), root.display());

        Self { files }
    }

    /// Indexed files matching any of the globs, in index order
    pub fn matching(&self, patterns: &[&str]) -> Result<Vec<&str>> {
        let set = build_globset(patterns)?;
        Ok(self
            .files
            .iter()
            .filter(|f| set.is_match(f.as_str()))
            .map(String::as_str)
            .collect())
    }
}

/// Vendored, generated and VCS directories below the walk root
pub(crate) fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid glob '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build glob set")
}

pub(super) fn file_exists(ctx: &CheckContext<'_>, paths: &[&str]) -> CheckOutcome {
    match paths.iter().find(|p| ctx.repo_path.join(p).exists()) {
        Some(found) => CheckOutcome::pass(format!("Found {}", found)),
        None => CheckOutcome::fail(format!("Missing {}", paths.join(" or "))),
    }
}

pub(super) fn glob(ctx: &CheckContext<'_>, patterns: &[&str]) -> Result<CheckOutcome> {
    let matches = ctx.index.matching(patterns)?;
    Ok(match matches.first() {
        Some(first) if matches.len() == 1 => CheckOutcome::pass(format!("Found {}", first)),
        Some(first) => CheckOutcome::pass(format!(
            "Found {} (and {} more)",
            first,
            matches.len() - 1
        )),
        None => CheckOutcome::fail(format!("No file matches {}", patterns.join(" or "))),
    })
}

pub(super) fn pattern(
    ctx: &CheckContext<'_>,
    files: &[&str],
    pattern: &str,
) -> Result<CheckOutcome> {
    let regex = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .with_context(|| format!("Invalid pattern /{}/", pattern))?;

    let candidates = ctx.index.matching(files)?;
    if candidates.is_empty() {
        return Ok(CheckOutcome::fail(format!(
            "No file matches {}",
            files.join(" or ")
        )));
    }

    for rel in &candidates {
        let path = ctx.repo_path.join(rel);
        let size = std::fs::metadata(&path)
            .with_context(|| format!("Failed to stat {}", rel))?
            .len();
        if size > MAX_PATTERN_FILE_BYTES {
            debug!("Skipping {} ({} bytes) for pattern check", rel, size);
            continue;
        }
        let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", rel))?;
        if regex.is_match(&String::from_utf8_lossy(&bytes)) {
            return Ok(CheckOutcome::pass(format!("Matched in {}", rel)));
        }
    }

    Ok(CheckOutcome::fail(format!("No match for /{}/", pattern)).with_details(format!(
        "Searched {} file(s): {}",
        candidates.len(),
        candidates.iter().take(5).copied().collect::<Vec<_>>().join(", ")
    )))
}
