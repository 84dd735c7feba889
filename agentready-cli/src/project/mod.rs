//! Project type and monorepo detection
//!
//! Detection only looks at marker files near the root. It never fails: a
//! manifest that cannot be parsed is logged and treated as absent.

use crate::checks::{is_skipped_dir, load_document, to_slash, FieldFormat};
use crate::models::ProjectInfo;
use globset::{GlobBuilder, GlobSetBuilder};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Marker files per project type, checked in this order
const TYPE_MARKERS: &[(&str, &[&str])] = &[
    ("rust", &["Cargo.toml"]),
    ("javascript", &["package.json"]),
    ("typescript", &["tsconfig.json"]),
    (
        "python",
        &["pyproject.toml", "setup.py", "setup.cfg", "requirements.txt", "Pipfile"],
    ),
    ("go", &["go.mod"]),
    ("java", &["pom.xml", "build.gradle", "build.gradle.kts"]),
    ("ruby", &["Gemfile"]),
];

/// Files whose presence alone marks a monorepo
const MONOREPO_MARKERS: &[&str] = &[
    "pnpm-workspace.yaml",
    "lerna.json",
    "nx.json",
    "turbo.json",
    "go.work",
];

/// Inspect the repository root
pub fn detect(repo_path: &Path) -> ProjectInfo {
    let mut detected_types = Vec::new();
    for (kind, markers) in TYPE_MARKERS {
        if markers.iter().any(|m| repo_path.join(m).is_file()) {
            detected_types.push(kind.to_string());
        }
    }
    if !detected_types.iter().any(|t| t == "typescript") && package_json_mentions_typescript(repo_path) {
        detected_types.push("typescript".to_string());
    }
    if has_dotnet_project(repo_path) {
        detected_types.push("dotnet".to_string());
    }

    let mut patterns = Vec::new();
    let mut is_monorepo = MONOREPO_MARKERS
        .iter()
        .any(|m| repo_path.join(m).is_file());

    if let Some(members) = cargo_workspace_members(repo_path) {
        is_monorepo = true;
        patterns.extend(members);
    }
    if let Some(workspaces) = package_json_workspaces(repo_path) {
        is_monorepo = true;
        patterns.extend(workspaces);
    }
    patterns.extend(pnpm_packages(repo_path));
    patterns.extend(lerna_packages(repo_path));
    patterns.extend(go_work_modules(repo_path));

    let packages = expand_packages(repo_path, &patterns);
    debug!(
        "Detected types {:?}, monorepo: {}, {} packages",
        detected_types,
        is_monorepo,
        packages.len()
    );

    ProjectInfo {
        detected_types,
        is_monorepo,
        packages,
    }
}

fn read_value(repo_path: &Path, file: &str, format: FieldFormat) -> Option<Value> {
    let path = repo_path.join(file);
    if !path.is_file() {
        return None;
    }
    match load_document(&path, format) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unparseable {}: {:#}", file, e);
            None
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn package_json_mentions_typescript(repo_path: &Path) -> bool {
    let Some(pkg) = read_value(repo_path, "package.json", FieldFormat::Json) else {
        return false;
    };
    ["dependencies", "devDependencies", "peerDependencies"]
        .iter()
        .any(|section| pkg.get(section).and_then(|d| d.get("typescript")).is_some())
}

fn has_dotnet_project(repo_path: &Path) -> bool {
    std::fs::read_dir(repo_path)
        .map(|entries| {
            entries.filter_map(|e| e.ok()).any(|e| {
                let name = e.file_name();
                let name = name.to_string_lossy();
                name.ends_with(".sln") || name.ends_with(".csproj") || name.ends_with(".fsproj")
            })
        })
        .unwrap_or(false)
}

fn cargo_workspace_members(repo_path: &Path) -> Option<Vec<String>> {
    let cargo = read_value(repo_path, "Cargo.toml", FieldFormat::Toml)?;
    let workspace = cargo.get("workspace")?;
    Some(string_list(workspace.get("members")))
}

fn package_json_workspaces(repo_path: &Path) -> Option<Vec<String>> {
    let pkg = read_value(repo_path, "package.json", FieldFormat::Json)?;
    match pkg.get("workspaces")? {
        Value::Array(_) => Some(string_list(pkg.get("workspaces"))),
        Value::Object(obj) => Some(string_list(obj.get("packages"))),
        _ => None,
    }
}

fn pnpm_packages(repo_path: &Path) -> Vec<String> {
    read_value(repo_path, "pnpm-workspace.yaml", FieldFormat::Yaml)
        .map(|v| string_list(v.get("packages")))
        .unwrap_or_default()
}

fn lerna_packages(repo_path: &Path) -> Vec<String> {
    match read_value(repo_path, "lerna.json", FieldFormat::Json) {
        Some(v) if v.get("packages").is_some() => string_list(v.get("packages")),
        Some(_) => vec!["packages/*".to_string()],
        None => Vec::new(),
    }
}

fn go_work_modules(repo_path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(repo_path.join("go.work")) else {
        return Vec::new();
    };

    let mut modules = Vec::new();
    let mut in_block = false;
    for line in content.lines() {
        let line = line.split("//").next().unwrap_or("").trim();
        if in_block {
            if line == ")" {
                in_block = false;
            } else if !line.is_empty() {
                modules.push(line.to_string());
            }
        } else if let Some(rest) = line.strip_prefix("use") {
            let rest = rest.trim();
            if rest == "(" {
                in_block = true;
            } else if !rest.is_empty() {
                modules.push(rest.to_string());
            }
        }
    }
    modules
}

/// How deep `**` member patterns may reach below the root
const MAX_PACKAGE_DEPTH: usize = 6;

/// Resolve member patterns to existing directories.
///
/// Patterns are globs relative to the root; a leading `!` excludes matching
/// directories from the positive patterns. Invalid globs are logged and
/// ignored.
fn expand_packages(repo_path: &Path, patterns: &[String]) -> Vec<String> {
    let mut include = GlobSetBuilder::new();
    let mut exclude = GlobSetBuilder::new();
    let mut max_depth = 0;

    for raw in patterns {
        let (negated, pattern) = match raw.trim().strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw.trim()),
        };
        let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
        if pattern.is_empty() || pattern == "." {
            continue;
        }

        let glob = match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => glob,
            Err(e) => {
                warn!("Ignoring workspace pattern '{}': {}", raw, e);
                continue;
            }
        };
        if negated {
            exclude.add(glob);
        } else {
            include.add(glob);
            let depth = if pattern.contains("**") {
                MAX_PACKAGE_DEPTH
            } else {
                pattern.split('/').count()
            };
            max_depth = max_depth.max(depth);
        }
    }
    if max_depth == 0 {
        return Vec::new();
    }

    let (include, exclude) = match (include.build(), exclude.build()) {
        (Ok(include), Ok(exclude)) => (include, exclude),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to build workspace globs: {}", e);
            return Vec::new();
        }
    };

    let mut packages = BTreeSet::new();
    let walker = WalkDir::new(repo_path)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.file_type().is_dir() && !is_skipped_dir(e));
    for entry in walker.filter_map(|e| e.ok()) {
        let Ok(rel) = entry.path().strip_prefix(repo_path) else {
            continue;
        };
        let rel = to_slash(rel);
        if include.is_match(&rel) && !exclude.is_match(&rel) {
            packages.insert(rel);
        }
    }

    packages.into_iter().collect()
}
