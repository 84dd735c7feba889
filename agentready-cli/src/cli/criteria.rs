//! Criteria command: list the catalog that an analyze run would use

use crate::config::load_project_config;
use crate::models::{level_name, Pillar};
use crate::pipeline::catalog_for;
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct PillarListing<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    criteria: Vec<CriterionListing<'a>>,
}

#[derive(Debug, Serialize)]
struct CriterionListing<'a> {
    id: &'a str,
    name: &'a str,
    level: u8,
    requires_external_evaluator: bool,
    check: String,
}

pub fn run(path: &Path, json: bool) -> Result<()> {
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    let pillars = catalog_for(&load_project_config(&repo_path));

    if json {
        println!("{}", serde_json::to_string_pretty(&listing(&pillars))?);
    } else {
        print!("{}", render_text(&pillars));
    }
    Ok(())
}

fn listing(pillars: &[Pillar]) -> Vec<PillarListing<'_>> {
    pillars
        .iter()
        .map(|p| PillarListing {
            id: &p.id,
            name: &p.name,
            description: &p.description,
            criteria: p
                .criteria
                .iter()
                .map(|c| CriterionListing {
                    id: &c.id,
                    name: &c.name,
                    level: c.level,
                    requires_external_evaluator: c.requires_external_evaluator,
                    check: c.check.describe(),
                })
                .collect(),
        })
        .collect()
}

fn render_text(pillars: &[Pillar]) -> String {
    let mut out = String::new();
    let total: usize = pillars.iter().map(|p| p.criteria.len()).sum();

    for pillar in pillars {
        out.push_str(&format!(
            "{} {}\n",
            style(&pillar.name).bold(),
            style(format!("({})", pillar.id)).dim()
        ));
        for c in &pillar.criteria {
            let evaluator = if c.requires_external_evaluator {
                format!(" {}", style("[evaluator]").yellow())
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  L{} {:<11} {:<40} {}{}\n",
                c.level,
                level_name(c.level),
                c.id,
                c.name,
                evaluator
            ));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{} criteria across {} pillars\n",
        total,
        pillars.len()
    ));
    out
}
