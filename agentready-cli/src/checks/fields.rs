//! Structured field lookups in JSON, YAML and TOML documents

use super::{CheckContext, FieldFormat};
use crate::models::CheckOutcome;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

pub(super) fn field(
    ctx: &CheckContext<'_>,
    file: &str,
    pointer: &str,
    format: FieldFormat,
) -> Result<CheckOutcome> {
    let path = ctx.repo_path.join(file);
    if !path.is_file() {
        return Ok(CheckOutcome::fail(format!("Missing {}", file)));
    }

    let doc = load_document(&path, format).with_context(|| format!("Failed to parse {}", file))?;
    Ok(match doc.pointer(pointer) {
        Some(value) if is_truthy(value) => {
            CheckOutcome::pass(format!("{} sets {}", file, pointer))
        }
        Some(_) => CheckOutcome::fail(format!("{} has an empty {}", file, pointer)),
        None => CheckOutcome::fail(format!("{} does not set {}", file, pointer)),
    })
}

/// Parse any supported document into a JSON value so one pointer syntax works for all
pub(crate) fn load_document(path: &Path, format: FieldFormat) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = match format {
        FieldFormat::Json => serde_json::from_str(&content)?,
        FieldFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
            serde_json::to_value(yaml)?
        }
        FieldFormat::Toml => {
            let toml: toml::Value = toml::from_str(&content)?;
            serde_json::to_value(toml)?
        }
    };
    Ok(value)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        _ => true,
    }
}
