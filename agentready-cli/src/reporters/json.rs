//! JSON reporter
//!
//! Outputs the full ReadinessReport as pretty-printed JSON.
//! Useful for CI gates, piping to jq, or further processing.

use crate::models::ReadinessReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ReadinessReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render report as compact JSON (single line)
pub fn render_compact(report: &ReadinessReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
