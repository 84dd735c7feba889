//! Text (terminal) reporter with colors and formatting

use super::RenderOptions;
use crate::models::{level_name, CriterionReport, Impact, ReadinessReport};
use anyhow::Result;
use std::fmt::Write;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

const BAR_WIDTH: usize = 20;

/// Level colors
fn level_color(level: u8) -> &'static str {
    match level {
        5 => "\x1b[32m", // Green
        4 => "\x1b[92m", // Light green
        3 => "\x1b[33m", // Yellow
        2 => "\x1b[91m", // Light red
        _ => "\x1b[31m", // Red
    }
}

fn percent_color(percentage: u32) -> &'static str {
    if percentage >= 80 {
        GREEN
    } else if percentage >= 50 {
        YELLOW
    } else {
        RED
    }
}

fn impact_tag(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "[H]",
        Impact::Medium => "[M]",
        Impact::Low => "[L]",
    }
}

/// ANSI palette that collapses to empty strings when color is off
struct Palette {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    on: bool,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                reset: RESET,
                bold: BOLD,
                dim: DIM,
                on: true,
            }
        } else {
            Self {
                reset: "",
                bold: "",
                dim: "",
                on: false,
            }
        }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.on {
            code
        } else {
            ""
        }
    }
}

/// Render report as formatted terminal output
pub fn render(report: &ReadinessReport, options: RenderOptions) -> Result<String> {
    let p = Palette::new(options.color);
    let (reset, bold, dim) = (p.reset, p.bold, p.dim);
    let mut out = String::new();

    // Header
    let lc = p.paint(level_color(report.level));
    writeln!(out, "\n{bold}Agent Readiness Report{reset}")?;
    writeln!(out, "{dim}──────────────────────────────────────{reset}")?;
    writeln!(out, "Repository: {}", report.repo_path.display())?;
    if !report.project.detected_types.is_empty() || report.project.is_monorepo {
        let mut project = report.project.detected_types.join(", ");
        if report.project.is_monorepo {
            if !project.is_empty() {
                project.push(' ');
            }
            project.push_str(&format!(
                "(monorepo, {} packages)",
                report.project.packages.len()
            ));
        }
        writeln!(out, "Project:    {}", project)?;
    }
    writeln!(
        out,
        "Level:      {lc}{bold}{} {}{reset}  Passed: {}  Failed: {}  Skipped: {}\n",
        report.level,
        report.level_name,
        report.summary.passed,
        report.summary.failed,
        report.summary.skipped
    )?;

    // Pillar scores
    writeln!(out, "{bold}PILLARS{reset}")?;
    let name_width = report
        .pillars
        .iter()
        .map(|pillar| pillar.name.chars().count())
        .max()
        .unwrap_or(0);
    for pillar in &report.pillars {
        let icon = if options.no_emoji || pillar.icon.is_empty() {
            String::new()
        } else {
            format!("{} ", pillar.icon)
        };
        let pc = p.paint(percent_color(pillar.score.percentage));
        let counts = if pillar.score.total == 0 {
            "no counted criteria".to_string()
        } else {
            format!("{}/{}", pillar.score.passed, pillar.score.total)
        };
        writeln!(
            out,
            "  {icon}{:<width$}  {pc}{}{reset} {:>3}%  {dim}{}{reset}",
            pillar.name,
            bar(pillar.score.percentage),
            pillar.score.percentage,
            counts,
            width = name_width
        )?;
    }
    out.push('\n');

    // Failures
    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        writeln!(out, "{bold}FAILING CRITERIA{reset} ({})", failures.len())?;
        for (_, criterion) in &failures {
            render_failure(&mut out, criterion, &p)?;
        }
        out.push('\n');
    }

    let skipped = report.summary.skipped;
    if skipped > 0 {
        writeln!(
            out,
            "{dim}{} criteria skipped (no external evaluator configured){reset}\n",
            skipped
        )?;
    }

    // Next level
    writeln!(out, "{bold}NEXT LEVEL{reset}")?;
    let progress = &report.progress;
    match progress.next_level {
        Some(next) if progress.remaining == 0 => writeln!(
            out,
            "  Level {} {}: {}/{} passing. Clear every lower level to reach it.\n",
            next,
            level_name(next),
            progress.current,
            progress.needed
        )?,
        Some(next) => writeln!(
            out,
            "  Level {} {}: {}/{} passing, {} more needed\n",
            next,
            level_name(next),
            progress.current,
            progress.needed,
            progress.remaining
        )?,
        None => writeln!(out, "  Maximum level reached\n")?,
    }

    // Recommendations
    if !report.recommendations.is_empty() {
        writeln!(out, "{bold}TOP RECOMMENDATIONS{reset}")?;
        for (i, rec) in report.recommendations.iter().enumerate() {
            writeln!(
                out,
                "  {:>2}. {} {bold}{}{reset} {dim}({}, {} effort){reset}",
                i + 1,
                impact_tag(rec.impact),
                rec.title,
                rec.criterion_id,
                rec.effort
            )?;
            writeln!(out, "      {}", rec.description)?;
            writeln!(out, "      {dim}{}{reset}", rec.reason)?;
        }
    }

    Ok(out)
}

fn render_failure(out: &mut String, criterion: &CriterionReport, p: &Palette) -> Result<()> {
    let (reset, dim) = (p.reset, p.dim);
    let red = p.paint(RED);
    writeln!(
        out,
        "  {red}✗{reset} [L{}] {} {dim}({}){reset}",
        criterion.level, criterion.name, criterion.result.criterion_id
    )?;
    writeln!(out, "      {}", criterion.result.message)?;
    if let Some(details) = &criterion.result.details {
        for line in details.lines() {
            writeln!(out, "      {dim}{}{reset}", line)?;
        }
    }
    Ok(())
}

fn bar(percentage: u32) -> String {
    let filled = (percentage.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
