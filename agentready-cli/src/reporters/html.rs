//! HTML reporter with embedded styles
//!
//! Generates a standalone page that can be opened in any browser:
//! - Achieved level badge and progress toward the next level
//! - One card per pillar with a score bar and collapsible criteria
//! - Recommendations table

use crate::models::{
    level_name, CriterionReport, PillarReport, ReadinessReport, Recommendation, MAX_LEVEL,
};
use crate::reporters::RenderOptions;
use anyhow::Result;
use chrono::Local;

/// Render report as standalone HTML
pub fn render(report: &ReadinessReport, options: RenderOptions) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(report));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(report));

    html.push_str("<div class=\"content\">\n");
    html.push_str(&render_level_section(report));
    html.push_str(&render_pillars(report, options));
    html.push_str(&render_recommendations(&report.recommendations));
    html.push_str("</div>\n");

    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>\n");

    Ok(html)
}

fn render_head(report: &ReadinessReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Agent Readiness Report - Level {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        report.level
    )
}

fn render_header(report: &ReadinessReport) -> String {
    let timestamp = report
        .generated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    let types = if report.project.detected_types.is_empty() {
        "unknown".to_string()
    } else {
        report.project.detected_types.join(", ")
    };
    let monorepo = if report.project.is_monorepo {
        format!(" &middot; monorepo ({} packages)", report.project.packages.len())
    } else {
        String::new()
    };
    format!(
        r#"<div class="header">
    <h1>Agent Readiness Report</h1>
    <p class="repo">{}</p>
    <p class="timestamp">{}{} &middot; Generated {}</p>
</div>
"#,
        html_escape(&report.repo_path.display().to_string()),
        html_escape(&types),
        monorepo,
        timestamp
    )
}

fn render_level_section(report: &ReadinessReport) -> String {
    let progress = &report.progress;
    let next = match progress.next_level {
        Some(next) => {
            let pct = if progress.needed == 0 {
                100.0
            } else {
                (progress.current as f64 / progress.needed as f64 * 100.0).min(100.0)
            };
            format!(
                r#"<div class="next-level">
        <div class="next-level-label">Level {} {}: {}/{} passing, {} more needed</div>
        <div class="metric-bar">
            <div class="metric-bar-fill {}" style="width: {:.0}%"></div>
        </div>
    </div>"#,
                next,
                level_name(next),
                progress.current,
                progress.needed,
                progress.remaining,
                bar_class(pct),
                pct
            )
        }
        None => r#"<p class="level-description">Maximum level reached</p>"#.to_string(),
    };

    let summary = &report.summary;
    format!(
        r#"<div class="level-section">
    <div class="level-badge level-{}">{}</div>
    <div class="level-name">{} <span class="level-max">of {}</span></div>
    <div class="summary">{} passed &middot; {} failed &middot; {} skipped</div>
    {}
</div>
"#,
        report.level,
        report.level,
        html_escape(&report.level_name),
        MAX_LEVEL,
        summary.passed,
        summary.failed,
        summary.skipped,
        next
    )
}

fn render_pillars(report: &ReadinessReport, options: RenderOptions) -> String {
    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Pillars</h2>
    <div class="pillar-grid">
"#,
    );
    for pillar in &report.pillars {
        html.push_str(&render_pillar(pillar, options));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_pillar(pillar: &PillarReport, options: RenderOptions) -> String {
    let icon = if options.no_emoji || pillar.icon.is_empty() {
        String::new()
    } else {
        format!("{} ", html_escape(&pillar.icon))
    };
    let pct = f64::from(pillar.score.percentage);
    let criteria: String = pillar.criteria.iter().map(render_criterion).collect();

    format!(
        r#"<div class="pillar-card">
        <h3>{}{}</h3>
        <p class="pillar-description">{}</p>
        <div class="metric-value">{}% <span class="metric-count">({}/{})</span></div>
        <div class="metric-bar">
            <div class="metric-bar-fill {}" style="width: {}%"></div>
        </div>
        <details>
            <summary>{} criteria</summary>
            <ul class="criteria-list">
{}            </ul>
        </details>
    </div>
"#,
        icon,
        html_escape(&pillar.name),
        html_escape(&pillar.description),
        pillar.score.percentage,
        pillar.score.passed,
        pillar.score.total,
        bar_class(pct),
        pillar.score.percentage,
        pillar.criteria.len(),
        criteria
    )
}

fn render_criterion(criterion: &CriterionReport) -> String {
    let result = &criterion.result;
    let (class, mark) = if result.skipped {
        ("status-skip", "&#8211;")
    } else if result.pass {
        ("status-pass", "&#10003;")
    } else {
        ("status-fail", "&#10007;")
    };
    let details = result
        .details
        .as_deref()
        .map(|d| format!("<div class=\"criterion-details\">{}</div>", html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"                <li class="criterion {}">
                    <span class="status">{}</span>
                    <span class="level-tag">L{}</span>
                    <span class="criterion-name">{}</span>
                    <code>{}</code>
                    <div class="criterion-message">{}</div>
                    {}
                </li>
"#,
        class,
        mark,
        criterion.level,
        html_escape(&criterion.name),
        html_escape(&result.criterion_id),
        html_escape(&result.message),
        details
    )
}

fn render_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return r#"<div class="section">
    <h2 class="section-title">Recommendations</h2>
    <p>Nothing left to recommend.</p>
</div>
"#
        .to_string();
    }

    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Recommendations</h2>
    <table class="recommendations">
        <thead>
            <tr><th>#</th><th>Recommendation</th><th>Impact</th><th>Effort</th></tr>
        </thead>
        <tbody>
"#,
    );
    for (i, rec) in recommendations.iter().enumerate() {
        html.push_str(&format!(
            r#"            <tr>
                <td>{}</td>
                <td><strong>{}</strong><div>{}</div><div class="reason">{}</div></td>
                <td><span class="tag impact-{}">{}</span></td>
                <td><span class="tag effort-{}">{}</span></td>
            </tr>
"#,
            i + 1,
            html_escape(&rec.title),
            html_escape(&rec.description),
            html_escape(&rec.reason),
            rec.impact,
            rec.impact,
            rec.effort,
            rec.effort
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_footer() -> String {
    format!(
        r#"<div class="footer">
    <p>Generated by agentready {}</p>
</div>
"#,
        env!("CARGO_PKG_VERSION")
    )
}

fn bar_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "bar-good"
    } else if score >= 50.0 {
        "bar-moderate"
    } else {
        "bar-poor"
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
:root {
    --primary-color: #0f766e;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --muted-color: #64748b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #0f766e 0%, #0369a1 100%);
    color: white;
    padding: 2.5rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.25rem; margin-bottom: 0.25rem; }
.header .repo { font-family: monospace; opacity: 0.95; }
.header .timestamp { opacity: 0.85; font-size: 0.9rem; }

.content { padding: 2rem; }

.level-section {
    text-align: center;
    padding: 2rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.level-badge {
    display: inline-block;
    font-size: 3.5rem;
    font-weight: bold;
    width: 110px;
    height: 110px;
    line-height: 110px;
    border-radius: 50%;
    margin-bottom: 0.75rem;
    color: white;
}

.level-1 { background: #ef4444; }
.level-2 { background: #f97316; }
.level-3 { background: #eab308; }
.level-4 { background: #22c55e; }
.level-5 { background: #10b981; }

.level-name { font-size: 1.5rem; font-weight: 600; }
.level-max, .summary, .level-description { color: var(--muted-color); }
.next-level { max-width: 480px; margin: 1rem auto 0; }
.next-level-label { margin-bottom: 0.5rem; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.pillar-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
    gap: 1rem;
}

.pillar-card {
    background: var(--card-background);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.25rem;
}

.pillar-card h3 { font-size: 1.1rem; }
.pillar-description { color: var(--muted-color); font-size: 0.875rem; margin-bottom: 0.5rem; }
.metric-value { font-size: 1.75rem; font-weight: bold; }
.metric-count { font-size: 0.9rem; color: var(--muted-color); font-weight: normal; }

.metric-bar {
    height: 8px;
    background: #e2e8f0;
    border-radius: 4px;
    overflow: hidden;
    margin-bottom: 0.75rem;
}

.metric-bar-fill { height: 100%; border-radius: 4px; }
.bar-good { background: #10b981; }
.bar-moderate { background: #f59e0b; }
.bar-poor { background: #ef4444; }

details summary { cursor: pointer; color: var(--primary-color); font-size: 0.9rem; }
.criteria-list { list-style: none; margin-top: 0.5rem; }

.criterion {
    padding: 0.5rem;
    border-left: 3px solid var(--border-color);
    margin-bottom: 0.4rem;
    background: #f8fafc;
    border-radius: 4px;
    font-size: 0.9rem;
}

.criterion code { font-size: 0.75rem; color: var(--muted-color); }
.status-pass { border-left-color: #10b981; }
.status-fail { border-left-color: #ef4444; }
.status-skip { border-left-color: #94a3b8; opacity: 0.8; }
.status { font-weight: bold; margin-right: 0.25rem; }
.level-tag {
    background: #e0f2fe;
    color: #0369a1;
    padding: 0 0.4rem;
    border-radius: 4px;
    font-size: 0.75rem;
}
.criterion-message { color: var(--muted-color); }
.criterion-details { font-family: monospace; font-size: 0.8rem; color: var(--muted-color); }

.recommendations { width: 100%; border-collapse: collapse; }
.recommendations th, .recommendations td {
    text-align: left;
    padding: 0.6rem;
    border-bottom: 1px solid var(--border-color);
    vertical-align: top;
}
.recommendations .reason { color: var(--muted-color); font-size: 0.875rem; }

.tag {
    padding: 0.15rem 0.6rem;
    border-radius: 6px;
    font-size: 0.8rem;
    font-weight: 600;
    color: white;
    white-space: nowrap;
}
.impact-high, .effort-high { background: #dc2626; }
.impact-medium, .effort-medium { background: #ca8a04; }
.impact-low, .effort-low { background: #2563eb; }

.footer {
    text-align: center;
    padding: 1.5rem;
    color: var(--muted-color);
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header h1 { font-size: 1.6rem; }
    .level-badge { width: 80px; height: 80px; line-height: 80px; font-size: 2.5rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .pillar-card { page-break-inside: avoid; }
}
"#;
