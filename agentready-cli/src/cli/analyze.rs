//! Analyze command: run the assessment and render the report

use super::EvaluatorMode;
use crate::ai::{AiClient, AiConfig, AiError, Evaluator, LlmBackend, LlmEvaluator};
use crate::config::{load_project_config, EvaluatorConfig, ProjectConfig, UserConfig};
use crate::engine::{ExecutionEngine, ProgressEvent};
use crate::pipeline::Pipeline;
use crate::reporters::{self, OutputFormat, RenderOptions};
use anyhow::{Context, Result};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Flags for one analyze run. `None` fields fall back to project config.
#[derive(Debug, Default)]
pub struct AnalyzeArgs {
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub no_emoji: bool,
    pub evaluator: EvaluatorMode,
    pub pillars: Vec<String>,
    pub skip_criteria: Vec<String>,
    pub min_level: Option<u8>,
    pub workers: usize,
}

/// Effective settings after merging CLI flags over project config
#[derive(Debug)]
struct AnalysisConfig {
    format: OutputFormat,
    no_emoji: bool,
    min_level: Option<u8>,
    workers: usize,
}

pub fn run(path: &Path, args: AnalyzeArgs) -> Result<()> {
    let start = Instant::now();
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    if !repo_path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", repo_path.display());
    }

    let mut project_config = load_project_config(&repo_path);
    apply_selection_flags(&mut project_config, &args.pillars, &args.skip_criteria);
    let config = apply_config_defaults(&args, &project_config)?;

    let mut engine = ExecutionEngine::new(config.workers);
    if let Some(evaluator) = build_evaluator(args.evaluator, &project_config.evaluator)? {
        engine = engine.with_evaluator(evaluator);
    }

    let spinner = (config.format == OutputFormat::Text && Term::stderr().is_term())
        .then(create_spinner);
    if let Some(ref pb) = spinner {
        let pb = pb.clone();
        engine = engine.with_progress_callback(Box::new(move |event: ProgressEvent<'_>| {
            if let ProgressEvent::PillarStarted {
                pillar,
                index,
                total,
            } = event
            {
                pb.set_message(format!("[{}/{}] Checking {}...", index + 1, total, pillar.name));
            }
        }));
    }

    let pipeline = Pipeline::from_config(&project_config, engine);
    if pipeline.pillars().is_empty() {
        warn!("Every pillar is disabled by configuration; nothing to evaluate");
    }
    let report = pipeline.run(&repo_path);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = report?;

    let options = RenderOptions {
        no_emoji: config.no_emoji,
        color: args.output.is_none() && Term::stdout().is_term(),
    };
    let rendered = reporters::report_with_format(&report, config.format, options)?;
    write_output(&rendered, args.output.as_deref(), config.format, config.no_emoji)?;

    info!("Analysis complete in {:.2}s", start.elapsed().as_secs_f64());

    check_min_level(config.min_level, report.level);
    Ok(())
}

/// Fold `--pillar` and `--skip-criterion` into the project config
fn apply_selection_flags(config: &mut ProjectConfig, pillars: &[String], skip: &[String]) {
    if !pillars.is_empty() {
        config.pillars.only = pillars.to_vec();
    }
    config.criteria.exclude.extend(skip.iter().cloned());
}

/// Apply CLI defaults from project config
fn apply_config_defaults(args: &AnalyzeArgs, project_config: &ProjectConfig) -> Result<AnalysisConfig> {
    let defaults = &project_config.defaults;
    let format = args
        .format
        .as_deref()
        .or(defaults.format.as_deref())
        .unwrap_or("text");

    Ok(AnalysisConfig {
        format: OutputFormat::from_str(format).context("Invalid output format")?,
        no_emoji: args.no_emoji || defaults.no_emoji.unwrap_or(false),
        min_level: args.min_level.or(defaults.min_level),
        workers: if args.workers == 0 {
            defaults.workers.unwrap_or(0)
        } else {
            args.workers
        },
    })
}

/// Build the LLM evaluator, if enabled and credentials are available.
///
/// Precedence: CLI flag, then `[evaluator]` in project config, then the
/// user config and environment for backend, model and keys.
fn build_evaluator(
    mode: EvaluatorMode,
    config: &EvaluatorConfig,
) -> Result<Option<Arc<dyn Evaluator>>> {
    let requested = match (mode, config.enabled) {
        (EvaluatorMode::Off, _) | (EvaluatorMode::Auto, Some(false)) => {
            debug!("Evaluator disabled");
            return Ok(None);
        }
        (EvaluatorMode::On, _) | (EvaluatorMode::Auto, Some(true)) => true,
        (EvaluatorMode::Auto, None) => false,
    };

    let user_config = UserConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load user config: {:#}", e);
        UserConfig::default()
    });

    let backend = match config.backend.as_deref().or(user_config.backend()) {
        Some(name) => LlmBackend::from_str(name)?,
        None => LlmBackend::default(),
    };

    let mut ai_config = AiConfig {
        backend,
        model: config
            .model
            .clone()
            .or_else(|| user_config.model(backend).map(str::to_string)),
        base_url: user_config.base_url(backend).map(str::to_string),
        ..Default::default()
    };
    if let Some(secs) = config.timeout_secs {
        ai_config.timeout = Duration::from_secs(secs);
    }

    let client = match AiClient::from_config(ai_config, user_config.api_key(backend)) {
        Ok(client) => client,
        Err(e @ AiError::MissingApiKey { .. }) => {
            if let Some(notice) = unavailable_evaluator_notice(&e, requested) {
                eprintln!("{}", notice);
            } else {
                debug!("{}; evaluator criteria will be skipped", e);
            }
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let evaluator = LlmEvaluator::new(client);
    info!("Using evaluator {}", evaluator.describe());
    let evaluator: Arc<dyn Evaluator> = Arc::new(evaluator);
    Ok(Some(evaluator))
}

/// Stderr notice for an evaluator that was asked for but cannot be built
fn unavailable_evaluator_notice(err: &AiError, requested: bool) -> Option<String> {
    requested.then(|| {
        format!(
            "Warning: evaluator requested but unavailable ({}). Evaluator criteria will be skipped.",
            err
        )
    })
}

/// Create the pillar progress spinner (stderr)
fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Scanning repository...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn write_output(
    rendered: &str,
    output: Option<&Path>,
    format: OutputFormat,
    no_emoji: bool,
) -> Result<()> {
    match output {
        Some(out_path) => {
            std::fs::write(out_path, rendered)
                .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
            if format == OutputFormat::Text {
                let icon = if no_emoji { "" } else { "📄 " };
                eprintln!(
                    "{}Report written to: {}",
                    style(icon).bold(),
                    style(out_path.display()).cyan()
                );
            }
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Exit with code 1 when the achieved level is below `--min-level`
fn check_min_level(min_level: Option<u8>, achieved: u8) {
    if let Some(min) = min_level {
        if achieved < min {
            eprintln!(
                "Failing due to --min-level={} threshold (achieved level {})",
                min, achieved
            );
            std::process::exit(1);
        }
    }
}
