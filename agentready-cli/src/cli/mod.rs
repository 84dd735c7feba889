//! CLI command definitions and handlers

mod analyze;
mod criteria;
mod init;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parse and validate workers count (0 = auto, max 64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse and validate a maturity level (1-5)
fn parse_level(s: &str) -> Result<u8, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid level", s))?;
    if (crate::models::MIN_LEVEL..=crate::models::MAX_LEVEL).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "level must be between {} and {}",
            crate::models::MIN_LEVEL,
            crate::models::MAX_LEVEL
        ))
    }
}

/// Whether evaluator-backed criteria call out to an LLM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EvaluatorMode {
    /// Use an evaluator when config and credentials allow it
    #[default]
    Auto,
    /// Require an evaluator; warn when none can be built
    On,
    /// Never call an evaluator; those criteria are skipped
    Off,
}

/// agentready - how ready is this repository for autonomous coding agents?
#[derive(Parser, Debug)]
#[command(name = "agentready")]
#[command(
    version,
    about = "Score a repository's readiness for autonomous coding agents",
    long_about = "agentready runs pass/fail checks across nine pillars (style, build, testing, \
docs, dev environment, security, observability, task discovery, code quality), computes a \
5-level maturity score and prints ranked recommendations for reaching the next level.\n\n\
Run without a subcommand to analyze the current directory:\n  \
agentready .",
    after_help = "\
Examples:
  agentready .                                 Analyze current directory
  agentready analyze . --format json           JSON output for scripting
  agentready analyze . --format html -o r.html Standalone HTML report
  agentready analyze . --min-level 3           Exit code 1 below level 3 (CI mode)
  agentready criteria                          List the criteria that would run
  agentready init                              Write an example agentready.toml"
)]
pub struct Cli {
    /// Path to repository (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (0 = auto)
    #[arg(long, global = true, default_value = "0", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the repository and report its readiness level (default)
    #[command(after_help = "\
Examples:
  agentready analyze .                              Text report on the terminal
  agentready analyze . --format json -o report.json Write JSON to a file
  agentready analyze . --pillar docs --pillar testing
  agentready analyze . --skip-criterion docs.changelog
  agentready analyze . --evaluator off              Skip LLM-backed criteria")]
    Analyze {
        /// Output format: text, json, html (default: text, or [defaults].format)
        #[arg(long, short = 'f', value_parser = ["text", "json", "html"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Disable emoji in output (cleaner for CI logs)
        #[arg(long)]
        no_emoji: bool,

        /// LLM evaluator for judgement-based criteria
        #[arg(long, value_enum, default_value_t = EvaluatorMode::Auto)]
        evaluator: EvaluatorMode,

        /// Only run these pillars (repeatable)
        #[arg(long = "pillar", value_name = "ID")]
        pillars: Vec<String>,

        /// Skip specific criteria (repeatable)
        #[arg(long = "skip-criterion", value_name = "ID")]
        skip_criteria: Vec<String>,

        /// Exit with code 1 if the achieved level is below this
        #[arg(long, value_parser = parse_level)]
        min_level: Option<u8>,
    },

    /// List the criteria that would run, after config filtering
    Criteria {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an example agentready.toml
    Init,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Criteria { json }) => criteria::run(&cli.path, json),

        Some(Commands::Analyze {
            format,
            output,
            no_emoji,
            evaluator,
            pillars,
            skip_criteria,
            min_level,
        }) => analyze::run(
            &cli.path,
            analyze::AnalyzeArgs {
                format,
                output,
                no_emoji,
                evaluator,
                pillars,
                skip_criteria,
                min_level,
                workers: cli.workers,
            },
        ),

        None => analyze::run(
            &cli.path,
            analyze::AnalyzeArgs {
                workers: cli.workers,
                ..Default::default()
            },
        ),
    }
}
