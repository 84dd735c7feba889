//! agentready - agent readiness scoring
//!
//! Runs binary pass/fail checks, grouped into pillars, against a repository
//! and reduces them to a 5-level maturity score with ranked
//! recommendations for reaching the next level.
//!
//! ```no_run
//! use agentready::engine::ExecutionEngine;
//! use agentready::pipeline::Pipeline;
//! use std::path::Path;
//!
//! let pipeline = Pipeline::new(agentready::catalog::builtin_pillars(), ExecutionEngine::new(0));
//! let report = pipeline.run(Path::new(".")).unwrap();
//! println!("Level {} ({})", report.level, report.level_name);
//! ```

pub mod ai;
pub mod catalog;
pub mod checks;
pub mod cli;
pub mod config;
pub mod engine;
pub mod models;
pub mod pipeline;
pub mod project;
pub mod recommendations;
pub mod reporters;
pub mod scoring;
