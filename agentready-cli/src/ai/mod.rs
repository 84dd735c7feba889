//! External evaluator support
//!
//! Some criteria ask a qualitative question ("do the agent instructions explain
//! how to run the tests?") that a file predicate cannot answer. Those criteria
//! hand a prompt plus file excerpts to an [`Evaluator`]. The default
//! implementation, [`LlmEvaluator`], asks an LLM through [`AiClient`] and
//! parses a JSON verdict from the reply.
//!
//! The evaluator is always injected. Without one, evaluator-backed criteria are
//! reported as skipped and never run.
//!
//! # Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: Required for the Anthropic backend
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `OLLAMA_MODEL`: Optional model override for the local Ollama backend

mod client;
mod evaluator;
mod prompts;

pub use client::{AiClient, AiConfig, LlmBackend, Message, Role};
pub use evaluator::LlmEvaluator;
pub use prompts::{build_user_prompt, parse_verdict, EVALUATOR_SYSTEM_PROMPT};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to an evaluator backend
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API request failed: {0}")]
    RequestFailed(#[from] ureq::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// A qualitative pass/fail judgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub pass: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Judge a prompt against repository context.
///
/// Implementations are shared across worker threads and may be called
/// concurrently by several criteria of the same pillar.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, prompt: &str, context: &str) -> AiResult<Evaluation>;
}
