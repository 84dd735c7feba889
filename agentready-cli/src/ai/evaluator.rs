//! LLM-backed evaluator

use crate::ai::prompts::{build_user_prompt, parse_verdict, EVALUATOR_SYSTEM_PROMPT};
use crate::ai::{AiClient, AiResult, Evaluation, Evaluator, Message};
use tracing::debug;

/// Evaluator that asks an LLM for a JSON pass/fail verdict
pub struct LlmEvaluator {
    client: AiClient,
}

impl LlmEvaluator {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    pub fn describe(&self) -> String {
        format!("{:?} ({})", self.client.backend(), self.client.model())
    }
}

impl Evaluator for LlmEvaluator {
    fn evaluate(&self, prompt: &str, context: &str) -> AiResult<Evaluation> {
        debug!(
            "Evaluating with {} ({} context bytes)",
            self.client.model(),
            context.len()
        );
        let reply = self.client.generate(
            vec![Message::user(build_user_prompt(prompt, context))],
            Some(EVALUATOR_SYSTEM_PROMPT),
        )?;
        parse_verdict(&reply)
    }
}
