//! Evaluator-backed checks

use super::CheckContext;
use crate::models::CheckOutcome;
use anyhow::{anyhow, Result};
use tracing::debug;

/// Per-file excerpt budget handed to the evaluator
pub const MAX_CONTEXT_BYTES_PER_FILE: usize = 16 * 1024;
/// Total excerpt budget for one evaluation
pub const MAX_CONTEXT_BYTES: usize = 64 * 1024;

pub(super) fn evaluate(
    ctx: &CheckContext<'_>,
    prompt: &str,
    context_files: &[&str],
) -> Result<CheckOutcome> {
    let evaluator = ctx
        .evaluator
        .ok_or_else(|| anyhow!("No evaluator configured"))?;

    let files = ctx.index.matching(context_files)?;
    if files.is_empty() {
        return Ok(CheckOutcome::fail(format!(
            "Nothing to review: no file matches {}",
            context_files.join(" or ")
        )));
    }

    let mut context = String::new();
    for rel in files {
        if context.len() >= MAX_CONTEXT_BYTES {
            break;
        }
        let bytes = match std::fs::read(ctx.repo_path.join(rel)) {
            Ok(b) => b,
            Err(e) => {
                debug!("Skipping unreadable context file {}: {}", rel, e);
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let budget = MAX_CONTEXT_BYTES_PER_FILE.min(MAX_CONTEXT_BYTES - context.len());
        context.push_str(&format!("--- {} ---\n", rel));
        context.push_str(truncate_at_char_boundary(&text, budget));
        context.push_str("\n\n");
    }

    let evaluation = evaluator.evaluate(prompt, &context)?;
    let outcome = if evaluation.pass {
        CheckOutcome::pass(evaluation.message)
    } else {
        CheckOutcome::fail(evaluation.message)
    };
    Ok(match evaluation.details {
        Some(details) => outcome.with_details(details),
        None => outcome,
    })
}

fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
