//! Prompt templates for evaluator-backed criteria
//!
//! The model is asked for a single JSON object. Replies are parsed leniently:
//! code fences and prose around the object are tolerated, anything else is a
//! parse error.

use crate::ai::{AiError, AiResult, Evaluation};

/// System prompt shared by every evaluator call
pub const EVALUATOR_SYSTEM_PROMPT: &str = "\
You review software repositories for how well autonomous coding agents can work in them. \
You receive a question and excerpts of repository files. Judge only from the excerpts. \
Respond with a single JSON object and nothing else: \
{\"pass\": true|false, \"message\": \"one short sentence\", \"details\": \"optional explanation\"}";

/// Combine the criterion question and the gathered file excerpts
pub fn build_user_prompt(prompt: &str, context: &str) -> String {
    format!(
        "## Question\n{}\n\n## Repository excerpts\n{}\n\nAnswer with the JSON object only.",
        prompt.trim(),
        context
    )
}

/// Extract the verdict object from a model reply
pub fn parse_verdict(reply: &str) -> AiResult<Evaluation> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(s), Some(e)) if e > s => &reply[s..=e],
        _ => {
            return Err(AiError::ParseError(format!(
                "No JSON object in evaluator reply: {}",
                truncate(reply, 200)
            )))
        }
    };

    let mut evaluation: Evaluation = serde_json::from_str(json)
        .map_err(|e| AiError::ParseError(format!("Invalid evaluator verdict: {}", e)))?;

    if evaluation.message.trim().is_empty() {
        evaluation.message = if evaluation.pass {
            "Evaluator approved".to_string()
        } else {
            "Evaluator rejected".to_string()
        };
    }
    if evaluation
        .details
        .as_deref()
        .is_some_and(|d| d.trim().is_empty())
    {
        evaluation.details = None;
    }

    Ok(evaluation)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_verdict() {
        let v = parse_verdict(r#"{"pass": true, "message": "Clear build steps"}"#).unwrap();
        assert!(v.pass);
        assert_eq!(v.message, "Clear build steps");
        assert!(v.details.is_none());
    }

    #[test]
    fn test_parse_fenced_verdict_with_details() {
        let reply = "Here you go:\n```json\n{\"pass\": false, \"message\": \"No test command\", \"details\": \"AGENTS.md never mentions tests\"}\n```";
        let v = parse_verdict(reply).unwrap();
        assert!(!v.pass);
        assert_eq!(v.details.as_deref(), Some("AGENTS.md never mentions tests"));
    }

    #[test]
    fn test_parse_fills_empty_message_and_drops_blank_details() {
        let v = parse_verdict(r#"{"pass": false, "message": "", "details": "  "}"#).unwrap();
        assert_eq!(v.message, "Evaluator rejected");
        assert!(v.details.is_none());
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(matches!(
            parse_verdict("Looks good to me!"),
            Err(AiError::ParseError(_))
        ));
        assert!(matches!(
            parse_verdict(r#"{"verdict": "yes"}"#),
            Err(AiError::ParseError(_))
        ));
    }

    #[test]
    fn test_user_prompt_contains_both_parts() {
        let p = build_user_prompt("  Is it clear?  ", "--- README.md ---\nhello");
        assert!(p.contains("## Question\nIs it clear?"));
        assert!(p.contains("--- README.md ---"));
    }
}
