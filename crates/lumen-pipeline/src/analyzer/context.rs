use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::{ContextReport, Result};

use super::ContextDetector;
use super::keywords::{CONTINUATION_VERBS, REFERENCE_WORDS, contains_word};
use crate::invoker::Invoker;
use crate::prompts;

/// Flags context dependence from reference words anywhere in the request
/// or a continuation verb at its start.
#[derive(Default)]
pub struct RuleContextDetector;

impl RuleContextDetector {
    /// Applies the heuristics to a piece of text. Cannot fail.
    pub fn detect_text(text: &str) -> ContextReport {
        let lower = text.to_lowercase();

        if contains_word(&lower, REFERENCE_WORDS) {
            return ContextReport {
                needs_context: true,
                reason: "request refers back to something mentioned earlier".to_owned(),
            };
        }

        let starts_with_continuation = lower
            .split_whitespace()
            .next()
            .map(|word| word.trim_matches(|ch: char| !ch.is_alphanumeric()))
            .is_some_and(|word| CONTINUATION_VERBS.contains(&word));
        if starts_with_continuation {
            return ContextReport {
                needs_context: true,
                reason: "request starts with a continuation command".to_owned(),
            };
        }

        ContextReport {
            needs_context: false,
            reason: "request is self-contained".to_owned(),
        }
    }
}

#[async_trait]
impl ContextDetector for RuleContextDetector {
    async fn detect(&self, text: &str) -> Result<ContextReport> {
        Ok(Self::detect_text(text))
    }
}

/// Delegates the context-need judgment to the external model.
pub struct LlmContextDetector {
    /// Shared rate-limited access to the text-generation port.
    invoker: Arc<Invoker>,
}

impl LlmContextDetector {
    /// Creates a detector backed by the given invoker.
    pub fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl ContextDetector for LlmContextDetector {
    async fn detect(&self, text: &str) -> Result<ContextReport> {
        self.invoker
            .generate_json(&prompts::context_prompt(text))
            .await
    }
}
