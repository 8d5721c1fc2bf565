use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::{AmbiguityReport, Result};

use super::AmbiguityDetector;
use super::keywords::{DOMAIN_KEYWORDS, VAGUE_WORDS, contains_any};
use crate::invoker::Invoker;
use crate::prompts;

/// Minimum word count below which a request is considered too short to
/// convey intent.
const MIN_WORDS: usize = 3;

/// Flags ambiguity from two heuristics: very short requests, and vague
/// wording with no recognizable domain keyword.
#[derive(Default)]
pub struct RuleAmbiguityDetector;

impl RuleAmbiguityDetector {
    /// Applies the heuristics to a piece of text. Cannot fail.
    pub fn detect_text(text: &str) -> AmbiguityReport {
        let lower = text.to_lowercase();
        let word_count = text.split_whitespace().count();

        if word_count < MIN_WORDS {
            return AmbiguityReport::flagged(
                "request is too short to convey a concrete intent",
                "State what you want done and about which topic.",
            );
        }

        if contains_any(&lower, VAGUE_WORDS) && !contains_any(&lower, DOMAIN_KEYWORDS) {
            return AmbiguityReport::flagged(
                "vague wording without a recognizable domain keyword",
                "Name the domain or subject you are asking about.",
            );
        }

        AmbiguityReport::clear("no ambiguity heuristic matched")
    }
}

#[async_trait]
impl AmbiguityDetector for RuleAmbiguityDetector {
    async fn detect(&self, text: &str) -> Result<AmbiguityReport> {
        Ok(Self::detect_text(text))
    }
}

/// Delegates the full ambiguity judgment to the external model.
pub struct LlmAmbiguityDetector {
    /// Shared rate-limited access to the text-generation port.
    invoker: Arc<Invoker>,
}

impl LlmAmbiguityDetector {
    /// Creates a detector backed by the given invoker.
    pub fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl AmbiguityDetector for LlmAmbiguityDetector {
    async fn detect(&self, text: &str) -> Result<AmbiguityReport> {
        self.invoker
            .generate_json(&prompts::ambiguity_prompt(text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_request_is_ambiguous() {
        let report = RuleAmbiguityDetector::detect_text("tell me");
        assert!(report.is_ambiguous);
        assert!(!report.reason.is_empty());
        assert!(report.clarification.is_some());
    }

    #[test]
    fn test_vague_request_without_domain_is_ambiguous() {
        // 3 words, so the length heuristic passes, but "something" is
        // vague and no domain keyword rescues it.
        let report = RuleAmbiguityDetector::detect_text("tell me something");
        assert!(report.is_ambiguous);
    }

    #[test]
    fn test_vague_wording_with_domain_keyword_is_clear() {
        let report =
            RuleAmbiguityDetector::detect_text("tell me something about python data structures");
        assert!(!report.is_ambiguous);
    }

    #[test]
    fn test_concrete_request_is_clear() {
        let report = RuleAmbiguityDetector::detect_text("Explain CNN and compare with RNN");
        assert!(!report.is_ambiguous);
        assert!(!report.reason.is_empty());
    }
}
