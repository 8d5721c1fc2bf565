use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::{Result, ScoreReport};

use super::Scorer;
use super::keywords::{
    ACTION_VERBS, CONSTRAINT_WORDS, FORMATTING_WORDS, PUNCTUATION_MARKS, SCORING_VAGUE_WORDS,
    TECHNICAL_WORDS, contains_any,
};
use crate::invoker::Invoker;
use crate::prompts;

/// Scores requests with additive keyword checks, each criterion capped
/// at 5.
#[derive(Default)]
pub struct RuleScorer;

impl RuleScorer {
    /// Computes the score for a piece of text. Pure string inspection;
    /// cannot fail.
    pub fn score_text(text: &str) -> ScoreReport {
        let lower = text.to_lowercase();
        let word_count = text.split_whitespace().count();

        // Clarity: length, an action verb, and no vague filler.
        let mut clarity: u8 = 0;
        if word_count > 5 {
            clarity += 2;
        }
        if contains_any(&lower, ACTION_VERBS) {
            clarity += 2;
        }
        if !contains_any(&lower, SCORING_VAGUE_WORDS) {
            clarity += 1;
        }

        // Specificity: technical terms, explicit constraints, and length.
        let mut specificity: u8 = 0;
        if contains_any(&lower, TECHNICAL_WORDS) {
            specificity += 2;
        }
        if contains_any(&lower, CONSTRAINT_WORDS) {
            specificity += 2;
        }
        if word_count > 8 {
            specificity += 1;
        }

        // Structure: punctuation, formatting cues, leading capitalization.
        let mut structure: u8 = 0;
        if text.contains(PUNCTUATION_MARKS) {
            structure += 2;
        }
        if contains_any(&lower, FORMATTING_WORDS) {
            structure += 2;
        }
        if text.chars().next().is_some_and(char::is_uppercase) {
            structure += 1;
        }

        ScoreReport::from_subscores(clarity, specificity, structure)
    }
}

#[async_trait]
impl Scorer for RuleScorer {
    async fn score(&self, text: &str) -> Result<ScoreReport> {
        Ok(Self::score_text(text))
    }
}

/// Delegates scoring to the external model and trusts the returned
/// integers.
pub struct LlmScorer {
    /// Shared rate-limited access to the text-generation port.
    invoker: Arc<Invoker>,
}

impl LlmScorer {
    /// Creates a scorer backed by the given invoker.
    pub fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl Scorer for LlmScorer {
    async fn score(&self, text: &str) -> Result<ScoreReport> {
        self.invoker
            .generate_json(&prompts::score_prompt(text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vague_short_request_scores_zero() {
        // 3 words, no action verb, contains "something", no punctuation,
        // no formatting cue, lowercase start.
        let report = RuleScorer::score_text("tell me something");
        assert_eq!(report.clarity, 0);
        assert_eq!(report.specificity, 0);
        assert_eq!(report.structure, 0);
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_specific_coding_request_scores_above_rewrite_threshold() {
        let report = RuleScorer::score_text("Write python code to sort a list");
        assert_eq!(report.clarity, 5);
        assert_eq!(report.specificity, 4);
        assert_eq!(report.structure, 3);
        assert!(report.total >= 6);
    }

    #[test]
    fn test_scoring_filler_set_is_narrower_than_ambiguity_set() {
        // "anything" counts as vague for the ambiguity detector but not
        // for the clarity bonus: action verb +2, no scoring filler +1,
        // "python" +2, leading capital +1.
        let report = RuleScorer::score_text("Explain anything about python");
        assert_eq!(report.clarity, 3);
        assert_eq!(report.specificity, 2);
        assert_eq!(report.structure, 1);
        assert_eq!(report.total, 6);
    }

    #[test]
    fn test_subscores_stay_within_bounds() {
        for text in [
            "",
            "x",
            "Explain neural network architecture with example steps, then compare models in a table.",
            "tell me something about stuff and things",
        ] {
            let report = RuleScorer::score_text(text);
            assert!(report.clarity <= 5);
            assert!(report.specificity <= 5);
            assert!(report.structure <= 5);
            assert_eq!(
                report.total,
                report.clarity + report.specificity + report.structure
            );
        }
    }

    #[tokio::test]
    async fn test_llm_scorer_parses_model_payload() {
        use lumen_providers::MockGenerator;

        let mock = MockGenerator::new().with_response(
            "Score the following user prompt",
            r#"{"clarity": 4, "specificity": 3, "structure": 2, "total_score": 9}"#,
        );
        let scorer = LlmScorer::new(Arc::new(Invoker::new(Arc::new(mock))));

        let report = scorer.score("Explain CNN").await.expect("should parse");
        assert_eq!(report.total, 9);
    }
}
