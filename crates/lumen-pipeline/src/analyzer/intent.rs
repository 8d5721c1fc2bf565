use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::{IntentLabel, IntentReport, Result};

use super::IntentClassifier;
use super::keywords::{DEFAULT_INSTRUCTION, INTENT_KEYWORDS, contains_any, instruction_for};
use crate::invoker::Invoker;
use crate::prompts;

/// Classifies intents by keyword lists and synthesizes instructions from
/// a fixed label-to-sentence mapping.
#[derive(Default)]
pub struct RuleIntentClassifier;

impl RuleIntentClassifier {
    /// Returns the matched labels sorted by priority, falling back to
    /// `general` when nothing matches.
    pub fn classify_labels(text: &str) -> Vec<IntentLabel> {
        let lower = text.to_lowercase();
        let mut labels: Vec<IntentLabel> = INTENT_KEYWORDS
            .iter()
            .filter(|(_, keywords)| contains_any(&lower, keywords))
            .map(|(label, _)| *label)
            .collect();

        if labels.is_empty() {
            return vec![IntentLabel::General];
        }

        // Stable sort keeps the table order for equal priorities.
        labels.sort_by_key(|label| label.priority());
        labels
    }

    /// Applies the label-to-instruction mapping. `creative` contributes
    /// only when `coding` is absent; an empty result falls back to the
    /// default instruction.
    pub fn synthesize_instructions(labels: &[IntentLabel]) -> Vec<String> {
        let has_coding = labels.contains(&IntentLabel::Coding);
        let mut instructions: Vec<String> = labels
            .iter()
            .filter(|label| !(**label == IntentLabel::Creative && has_coding))
            .filter_map(|label| instruction_for(*label))
            .map(str::to_owned)
            .collect();

        if instructions.is_empty() {
            instructions.push(DEFAULT_INSTRUCTION.to_owned());
        }
        instructions
    }
}

#[async_trait]
impl IntentClassifier for RuleIntentClassifier {
    async fn classify(&self, text: &str) -> Result<IntentReport> {
        let intents = Self::classify_labels(text);
        let instructions = Self::synthesize_instructions(&intents);
        Ok(IntentReport {
            primary: intents[0],
            intents,
            instructions,
        })
    }
}

/// Asks the external model for intents, primary intent, and response
/// instructions directly. The model's own label ordering is trusted; no
/// local priority re-sort is applied.
pub struct LlmIntentClassifier {
    /// Shared rate-limited access to the text-generation port.
    invoker: Arc<Invoker>,
}

impl LlmIntentClassifier {
    /// Creates a classifier backed by the given invoker.
    pub fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, text: &str) -> Result<IntentReport> {
        self.invoker
            .generate_json(&prompts::intent_prompt(text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_wins_priority() {
        let labels = RuleIntentClassifier::classify_labels(
            "What is the difference between CNN and RNN? Write code for both.",
        );
        assert_eq!(labels[0], IntentLabel::Comparison);
        assert!(labels.contains(&IntentLabel::Coding));
        assert!(labels.contains(&IntentLabel::Question));
    }

    #[test]
    fn test_unmatched_text_is_general_alone() {
        let labels = RuleIntentClassifier::classify_labels("lorem ipsum dolor");
        assert_eq!(labels, vec![IntentLabel::General]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let text = "Summarize this article, then analyze key ideas";
        let first = RuleIntentClassifier::classify_labels(text);
        let second = RuleIntentClassifier::classify_labels(text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_creative_instruction_suppressed_by_coding() {
        let labels = vec![IntentLabel::Coding, IntentLabel::Creative];
        let instructions = RuleIntentClassifier::synthesize_instructions(&labels);

        let coding_instruction = instruction_for(IntentLabel::Coding).expect("mapped");
        let creative_instruction = instruction_for(IntentLabel::Creative).expect("mapped");
        assert!(instructions.iter().any(|line| line == coding_instruction));
        assert!(!instructions.iter().any(|line| line == creative_instruction));
    }

    #[test]
    fn test_general_only_set_gets_default_instruction() {
        let instructions =
            RuleIntentClassifier::synthesize_instructions(&[IntentLabel::General]);
        assert_eq!(instructions, vec![DEFAULT_INSTRUCTION.to_owned()]);
    }

    #[tokio::test]
    async fn test_primary_is_member_of_labels() {
        let classifier = RuleIntentClassifier;
        let report = classifier
            .classify("Explain CNN and compare with RNN")
            .await
            .expect("rule backend cannot fail");
        assert!(report.intents.contains(&report.primary));
        assert_eq!(report.primary, IntentLabel::Comparison);
    }
}
