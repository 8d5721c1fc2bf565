use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use lumen_core::Result;
use regex::Regex;
use serde::Deserialize;

use super::Decomposer;
use super::keywords::{COMPARISON_CUES, contains_any};
use crate::invoker::Invoker;
use crate::prompts;

/// Split pattern for the full connector set {and, comma, then, also,
/// "along with"}: whole-word boundaries for word connectors, literal
/// match for the comma.
static SPLIT_ALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),|\band\b|\bthen\b|\balso\b|\balong with\b")
        .unwrap_or_else(|err| panic!("connector pattern must compile: {err}"))
});

/// Split pattern with "and" removed, used when a comparison cue is
/// present so comparison clauses stay atomic. Note that the comma, "then"
/// and "also" still split; "Compare CNN and RNN, then summarize" loses
/// its continuation at the comma.
static SPLIT_NO_AND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),|\bthen\b|\balso\b|\balong with\b")
        .unwrap_or_else(|err| panic!("connector pattern must compile: {err}"))
});

/// Splits requests on connector tokens, keeping comparison phrasing
/// atomic.
#[derive(Default)]
pub struct RuleDecomposer;

impl RuleDecomposer {
    /// Decomposes a piece of text. Pure string inspection; cannot fail.
    pub fn decompose_text(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let pattern: &Regex = if contains_any(&lower, COMPARISON_CUES) {
            &SPLIT_NO_AND
        } else {
            &SPLIT_ALL
        };

        let fragments: Vec<String> = pattern
            .split(text)
            .filter_map(Self::clean_fragment)
            .collect();

        // Zero or one fragment means no meaningful split happened; return
        // the original input rather than the possibly-empty fragment list.
        if fragments.len() <= 1 {
            return vec![text.trim().to_owned()];
        }
        fragments
    }

    /// Trims a fragment and removes repeated words (case-insensitive,
    /// first occurrence wins, order preserved). Empty fragments are
    /// dropped.
    fn clean_fragment(fragment: &str) -> Option<String> {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut seen: HashSet<String> = HashSet::new();
        let unique: Vec<&str> = trimmed
            .split_whitespace()
            .filter(|word| seen.insert(word.to_lowercase()))
            .collect();

        if unique.is_empty() {
            return None;
        }
        Some(unique.join(" "))
    }
}

#[async_trait]
impl Decomposer for RuleDecomposer {
    async fn decompose(&self, text: &str) -> Result<Vec<String>> {
        Ok(Self::decompose_text(text))
    }
}

/// Expected payload of the decomposition prompt.
#[derive(Debug, Deserialize)]
struct DecomposeResponse {
    /// Ordered sub-task strings.
    subtasks: Vec<String>,
}

/// Asks the external model to split the request into self-contained,
/// logically ordered sub-tasks.
pub struct LlmDecomposer {
    /// Shared rate-limited access to the text-generation port.
    invoker: Arc<Invoker>,
}

impl LlmDecomposer {
    /// Creates a decomposer backed by the given invoker.
    pub fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl Decomposer for LlmDecomposer {
    async fn decompose(&self, text: &str) -> Result<Vec<String>> {
        let response: DecomposeResponse = self
            .invoker
            .generate_json(&prompts::decompose_prompt(text))
            .await?;

        let subtasks: Vec<String> = response
            .subtasks
            .into_iter()
            .map(|task| task.trim().to_owned())
            .filter(|task| !task.is_empty())
            .collect();

        // The contract never returns an empty sequence.
        if subtasks.is_empty() {
            return Ok(vec![text.trim().to_owned()]);
        }
        Ok(subtasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_cue_suppresses_and_split() {
        let subtasks = RuleDecomposer::decompose_text("Explain CNN and compare with RNN");
        assert_eq!(subtasks, vec!["Explain CNN and compare with RNN".to_owned()]);
    }

    #[test]
    fn test_plain_conjunction_splits() {
        let subtasks = RuleDecomposer::decompose_text("Write code and explain the logic");
        assert_eq!(
            subtasks,
            vec!["Write code".to_owned(), "explain the logic".to_owned()]
        );
    }

    #[test]
    fn test_comma_then_connector() {
        let subtasks =
            RuleDecomposer::decompose_text("Summarize this article, then analyze key ideas");
        assert_eq!(
            subtasks,
            vec![
                "Summarize this article".to_owned(),
                "analyze key ideas".to_owned()
            ]
        );
    }

    #[test]
    fn test_single_task_returns_whole_input() {
        let subtasks = RuleDecomposer::decompose_text("  Describe neural networks  ");
        assert_eq!(subtasks, vec!["Describe neural networks".to_owned()]);
    }

    #[test]
    fn test_never_returns_empty_sequence() {
        for text in ["", "and", ", then also and", "a, b"] {
            let subtasks = RuleDecomposer::decompose_text(text);
            assert!(!subtasks.is_empty(), "empty result for {text:?}");
        }
    }

    #[test]
    fn test_repeated_words_deduplicated_within_fragment() {
        let subtasks = RuleDecomposer::decompose_text("explain Explain backprop and write tests");
        assert_eq!(
            subtasks,
            vec!["explain backprop".to_owned(), "write tests".to_owned()]
        );
    }

    #[test]
    fn test_word_connectors_do_not_split_mid_word() {
        // "handling" contains "and"; whole-word boundaries must keep it
        // intact. No other connector fires, so the input stays whole.
        let subtasks = RuleDecomposer::decompose_text("Describe error handling");
        assert_eq!(subtasks, vec!["Describe error handling".to_owned()]);
    }

    // The comparison-cue exception only suppresses "and", not the comma:
    // the continuation after a comparison still splits off. This is
    // intended-current behavior, preserved deliberately.
    #[test]
    fn test_comparison_comma_split_is_preserved() {
        let subtasks = RuleDecomposer::decompose_text("Compare CNN and RNN, then summarize");
        assert_eq!(
            subtasks,
            vec!["Compare CNN and RNN".to_owned(), "summarize".to_owned()]
        );
    }
}
