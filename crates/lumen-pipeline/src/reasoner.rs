//! Escalation heuristic for hybrid deployments.
//!
//! A rules-first deployment can keep the external model out of the loop
//! until a request actually warrants it. This module decides when that
//! is: borderline quality, intent overload, conflicting intents, or a
//! long request that signals confusion.

use lumen_core::{IntentLabel, ScoreReport};

/// Inclusive total-score band considered borderline enough to warrant
/// model assistance.
const BORDERLINE_SCORE: (u8, u8) = (4, 6);

/// More detected intents than this suggests the request needs semantic
/// untangling.
const MAX_PLAIN_INTENTS: usize = 3;

/// Word count above which confusion phrases are taken seriously.
const LONG_REQUEST_WORDS: usize = 40;

/// Intent pairs that pull a response in incompatible directions.
const CONFLICTING_PAIRS: &[(IntentLabel, IntentLabel)] = &[
    (IntentLabel::Creative, IntentLabel::Analysis),
    (IntentLabel::Creative, IntentLabel::Coding),
    (IntentLabel::Summarization, IntentLabel::Tutorial),
];

/// Phrases that signal the user is unsure what they are asking for.
const CONFUSION_PHRASES: &[&str] = &[
    "confused",
    "not sure",
    "help me understand",
    "i don't get",
    "explain simply",
];

/// Decides whether external-model assistance is needed to optimize this
/// request.
pub fn needs_assistance(score: &ScoreReport, intents: &[IntentLabel], request: &str) -> bool {
    let (low, high) = BORDERLINE_SCORE;
    if (low..=high).contains(&score.total) {
        return true;
    }

    if intents.len() > MAX_PLAIN_INTENTS {
        return true;
    }

    for (first, second) in CONFLICTING_PAIRS {
        if intents.contains(first) && intents.contains(second) {
            return true;
        }
    }

    let lower = request.to_lowercase();
    if request.split_whitespace().count() > LONG_REQUEST_WORDS
        && CONFUSION_PHRASES
            .iter()
            .any(|phrase| lower.contains(phrase))
    {
        return true;
    }

    false
}
