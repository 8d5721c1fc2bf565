//! Fixed keyword tables driving the rule-based analyzers.
//!
//! These are classification rules represented as data, not behavior: the
//! rule backends only ever scan them, so they can be tested and extended
//! without touching orchestration logic.

use lumen_core::IntentLabel;

/// Action verbs that make a request clear and actionable.
pub const ACTION_VERBS: &[&str] = &["explain", "compare", "build", "analyze", "write"];

/// Vague filler words whose absence earns the clarity bonus during
/// scoring.
pub const SCORING_VAGUE_WORDS: &[&str] = &["something", "stuff", "things"];

/// Vague filler words that suggest ambiguity. A superset of
/// [`SCORING_VAGUE_WORDS`]; the two checks are tuned independently.
pub const VAGUE_WORDS: &[&str] = &["something", "stuff", "things", "anything", "whatever"];

/// Technical terms that make a request specific.
pub const TECHNICAL_WORDS: &[&str] = &["python", "algorithm", "neural", "database", "model"];

/// Constraint words that pin down the expected output.
pub const CONSTRAINT_WORDS: &[&str] = &["step", "example", "code", "table"];

/// Punctuation marks counted toward structure.
pub const PUNCTUATION_MARKS: &[char] = &['?', '.', ':'];

/// Formatting cues counted toward structure.
pub const FORMATTING_WORDS: &[&str] = &["list", "table", "bullet", "step"];

/// Domain keywords whose presence rescues a vaguely-worded request from
/// the ambiguity flag.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "python", "java", "code", "algorithm", "neural", "network", "database", "machine", "learning",
    "data",
];

/// Reference words that signal dependence on earlier conversation.
/// Matched as whole words only ("it" must not fire inside "write").
pub const REFERENCE_WORDS: &[&str] = &[
    "it", "this", "that", "previous", "above", "earlier", "continue", "modify", "update",
];

/// Continuation verbs that signal context dependence when the request
/// starts with one.
pub const CONTINUATION_VERBS: &[&str] = &["add", "remove", "change", "fix", "improve", "extend"];

/// Connector tokens requests are split on during decomposition.
pub const CONNECTORS: &[&str] = &["and", ",", "then", "also", "along with"];

/// Cues that mark a request as a comparison, which suppresses splitting
/// on "and".
pub const COMPARISON_CUES: &[&str] = &["compare", "difference", "vs", "versus"];

/// Keyword lists per intent label. A label applies when the text contains
/// any of its keywords (case-insensitive substring match).
pub const INTENT_KEYWORDS: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Explanation,
        &["explain", "describe", "what is", "how does", "clarify"],
    ),
    (
        IntentLabel::Comparison,
        &["compare", "difference", "vs", "versus", "contrast"],
    ),
    (
        IntentLabel::Coding,
        &["code", "implement", "program", "script", "function", "python", "debug"],
    ),
    (
        IntentLabel::Creative,
        &["story", "poem", "imagine", "creative", "fiction"],
    ),
    (
        IntentLabel::Analysis,
        &["analyze", "analysis", "evaluate", "assess", "pros and cons"],
    ),
    (
        IntentLabel::Question,
        &["?", "what", "why", "how", "when", "where", "who"],
    ),
    (
        IntentLabel::Instruction,
        &["create", "make", "generate", "build", "design"],
    ),
    (
        IntentLabel::Research,
        &["research", "find information", "sources", "investigate", "gather"],
    ),
    (
        IntentLabel::ProblemSolving,
        &["solve", "problem", "fix", "issue", "troubleshoot"],
    ),
    (
        IntentLabel::Tutorial,
        &["tutorial", "step by step", "guide", "walkthrough", "how to"],
    ),
    (
        IntentLabel::Summarization,
        &["summarize", "summary", "tl;dr", "condense", "key points"],
    ),
];

/// Instruction sentence contributed by each label during local
/// instruction synthesis. `general` has no entry; label sets that
/// contribute nothing fall back to [`DEFAULT_INSTRUCTION`].
pub const INTENT_INSTRUCTIONS: &[(IntentLabel, &str)] = &[
    (
        IntentLabel::Explanation,
        "Provide a detailed explanation in simple terms with concrete examples.",
    ),
    (
        IntentLabel::Comparison,
        "Present a structured comparison of similarities and differences, preferably as a table.",
    ),
    (
        IntentLabel::Coding,
        "Provide working, commented code with a brief explanation of the approach.",
    ),
    (
        IntentLabel::Creative,
        "Produce original creative content matching the requested tone.",
    ),
    (
        IntentLabel::Analysis,
        "Provide an analytical evaluation covering pros, cons, and trade-offs.",
    ),
    (
        IntentLabel::Question,
        "Answer the question directly before adding supporting detail.",
    ),
    (
        IntentLabel::Instruction,
        "Carry out the requested task and state any assumptions made.",
    ),
    (
        IntentLabel::Research,
        "Gather the relevant information and note where it comes from.",
    ),
    (
        IntentLabel::ProblemSolving,
        "Diagnose the problem and propose a concrete solution.",
    ),
    (
        IntentLabel::Tutorial,
        "Give step-by-step guidance that a beginner can follow.",
    ),
    (
        IntentLabel::Summarization,
        "Summarize concisely, keeping only the key points.",
    ),
];

/// Instruction used when no label contributes one.
pub const DEFAULT_INSTRUCTION: &str = "Provide a clear and complete response.";

/// Returns `true` when `haystack` contains any of `needles` as a
/// substring. The haystack must already be lowercased.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Returns `true` when any whitespace-delimited word of `haystack`
/// (stripped of surrounding punctuation) equals one of `needles`. The
/// haystack must already be lowercased.
pub fn contains_word(haystack: &str, needles: &[&str]) -> bool {
    haystack
        .split_whitespace()
        .map(|word| word.trim_matches(|ch: char| !ch.is_alphanumeric()))
        .any(|word| needles.contains(&word))
}

/// Looks up the instruction sentence for a label, if it has one.
pub fn instruction_for(label: IntentLabel) -> Option<&'static str> {
    INTENT_INSTRUCTIONS
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, instruction)| *instruction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyworded_label_has_an_instruction() {
        for (label, keywords) in INTENT_KEYWORDS {
            assert!(!keywords.is_empty(), "{label} has no keywords");
            assert!(
                instruction_for(*label).is_some(),
                "{label} has no instruction sentence"
            );
        }
    }

    #[test]
    fn test_general_has_no_instruction() {
        assert!(instruction_for(IntentLabel::General).is_none());
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("now modify it please", REFERENCE_WORDS));
        assert!(contains_word("is it done?", REFERENCE_WORDS));
        // "it" inside "write" must not fire.
        assert!(!contains_word("write a poem", REFERENCE_WORDS));
    }

    #[test]
    fn test_contains_any_is_substring_based() {
        assert!(contains_any("please explain cnn", ACTION_VERBS));
        assert!(!contains_any("tell me more", ACTION_VERBS));
    }
}
