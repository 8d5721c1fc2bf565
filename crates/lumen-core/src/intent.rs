use core::fmt;

use serde::{Deserialize, Serialize};

/// Closed vocabulary of intent labels a request can carry.
///
/// `General` is the fallback label and only ever appears alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    /// The user wants something explained or described.
    Explanation,
    /// The user wants items compared or contrasted.
    Comparison,
    /// The user wants code written or programming help.
    Coding,
    /// The user wants creative content (stories, poems, etc.).
    Creative,
    /// The user wants analytical evaluation with pros and cons.
    Analysis,
    /// The user is asking a question.
    Question,
    /// The user wants something created or modified.
    Instruction,
    /// The user wants information gathered.
    Research,
    /// The user wants help solving a problem.
    ProblemSolving,
    /// The user wants step-by-step guidance.
    Tutorial,
    /// The user wants content summarized.
    Summarization,
    /// No specific intent was detected.
    General,
}

impl IntentLabel {
    /// Fixed priority rank of this label; lower ranks sort first and win
    /// the primary-label slot.
    pub fn priority(self) -> u8 {
        match self {
            Self::Comparison => 0,
            Self::Coding => 1,
            Self::Analysis => 2,
            Self::Tutorial => 3,
            Self::Explanation => 4,
            Self::Research => 5,
            Self::Summarization => 6,
            Self::Creative => 7,
            Self::Instruction => 8,
            Self::Question => 9,
            Self::ProblemSolving => 10,
            Self::General => 11,
        }
    }

    /// Snake-case name of the label, matching the wire vocabulary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explanation => "explanation",
            Self::Comparison => "comparison",
            Self::Coding => "coding",
            Self::Creative => "creative",
            Self::Analysis => "analysis",
            Self::Question => "question",
            Self::Instruction => "instruction",
            Self::Research => "research",
            Self::ProblemSolving => "problem_solving",
            Self::Tutorial => "tutorial",
            Self::Summarization => "summarization",
            Self::General => "general",
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_resolution() {
        let mut labels = vec![
            IntentLabel::Question,
            IntentLabel::Coding,
            IntentLabel::Comparison,
        ];
        labels.sort_by_key(|label| label.priority());
        assert_eq!(labels[0], IntentLabel::Comparison);
    }

    #[test]
    fn test_general_sorts_last() {
        for label in [
            IntentLabel::Explanation,
            IntentLabel::Comparison,
            IntentLabel::ProblemSolving,
        ] {
            assert!(label.priority() < IntentLabel::General.priority());
        }
    }

    #[test]
    fn test_wire_format_round_trip() {
        let parsed: IntentLabel =
            serde_json::from_str("\"problem_solving\"").expect("label should deserialize");
        assert_eq!(parsed, IntentLabel::ProblemSolving);
        assert_eq!(parsed.to_string(), "problem_solving");
    }
}
