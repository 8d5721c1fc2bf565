use serde::{Deserialize, Serialize};

use crate::intent::IntentLabel;

/// Upper bound for each scoring criterion.
pub const MAX_SUBSCORE: u8 = 5;

/// Quality score for a request, broken down by criterion.
///
/// Each sub-score is bounded to `[0, 5]` and `total` is always their sum.
/// The rule backend builds reports through [`ScoreReport::from_subscores`];
/// the LLM backend deserializes the fields as returned by the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreReport {
    /// How clear and actionable the request is.
    pub clarity: u8,
    /// How specific and detailed the request is.
    pub specificity: u8,
    /// How well-formatted and organized the request is.
    pub structure: u8,
    /// Sum of the three sub-scores, out of 15.
    #[serde(alias = "total_score")]
    pub total: u8,
}

impl ScoreReport {
    /// Builds a report from raw sub-scores, clamping each to [`MAX_SUBSCORE`]
    /// and computing the total.
    pub fn from_subscores(clarity: u8, specificity: u8, structure: u8) -> Self {
        let clarity = clarity.min(MAX_SUBSCORE);
        let specificity = specificity.min(MAX_SUBSCORE);
        let structure = structure.min(MAX_SUBSCORE);
        Self {
            clarity,
            specificity,
            structure,
            total: clarity + specificity + structure,
        }
    }

    /// The zero score assigned to empty requests.
    pub fn zero() -> Self {
        Self::from_subscores(0, 0, 0)
    }
}

/// Result of ambiguity detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguityReport {
    /// Whether the request is ambiguous or too vague.
    pub is_ambiguous: bool,
    /// Human-readable reason for the verdict.
    pub reason: String,
    /// What clarification would help, when the request is ambiguous.
    #[serde(default, alias = "clarification_needed")]
    pub clarification: Option<String>,
}

impl AmbiguityReport {
    /// Builds a non-ambiguous report with the given reason.
    pub fn clear<T: Into<String>>(reason: T) -> Self {
        Self {
            is_ambiguous: false,
            reason: reason.into(),
            clarification: None,
        }
    }

    /// Builds an ambiguous report with a reason and a clarification hint.
    pub fn flagged<T: Into<String>, U: Into<String>>(reason: T, clarification: U) -> Self {
        Self {
            is_ambiguous: true,
            reason: reason.into(),
            clarification: Some(clarification.into()),
        }
    }
}

/// Result of context-need detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextReport {
    /// Whether the request depends on previous conversation context.
    pub needs_context: bool,
    /// Human-readable reason for the verdict.
    pub reason: String,
}

/// Full intent classification for a piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentReport {
    /// All detected intent labels, ordered by priority.
    pub intents: Vec<IntentLabel>,
    /// The single most important label; always a member of `intents`.
    #[serde(alias = "primary_intent")]
    pub primary: IntentLabel,
    /// Natural-language instructions for answering this intent well.
    pub instructions: Vec<String>,
}

/// One self-contained fragment of a (possibly rewritten) request.
///
/// Sub-tasks are created during decomposition, consumed during instruction
/// assembly, and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTask {
    /// The fragment text.
    pub text: String,
    /// Intent classification for this fragment.
    pub intent: IntentReport,
}

/// How a pipeline run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// The pipeline produced an optimized prompt.
    Optimized,
    /// The pipeline asked the user for clarification instead.
    NeedsClarification,
}

/// Final output of one pipeline run, immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// The assembled output string, or one of the fixed clarification
    /// messages.
    pub output: String,
    /// Whether the run produced an optimized prompt or a clarification ask.
    pub disposition: Disposition,
    /// Quality score observed during the run.
    pub score: ScoreReport,
    /// Ambiguity verdict, when that stage was reached.
    pub ambiguity: Option<AmbiguityReport>,
    /// Whether the external rewrite step was applied.
    pub rewrite_applied: bool,
    /// Whether prior context was attached to the working text.
    pub context_attached: bool,
}
