//! Text analyzers behind pluggable capability traits.
//!
//! Each capability has a rule-based implementation (pure keyword
//! heuristics over fixed tables, no external calls) and an LLM-backed
//! implementation that delegates the judgment to the external
//! text-generation service. Both satisfy the same contract and are
//! selected at construction time.

/// Ambiguity detection.
pub mod ambiguity;
/// Context-dependency detection.
pub mod context;
/// Decomposition of requests into sub-tasks.
pub mod decompose;
/// Intent classification and instruction synthesis.
pub mod intent;
/// Fixed keyword tables used by the rule backends.
pub mod keywords;
/// Quality scoring.
pub mod score;

use async_trait::async_trait;
use lumen_core::{AmbiguityReport, ContextReport, IntentReport, Result, ScoreReport};

pub use ambiguity::{LlmAmbiguityDetector, RuleAmbiguityDetector};
pub use context::{LlmContextDetector, RuleContextDetector};
pub use decompose::{LlmDecomposer, RuleDecomposer};
pub use intent::{LlmIntentClassifier, RuleIntentClassifier};
pub use score::{LlmScorer, RuleScorer};

/// Scores how well-defined a request is.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Scores the request on clarity, specificity, and structure.
    ///
    /// # Errors
    ///
    /// Fails only on malformed external-response payloads (LLM backend);
    /// the rule backend cannot fail.
    async fn score(&self, text: &str) -> Result<ScoreReport>;
}

/// Detects whether a request is semantically ambiguous.
#[async_trait]
pub trait AmbiguityDetector: Send + Sync {
    /// Judges whether the request is ambiguous or too vague.
    ///
    /// The two backends may disagree; callers must not assume more than
    /// the boolean contract.
    ///
    /// # Errors
    ///
    /// Fails only on external-call or payload errors (LLM backend).
    async fn detect(&self, text: &str) -> Result<AmbiguityReport>;
}

/// Detects whether a request depends on previous conversation context.
#[async_trait]
pub trait ContextDetector: Send + Sync {
    /// Judges whether the request needs prior context to be understood.
    ///
    /// # Errors
    ///
    /// Fails only on external-call or payload errors (LLM backend).
    async fn detect(&self, text: &str) -> Result<ContextReport>;
}

/// Classifies the intents behind a piece of text.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Returns the detected labels, the primary label, and response
    /// instructions.
    ///
    /// # Errors
    ///
    /// Fails only on external-call or payload errors (LLM backend).
    async fn classify(&self, text: &str) -> Result<IntentReport>;
}

/// Splits a request into self-contained sub-task strings.
#[async_trait]
pub trait Decomposer: Send + Sync {
    /// Decomposes the text into an ordered, never-empty sequence of
    /// sub-tasks. When no meaningful split occurs, the whole (trimmed)
    /// input is the single element.
    ///
    /// # Errors
    ///
    /// Fails only on external-call or payload errors (LLM backend).
    async fn decompose(&self, text: &str) -> Result<Vec<String>>;
}
