//! The lumen prompt-optimization pipeline.
//!
//! This crate sequences five independent text analyzers (quality scoring,
//! ambiguity detection, context-dependency detection, intent
//! classification, task decomposition) into one deterministic control flow
//! with conditional branches, and decides when to invoke the expensive
//! external rewriting step versus cheap local transformations.
//!
//! Each analyzer has a rule-based and an LLM-backed implementation behind
//! the same trait; orchestration never branches on which backend is
//! installed.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// Analyzer traits and their rule/LLM implementations.
pub mod analyzer;
/// Rate-limited, retrying invoker for external calls.
pub mod invoker;
/// The orchestration pipeline itself.
pub mod pipeline;
/// Prompt templates for the LLM-backed analyzers.
pub mod prompts;
/// Escalation heuristic for hybrid deployments.
pub mod reasoner;

pub use analyzer::{AmbiguityDetector, ContextDetector, Decomposer, IntentClassifier, Scorer};
pub use invoker::{Invoker, RetryPolicy};
pub use pipeline::{CLARIFY_AMBIGUOUS, CLARIFY_VAGUE, Pipeline, REWRITE_MARKER};
pub use reasoner::needs_assistance;
