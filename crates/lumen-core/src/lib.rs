//! Core types for the lumen prompt optimizer.
//!
//! This crate provides the shared data model (requests, analysis reports,
//! intent labels), the error taxonomy, and configuration types used across
//! the lumen workspace.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// Configuration types and loading.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Intent label vocabulary and priority ordering.
pub mod intent;
/// Analysis report types produced by the pipeline.
pub mod report;
/// The immutable optimization request.
pub mod request;
/// Synchronization utilities.
pub mod sync;

pub use config::{AnalyzerBackend, InvokerConfig, LumenConfig, ModelConfig, PipelineMode};
pub use error::{Error, Result};
pub use intent::IntentLabel;
pub use report::{
    AmbiguityReport, ContextReport, Disposition, IntentReport, PipelineResult, ScoreReport,
    SubTask,
};
pub use request::Request;
pub use sync::LockExt;
