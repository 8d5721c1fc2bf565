//! Text-generation providers for the lumen prompt optimizer.
//!
//! This crate defines the [`TextGenerator`] port consumed by the pipeline,
//! a Gemini REST implementation, JSON response handling, and a mock
//! generator for tests.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// Gemini REST API provider.
pub mod gemini;
/// JSON response cleaning and parsing.
pub mod json;
/// Mock provider for tests.
pub mod mock;

use async_trait::async_trait;
use lumen_core::Result;

pub use gemini::GeminiGenerator;
pub use json::{parse_structured, strip_code_fences};
pub use mock::MockGenerator;

/// Port to an external text-generation service.
///
/// The service is a black box: given a structured prompt it returns raw
/// text. Structured-output handling lives on top of this trait in
/// [`json`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the unique identifier for this generator.
    fn name(&self) -> &'static str;

    /// Generates raw text for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`lumen_core::Error::Throttled`] when the service signals
    /// rate limiting (retryable), or [`lumen_core::Error::Service`] on any
    /// other transport or provider failure.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
