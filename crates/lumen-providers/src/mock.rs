//! Mock generator for testing pipeline behavior.
//!
//! Allows defining canned responses for prompt patterns, scripted
//! throttling, and artificial latency, enabling end-to-end testing of
//! pipeline and invoker behavior without real API calls.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lumen_core::{Error, LockExt as _, Result};

use crate::TextGenerator;

/// Mock generator that returns pre-defined responses based on prompt
/// patterns.
///
/// Patterns are matched in insertion order: exact match first, then first
/// substring hit. Useful for driving the LLM-backed analyzers in tests.
#[derive(Clone, Default)]
pub struct MockGenerator {
    /// Predefined `(pattern, response)` pairs, in insertion order.
    responses: Arc<Mutex<Vec<(String, String)>>>,
    /// Default response if no pattern matches.
    default_response: Arc<Mutex<Option<String>>>,
    /// Prompt history for verification.
    call_history: Arc<Mutex<Vec<String>>>,
    /// Remaining calls that should fail with a throttling error.
    throttle_remaining: Arc<AtomicU32>,
    /// Artificial latency per successful call.
    delay: Option<Duration>,
    /// Number of calls currently in flight.
    in_flight: Arc<AtomicUsize>,
    /// Highest number of calls ever observed in flight simultaneously.
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockGenerator {
    /// Creates an empty mock generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern-based response.
    #[must_use]
    pub fn with_response<P: Into<String>, R: Into<String>>(self, pattern: P, response: R) -> Self {
        {
            let mut responses = self.responses.lock_unpoisoned();
            responses.push((pattern.into(), response.into()));
        }
        self
    }

    /// Sets a default response for prompts that match no pattern.
    #[must_use]
    pub fn with_default_response<R: Into<String>>(self, response: R) -> Self {
        {
            let mut default = self.default_response.lock_unpoisoned();
            *default = Some(response.into());
        }
        self
    }

    /// Makes the next `count` calls fail with a throttling error before
    /// any succeed.
    #[must_use]
    pub fn with_throttle_count(self, count: u32) -> Self {
        self.throttle_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// Adds artificial latency to each successful call, so overlapping
    /// calls are observable.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns the prompts received so far.
    #[must_use]
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock_unpoisoned().clone()
    }

    /// Returns the number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_history.lock_unpoisoned().len()
    }

    /// Returns the highest number of simultaneously in-flight calls seen.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Finds a matching response for the given prompt.
    fn find_response(&self, prompt: &str) -> Option<String> {
        let responses = self.responses.lock_unpoisoned();

        for (pattern, response) in &*responses {
            if prompt == pattern {
                return Some(response.clone());
            }
        }
        for (pattern, response) in &*responses {
            if prompt.contains(pattern.as_str()) {
                return Some(response.clone());
            }
        }
        None
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        {
            let mut history = self.call_history.lock_unpoisoned();
            history.push(prompt.to_owned());
        }

        if self.throttle_remaining.load(Ordering::SeqCst) > 0 {
            self.throttle_remaining.fetch_sub(1, Ordering::SeqCst);
            return Err(Error::Throttled("scripted throttle".to_owned()));
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let found = self.find_response(prompt);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match found {
            Some(response) => Ok(response),
            None => {
                let default = self.default_response.lock_unpoisoned().clone();
                default.ok_or_else(|| {
                    Error::Service(format!("no canned response for prompt: {prompt:.80}"))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exact_match_wins_over_substring() {
        let mock = MockGenerator::new()
            .with_response("score", "substring hit")
            .with_response("score this exactly", "exact hit");

        let response = mock
            .generate("score this exactly")
            .await
            .expect("should match");
        assert_eq!(response, "exact hit");
    }

    #[tokio::test]
    async fn test_default_response() {
        let mock = MockGenerator::new().with_default_response("fallback");
        let response = mock.generate("anything").await.expect("default applies");
        assert_eq!(response, "fallback");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_prompt_is_a_service_error() {
        let mock = MockGenerator::new();
        let error = mock.generate("anything").await.expect_err("no response");
        assert!(matches!(error, Error::Service(_)));
    }

    #[tokio::test]
    async fn test_scripted_throttling() {
        let mock = MockGenerator::new()
            .with_default_response("ok")
            .with_throttle_count(2);

        assert!(matches!(
            mock.generate("one").await,
            Err(Error::Throttled(_))
        ));
        assert!(matches!(
            mock.generate("two").await,
            Err(Error::Throttled(_))
        ));
        assert_eq!(mock.generate("three").await.expect("third succeeds"), "ok");
        assert_eq!(mock.call_count(), 3);
    }
}
