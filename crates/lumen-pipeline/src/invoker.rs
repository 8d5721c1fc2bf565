//! Rate-limited, retrying access to the text-generation port.
//!
//! The invoker is the only shared mutable resource in the system: a
//! process-wide concurrency gate plus a retry policy for throttling
//! errors. It holds no per-run state and needs no per-run teardown.

use std::sync::Arc;
use std::time::Duration;

use lumen_core::{Error, InvokerConfig, Result};
use lumen_providers::{TextGenerator, parse_structured};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use crate::prompts;

/// Default number of simultaneously in-flight external calls.
const DEFAULT_GATE_SIZE: usize = 3;

/// Retry policy for throttled external calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum attempts per call, counting the first one.
    pub max_attempts: u32,
    /// Base delay; doubles per attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay before retry number `attempt` (zero-based): the base
    /// delay doubled per attempt, plus one second of fixed jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt) + Duration::from_secs(1)
    }
}

/// Wraps a [`TextGenerator`] with bounded concurrency and retry/backoff
/// on throttling errors.
pub struct Invoker {
    /// The wrapped generator.
    generator: Arc<dyn TextGenerator>,
    /// Concurrency gate; excess calls suspend until a slot frees.
    gate: Arc<Semaphore>,
    /// Retry policy applied to throttling errors.
    retry: RetryPolicy,
}

impl Invoker {
    /// Creates an invoker with the default gate size and retry policy.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            gate: Arc::new(Semaphore::new(DEFAULT_GATE_SIZE)),
            retry: RetryPolicy::default(),
        }
    }

    /// Creates an invoker from configuration.
    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &InvokerConfig) -> Self {
        Self {
            generator,
            gate: Arc::new(Semaphore::new(config.max_concurrent)),
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                base_delay: Duration::from_secs(config.base_delay_secs),
            },
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the concurrency gate size.
    #[must_use]
    pub fn with_gate_size(mut self, permits: usize) -> Self {
        self.gate = Arc::new(Semaphore::new(permits));
        self
    }

    /// Generates raw text, holding a gate slot for the duration of the
    /// call (including backoff waits).
    ///
    /// Throttling errors are retried with exponential backoff; exhausting
    /// the attempt budget surfaces as [`Error::Service`]. Any other
    /// failure propagates immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] on non-retryable failure or retry
    /// exhaustion.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| Error::Service("concurrency gate closed".to_owned()))?;

        let mut attempt: u32 = 0;
        loop {
            match self.generator.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(error) if error.is_retryable() => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        return Err(Error::Service(format!(
                            "retries exhausted after {attempt} attempts: {error}"
                        )));
                    }
                    let delay = self.retry.delay_for(attempt - 1);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "throttled by provider, backing off"
                    );
                    sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Generates text and parses it as fence-stripped JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] when the response is not
    /// valid JSON for `T`, in addition to the failures of
    /// [`Invoker::generate`].
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T> {
        let raw = self.generate(prompt).await?;
        parse_structured(&raw)
    }

    /// Rewrites a request into one improved sentence.
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`Invoker::generate`].
    pub async fn rewrite(&self, text: &str) -> Result<String> {
        let rewritten = self.generate(&prompts::rewrite_instruction(text)).await?;
        Ok(rewritten.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_providers::MockGenerator;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_backoff_doubles_with_jitter() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for(1), Duration::from_secs(3));
        assert_eq!(policy.delay_for(2), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_calls_are_retried() {
        let mock = MockGenerator::new()
            .with_default_response("ok")
            .with_throttle_count(2);
        let invoker = Invoker::new(Arc::new(mock.clone())).with_retry_policy(fast_policy());

        let text = invoker.generate("hello").await.expect("third attempt wins");
        assert_eq!(text, "ok");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_surfaces_as_service_error() {
        let mock = MockGenerator::new()
            .with_default_response("ok")
            .with_throttle_count(10);
        let invoker = Invoker::new(Arc::new(mock.clone())).with_retry_policy(fast_policy());

        let error = invoker.generate("hello").await.expect_err("must exhaust");
        assert!(matches!(error, Error::Service(_)));
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_errors_propagate_immediately() {
        // No canned response configured, so the mock fails non-retryably.
        let mock = MockGenerator::new();
        let invoker = Invoker::new(Arc::new(mock.clone())).with_retry_policy(fast_policy());

        let error = invoker.generate("hello").await.expect_err("must fail");
        assert!(matches!(error, Error::Service(_)));
        assert_eq!(mock.call_count(), 1);
    }
}
