use serde::{Deserialize, Serialize};

/// A raw natural-language request submitted for optimization.
///
/// Requests are never mutated; the pipeline works on transformed copies of
/// the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// The raw request text.
    pub text: String,
    /// Optional context carried over from a previous interaction.
    pub prior_context: Option<String>,
}

impl Request {
    /// Creates a new request with no prior context.
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            prior_context: None,
        }
    }

    /// Attaches prior-interaction context to the request.
    #[must_use]
    pub fn with_prior_context<T: Into<String>>(mut self, context: T) -> Self {
        self.prior_context = Some(context.into());
        self
    }

    /// Returns `true` when the request text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
