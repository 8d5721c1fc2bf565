use std::env;

use async_trait::async_trait;
use lumen_core::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::TextGenerator;

/// Base URL for the Generative Language REST API.
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Default model for Gemini.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Env var key for the Gemini API key.
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Gemini API text generator (free tier with rate limits).
#[derive(Debug)]
pub struct GeminiGenerator {
    /// HTTP client for API requests.
    client: Client,
    /// Gemini API key.
    api_key: String,
    /// Model name to use.
    model: String,
}

impl GeminiGenerator {
    /// Creates a new `GeminiGenerator` from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the `GEMINI_API_KEY` environment variable is
    /// not set.
    pub fn new() -> Result<Self> {
        let api_key = env::var(ENV_GEMINI_API_KEY)
            .map_err(|_| Error::MissingApiKey(ENV_GEMINI_API_KEY.to_owned()))?;
        Self::with_api_key(api_key)
    }

    /// Creates a new `GeminiGenerator` with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the provided API key is empty.
    pub fn with_api_key(api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(ENV_GEMINI_API_KEY.to_owned()));
        }

        Ok(Self {
            client: Client::default(),
            api_key,
            model: DEFAULT_MODEL.to_owned(),
        })
    }

    /// Sets the model to use for generation.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

/// Request payload sent to the Gemini `generateContent` endpoint.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    /// Conversation contents for the request.
    contents: Vec<GeminiContent>,
}

/// A content block in a Gemini request or response.
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    /// Parts that make up the content block.
    parts: Vec<GeminiPart>,
}

/// A single part of a content block.
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    /// Textual payload of the part.
    text: String,
}

/// Response payload returned by Gemini.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    /// List of candidate completions.
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// A single completion candidate returned by Gemini.
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    /// Content generated for the candidate.
    content: GeminiContent,
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_owned(),
                }],
            }],
        };

        let url = format!("{GEMINI_API_URL}/{}:generateContent", self.model);
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending generation request");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| Error::Service(format!("Gemini API request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            // 429 and RESOURCE_EXHAUSTED are the provider's throttling
            // signals; everything else is a hard failure.
            if status == StatusCode::TOO_MANY_REQUESTS
                || error_text.contains("RESOURCE_EXHAUSTED")
            {
                return Err(Error::Throttled(format!(
                    "Gemini API rate limit {status}: {error_text}"
                )));
            }
            return Err(Error::Service(format!(
                "Gemini API error {status}: {error_text}"
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|err| Error::Service(format!("Failed to parse Gemini response: {err}")))?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| Error::Service("No candidates in Gemini response".to_owned()))
    }
}
