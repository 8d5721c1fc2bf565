//! Configuration for backend selection, pipeline mode, model access, and
//! the rate-limited invoker.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which analyzer implementation family to install.
///
/// This is a construction-time choice; orchestration logic never branches
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerBackend {
    /// Pure keyword/substring heuristics, no external calls.
    #[default]
    Rules,
    /// Every analyzer delegates to the external text-generation service.
    Llm,
}

/// Which of the two mutually exclusive pipeline behaviors to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineMode {
    /// Reject low-quality or ambiguous requests early with a fixed
    /// clarification message.
    #[default]
    Strict,
    /// Never reject; rewrite aggressively and always produce output.
    AlwaysAnswer,
}

/// Model access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name passed to the generation endpoint.
    pub model: String,
    /// Environment variable holding the API key. The key itself is never
    /// written to the config file.
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_owned(),
            api_key_env: "GEMINI_API_KEY".to_owned(),
        }
    }
}

/// Rate-limiting and retry configuration for external calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Maximum number of simultaneously in-flight external calls.
    pub max_concurrent: usize,
    /// Maximum attempts per call, counting the first one.
    pub max_attempts: u32,
    /// Base backoff delay in seconds; doubles per attempt, plus one
    /// second of fixed jitter.
    pub base_delay_secs: u64,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 3,
            max_attempts: 3,
            base_delay_secs: 1,
        }
    }
}

/// Complete lumen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LumenConfig {
    /// Analyzer backend selection.
    #[serde(default)]
    pub backend: AnalyzerBackend,
    /// Pipeline operating mode.
    #[serde(default)]
    pub mode: PipelineMode,
    /// Model access settings.
    #[serde(default)]
    pub model: ModelConfig,
    /// Invoker rate-limit and retry settings.
    #[serde(default)]
    pub invoker: InvokerConfig,
}

impl LumenConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolves the API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] when the variable is unset or empty.
    pub fn resolve_api_key(&self) -> Result<String> {
        match env::var(&self.api_key_env()) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::MissingApiKey(self.api_key_env())),
        }
    }

    /// Name of the environment variable holding the API key.
    fn api_key_env(&self) -> String {
        self.model.api_key_env.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LumenConfig::default();
        assert_eq!(config.backend, AnalyzerBackend::Rules);
        assert_eq!(config.mode, PipelineMode::Strict);
        assert_eq!(config.invoker.max_concurrent, 3);
        assert_eq!(config.invoker.max_attempts, 3);
        assert_eq!(config.model.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_parse_partial_toml() {
        let parsed: LumenConfig = toml::from_str(
            r#"
            backend = "llm"
            mode = "always-answer"

            [invoker]
            max_concurrent = 5
            max_attempts = 4
            base_delay_secs = 2
            "#,
        )
        .expect("config should parse");
        assert_eq!(parsed.backend, AnalyzerBackend::Llm);
        assert_eq!(parsed.mode, PipelineMode::AlwaysAnswer);
        assert_eq!(parsed.invoker.max_concurrent, 5);
        // Omitted sections fall back to defaults.
        assert_eq!(parsed.model.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = LumenConfig::default();
        config.model.api_key_env = "LUMEN_TEST_KEY_THAT_IS_NOT_SET".to_owned();
        let error = config.resolve_api_key().expect_err("key should be missing");
        assert!(matches!(error, Error::MissingApiKey(_)));
    }
}
