use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for lumen operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while optimizing a prompt.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was empty or whitespace-only.
    #[error("request is empty")]
    EmptyInput,

    /// The external text-generation service failed non-retryably.
    #[error("service error: {0}")]
    Service(String),

    /// The external service signalled rate limiting.
    #[error("service throttled the request: {0}")]
    Throttled(String),

    /// The external response was not parseable as the expected JSON.
    #[error("malformed response from service: {0}")]
    MalformedResponse(String),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// Configuration is invalid or missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),
}

impl Error {
    /// Determines whether this error may succeed if retried.
    ///
    /// Only throttling is retryable; every other failure propagates
    /// immediately to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error1 = Error::Config("invalid config".to_owned());
        assert_eq!(error1.to_string(), "configuration error: invalid config");

        let error2 = Error::Throttled("429".to_owned());
        assert_eq!(error2.to_string(), "service throttled the request: 429");

        let error3 = Error::MissingApiKey("GEMINI_API_KEY".to_owned());
        assert_eq!(error3.to_string(), "API key not found: GEMINI_API_KEY");
    }

    #[test]
    fn test_error_is_retryable() {
        let throttled = Error::Throttled("rate limit".to_owned());
        assert!(throttled.is_retryable());

        let service = Error::Service("boom".to_owned());
        assert!(!service.is_retryable());

        let malformed = Error::MalformedResponse("not json".to_owned());
        assert!(!malformed.is_retryable());

        let empty = Error::EmptyInput;
        assert!(!empty.is_retryable());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
