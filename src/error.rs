//! Error types for fivewh.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FivewhError>;

/// Errors raised by the analysis pipeline.
///
/// A malformed model reply is not an error: the parser degrades to a
/// best-effort structure instead.
#[derive(Debug, Error)]
pub enum FivewhError {
    /// Caller supplied a blank or out-of-bounds profession/topic.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or malformed process configuration (fatal at startup).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generative model call failed (network, auth, rate limit, bad reply).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The cache backend failed.
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FivewhError {
    /// True for errors caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_bare_message() {
        let err = FivewhError::InvalidInput("Topic cannot be empty".into());
        assert_eq!(err.to_string(), "Topic cannot be empty");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_upstream_is_not_client_error() {
        let err = FivewhError::Upstream("Gemini request failed: timeout".into());
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: FivewhError = parse.unwrap_err().into();
        assert!(matches!(err, FivewhError::Serialization(_)));
    }
}
