//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::services::extractor::PathError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error (bad descriptor, unreadable file, ...)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Requested provider is not present in the registry
    #[error("Unknown provider '{name}'. Available providers: {available}")]
    UnknownProvider { name: String, available: String },

    /// Provider declares an auth header but the credential is missing
    #[error("API key for provider '{provider}' is not set in environment variable {var}")]
    MissingApiKey { provider: String, var: String },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream API returned a failure response
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// The declared content path did not resolve against the response
    #[error("Response extraction failed for provider '{provider}': content path [{path}] did not resolve ({source}); response top-level keys: [{response_keys}]")]
    Extraction {
        provider: String,
        path: String,
        response_keys: String,
        #[source]
        source: PathError,
    },
}

impl AppError {
    /// Error type string used in rendered CLI output
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Config(_) => "configuration_error",
            AppError::UnknownProvider { .. } => "configuration_error",
            AppError::MissingApiKey { .. } => "credential_error",
            AppError::HttpClient(_) => "transport_error",
            AppError::Serialization(_) => "transport_error",
            AppError::ExternalApi(_) => "transport_error",
            AppError::Extraction { .. } => "extraction_error",
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_message_names_provider() {
        let err = AppError::UnknownProvider {
            name: "nope".to_string(),
            available: "anthropic, openai".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'nope'"));
        assert!(msg.contains("openai"));
        assert_eq!(err.error_type(), "configuration_error");
    }

    #[test]
    fn test_missing_api_key_message_names_variable() {
        let err = AppError::MissingApiKey {
            provider: "openai".to_string(),
            var: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert_eq!(err.error_type(), "credential_error");
    }

    #[test]
    fn test_extraction_message_includes_path_and_keys() {
        let err = AppError::Extraction {
            provider: "openai".to_string(),
            path: "choices.0.message.content".to_string(),
            response_keys: "error, id".to_string(),
            source: PathError::MissingKey {
                key: "choices".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("choices.0.message.content"));
        assert!(msg.contains("error, id"));
        assert_eq!(err.error_type(), "extraction_error");
    }
}
