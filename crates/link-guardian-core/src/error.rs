//! Error types for the Link Guardian client

use thiserror::Error;

/// Message shown when the submitted URL is empty or whitespace only
pub const EMPTY_URL_MESSAGE: &str = "Please enter a valid URL to analyze.";

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum GuardError {
    /// Input rejected before any request was issued
    #[error("{0}")]
    Validation(String),

    /// Backend answered with a non-success status
    #[error("Analysis failed: {status_text}")]
    Http { status: u16, status_text: String },

    /// Transport-level failure
    #[error("{0}")]
    Network(String),

    /// Response body was not valid JSON
    #[error("Failed to parse analysis response: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GuardError {
    /// Validation error for an empty submission
    pub fn empty_url() -> Self {
        GuardError::Validation(EMPTY_URL_MESSAGE.to_string())
    }

    /// Whether the error was raised before any request went out
    pub fn is_validation(&self) -> bool {
        matches!(self, GuardError::Validation(_))
    }
}

/// Result type alias for Link Guardian operations
pub type Result<T> = std::result::Result<T, GuardError>;

impl From<reqwest::Error> for GuardError {
    fn from(e: reqwest::Error) -> Self {
        GuardError::Network(e.to_string())
    }
}
