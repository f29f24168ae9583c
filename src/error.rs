//! Error types for ng-html-data
//!
//! Extraction itself never fails on a malformed declaration (those are
//! skipped); these errors cover parsing, file discovery, configuration and
//! writing the output document.

use std::process::ExitCode;

use thiserror::Error;

/// Errors surfaced by the front end, the aggregator and the CLI
#[derive(Debug, Error)]
pub enum HtmlDataError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("parse failure: {message}")]
    ParseFailure { message: String },

    #[error("invalid file pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("could not load configuration from {path}: {message}")]
    Config { path: String, message: String },

    #[error("serialization failed: {message}")]
    Serialization { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HtmlDataError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config { .. } | Self::InvalidPattern { .. } => ExitCode::from(2),
            Self::Io(_) | Self::FileNotFound { .. } => ExitCode::from(3),
            _ => ExitCode::FAILURE,
        }
    }
}

impl From<serde_json::Error> for HtmlDataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, HtmlDataError>;
