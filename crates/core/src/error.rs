//! Error types for Vitis operations.
//!
//! This module defines the main error type [`VitisError`] which represents
//! everything that can go wrong while building a retrieval URL, fetching a
//! page, or processing its content. Each error falls into one of three
//! [`FailureKind`]s, and [`ErrorPayload`] renders it for callers.
//!
//! # Example
//!
//! ```rust
//! use vitis_core::{ErrorPayload, VitisError};
//!
//! let err = VitisError::InvalidSelection("wine".to_string());
//! let payload = ErrorPayload::from(&err);
//! assert_eq!(payload.error, "invalid category");
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Main error type for fetching and extraction operations.
#[derive(Error, Debug)]
pub enum VitisError {
    /// The category is not part of the closed category set.
    ///
    /// Raised by the URL builder before any network access happens.
    #[error("Unknown category: {0}")]
    InvalidSelection(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The data source answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a base URL cannot be parsed or cannot carry a query.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when a configured CSS selector is invalid.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid character encoding.
    ///
    /// Returned when the response body cannot be decoded as text.
    #[error("Invalid character encoding")]
    InvalidEncoding,

    /// File not found.
    ///
    /// Returned when attempting to read a local HTML file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File I/O errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization errors.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The three failure classes a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The retrieval step could not complete.
    Fetch,
    /// The content was retrieved but could not be processed.
    Processing,
    /// The requested category does not exist.
    InvalidSelection,
}

impl VitisError {
    /// Classifies this error into the failure kind reported to callers.
    pub fn kind(&self) -> FailureKind {
        match self {
            VitisError::InvalidSelection(_) => FailureKind::InvalidSelection,
            #[cfg(feature = "fetch")]
            VitisError::HttpError(_) => FailureKind::Fetch,
            VitisError::HttpStatus { .. } | VitisError::Timeout { .. } => FailureKind::Fetch,
            VitisError::InvalidUrl(_)
            | VitisError::HtmlParseError(_)
            | VitisError::InvalidEncoding
            | VitisError::FileNotFound(_)
            | VitisError::WriteError(_)
            | VitisError::ConfigError(_)
            | VitisError::Serialization(_) => FailureKind::Processing,
        }
    }
}

/// Error body returned to callers in place of an extraction result.
///
/// Serializes as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<&VitisError> for ErrorPayload {
    fn from(err: &VitisError) -> Self {
        let error = match err.kind() {
            FailureKind::InvalidSelection => "invalid category".to_string(),
            FailureKind::Fetch => format!("failed to reach data source: {}", err),
            FailureKind::Processing => format!("failed to process data: {}", err),
        };
        Self { error }
    }
}

/// Result type alias for VitisError.
pub type Result<T> = std::result::Result<T, VitisError>;
