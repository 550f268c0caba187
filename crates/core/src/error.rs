//! Error types for Precis operations.
//!
//! This module defines the main error type [`PrecisError`] which represents
//! every way a single processing run can fail, along with the coarse
//! [`ErrorKind`] classification a transport layer maps to a status code.
//!
//! # Example
//!
//! ```rust
//! use precis_core::{ErrorKind, PrecisError};
//!
//! let err = PrecisError::InvalidUrl("not a url".to_string());
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert_eq!(err.status_code(), 400);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Main error type for fetching, extraction and summarization.
///
/// Every failure is terminal for the run that produced it. Nothing in the
/// library retries.
#[derive(Error, Debug)]
pub enum PrecisError {
    /// The input URL is malformed or uses a scheme other than http/https.
    ///
    /// Returned before any network access is attempted.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host could not be resolved or refused the connection.
    #[error("Could not reach {host}")]
    Unreachable { host: String },

    /// Request timeout.
    ///
    /// Returned when fetching the page exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The redirect chain looped or exceeded the configured limit.
    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    /// The site answered 403, which usually means the request was bot-blocked.
    #[error("Access denied (HTTP 403); the site is likely blocking automated requests")]
    Blocked,

    /// The page does not exist.
    #[error("Page not found (HTTP 404)")]
    NotFound,

    /// Any other non-2xx response.
    #[error("Server responded with HTTP {status}")]
    HttpStatus { status: u16 },

    /// Unclassified HTTP client failure.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The page was reachable but too little readable text survived extraction.
    #[error("Not enough readable content ({length} characters, need at least {minimum})")]
    InsufficientContent { length: usize, minimum: usize },

    /// Content was extracted but no sentence survived summary filtering.
    #[error("No summary could be produced from the extracted content")]
    NoSummary,

    /// HTML parsing errors, usually an invalid CSS selector in configuration.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Dictionary or blocklist configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Output rendering failed.
    #[error("Failed to serialize output: {0}")]
    SerializeError(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`PrecisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Fetch,
    Extraction,
    Summarization,
    Internal,
}

impl PrecisError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrecisError::InvalidUrl(_) => ErrorKind::Validation,
            PrecisError::Unreachable { .. }
            | PrecisError::Timeout { .. }
            | PrecisError::TooManyRedirects { .. }
            | PrecisError::Blocked
            | PrecisError::NotFound
            | PrecisError::HttpStatus { .. } => ErrorKind::Fetch,
            PrecisError::InsufficientContent { .. } => ErrorKind::Extraction,
            PrecisError::NoSummary => ErrorKind::Summarization,
            #[cfg(feature = "fetch")]
            PrecisError::Http(_) => ErrorKind::Internal,
            PrecisError::HtmlParseError(_)
            | PrecisError::ConfigError(_)
            | PrecisError::SerializeError(_)
            | PrecisError::Io(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status equivalent: 400 for anything the caller can act on, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Internal => 500,
            _ => 400,
        }
    }

    /// Builds the serializable failure body for this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse { error: self.to_string(), kind: self.kind() }
    }
}

/// Failure shape returned to callers of the processing surface.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

/// Result type alias for PrecisError.
pub type Result<T> = std::result::Result<T, PrecisError>;
