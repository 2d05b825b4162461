//! Error types for readlater operations.
//!
//! [`ReadLaterError`] covers the failures that can happen *inside* the
//! extraction pipeline: a single proxy attempt timing out, a relay answering
//! with a non-success status, a malformed JSON envelope, a hint file that
//! cannot be read. None of these reach callers of
//! [`MetadataService::extract_metadata`](crate::MetadataService::extract_metadata),
//! which always degrades to a synthesized result instead.
//!
//! # Example
//!
//! ```rust
//! use readlater_core::{ReadLaterError, Result};
//!
//! fn require_host(url: &str) -> Result<String> {
//!     let parsed = url::Url::parse(url).map_err(|e| ReadLaterError::InvalidUrl(e.to_string()))?;
//!     parsed
//!         .host_str()
//!         .map(str::to_string)
//!         .ok_or_else(|| ReadLaterError::InvalidUrl(format!("{url} has no host")))
//! }
//! # assert!(require_host("https://example.com").is_ok());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metadata extraction internals.
#[derive(Error, Debug)]
pub enum ReadLaterError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps DNS failures, refused connections, TLS problems and body read
    /// failures for a single proxy attempt.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A proxy attempt exceeded the configured per-attempt timeout.
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The relay answered outside the 2xx range.
    #[error("Proxy responded with HTTP {status}")]
    HttpStatus { status: u16 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON envelope returned by a proxy could not be decoded.
    #[error("Malformed proxy envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors, e.g. a domain hint file with the wrong shape.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for ReadLaterError.
pub type Result<T> = std::result::Result<T, ReadLaterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReadLaterError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = ReadLaterError::Timeout { timeout_ms: 2500 };
        assert!(err.to_string().contains("2500"));
    }

    #[test]
    fn test_status_error() {
        let err = ReadLaterError::HttpStatus { status: 429 };
        assert_eq!(err.to_string(), "Proxy responded with HTTP 429");
    }

    #[test]
    fn test_envelope_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ReadLaterError = parse_err.into();
        assert!(matches!(err, ReadLaterError::Envelope(_)));
    }
}
