//! Unified error types for talkpack.
//!
//! This module provides a single [`TalkpackError`] enum that covers all error
//! cases in the library.
//!
//! # What is (and isn't) an error
//!
//! Parsing never fails: a malformed line or CSV row is skipped and the scan
//! continues, and empty input yields an empty store. Errors are reserved for
//! caller mistakes (an invalid window, an unparseable date) and for I/O at
//! the edges (reading an export file, writing JSON).

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for talkpack operations.
///
/// # Example
///
/// ```rust
/// use talkpack::error::Result;
/// use talkpack::core::DailyChatStore;
///
/// fn my_function() -> Result<DailyChatStore> {
///     Ok(DailyChatStore::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, TalkpackError>;

/// The error type for all talkpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TalkpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the input export can't be read or the
    /// output file can't be written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when the export file is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid date in a window parameter.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The window specification can't be resolved to a single mode.
    ///
    /// Raised when only one of `start`/`end` is supplied, or when `start`
    /// falls after `end`.
    #[error("Invalid window: {message}")]
    InvalidWindow {
        /// Description of what's wrong
        message: String,
    },

    /// A format name didn't match any known value.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The target participant has no messages in the selected window.
    ///
    /// The preprocessor only reports absence through its statistics; this
    /// variant exists for callers that want to treat it as a failure.
    #[error("Participant '{target}' not found. Known participants: {}", participants.join(", "))]
    TargetNotFound {
        /// The name that was searched for
        target: String,
        /// Every sender seen in the export
        participants: Vec<String>,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for TalkpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TalkpackError::Utf8 {
            context: "export content".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TalkpackError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        TalkpackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid window error.
    pub fn invalid_window(message: impl Into<String>) -> Self {
        TalkpackError::InvalidWindow {
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        TalkpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a target-not-found error.
    pub fn target_not_found(target: impl Into<String>, participants: Vec<String>) -> Self {
        TalkpackError::TargetNotFound {
            target: target.into(),
            participants,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TalkpackError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, TalkpackError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid window error.
    pub fn is_invalid_window(&self) -> bool {
        matches!(self, TalkpackError::InvalidWindow { .. })
    }

    /// Returns `true` if this is a target-not-found error.
    pub fn is_target_not_found(&self) -> bool {
        matches!(self, TalkpackError::TargetNotFound { .. })
    }
}
