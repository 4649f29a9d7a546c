//! Error types for algotrace operations
//!
//! Errors fall into three groups:
//! - Structural errors: the writer or logger was driven out of order
//!   (a value without a key, an `end_array` closing an object, a logger
//!   finished with open scopes). These are bugs in the traced algorithm.
//! - External errors: the output stream or a config file failed.
//! - Validation errors: bad configuration or a trace that cannot be replayed.
//!
//! Parameter errors raised by the low-level builders (`add_value`,
//! `add_iterator`, `add_array`) are *not* surfaced through this type: they are
//! written into the trace as `{type: error, fct, message}` nodes so the output
//! stays well-formed.
//!
//! # Error Codes
//!
//! Each variant has a stable code (e.g. `UNBALANCED_TRACE`) for scripting
//! around the CLI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for algotrace operations
pub type Result<T> = std::result::Result<T, TraceError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Output stream or file system failure
    Io,
    /// Writer/logger nesting was violated
    Structure,
    /// Input or parameters were invalid
    Validation,
    /// A parsed trace could not be replayed
    Replay,
    /// Configuration could not be loaded
    Configuration,
}

/// Errors that can occur while recording or reading traces
#[derive(Error, Debug)]
pub enum TraceError {
    // ═══════════════════════════════════════════════════════════════════════
    // Structural errors (writer/logger nesting)
    // ═══════════════════════════════════════════════════════════════════════

    /// The trace was finished while objects or arrays were still open
    #[error("Unbalanced trace: {open} scope(s) still open at level {level}. Every start() needs a matching end().")]
    Unbalanced { open: usize, level: i32 },

    /// A closing call did not match the innermost open scope
    #[error("Mismatched end: expected to close {expected}, found {found}")]
    MismatchedEnd {
        expected: &'static str,
        found: &'static str,
    },

    /// A value was written inside an object without a preceding key
    #[error("Value written inside an object without a key")]
    ValueWithoutKey,

    /// A key was written outside an object, or twice in a row
    #[error("Key '{key}' written outside an object or after another key")]
    KeyOutsideObject { key: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Validation errors
    // ═══════════════════════════════════════════════════════════════════════

    /// A builder received an invalid argument
    #[error("Invalid parameter in '{fct}': {message}")]
    InvalidParameter { fct: String, message: String },

    /// Configuration is invalid or could not be parsed
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// A parsed trace could not be replayed
    #[error("Replay failed: {reason}")]
    Replay { reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure errors
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation on the output stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TraceError {
    /// Returns true if retrying with the same logger could succeed.
    ///
    /// Only I/O failures qualify; every other error reflects a bug or bad
    /// input and repeats deterministically.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TraceError::Io(_))
    }

    /// Returns true if this error signals a bug in the traced algorithm
    pub fn is_programming_error(&self) -> bool {
        self.category() == ErrorCategory::Structure
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            TraceError::Unbalanced { .. }
            | TraceError::MismatchedEnd { .. }
            | TraceError::ValueWithoutKey
            | TraceError::KeyOutsideObject { .. } => ErrorCategory::Structure,

            TraceError::InvalidParameter { .. } => ErrorCategory::Validation,

            TraceError::Config { .. } => ErrorCategory::Configuration,

            TraceError::Replay { .. } => ErrorCategory::Replay,

            TraceError::Json(_) | TraceError::Io(_) => ErrorCategory::Io,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TraceError::Unbalanced { .. } => "UNBALANCED_TRACE",
            TraceError::MismatchedEnd { .. } => "MISMATCHED_END",
            TraceError::ValueWithoutKey => "VALUE_WITHOUT_KEY",
            TraceError::KeyOutsideObject { .. } => "KEY_OUTSIDE_OBJECT",
            TraceError::InvalidParameter { .. } => "INVALID_PARAMETER",
            TraceError::Config { .. } => "INVALID_CONFIG",
            TraceError::Replay { .. } => "REPLAY_ERROR",
            TraceError::Json(_) => "JSON_ERROR",
            TraceError::Io(_) => "IO_ERROR",
        }
    }

    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Configuration => 2,
            ErrorCategory::Io => 74,
            ErrorCategory::Structure | ErrorCategory::Replay => 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TraceError::Unbalanced { open: 2, level: 1 }.error_code(),
            "UNBALANCED_TRACE"
        );
        assert_eq!(TraceError::ValueWithoutKey.error_code(), "VALUE_WITHOUT_KEY");
        assert_eq!(
            TraceError::Config {
                reason: "bad".to_string()
            }
            .error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            TraceError::MismatchedEnd {
                expected: "array",
                found: "object"
            }
            .category(),
            ErrorCategory::Structure
        );
        assert_eq!(
            TraceError::InvalidParameter {
                fct: "add_value".to_string(),
                message: "empty name".to_string()
            }
            .category(),
            ErrorCategory::Validation
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(TraceError::from(io).category(), ErrorCategory::Io);
    }

    #[test]
    fn test_programming_errors_are_not_recoverable() {
        let err = TraceError::Unbalanced { open: 1, level: 0 };
        assert!(err.is_programming_error());
        assert!(!err.is_recoverable());
        assert_eq!(err.exit_code(), 70);

        let io = TraceError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(io.is_recoverable());
        assert!(!io.is_programming_error());
    }

    #[test]
    fn test_error_messages_are_helpful() {
        let msg = TraceError::Unbalanced { open: 3, level: 2 }.to_string();
        assert!(msg.contains("3 scope(s)"));
        assert!(msg.contains("end()"));
    }
}
