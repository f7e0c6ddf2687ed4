//! Error taxonomy for DomVer operations.
//!
//! Errors propagate immediately and untranslated between components; no core
//! component catches or suppresses another's errors. There is deliberately no
//! "partial diff" variant — the diff engine never fails partway through, and
//! malformed manifest content must already have failed at deserialization.

use thiserror::Error;

/// Result type alias using DomError
pub type Result<T> = std::result::Result<T, DomError>;

/// Canonical error taxonomy
///
/// Each variant maps to a stable error code via [`DomError::code`], usable
/// for programmatic handling and test assertions.
#[derive(Error, Debug)]
pub enum DomError {
    /// Invalid or missing input to a public operation; never retried
    #[error("Invalid input in {op}: {message}")]
    InvalidInput { op: String, message: String },

    /// Snapshot lookup miss
    #[error("Snapshot not found: {what}")]
    NotFound { what: String },

    /// Persisted content could not be parsed into a well-formed snapshot
    #[error("Malformed snapshot content at {path}: {message}")]
    Format { path: String, message: String },

    /// Filesystem failure during snapshot persistence or retrieval
    #[error("I/O error in {op}: {source}")]
    Io {
        op: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomError {
    /// Create an invalid-input error with operation context.
    pub fn invalid_input(op: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            op: op.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error naming the missing snapshot.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a format error for malformed persisted content.
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with operation context.
    pub fn io(op: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            op: op.into(),
            source,
        }
    }

    /// Get the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            DomError::InvalidInput { .. } => "ERR_INVALID_INPUT",
            DomError::NotFound { .. } => "ERR_NOT_FOUND",
            DomError::Format { .. } => "ERR_FORMAT",
            DomError::Io { .. } => "ERR_IO",
            DomError::Serialization(_) => "ERR_SERIALIZATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_stable() {
        let cases: Vec<(DomError, &str)> = vec![
            (DomError::invalid_input("op", "bad"), "ERR_INVALID_INPUT"),
            (DomError::not_found("Shop@1.0.0"), "ERR_NOT_FOUND"),
            (DomError::format("/tmp/x.json", "bad json"), "ERR_FORMAT"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.code(), expected, "Wrong code for {:?}", err);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = DomError::invalid_input("create_snapshot", "manifest name is empty");
        assert_eq!(
            err.to_string(),
            "Invalid input in create_snapshot: manifest name is empty"
        );
    }
}
