//! Error types for schema parsing and collection selection.

use thiserror::Error;

/// Error type for schema document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid document structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

/// Error type for collection selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// IO error while talking to the user.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Selection input could not be understood.
    #[error("invalid selection '{input}': {reason}")]
    InvalidInput {
        /// Raw input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl SelectionError {
    /// Creates an invalid input error.
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
