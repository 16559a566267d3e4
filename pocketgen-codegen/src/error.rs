//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] pocketgen_schema::ParseError),

    /// Collection selection error.
    #[error("selection error: {0}")]
    Selection(#[from] pocketgen_schema::SelectionError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown target language.
    #[error("unknown target '{name}', expected one of: typescript, go, go-record")]
    UnknownTarget {
        /// Requested target name.
        name: String,
    },
}

impl CodegenError {
    /// Creates an unknown target error.
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }
}
