//! Error type for reading assurance-case documents.

use thiserror::Error;

/// Error returned when document text cannot be read at all.
///
/// Only malformed JSON text is an error. A well-formed document that does not
/// match either schema degrades to an empty document instead, so the diagram
/// can still be rendered.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// Returns the one-based (line, column) the error was reported at.
    pub fn location(&self) -> (usize, usize) {
        match self {
            Self::Json { line, column, .. } => (*line, *column),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
