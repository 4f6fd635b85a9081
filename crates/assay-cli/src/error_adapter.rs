//! Error adapter for converting AssayError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Document errors
//! point at the offending position in the input text when it is available.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use assay::AssayError;

/// Adapter that renders an [`AssayError`] through miette.
pub struct ErrorAdapter<'a> {
    error: &'a AssayError,
    /// Input text for displaying snippets of document errors
    src: Option<&'a str>,
}

impl<'a> ErrorAdapter<'a> {
    /// Create an adapter without source text.
    pub fn new(error: &'a AssayError) -> Self {
        Self { error, src: None }
    }

    /// Attach the document text the error was raised for.
    pub fn with_source(mut self, src: &'a str) -> Self {
        self.src = Some(src);
        self
    }

    fn parse_span(&self) -> Option<SourceSpan> {
        let AssayError::Parse(err) = self.error else {
            return None;
        };
        let src = self.src?;
        let (line, column) = err.location();
        let offset = byte_offset(src, line, column);
        let len = usize::from(offset < src.len());
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.error, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.error, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.error)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.error {
            AssayError::Io(_) => "assay::io",
            AssayError::Parse(_) => "assay::parse",
            AssayError::UnknownNode(_) => "assay::unknown_node",
            AssayError::Store(_) => "assay::store",
            AssayError::Config(_) => "assay::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.error {
            AssayError::Parse(_) => "the input must be a JSON assurance-case document",
            AssayError::UnknownNode(_) => "node ids have the form <type>-<id>, e.g. goal-1",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.parse_span()?;
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.parse_span()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Converts a one-based (line, column) pair into a byte offset into `src`.
///
/// Positions past the end of a line or of the text are clamped.
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = column.saturating_sub(1).min(text.len());
            let mut end = offset + within;
            while !src.is_char_boundary(end) {
                end -= 1;
            }
            return end;
        }
        offset += text.len();
    }
    src.len()
}
