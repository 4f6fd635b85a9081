//! Error types for Assay operations.
//!
//! This module provides the main error type [`AssayError`] which wraps
//! the error conditions that can surface from a diagram session.
//!
//! Most engine operations are total and never fail: malformed documents
//! degrade to an empty graph and snapshot failures fall back to defaults.
//! What remains are I/O around the session, unreadable document text and
//! gestures that reference nodes the diagram does not contain.

use std::io;

use thiserror::Error;

use assay_core::identifier::Id;
use assay_document::ParseError;

use crate::visibility::StoreError;

/// The main error type for Assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Document error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown node: {0}")]
    UnknownNode(Id),

    #[error("Snapshot store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}
