//! Assurance-case documents for the Assay diagram engine.
//!
//! Two schemas describe the same Goal / Strategy / Property Claim / Evidence
//! / Context argument:
//!
//! - the **legacy** nested schema ([`legacy::LegacyCase`]), where each element
//!   type owns a fixed list of child types, and
//! - the **tree** schema ([`tree::TreeDocument`]), a single recursively typed
//!   node marked with `"version": "1.0"`.
//!
//! [`Document`] is the tagged union of the two. Detection happens once, when
//! the document is read.
//!
//! # Example
//!
//! ```
//! use assay_document::{Document, SchemaKind};
//!
//! let json = r#"{ "version": "1.0", "tree": { "id": "G1", "type": "GOAL", "name": "Safe" } }"#;
//! let document = Document::parse(json).expect("valid JSON");
//! assert_eq!(document.schema(), SchemaKind::Tree);
//! ```

pub mod element;
pub mod error;
pub mod legacy;
pub mod tree;

pub use element::{ElementId, ElementInfo};
pub use error::ParseError;
pub use legacy::LegacyCase;
pub use tree::{TREE_SCHEMA_VERSION, TreeDocument, TreeNode};

use std::fmt;

use log::{debug, warn};
use serde_json::Value;

/// Which schema a [`Document`] was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Legacy,
    Tree,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Tree => f.write_str("tree"),
        }
    }
}

/// An assurance-case document in either supported schema.
#[derive(Debug, Clone)]
pub enum Document {
    Legacy(LegacyCase),
    Tree(TreeDocument),
}

impl Document {
    /// Parses document text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] only if the text is not valid JSON. JSON that
    /// matches neither schema yields an empty document.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(source)?;
        Ok(Self::from_value(value))
    }

    /// Builds a document from an already parsed JSON value.
    ///
    /// A value carrying `"version": "1.0"` together with a `tree` field is
    /// read as a tree document; anything else is read as a legacy case.
    pub fn from_value(value: Value) -> Self {
        let is_tree = value.get("version").and_then(Value::as_str) == Some(TREE_SCHEMA_VERSION)
            && value.get("tree").is_some();

        if is_tree {
            match serde_json::from_value::<TreeDocument>(value) {
                Ok(document) => {
                    debug!(schema = "tree"; "Document schema detected");
                    Self::Tree(document)
                }
                Err(err) => {
                    warn!(schema = "tree", err:% = err; "Document does not match schema, using empty tree");
                    Self::Tree(TreeDocument::new(None))
                }
            }
        } else {
            match serde_json::from_value::<LegacyCase>(value) {
                Ok(case) => {
                    debug!(schema = "legacy"; "Document schema detected");
                    Self::Legacy(case)
                }
                Err(err) => {
                    warn!(schema = "legacy", err:% = err; "Document does not match schema, using empty case");
                    Self::Legacy(LegacyCase::default())
                }
            }
        }
    }

    /// Returns which schema this document uses.
    pub fn schema(&self) -> SchemaKind {
        match self {
            Self::Legacy(_) => SchemaKind::Legacy,
            Self::Tree(_) => SchemaKind::Tree,
        }
    }

    /// Returns true if the document has no root element.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Legacy(case) => case.root_goal().is_none(),
            Self::Tree(document) => document.root().is_none(),
        }
    }
}

impl From<LegacyCase> for Document {
    fn from(case: LegacyCase) -> Self {
        Self::Legacy(case)
    }
}

impl From<TreeDocument> for Document {
    fn from(document: TreeDocument) -> Self {
        Self::Tree(document)
    }
}
