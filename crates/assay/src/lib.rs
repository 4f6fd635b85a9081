//! Assay - a graph-state engine for interactive assurance-case diagrams.
//!
//! Converts assurance-case documents into positioned node/edge graphs, tracks
//! which nodes are expanded, and decides where new or moved nodes land.
//! Drawing is left to the rendering surface; this crate hands it a
//! [`render::RenderedGraph`] after each gesture.

pub mod config;
pub mod convert;
pub mod graph;
pub mod placement;
pub mod render;
pub mod session;
pub mod traversal;
pub mod visibility;

mod error;

pub use assay_core::{geometry, identifier};
pub use assay_document::{Document, SchemaKind};

pub use error::AssayError;

use log::{debug, info};

use config::AppConfig;
use graph::Graph;
use session::DiagramSession;
use visibility::SnapshotStore;

/// Builder for loading assurance-case documents into diagram sessions.
///
/// # Examples
///
/// ```
/// use assay::{DiagramBuilder, config::AppConfig, visibility::MemoryStore};
///
/// let source = r#"{ "goals": [ { "id": 1, "name": "System is safe" } ] }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
/// let session = builder.session(&document, MemoryStore::new());
///
/// assert_eq!(session.render().visible_ids().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse document text.
    ///
    /// # Errors
    ///
    /// Returns [`AssayError::Parse`] if the text is not valid JSON. JSON of an
    /// unexpected shape parses to an empty document.
    pub fn parse(&self, source: &str) -> Result<Document, AssayError> {
        info!(bytes = source.len(); "Parsing document");
        let document = Document::parse(source)?;
        debug!(schema = document.schema().to_string(); "Document parsed successfully");
        Ok(document)
    }

    /// Convert a document into a positioned graph.
    pub fn convert(&self, document: &Document) -> Graph {
        convert::convert(document)
    }

    /// Create a session for `document`, restoring visibility from `snapshots`.
    pub fn session<S: SnapshotStore>(&self, document: &Document, snapshots: S) -> DiagramSession<S> {
        DiagramSession::from_document(&self.config, snapshots, document)
    }
}
