//! The versioned recursive tree schema.
//!
//! ```json
//! { "version": "1.0",
//!   "tree": { "id": "G1", "type": "GOAL", "name": "...", "children": [ ... ] } }
//! ```

use serde::Deserialize;

use crate::element::{ElementId, null_as_default};

/// The only tree schema version currently understood.
pub const TREE_SCHEMA_VERSION: &str = "1.0";

/// A document in the versioned tree schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    version: String,

    #[serde(default)]
    tree: Option<TreeNode>,
}

impl TreeDocument {
    /// Creates a tree document with the current schema version.
    pub fn new(tree: Option<TreeNode>) -> Self {
        Self {
            version: TREE_SCHEMA_VERSION.to_string(),
            tree,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the root node, if the document has one.
    pub fn root(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }
}

/// A single element of the tree schema.
///
/// The element type is kept as the raw upper-case tag (`GOAL`, `STRATEGY`,
/// `PROPERTY_CLAIM`, `EVIDENCE`, `CONTEXT`, `JUSTIFICATION`, `ASSUMPTION`)
/// so that unknown tags survive deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    id: Option<ElementId>,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    element_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    name: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a leaf node.
    pub fn new(
        id: impl Into<ElementId>,
        element_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            element_type: element_type.into(),
            name: name.into(),
            description: None,
            children: Vec::new(),
        }
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a child node (builder style).
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> Option<&ElementId> {
        self.id.as_ref()
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Counts this node and all of its descendants.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}
