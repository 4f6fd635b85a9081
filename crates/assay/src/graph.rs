//! Diagram graph data structures.
//!
//! The diagram is an arena of [`GraphNode`] records keyed by [`Id`] plus a
//! flat list of directed parent→child [`GraphEdge`]s. Nodes never point at
//! each other; every traversal goes through the edge list via an
//! [`Adjacency`] index that is built on demand and cached until the edge set
//! changes.
//!
//! Capabilities:
//! - Node storage in insertion order (deterministic output)
//! - Edges deduplicated by endpoint pair, with deterministic ids
//!   (`e<source>-<target>`, suffixed when two pairs spell the same id)
//! - Root detection (nodes with no incoming edges)
//! - Node and subtree removal that keeps edges consistent

use std::{cell::OnceCell, fmt};

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};

use assay_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::traversal::Adjacency;

/// The kind of assurance-case element a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Goal,
    Strategy,
    PropertyClaim,
    Evidence,
    Context,
}

impl NodeType {
    /// Returns the camelCase name used in node ids and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Strategy => "strategy",
            Self::PropertyClaim => "propertyClaim",
            Self::Evidence => "evidence",
            Self::Context => "context",
        }
    }

    /// Returns the upper-case element tag of the tree schema.
    pub fn element_tag(self) -> &'static str {
        match self {
            Self::Goal => "GOAL",
            Self::Strategy => "STRATEGY",
            Self::PropertyClaim => "PROPERTY_CLAIM",
            Self::Evidence => "EVIDENCE",
            Self::Context => "CONTEXT",
        }
    }

    /// Resolves a tree-schema element tag.
    ///
    /// Justifications and assumptions are drawn as context. Unrecognized
    /// tags resolve to [`NodeType::Goal`].
    pub fn from_element_tag(tag: &str) -> Self {
        match tag {
            "GOAL" => Self::Goal,
            "STRATEGY" => Self::Strategy,
            "PROPERTY_CLAIM" => Self::PropertyClaim,
            "EVIDENCE" => Self::Evidence,
            "CONTEXT" | "JUSTIFICATION" | "ASSUMPTION" => Self::Context,
            _ => Self::Goal,
        }
    }

    /// Returns the type a child created from a node of this type usually has.
    pub fn default_child(self) -> Option<Self> {
        match self {
            Self::Goal => Some(Self::Strategy),
            Self::Strategy => Some(Self::PropertyClaim),
            Self::PropertyClaim => Some(Self::Evidence),
            Self::Evidence | Self::Context => None,
        }
    }

    /// Returns a human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Goal => "Goal",
            Self::Strategy => "Strategy",
            Self::PropertyClaim => "Property Claim",
            Self::Evidence => "Evidence",
            Self::Context => "Context",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The element payload carried by a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    name: String,
    element_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    element_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl NodeData {
    pub fn new(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_type: element_type.into(),
            ..Self::default()
        }
    }

    pub fn with_element_id(mut self, element_id: Option<String>) -> Self {
        self.element_id = element_id;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_short_description(mut self, short_description: Option<String>) -> Self {
        self.short_description = short_description;
        self
    }

    pub fn with_long_description(mut self, long_description: Option<String>) -> Self {
        self.long_description = long_description;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A positioned node of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    id: Id,
    #[serde(rename = "type")]
    node_type: NodeType,
    position: Point,
    /// Measured size reported by the rendering surface, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
    data: NodeData,
}

impl GraphNode {
    pub fn new(id: Id, node_type: NodeType, position: Point, data: NodeData) -> Self {
        Self {
            id,
            node_type,
            position,
            size: None,
            data,
        }
    }

    /// Sets the measured size (builder style).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Returns the occupied rectangle, using `default_size` if the node has not been measured.
    pub fn bounds(&self, default_size: Size) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size.unwrap_or(default_size))
    }
}

/// A directed parent→child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    id: Id,
    source: Id,
    target: Id,
}

impl GraphEdge {
    /// Creates an edge whose id is derived from its endpoints.
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            id: Id::new(&format!("e{source}-{target}")),
            source,
            target,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }
}

/// The node/edge set of one diagram.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<Id, GraphNode>,
    edges: Vec<GraphEdge>,
    adjacency: OnceCell<Adjacency>,
}

impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node with the given id, if it exists.
    pub fn node(&self, id: Id) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Returns a mutable reference to the node with the given id, if it exists.
    pub fn node_mut(&mut self, id: Id) -> Option<&mut GraphNode> {
        self.nodes.get_mut(&id)
    }

    /// Returns an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Returns an iterator over all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns the total number of nodes in the graph.
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if a node with the given id exists in the graph.
    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the adjacency index of the current edge set.
    ///
    /// The index is built on first use and reused until an edge is added or removed.
    pub fn adjacency(&self) -> &Adjacency {
        self.adjacency
            .get_or_init(|| Adjacency::from_edges(&self.edges))
    }

    /// Returns an iterator over root nodes (nodes with no incoming edges).
    pub fn roots(&self) -> impl Iterator<Item = &GraphNode> {
        let adjacency = self.adjacency();
        self.nodes
            .values()
            .filter(move |node| !adjacency.has_parents(node.id()))
    }

    /// Returns the ids of the direct children of a node.
    pub fn children(&self, id: Id) -> &[Id] {
        self.adjacency().children(id)
    }

    /// Returns the ids of the direct parents of a node.
    pub fn parents(&self, id: Id) -> &[Id] {
        self.adjacency().parents(id)
    }

    /// Adds a node if no node with the same id exists.
    ///
    /// # Returns
    /// `true` if the node was inserted, `false` if the id was already taken
    /// (the existing node is kept).
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id, node);
        true
    }

    /// Adds a directed edge between two nodes.
    ///
    /// Adding an edge that already exists is a no-op.
    ///
    /// # Returns
    /// The id of the edge.
    ///
    /// # Panics
    /// Panics in debug mode if either endpoint does not exist in the graph.
    /// Edges are only created by the converter and the session, which always
    /// insert endpoints first.
    pub fn add_edge(&mut self, source: Id, target: Id) -> Id {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.nodes.contains_key(&source),
                "Adding edge: Source node {source} does not exist",
            );
            assert!(
                self.nodes.contains_key(&target),
                "Adding edge: Target node {target} does not exist",
            );
        }

        if let Some(existing) = self
            .edges
            .iter()
            .find(|edge| edge.source == source && edge.target == target)
        {
            return existing.id;
        }

        let mut edge = GraphEdge::new(source, target);
        if self.has_edge_id(edge.id) {
            // Hyphenated ids can make two pairs spell the same edge id
            let base = edge.id;
            edge.id = (2..)
                .map(|n| base.create_suffixed(n))
                .find(|id| !self.has_edge_id(*id))
                .unwrap_or(base);
            debug!(edge = edge.id.to_string(); "Edge id already taken, using suffixed id");
        }

        self.edges.push(edge);
        self.adjacency.take();
        edge.id
    }

    fn has_edge_id(&self, id: Id) -> bool {
        self.edges.iter().any(|edge| edge.id == id)
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: Id) -> Option<GraphNode> {
        let removed = self.nodes.shift_remove(&id)?;
        let before = self.edges.len();
        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        if self.edges.len() != before {
            self.adjacency.take();
        }
        Some(removed)
    }

    /// Removes a node together with all of its descendants.
    ///
    /// # Returns
    /// The removed node ids in breadth-first order, starting with `id`.
    /// Empty if the node does not exist.
    pub fn remove_subtree(&mut self, id: Id) -> Vec<Id> {
        if !self.contains_node(id) {
            return Vec::new();
        }

        let doomed: IndexSet<Id> = self.adjacency().descendants_of(id);
        self.nodes.retain(|node_id, _| !doomed.contains(node_id));
        self.edges
            .retain(|edge| !doomed.contains(&edge.source) && !doomed.contains(&edge.target));
        self.adjacency.take();
        doomed.into_iter().collect()
    }
}
