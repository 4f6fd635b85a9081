//! The render pass: the full graph annotated with visibility.
//!
//! Hidden nodes are flagged, never removed. A node is visible if it is a root
//! or if at least one of its parents is visible and expanded. Nodes that are
//! only reachable through a cycle with no root are hidden.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde::Serialize;

use assay_core::identifier::Id;

use crate::{
    graph::{Graph, GraphEdge, GraphNode},
    visibility::{SnapshotStore, VisibilityStore},
};

/// A node as handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    #[serde(flatten)]
    node: GraphNode,
    hidden: bool,
    expanded: bool,
    /// Number of direct children that are currently hidden.
    hidden_children: usize,
}

impl RenderedNode {
    pub fn node(&self) -> &GraphNode {
        &self.node
    }

    pub fn id(&self) -> Id {
        self.node.id()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn hidden_children(&self) -> usize {
        self.hidden_children
    }
}

/// An edge as handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderedEdge {
    #[serde(flatten)]
    edge: GraphEdge,
    hidden: bool,
}

impl RenderedEdge {
    pub fn edge(&self) -> GraphEdge {
        self.edge
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Every node and edge of a graph with its visibility flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedGraph {
    nodes: Vec<RenderedNode>,
    edges: Vec<RenderedEdge>,
}

impl RenderedGraph {
    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderedEdge] {
        &self.edges
    }

    pub fn node(&self, id: Id) -> Option<&RenderedNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Returns the ids of the visible nodes in graph order.
    pub fn visible_ids(&self) -> Vec<Id> {
        self.nodes
            .iter()
            .filter(|node| !node.hidden)
            .map(RenderedNode::id)
            .collect()
    }
}

/// Computes the ids of the visible nodes.
pub fn visible_nodes<S: SnapshotStore>(graph: &Graph, visibility: &VisibilityStore<S>) -> IndexSet<Id> {
    let mut visible: IndexSet<Id> = graph.roots().map(GraphNode::id).collect();
    let mut frontier: VecDeque<Id> = visible.iter().copied().collect();

    while let Some(current) = frontier.pop_front() {
        if !visibility.is_expanded(current) {
            continue;
        }
        for &child in graph.children(current) {
            if visible.insert(child) {
                frontier.push_back(child);
            }
        }
    }

    visible
}

/// Annotates every node and edge of `graph` with the state in `visibility`.
pub fn render<S: SnapshotStore>(graph: &Graph, visibility: &VisibilityStore<S>) -> RenderedGraph {
    let visible = visible_nodes(graph, visibility);

    let nodes = graph
        .nodes()
        .map(|node| RenderedNode {
            node: node.clone(),
            hidden: !visible.contains(&node.id()),
            expanded: visibility.is_expanded(node.id()),
            hidden_children: graph
                .children(node.id())
                .iter()
                .filter(|child| !visible.contains(*child))
                .count(),
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| RenderedEdge {
            edge: *edge,
            hidden: !(visible.contains(&edge.source()) && visible.contains(&edge.target())),
        })
        .collect();

    RenderedGraph { nodes, edges }
}
