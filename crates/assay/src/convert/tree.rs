//! Centered tree layout preset for tree documents.

use log::debug;

use assay_core::{geometry::Point, identifier::Id};
use assay_document::{TreeDocument, TreeNode};

use super::node_id;
use crate::graph::{Graph, GraphNode, NodeData, NodeType};

const ROOT_POSITION: Point = Point::new(400.0, 50.0);
const SIBLING_SPACING: f32 = 300.0;
const ROW_HEIGHT: f32 = 180.0;

struct Visit<'a> {
    element: &'a TreeNode,
    /// Ids from the root down to the parent of `element`.
    lineage: Vec<Id>,
    position: Point,
    path: Vec<usize>,
}

/// Converts a tree document.
///
/// The `n` children of a node at `(x, y)` are placed at
/// `x - (n - 1)·spacing/2 + i·spacing` on row `y + row_height`. Nodes are
/// visited in pre-order without recursion, so deep trees are safe.
///
/// An element whose id was already emitted reuses that node and is linked to
/// its parent, but its children are not visited again. It is not linked at
/// all if it repeats one of its own ancestors, so the graph stays acyclic.
pub fn convert_tree(document: &TreeDocument) -> Graph {
    let mut graph = Graph::new();
    let Some(root) = document.root() else {
        debug!("Tree document has no root");
        return graph;
    };

    let mut stack = vec![Visit {
        element: root,
        lineage: Vec::new(),
        position: ROOT_POSITION,
        path: vec![0],
    }];

    while let Some(visit) = stack.pop() {
        let node_type = NodeType::from_element_tag(visit.element.element_type());
        let id = node_id(node_type, visit.element.id(), &visit.path);
        let data = NodeData::new(visit.element.name(), visit.element.element_type())
            .with_element_id(visit.element.id().map(ToString::to_string))
            .with_description(visit.element.description().map(str::to_string));

        let inserted = graph.add_node(GraphNode::new(id, node_type, visit.position, data));
        if visit.lineage.contains(&id) {
            debug!(id = id.to_string(); "Tree node repeats an ancestor id, skipping");
            continue;
        }
        if let Some(&parent) = visit.lineage.last() {
            graph.add_edge(parent, id);
        }
        if !inserted {
            debug!(id = id.to_string(); "Duplicate tree node id, reusing existing node");
            continue;
        }

        let children = visit.element.children();
        let first_x = visit.position.x() - (children.len() as f32 - 1.0) * SIBLING_SPACING / 2.0;
        let y = visit.position.y() + ROW_HEIGHT;
        let mut lineage = visit.lineage;
        lineage.push(id);
        for (i, child) in children.iter().enumerate().rev() {
            let mut path = visit.path.clone();
            path.push(i);
            stack.push(Visit {
                element: child,
                lineage: lineage.clone(),
                position: Point::new(first_x + i as f32 * SIBLING_SPACING, y),
                path,
            });
        }
    }

    graph
}
