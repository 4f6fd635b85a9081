//! Conversion of assurance-case documents into positioned diagram graphs.
//!
//! The two document schemas have their own layout presets:
//!
//! - legacy documents are laid out on a fixed grid: goal on top, context to
//!   the right of the goal, one strategy column each, and claims and
//!   evidence two per row under their parent;
//! - tree documents use a centered tree layout where the children of a node
//!   are spread symmetrically one row below it.
//!
//! Both presets are pure integer-step arithmetic over element indices, so
//! converting the same document twice yields identical graphs. A document
//! without a root element converts to an empty graph.

mod legacy;
mod tree;

pub use legacy::convert_legacy;
pub use tree::convert_tree;

use log::info;

use assay_core::identifier::Id;
use assay_document::{Document, element::ElementId};

use crate::graph::{Graph, NodeType};

/// Converts a document of either schema into a graph.
pub fn convert(document: &Document) -> Graph {
    let graph = match document {
        Document::Legacy(case) => convert_legacy(case),
        Document::Tree(tree) => convert_tree(tree),
    };
    info!(
        schema = document.schema().to_string(),
        nodes = graph.nodes_count(),
        edges = graph.edges().len();
        "Converted document to graph"
    );
    graph
}

/// Builds the id of a converted node from its type and element id.
///
/// Elements without an id use their index path instead, e.g. `claim-0.1`
/// for the second claim of the first strategy.
fn node_id(node_type: NodeType, element_id: Option<&ElementId>, index_path: &[usize]) -> Id {
    match element_id {
        Some(element_id) => Id::new(&format!("{node_type}-{element_id}")),
        None => {
            let path = index_path
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(".");
            Id::new(&format!("{node_type}-{path}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        assert_eq!(
            node_id(NodeType::Goal, Some(&ElementId::from(7_i64)), &[0]),
            "goal-7"
        );
        assert_eq!(
            node_id(NodeType::PropertyClaim, Some(&ElementId::from("C-1")), &[0, 1]),
            "propertyClaim-C-1"
        );
        assert_eq!(node_id(NodeType::Evidence, None, &[1, 0, 2]), "evidence-1.0.2");
    }

    #[test]
    fn test_empty_documents() {
        let legacy = Document::parse(r#"{ "goals": [] }"#).unwrap();
        assert!(convert(&legacy).is_empty());

        let tree = Document::parse(r#"{ "version": "1.0", "tree": null }"#).unwrap();
        assert!(convert(&tree).is_empty());
    }
}
