//! Breadth-first traversal over the diagram's edge list.
//!
//! [`ancestors_of`] walks incoming edges (a node's parents) and
//! [`descendants_of`] walks outgoing edges (a node's children). Both include
//! the start node, return ids in breadth-first discovery order, and terminate
//! on any finite edge set, cycles included, because a node is never enqueued
//! twice.

use std::collections::{HashMap, VecDeque};

use indexmap::IndexSet;

use assay_core::identifier::Id;

use crate::graph::GraphEdge;

/// Incoming and outgoing neighbour lists per node, built from an edge list.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    incoming: HashMap<Id, Vec<Id>>,
    outgoing: HashMap<Id, Vec<Id>>,
}

impl Adjacency {
    /// Builds the index from a set of directed edges.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a GraphEdge>) -> Self {
        let mut adjacency = Self::default();
        for edge in edges {
            adjacency
                .outgoing
                .entry(edge.source())
                .or_default()
                .push(edge.target());
            adjacency
                .incoming
                .entry(edge.target())
                .or_default()
                .push(edge.source());
        }
        adjacency
    }

    /// Returns the sources of edges that end at `id`.
    pub fn parents(&self, id: Id) -> &[Id] {
        self.incoming.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the targets of edges that start at `id`.
    pub fn children(&self, id: Id) -> &[Id] {
        self.outgoing.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if any edge ends at `id`.
    pub fn has_parents(&self, id: Id) -> bool {
        self.incoming.contains_key(&id)
    }

    /// Returns `id` and every node it can be reached from.
    pub fn ancestors_of(&self, id: Id) -> IndexSet<Id> {
        breadth_first(id, |current| self.parents(current))
    }

    /// Returns `id` and every node reachable from it.
    pub fn descendants_of(&self, id: Id) -> IndexSet<Id> {
        breadth_first(id, |current| self.children(current))
    }
}

/// Returns `id` and all of its ancestors in `edges`.
///
/// # Examples
///
/// ```
/// # use assay::{graph::GraphEdge, traversal::ancestors_of};
/// # use assay_core::identifier::Id;
/// let edges = [
///     GraphEdge::new(Id::new("A"), Id::new("B")),
///     GraphEdge::new(Id::new("B"), Id::new("C")),
/// ];
/// let ancestors = ancestors_of(Id::new("C"), &edges);
/// assert_eq!(ancestors.len(), 3);
/// ```
pub fn ancestors_of(id: Id, edges: &[GraphEdge]) -> IndexSet<Id> {
    Adjacency::from_edges(edges).ancestors_of(id)
}

/// Returns `id` and all of its descendants in `edges`.
pub fn descendants_of(id: Id, edges: &[GraphEdge]) -> IndexSet<Id> {
    Adjacency::from_edges(edges).descendants_of(id)
}

fn breadth_first<'a, F>(start: Id, next: F) -> IndexSet<Id>
where
    F: Fn(Id) -> &'a [Id],
{
    let mut visited = IndexSet::new();
    let mut frontier = VecDeque::new();

    visited.insert(start);
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        for &neighbour in next(current) {
            if visited.insert(neighbour) {
                frontier.push_back(neighbour);
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<GraphEdge> {
        pairs
            .iter()
            .map(|(source, target)| GraphEdge::new(Id::new(source), Id::new(target)))
            .collect()
    }

    fn ids(names: &[&str]) -> IndexSet<Id> {
        names.iter().map(|name| Id::new(name)).collect()
    }

    #[test]
    fn test_chain() {
        let edges = edges(&[("A", "B"), ("B", "C")]);

        assert_eq!(ancestors_of(Id::new("C"), &edges), ids(&["C", "B", "A"]));
        assert_eq!(descendants_of(Id::new("A"), &edges), ids(&["A", "B", "C"]));
        assert_eq!(descendants_of(Id::new("C"), &edges), ids(&["C"]));
    }

    #[test]
    fn test_breadth_first_order() {
        let edges = edges(&[("R", "A"), ("R", "B"), ("A", "A1"), ("B", "B1")]);

        let order: Vec<Id> = descendants_of(Id::new("R"), &edges).into_iter().collect();
        assert_eq!(
            order,
            vec![
                Id::new("R"),
                Id::new("A"),
                Id::new("B"),
                Id::new("A1"),
                Id::new("B1")
            ]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let edges = edges(&[("A", "B"), ("B", "A")]);

        let ancestors = ancestors_of(Id::new("A"), &edges);
        let descendants = descendants_of(Id::new("A"), &edges);

        assert_eq!(ancestors.len(), 2);
        assert_eq!(descendants.len(), 2);
        assert_eq!(ancestors, ids(&["A", "B"]));
        assert_eq!(descendants, ids(&["A", "B"]));
    }

    #[test]
    fn test_self_loop_terminates() {
        let edges = edges(&[("A", "A")]);
        assert_eq!(descendants_of(Id::new("A"), &edges), ids(&["A"]));
    }

    #[test]
    fn test_diamond_visits_shared_node_once() {
        let edges = edges(&[("T", "L"), ("T", "R"), ("L", "B"), ("R", "B")]);

        assert_eq!(descendants_of(Id::new("T"), &edges).len(), 4);
        assert_eq!(ancestors_of(Id::new("B"), &edges), ids(&["B", "L", "R", "T"]));
    }

    #[test]
    fn test_unknown_node_is_its_own_result() {
        let edges = edges(&[("A", "B")]);
        assert_eq!(ancestors_of(Id::new("Z"), &edges), ids(&["Z"]));
        assert_eq!(descendants_of(Id::new("Z"), &[]), ids(&["Z"]));
    }

    #[test]
    fn test_adjacency_lists() {
        let adjacency = Adjacency::from_edges(&edges(&[("A", "B"), ("A", "C"), ("D", "C")]));

        assert_eq!(adjacency.children(Id::new("A")), &[Id::new("B"), Id::new("C")]);
        assert_eq!(adjacency.parents(Id::new("C")), &[Id::new("A"), Id::new("D")]);
        assert!(adjacency.has_parents(Id::new("B")));
        assert!(!adjacency.has_parents(Id::new("A")));
        assert!(adjacency.children(Id::new("missing")).is_empty());
    }
}
