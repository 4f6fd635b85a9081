//! The gesture surface of an interactive diagram.
//!
//! A [`DiagramSession`] owns the graph of one diagram together with its
//! visibility state, and translates user gestures into graph, visibility
//! and placement operations. The rendering surface calls
//! [`DiagramSession::render`] after each gesture to get what to draw.

use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use assay_core::{geometry::Point, identifier::Id};
use assay_document::Document;

use crate::{
    config::AppConfig,
    convert::convert,
    error::AssayError,
    graph::{Graph, GraphNode, NodeData, NodeType},
    placement::{
        ConnectionHint, Direction, Occupancy, PlacementSolver, SnapPipeline, SnapResult,
        calculate_connection_hints,
    },
    render::{RenderedGraph, render},
    visibility::{BulkOp, MemoryStore, SnapshotStore, VisibilityStore},
};

/// What a double click landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoubleClickTarget {
    Node(Id),
    /// Empty canvas at the given diagram coordinates.
    Pane(Point),
}

/// The effect of a double click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoubleClickOutcome {
    /// The path to the node and its subtree were expanded.
    Revealed { expanded: usize },
    /// A node may be created at this position.
    CreateAt(Point),
}

/// Where a node dragged out of a connection handle would land.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectDrop {
    position: Point,
    hints: Vec<ConnectionHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_type: Option<NodeType>,
}

impl ConnectDrop {
    /// The snapped, non-overlapping top-left position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Nearby nodes, nearest first.
    pub fn hints(&self) -> &[ConnectionHint] {
        &self.hints
    }

    /// The usual child type of the source node, if it has one.
    pub fn suggested_type(&self) -> Option<NodeType> {
        self.suggested_type
    }
}

/// One interactive diagram: its graph, its visibility state and its placement settings.
#[derive(Debug)]
pub struct DiagramSession<S = MemoryStore> {
    graph: Graph,
    visibility: VisibilityStore<S>,
    solver: PlacementSolver,
    snap: SnapPipeline,
}

impl<S: SnapshotStore> DiagramSession<S> {
    /// Creates a session with an empty graph.
    ///
    /// The visibility state is restored from `snapshots` if the configuration
    /// names a snapshot key.
    pub fn new(config: &AppConfig, snapshots: S) -> Self {
        Self {
            graph: Graph::new(),
            visibility: VisibilityStore::new(config.visibility().to_options(), snapshots),
            solver: PlacementSolver::new(config.placement().clone()),
            snap: SnapPipeline::from_config(config.placement()),
        }
    }

    /// Creates a session and loads `document` into it.
    pub fn from_document(config: &AppConfig, snapshots: S, document: &Document) -> Self {
        let mut session = Self::new(config, snapshots);
        session.load(document);
        session
    }

    /// Replaces the graph with the conversion of `document`.
    ///
    /// The visibility state is kept, so a reload preserves expansion.
    pub fn load(&mut self, document: &Document) {
        self.graph = convert(document);
        info!(nodes = self.graph.nodes_count(); "Loaded document into session");
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn visibility(&self) -> &VisibilityStore<S> {
        &self.visibility
    }

    /// Returns the graph annotated with the current visibility.
    pub fn render(&self) -> RenderedGraph {
        render(&self.graph, &self.visibility)
    }

    /// Toggles the expansion of a node. Returns the new state.
    pub fn on_node_click(&mut self, id: Id) -> Result<bool, AssayError> {
        self.require(id)?;
        Ok(self.visibility.toggle(id))
    }

    /// Reveals a node (its path from the root and its subtree), or proposes a
    /// creation point on empty canvas.
    pub fn on_double_click(&mut self, target: DoubleClickTarget) -> Result<DoubleClickOutcome, AssayError> {
        match target {
            DoubleClickTarget::Node(id) => {
                self.require(id)?;
                let adjacency = self.graph.adjacency();
                let mut ids = adjacency.ancestors_of(id);
                ids.extend(adjacency.descendants_of(id));
                let expanded = ids.len();
                self.visibility.expand_many(ids);
                Ok(DoubleClickOutcome::Revealed { expanded })
            }
            DoubleClickTarget::Pane(point) => Ok(DoubleClickOutcome::CreateAt(self.place(point))),
        }
    }

    /// Computes where a node dropped at `release` from a connection on `source` would land.
    pub fn on_connect_drag_end(&self, source: Id, release: Point) -> Result<ConnectDrop, AssayError> {
        let source_node = self.require(source)?;
        let position = self.place(release);

        let center = position.add_point(self.solver.config().node_size().half());
        let hints = calculate_connection_hints(
            center,
            &self.occupancy(),
            self.solver.config().hint_max_distance(),
        );

        Ok(ConnectDrop {
            position,
            hints,
            suggested_type: source_node.node_type().default_child(),
        })
    }

    /// Creates a node of `node_type` and returns its id.
    ///
    /// A given `position` is snapped and moved off other nodes. Without one,
    /// the node goes below `parent`, or to the default position when there is
    /// no parent. The parent gets an edge to the new node and is expanded so
    /// that the node is visible.
    pub fn on_node_create_request(
        &mut self,
        node_type: NodeType,
        position: Option<Point>,
        parent: Option<Id>,
    ) -> Result<Id, AssayError> {
        let parent_position = match parent {
            Some(parent) => Some(self.require(parent)?.position()),
            None => None,
        };

        let position = match (position, parent_position) {
            (Some(position), _) => self.place(position),
            (None, Some(parent_position)) => self.solver.calculate_smart_position(
                &[parent_position],
                &self.occupancy(),
                self.solver.config().node_size(),
                Direction::Auto,
            ),
            (None, None) => {
                let default_position = self.solver.config().default_position();
                self.solver.find_non_overlapping_position(
                    default_position,
                    &self.occupancy(),
                    self.solver.config().node_size(),
                )
            }
        };

        let id = self.generate_id(node_type);
        let data = NodeData::new(format!("New {}", node_type.label()), node_type.element_tag());
        self.graph.add_node(GraphNode::new(id, node_type, position, data));

        if let Some(parent) = parent {
            self.graph.add_edge(parent, id);
            self.visibility.expand(parent);
        }

        debug!(id = id.to_string(), node_type = node_type.as_str(); "Created node");
        Ok(id)
    }

    /// Moves a node to `position` after snapping it. Returns the snap result.
    pub fn move_node(&mut self, id: Id, position: Point) -> Result<SnapResult, AssayError> {
        self.require(id)?;
        let size = self
            .graph
            .node(id)
            .and_then(GraphNode::size)
            .unwrap_or(self.solver.config().node_size());
        let result = self.snap.snap(position, size, &self.occupancy(), Some(id));

        if let Some(node) = self.graph.node_mut(id) {
            node.set_position(result.position());
        }
        Ok(result)
    }

    /// Deletes a node and its subtree. Returns the removed ids.
    pub fn delete_node(&mut self, id: Id) -> Result<Vec<Id>, AssayError> {
        self.require(id)?;
        let removed = self.graph.remove_subtree(id);
        debug!(removed = removed.len(); "Deleted subtree");
        Ok(removed)
    }

    /// Expands a node and every ancestor.
    pub fn reveal_path(&mut self, id: Id) -> Result<(), AssayError> {
        self.require(id)?;
        self.visibility.expand_path_to_node(id, self.graph.adjacency());
        Ok(())
    }

    /// Expands a node and every descendant.
    pub fn reveal_subtree(&mut self, id: Id) -> Result<(), AssayError> {
        self.require(id)?;
        self.visibility.expand_subtree(id, self.graph.adjacency());
        Ok(())
    }

    /// Collapses every node of the diagram except `ids`.
    pub fn focus(&mut self, ids: &[Id]) {
        let all: Vec<Id> = self.graph.node_ids().collect();
        self.visibility.focus_mode(ids, &all);
    }

    /// Expands every node of the diagram.
    pub fn expand_all(&mut self) {
        let all: Vec<Id> = self.graph.node_ids().collect();
        self.visibility.expand_all(Some(&all));
    }

    /// Collapses every node of the diagram.
    pub fn collapse_all(&mut self) {
        let all: Vec<Id> = self.graph.node_ids().collect();
        self.visibility.collapse_all(Some(&all));
    }

    pub fn reset_visibility(&mut self) {
        self.visibility.reset();
    }

    /// Defers a focus on `ids`, replacing any pending bulk operation.
    pub fn schedule_focus(&mut self, ids: Vec<Id>, now: Instant) {
        let all = self.graph.node_ids().collect();
        self.visibility
            .schedule(BulkOp::FocusMode { focus: ids, all }, now);
    }

    /// Applies a deferred bulk operation if it is due. Returns true if one was applied.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.visibility.poll(now)
    }

    fn require(&self, id: Id) -> Result<&GraphNode, AssayError> {
        self.graph.node(id).ok_or(AssayError::UnknownNode(id))
    }

    fn occupancy(&self) -> Occupancy {
        Occupancy::from_nodes(self.graph.nodes(), self.solver.config().node_size())
    }

    /// Snaps `position` and moves it off existing nodes.
    fn place(&self, position: Point) -> Point {
        let occupancy = self.occupancy();
        let node_size = self.solver.config().node_size();
        let snapped = self.snap.snap(position, node_size, &occupancy, None);
        self.solver
            .find_non_overlapping_position(snapped.position(), &occupancy, node_size)
    }

    /// Returns `<type>-<n>` for the smallest `n` not taken yet, counting from the node count.
    fn generate_id(&self, node_type: NodeType) -> Id {
        let base = Id::new(node_type.as_str());
        (self.graph.nodes_count() + 1..)
            .map(|n| base.create_suffixed(n))
            .find(|id| !self.graph.contains_node(*id))
            .unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use assay_core::geometry::{Bounds, Size};

    use super::*;
    use crate::config::PlacementConfig;

    const SAMPLE: &str = r#"{
        "version": "1.0",
        "tree": { "id": "G1", "type": "GOAL", "name": "Safe", "children": [
            { "id": "S1", "type": "STRATEGY", "name": "Hazards", "children": [
                { "id": "P1", "type": "PROPERTY_CLAIM", "name": "H1", "children": [
                    { "id": "E1", "type": "EVIDENCE", "name": "Report" } ] } ] } ] }
    }"#;

    fn session() -> DiagramSession {
        let document = Document::parse(SAMPLE).unwrap();
        DiagramSession::from_document(&AppConfig::default(), MemoryStore::new(), &document)
    }

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    #[test]
    fn test_click_toggles() {
        let mut session = session();
        assert!(session.on_node_click(id("goal-G1")).unwrap());
        assert_eq!(session.render().visible_ids().len(), 2);

        assert!(!session.on_node_click(id("goal-G1")).unwrap());
        assert_eq!(session.render().visible_ids().len(), 1);
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let mut session = session();
        assert!(matches!(
            session.on_node_click(id("nope")),
            Err(AssayError::UnknownNode(unknown)) if unknown == "nope"
        ));
        assert!(session.on_node_create_request(NodeType::Goal, None, Some(id("nope"))).is_err());
        assert_eq!(session.graph().nodes_count(), 4);
    }

    #[test]
    fn test_double_click_node_reveals_path_and_subtree() {
        let mut session = session();
        let outcome = session.on_double_click(DoubleClickTarget::Node(id("strategy-S1"))).unwrap();

        assert_eq!(outcome, DoubleClickOutcome::Revealed { expanded: 4 });
        assert_eq!(session.render().visible_ids().len(), 4);
    }

    #[test]
    fn test_double_click_pane_is_snapped() {
        let mut session = session();

        let outcome = session
            .on_double_click(DoubleClickTarget::Pane(Point::new(1503.0, 1497.0)))
            .unwrap();

        assert_eq!(outcome, DoubleClickOutcome::CreateAt(Point::new(1500.0, 1500.0)));
    }

    #[test]
    fn test_connect_drop() {
        let session = session();

        // Grid snap moves y to 60, then the goal's center row pulls it back to 50.
        let drop = session
            .on_connect_drag_end(id("goal-G1"), Point::new(702.0, 53.0))
            .unwrap();

        assert_eq!(drop.position(), Point::new(700.0, 50.0));
        let size = PlacementConfig::default().node_size();
        let occupancy = Occupancy::from_nodes(session.graph().nodes(), size);
        assert!(occupancy.is_free(Bounds::new_from_top_left(drop.position(), size), 20.0));
        assert_eq!(drop.suggested_type(), Some(NodeType::Strategy));

        let hinted: Vec<Id> = drop.hints().iter().map(ConnectionHint::node_id).collect();
        assert_eq!(hinted, vec![id("goal-G1"), id("strategy-S1")]);
        assert_eq!(drop.hints()[0].direction(), crate::placement::CompassDirection::Left);
    }

    #[test]
    fn test_connect_drop_on_top_of_source_moves_away() {
        let session = session();
        let goal = session.graph().node(id("goal-G1")).unwrap().position();

        let drop = session.on_connect_drag_end(id("goal-G1"), goal).unwrap();

        assert_ne!(drop.position(), goal);
    }

    #[test]
    fn test_create_below_parent() {
        let mut session = session();

        let created = session
            .on_node_create_request(NodeType::Evidence, None, Some(id("propertyClaim-P1")))
            .unwrap();

        assert_eq!(created, "evidence-5");
        assert_eq!(session.graph().parents(created), &[id("propertyClaim-P1")]);
        assert!(session.visibility().is_expanded(id("propertyClaim-P1")));

        let node = session.graph().node(created).unwrap();
        assert_eq!(node.data().name(), "New Evidence");
        let size = Size::new(250.0, 100.0);
        let others = Occupancy::from_nodes(
            session.graph().nodes().filter(|node| node.id() != created),
            size,
        );
        assert!(others.is_free(node.bounds(size), 20.0));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut session = session();
        let first = session.on_node_create_request(NodeType::Goal, None, None).unwrap();
        let second = session.on_node_create_request(NodeType::Goal, None, None).unwrap();
        assert_ne!(first, second);
        assert_eq!(session.graph().nodes_count(), 6);
    }

    #[test]
    fn test_move_node_snaps() {
        let mut session = session();
        let result = session.move_node(id("evidence-E1"), Point::new(1011.0, 2009.0)).unwrap();

        assert_eq!(result.position(), Point::new(1020.0, 2000.0));
        assert_eq!(
            session.graph().node(id("evidence-E1")).unwrap().position(),
            Point::new(1020.0, 2000.0)
        );
    }

    #[test]
    fn test_delete_node_removes_subtree() {
        let mut session = session();
        let removed = session.delete_node(id("strategy-S1")).unwrap();

        assert_eq!(removed.len(), 3);
        assert_eq!(session.graph().nodes_count(), 1);
        assert!(session.graph().edges().is_empty());
    }

    #[test]
    fn test_focus_and_expand_all() {
        let mut session = session();
        session.expand_all();
        assert_eq!(session.render().visible_ids().len(), 4);

        session.focus(&[id("goal-G1")]);
        let rendered = session.render();
        assert_eq!(rendered.visible_ids(), vec![id("goal-G1"), id("strategy-S1")]);

        session.collapse_all();
        assert_eq!(session.render().visible_ids().len(), 1);

        session.reset_visibility();
        assert!(session.visibility().snapshot().is_empty());
    }

    #[test]
    fn test_scheduled_focus() {
        let now = Instant::now();
        let mut session = session();
        session.expand_all();

        session.schedule_focus(vec![id("strategy-S1")], now);
        assert_eq!(session.render().visible_ids().len(), 4);

        assert!(session.poll(now + session.visibility().options().debounce()));
        assert_eq!(session.render().visible_ids(), vec![id("goal-G1")]);
    }
}
