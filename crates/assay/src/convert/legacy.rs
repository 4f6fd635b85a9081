//! Fixed-grid layout preset for legacy documents.

use log::debug;

use assay_core::{geometry::Point, identifier::Id};
use assay_document::{
    ElementInfo, LegacyCase,
    legacy::{Evidence, PropertyClaim, Strategy},
};

use super::node_id;
use crate::graph::{Graph, GraphNode, NodeData, NodeType};

const GOAL_POSITION: Point = Point::new(400.0, 50.0);

const CONTEXT_START_X: f32 = 750.0;
const CONTEXT_SPACING: f32 = 300.0;

const STRATEGY_START_X: f32 = 100.0;
const STRATEGY_Y: f32 = 250.0;
const STRATEGY_SPACING: f32 = 400.0;

const CLAIM_OFFSET_X: f32 = -100.0;
const CLAIM_COLUMN_WIDTH: f32 = 220.0;
const CLAIM_OFFSET_Y: f32 = 180.0;
const CLAIM_ROW_HEIGHT: f32 = 150.0;

const EVIDENCE_OFFSET_X: f32 = -90.0;
const EVIDENCE_COLUMN_WIDTH: f32 = 200.0;
const EVIDENCE_OFFSET_Y: f32 = 150.0;
const EVIDENCE_ROW_HEIGHT: f32 = 130.0;

/// Converts a legacy case, rooted at its first goal.
///
/// Every strategy, claim and evidence item gets an edge from its owner, and
/// so does every context entry of the goal. Elements that share an id with an
/// earlier element reuse the earlier node and only contribute the edge.
pub fn convert_legacy(case: &LegacyCase) -> Graph {
    let mut graph = Graph::new();
    let Some(goal) = case.root_goal() else {
        debug!("Legacy case has no goals");
        return graph;
    };
    if case.goals().len() > 1 {
        debug!(ignored = case.goals().len() - 1; "Only the first goal is converted");
    }

    let goal_id = add_element(
        &mut graph,
        NodeType::Goal,
        goal.info(),
        &[0],
        GOAL_POSITION,
        None,
    );

    for (i, context) in goal.context().iter().enumerate() {
        let position = Point::new(
            CONTEXT_START_X + i as f32 * CONTEXT_SPACING,
            GOAL_POSITION.y(),
        );
        add_element(
            &mut graph,
            NodeType::Context,
            context.info(),
            &[0, i],
            position,
            Some(goal_id),
        );
    }

    for (s, strategy) in goal.strategies().iter().enumerate() {
        add_strategy(&mut graph, goal_id, s, strategy);
    }

    graph
}

fn add_strategy(graph: &mut Graph, goal_id: Id, index: usize, strategy: &Strategy) {
    let position = Point::new(
        STRATEGY_START_X + index as f32 * STRATEGY_SPACING,
        STRATEGY_Y,
    );
    let strategy_id = add_element(
        graph,
        NodeType::Strategy,
        strategy.info(),
        &[index],
        position,
        Some(goal_id),
    );

    for (c, claim) in strategy.property_claims().iter().enumerate() {
        add_claim(graph, (strategy_id, position), [index, c], claim);
    }
}

fn add_claim(graph: &mut Graph, parent: (Id, Point), path: [usize; 2], claim: &PropertyClaim) {
    let (strategy_id, strategy_position) = parent;
    let index = path[1];
    let position = two_per_row(
        strategy_position,
        index,
        (CLAIM_OFFSET_X, CLAIM_COLUMN_WIDTH),
        (CLAIM_OFFSET_Y, CLAIM_ROW_HEIGHT),
    );
    let claim_id = add_element(
        graph,
        NodeType::PropertyClaim,
        claim.info(),
        &path,
        position,
        Some(strategy_id),
    );

    for (e, evidence) in claim.evidence().iter().enumerate() {
        add_evidence(graph, (claim_id, position), [path[0], index, e], evidence);
    }
}

fn add_evidence(graph: &mut Graph, parent: (Id, Point), path: [usize; 3], evidence: &Evidence) {
    let (claim_id, claim_position) = parent;
    let index = path[2];
    let position = two_per_row(
        claim_position,
        index,
        (EVIDENCE_OFFSET_X, EVIDENCE_COLUMN_WIDTH),
        (EVIDENCE_OFFSET_Y, EVIDENCE_ROW_HEIGHT),
    );
    let id = node_id(NodeType::Evidence, evidence.info().id(), &path);
    let data = element_data(NodeType::Evidence, evidence.info())
        .with_url(evidence.url().map(str::to_string));
    insert(graph, GraphNode::new(id, NodeType::Evidence, position, data), Some(claim_id));
}

/// Places item `index` of a two-column block anchored below `parent`.
fn two_per_row(parent: Point, index: usize, column: (f32, f32), row: (f32, f32)) -> Point {
    let (offset_x, column_width) = column;
    let (offset_y, row_height) = row;
    Point::new(
        parent.x() + offset_x + (index % 2) as f32 * column_width,
        parent.y() + offset_y + (index / 2) as f32 * row_height,
    )
}

fn add_element(
    graph: &mut Graph,
    node_type: NodeType,
    info: &ElementInfo,
    path: &[usize],
    position: Point,
    parent: Option<Id>,
) -> Id {
    let id = node_id(node_type, info.id(), path);
    let node = GraphNode::new(id, node_type, position, element_data(node_type, info));
    insert(graph, node, parent)
}

fn element_data(node_type: NodeType, info: &ElementInfo) -> NodeData {
    NodeData::new(info.name(), node_type.element_tag())
        .with_element_id(info.id().map(ToString::to_string))
        .with_short_description(info.short_description().map(str::to_string))
        .with_long_description(info.long_description().map(str::to_string))
}

fn insert(graph: &mut Graph, node: GraphNode, parent: Option<Id>) -> Id {
    let id = node.id();
    if !graph.add_node(node) {
        debug!(id = id.to_string(); "Duplicate element id, reusing existing node");
    }
    if let Some(parent) = parent {
        graph.add_edge(parent, id);
    }
    id
}
