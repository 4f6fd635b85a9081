//! Placement of new and moved nodes.
//!
//! This module decides where a node lands when the user creates, connects or
//! drags one. It never moves existing nodes; it only picks a position for
//! the node being placed.
//!
//! - [`PlacementSolver::resolve_position`] - spiral search for a nearby free spot
//! - [`PlacementSolver::calculate_smart_position`] - direction-aware placement
//!   relative to source nodes
//! - [`calculate_connection_hints`] - advisory nearest-node hints
//! - [`SnapPipeline`] - grid snap followed by magnetic alignment snap
//!
//! Overlap avoidance is best-effort: after the configured number of spiral
//! candidates the solver returns a deterministic fallback position.

mod alignment;
mod hints;
mod smart;
mod spiral;

pub use alignment::{AlignmentGuides, SnapPipeline, SnapResult, find_alignment_guides};
pub use hints::{CompassDirection, ConnectionHint, MAX_HINTS, calculate_connection_hints};
pub use smart::Direction;
pub use spiral::{Placement, PlacementOutcome};

use assay_core::{
    geometry::{Bounds, Size},
    identifier::Id,
};

use crate::{config::PlacementConfig, graph::GraphNode};

/// The rectangles occupied by existing nodes.
///
/// Built fresh for each placement request and never stored.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    rects: Vec<(Id, Bounds)>,
}

impl Occupancy {
    /// Collects the rectangles of `nodes`, using `default_size` for unmeasured nodes.
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a GraphNode>, default_size: Size) -> Self {
        Self {
            rects: nodes
                .into_iter()
                .map(|node| (node.id(), node.bounds(default_size)))
                .collect(),
        }
    }

    /// Creates an occupancy from explicit rectangles.
    pub fn from_rects(rects: impl IntoIterator<Item = (Id, Bounds)>) -> Self {
        Self {
            rects: rects.into_iter().collect(),
        }
    }

    pub fn rects(&self) -> &[(Id, Bounds)] {
        &self.rects
    }

    /// Returns true if `candidate` overlaps none of the padded rectangles.
    pub fn is_free(&self, candidate: Bounds, padding: f32) -> bool {
        !self
            .rects
            .iter()
            .any(|(_, existing)| candidate.overlaps(existing, padding))
    }
}

/// Finds positions for nodes being placed, according to a [`PlacementConfig`].
#[derive(Debug, Clone, Default)]
pub struct PlacementSolver {
    config: PlacementConfig,
}

impl PlacementSolver {
    /// Create a new solver with the given configuration.
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }
}
