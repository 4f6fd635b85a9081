//! Alignment guides and the snapping pipeline applied to dragged or dropped nodes.

use log::trace;
use serde::Serialize;

use assay_core::{
    geometry::{Point, Size, snap_to_grid},
    identifier::Id,
};

use super::Occupancy;
use crate::config::PlacementConfig;

/// Alignment lines shared with other node centers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AlignmentGuides {
    /// X coordinate of a vertical line through another node's center.
    vertical: Option<f32>,
    /// Y coordinate of a horizontal line through another node's center.
    horizontal: Option<f32>,
}

impl AlignmentGuides {
    pub fn vertical(&self) -> Option<f32> {
        self.vertical
    }

    pub fn horizontal(&self) -> Option<f32> {
        self.horizontal
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    /// Pulls `point` onto the guides that were found.
    pub fn apply(&self, point: Point) -> Point {
        let point = match self.vertical {
            Some(x) => point.with_x(x),
            None => point,
        };
        match self.horizontal {
            Some(y) => point.with_y(y),
            None => point,
        }
    }
}

/// Finds the nearest vertical and horizontal alignment lines within
/// `threshold` of `center`, skipping the node `exclude`.
pub fn find_alignment_guides(
    center: Point,
    occupancy: &Occupancy,
    exclude: Option<Id>,
    threshold: f32,
) -> AlignmentGuides {
    if !center.is_finite() || !threshold.is_finite() || threshold < 0.0 {
        return AlignmentGuides::default();
    }

    let mut vertical: Option<(f32, f32)> = None;
    let mut horizontal: Option<(f32, f32)> = None;

    for (id, bounds) in occupancy.rects() {
        if Some(*id) == exclude {
            continue;
        }
        let other = bounds.center();

        let dx = (other.x() - center.x()).abs();
        if dx <= threshold && vertical.is_none_or(|(best, _)| dx < best) {
            vertical = Some((dx, other.x()));
        }

        let dy = (other.y() - center.y()).abs();
        if dy <= threshold && horizontal.is_none_or(|(best, _)| dy < best) {
            horizontal = Some((dy, other.y()));
        }
    }

    AlignmentGuides {
        vertical: vertical.map(|(_, x)| x),
        horizontal: horizontal.map(|(_, y)| y),
    }
}

/// The outcome of snapping a node position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    position: Point,
    guides: AlignmentGuides,
}

impl SnapResult {
    /// The snapped top-left position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The guides the position was pulled onto, for display.
    pub fn guides(&self) -> AlignmentGuides {
        self.guides
    }
}

/// Grid snapping followed by magnetic alignment snapping.
///
/// Magnetic snapping runs last, so it decides the final coordinate on any
/// axis where both stages apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPipeline {
    grid_size: Option<f32>,
    magnetic_threshold: Option<f32>,
}

impl SnapPipeline {
    pub fn new(grid_size: Option<f32>, magnetic_threshold: Option<f32>) -> Self {
        Self {
            grid_size,
            magnetic_threshold,
        }
    }

    pub fn from_config(config: &PlacementConfig) -> Self {
        Self {
            grid_size: config.snap_to_grid().then(|| config.grid_size()),
            magnetic_threshold: config.magnetic_snap().then(|| config.snap_threshold()),
        }
    }

    /// Snaps the top-left `position` of a node of `node_size`.
    ///
    /// Alignment is measured between node centers; `exclude` is the node being
    /// moved, if it is already part of `occupancy`.
    pub fn snap(
        &self,
        position: Point,
        node_size: Size,
        occupancy: &Occupancy,
        exclude: Option<Id>,
    ) -> SnapResult {
        let position = match self.grid_size {
            Some(grid_size) => snap_to_grid(position, grid_size),
            None => position,
        };

        let Some(threshold) = self.magnetic_threshold else {
            return SnapResult {
                position,
                guides: AlignmentGuides::default(),
            };
        };

        let half = node_size.half();
        let center = position.add_point(half);
        let guides = find_alignment_guides(center, occupancy, exclude, threshold);
        if !guides.is_empty() {
            trace!(guides:?; "Magnetic snap applied");
        }

        SnapResult {
            position: guides.apply(center).sub_point(half),
            guides,
        }
    }
}
