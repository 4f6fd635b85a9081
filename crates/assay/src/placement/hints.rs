//! Advisory hints about nodes near a new connection's release point.

use std::fmt;

use serde::Serialize;

use assay_core::{
    geometry::{Point, distance, perpendicular_offset},
    identifier::Id,
};

use super::Occupancy;

/// Maximum number of hints returned by [`calculate_connection_hints`].
pub const MAX_HINTS: usize = 5;

/// Sideways distance of a hint label from its connecting segment.
const LABEL_OFFSET: f32 = 16.0;

/// Coarse side on which a hinted node lies, relative to the query point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompassDirection {
    Left,
    Right,
    Top,
    Bottom,
}

impl CompassDirection {
    /// Classifies a displacement by its dominant axis. Equal magnitudes count as vertical.
    fn from_displacement(delta: Point) -> Self {
        if delta.x().abs() > delta.y().abs() {
            if delta.x() > 0.0 { Self::Right } else { Self::Left }
        } else if delta.y() > 0.0 {
            Self::Bottom
        } else {
            Self::Top
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// A nearby node that the user may want to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionHint {
    node_id: Id,
    distance: f32,
    direction: CompassDirection,
    label_anchor: Point,
}

impl ConnectionHint {
    pub fn node_id(&self) -> Id {
        self.node_id
    }

    /// Distance between the query point and the node center.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn direction(&self) -> CompassDirection {
        self.direction
    }

    /// Where a label for this hint should be drawn.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }
}

/// Returns up to [`MAX_HINTS`] nodes whose centers lie within `max_distance`
/// of `position`, nearest first.
///
/// Nodes at equal distance keep their occupancy order.
pub fn calculate_connection_hints(
    position: Point,
    occupancy: &Occupancy,
    max_distance: f32,
) -> Vec<ConnectionHint> {
    if !position.is_finite() {
        return Vec::new();
    }

    let mut hints: Vec<ConnectionHint> = occupancy
        .rects()
        .iter()
        .filter_map(|(id, bounds)| {
            let center = bounds.center();
            let distance = distance(position, center);
            (distance <= max_distance).then(|| ConnectionHint {
                node_id: *id,
                distance,
                direction: CompassDirection::from_displacement(center.sub_point(position)),
                label_anchor: position
                    .midpoint(center)
                    .add_point(perpendicular_offset(position, center, LABEL_OFFSET)),
            })
        })
        .collect();

    hints.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hints.truncate(MAX_HINTS);
    hints
}
