//! Direction-aware placement relative to source nodes.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use assay_core::geometry::{Bounds, Point, Size};

use super::{Occupancy, PlacementSolver};

/// Preferred side of the source nodes on which to place a new node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bottom,
    Right,
    /// Bottom unless bottom is taken and right is free.
    #[default]
    Auto,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => write!(f, "bottom"),
            Self::Right => write!(f, "right"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl PlacementSolver {
    /// Returns a position next to the centroid of `sources`.
    ///
    /// The centroid is offset by the vertical spacing for [`Direction::Bottom`]
    /// and by the horizontal spacing for [`Direction::Right`], then resolved
    /// with [`PlacementSolver::resolve_position`]. [`Direction::Auto`] takes the
    /// right candidate only when the bottom candidate overlaps and the right
    /// one does not.
    ///
    /// With no sources the configured default position is returned as is.
    pub fn calculate_smart_position(
        &self,
        sources: &[Point],
        occupancy: &Occupancy,
        node_size: Size,
        direction: Direction,
    ) -> Point {
        let Some(centroid) = centroid(sources) else {
            return self.config.default_position();
        };

        let bottom = centroid.add_point(Point::new(0.0, self.config.vertical_spacing()));
        let right = centroid.add_point(Point::new(self.config.horizontal_spacing(), 0.0));

        let candidate = match direction {
            Direction::Bottom => bottom,
            Direction::Right => right,
            Direction::Auto => {
                let padding = self.config.padding();
                let is_free = |point: Point| {
                    occupancy.is_free(Bounds::new_from_top_left(point, node_size), padding)
                };
                if !is_free(bottom) && is_free(right) {
                    debug!(sources = sources.len(); "Bottom is occupied, placing to the right");
                    right
                } else {
                    bottom
                }
            }
        };

        self.resolve_position(candidate, occupancy, node_size)
            .position()
    }
}

fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Point::default(), |acc, point| acc.add_point(*point));
    Some(sum.scale(1.0 / points.len() as f32))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use assay_core::identifier::Id;

    use super::*;
    use crate::config::PlacementConfig;

    const NODE: Size = Size::new(100.0, 50.0);

    fn occupancy(positions: &[(f32, f32)]) -> Occupancy {
        Occupancy::from_rects(positions.iter().enumerate().map(|(i, &(x, y))| {
            (
                Id::new(&format!("s{i}")),
                Bounds::new_from_top_left(Point::new(x, y), NODE),
            )
        }))
    }

    fn solver() -> PlacementSolver {
        PlacementSolver::new(PlacementConfig::default().with_padding(10.0))
    }

    #[test]
    fn test_no_sources_returns_default() {
        let position = solver().calculate_smart_position(
            &[],
            &occupancy(&[(100.0, 100.0)]),
            NODE,
            Direction::Auto,
        );
        assert_eq!(position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_explicit_directions() {
        let sources = [Point::new(0.0, 0.0)];
        let occupied = occupancy(&[(0.0, 0.0)]);

        let bottom = solver().calculate_smart_position(&sources, &occupied, NODE, Direction::Bottom);
        let right = solver().calculate_smart_position(&sources, &occupied, NODE, Direction::Right);

        assert_eq!(bottom, Point::new(0.0, 150.0));
        assert_eq!(right, Point::new(300.0, 0.0));
    }

    #[test]
    fn test_centroid_of_many_sources() {
        let sources = [Point::new(0.0, 0.0), Point::new(200.0, 100.0)];
        let position =
            solver().calculate_smart_position(&sources, &Occupancy::default(), NODE, Direction::Bottom);

        assert_approx_eq!(f32, position.x(), 100.0);
        assert_approx_eq!(f32, position.y(), 200.0);
    }

    #[test]
    fn test_auto_prefers_bottom() {
        let sources = [Point::new(0.0, 0.0)];
        let position = solver().calculate_smart_position(
            &sources,
            &occupancy(&[(0.0, 0.0)]),
            NODE,
            Direction::Auto,
        );
        assert_eq!(position, Point::new(0.0, 150.0));
    }

    #[test]
    fn test_auto_escapes_right_when_bottom_taken() {
        let sources = [Point::new(0.0, 0.0)];
        let occupied = occupancy(&[(0.0, 0.0), (0.0, 150.0)]);

        let position = solver().calculate_smart_position(&sources, &occupied, NODE, Direction::Auto);
        assert_eq!(position, Point::new(300.0, 0.0));
    }

    #[test]
    fn test_auto_resolves_bottom_when_both_taken() {
        let sources = [Point::new(0.0, 0.0)];
        let occupied = occupancy(&[(0.0, 0.0), (0.0, 150.0), (300.0, 0.0)]);

        let position = solver().calculate_smart_position(&sources, &occupied, NODE, Direction::Auto);

        assert_ne!(position, Point::new(0.0, 150.0));
        assert!(occupied.is_free(Bounds::new_from_top_left(position, NODE), 10.0));
    }

    #[test]
    fn test_direction_serde() {
        let direction: Direction = serde_json::from_str(r#""right""#).unwrap();
        assert_eq!(direction, Direction::Right);
        assert_eq!(Direction::default().to_string(), "auto");
    }
}
