//! Geometric primitives for diagram placement and alignment.
//!
//! This module provides the geometric types and pure helper functions used
//! by the placement solver and the snapping pipeline.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`distance`], [`overlaps`], [`snap_to_grid`], [`perpendicular_offset`] - pure helpers
//!
//! # Coordinate System
//!
//! Assay uses the screen coordinate system of the rendering surface:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A node's position is the top-left corner of its rectangle.
//!
//! # Non-finite input
//!
//! None of the helpers panic. Non-finite coordinates flow through unchanged
//! (or, for comparisons, simply compare as `false`).

use serde::{Deserialize, Serialize};

/// A position in diagram space, or a displacement between two positions.
///
/// # Examples
///
/// ```
/// # use assay_core::geometry::Point;
/// let node = Point::new(400.0, 50.0);
/// let below = node.add_point(Point::new(0.0, 150.0));
///
/// assert_eq!(node.midpoint(below), Point::new(400.0, 125.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a copy with `x` replaced.
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Returns a copy with `y` replaced.
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise sum, used to offset a position by a vector.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the point at `radius` along the direction `angle` (radians) from this point.
    pub fn polar_offset(self, radius: f32, angle: f32) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }
}

/// Width and height of a node rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the offset from a top-left corner to the center of a box of this size
    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An axis-aligned rectangle in diagram space.
///
/// Built from a node's top-left position and size; used for overlap tests
/// and to measure the extent of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds whose top-left corner is `top_left`
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    /// Returns true if these bounds intersect `other` grown by `padding` on every side.
    ///
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Self, padding: f32) -> bool {
        self.min_x < other.max_x + padding
            && self.max_x + padding > other.min_x
            && self.min_y < other.max_y + padding
            && self.max_y + padding > other.min_y
    }
}

/// Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// # use assay_core::geometry::{Point, distance};
/// assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
/// ```
pub fn distance(a: Point, b: Point) -> f32 {
    b.sub_point(a).hypot()
}

/// Returns true if the candidate rectangle intersects the existing rectangle
/// expanded by `padding`, on both axes.
pub fn overlaps(candidate: Bounds, existing: Bounds, padding: f32) -> bool {
    candidate.overlaps(&existing, padding)
}

/// Rounds each coordinate to the nearest multiple of `grid_size`.
///
/// Points with non-finite coordinates, and grid sizes that are non-finite or
/// not positive, are passed through unchanged.
///
/// # Examples
///
/// ```
/// # use assay_core::geometry::{Point, snap_to_grid};
/// let snapped = snap_to_grid(Point::new(27.0, 41.0), 20.0);
/// assert_eq!(snapped, Point::new(20.0, 40.0));
/// ```
pub fn snap_to_grid(point: Point, grid_size: f32) -> Point {
    if !point.is_finite() || !grid_size.is_finite() || grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Returns the vector of length `distance` perpendicular to the segment `from → to`.
///
/// The normal is the segment direction rotated a quarter turn clockwise in
/// screen coordinates, so a left-to-right segment yields a downward offset.
/// A degenerate (zero-length or non-finite) segment yields the zero vector.
pub fn perpendicular_offset(from: Point, to: Point, distance: f32) -> Point {
    let delta = to.sub_point(from);
    let length = delta.hypot();
    if !length.is_finite() || length == 0.0 {
        return Point::default();
    }
    Point::new(-delta.y / length, delta.x / length).scale(distance)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_with_coordinates() {
        let point = Point::new(1.0, 2.0).with_x(5.0).with_y(6.0);
        assert_eq!(point, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_point_polar_offset() {
        let origin = Point::new(10.0, 10.0);

        let right = origin.polar_offset(50.0, 0.0);
        assert_approx_eq!(f32, right.x(), 60.0);
        assert_approx_eq!(f32, right.y(), 10.0);

        let down = origin.polar_offset(50.0, std::f32::consts::FRAC_PI_2);
        assert_approx_eq!(f32, down.x(), 10.0, epsilon = 0.0001);
        assert_approx_eq!(f32, down.y(), 60.0);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point::new(1.0, 1.0), Point::new(4.0, 5.0)), 5.0);
        assert_eq!(distance(Point::new(2.0, 2.0), Point::new(2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_distance_non_finite_does_not_panic() {
        let d = distance(Point::new(f32::NAN, 0.0), Point::new(1.0, 1.0));
        assert!(d.is_nan());
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 110.0);
        assert_eq!(bounds.max_y(), 70.0);
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(bounds.height(), 50.0);
        assert_eq!(bounds.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_overlaps_intersecting() {
        let size = Size::new(100.0, 50.0);
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        let b = Bounds::new_from_top_left(Point::new(50.0, 25.0), size);
        assert!(overlaps(a, b, 0.0));
        assert!(overlaps(b, a, 0.0));
    }

    #[test]
    fn test_overlaps_separated_on_one_axis() {
        let size = Size::new(100.0, 50.0);
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        // Same row, far apart horizontally
        let b = Bounds::new_from_top_left(Point::new(300.0, 0.0), size);
        assert!(!overlaps(a, b, 20.0));
    }

    #[test]
    fn test_overlaps_padding_closes_gap() {
        let size = Size::new(100.0, 50.0);
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        let b = Bounds::new_from_top_left(Point::new(110.0, 0.0), size);
        assert!(!overlaps(a, b, 0.0));
        assert!(overlaps(a, b, 20.0));
    }

    #[test]
    fn test_overlaps_touching_edges() {
        let size = Size::new(100.0, 50.0);
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        let b = Bounds::new_from_top_left(Point::new(100.0, 0.0), size);
        assert!(!overlaps(a, b, 0.0));
    }

    #[test]
    fn test_overlaps_nan_is_false() {
        let size = Size::new(100.0, 50.0);
        let a = Bounds::new_from_top_left(Point::new(f32::NAN, 0.0), size);
        let b = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
        assert!(!overlaps(a, b, 20.0));
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(Point::new(27.0, 41.0), 20.0), Point::new(20.0, 40.0));
        assert_eq!(snap_to_grid(Point::new(31.0, -9.0), 20.0), Point::new(40.0, -0.0));
        assert_eq!(snap_to_grid(Point::new(40.0, 60.0), 20.0), Point::new(40.0, 60.0));
    }

    #[test]
    fn test_snap_to_grid_passes_through_invalid_input() {
        let point = Point::new(13.0, 17.0);
        assert_eq!(snap_to_grid(point, 0.0), point);
        assert_eq!(snap_to_grid(point, -10.0), point);
        assert_eq!(snap_to_grid(point, f32::NAN), point);
        assert_eq!(snap_to_grid(point, f32::INFINITY), point);

        let infinite = Point::new(f32::INFINITY, 3.0);
        assert_eq!(snap_to_grid(infinite, 20.0), infinite);
    }

    #[test]
    fn test_perpendicular_offset() {
        let offset = perpendicular_offset(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 5.0);
        assert_approx_eq!(f32, offset.x(), 0.0);
        assert_approx_eq!(f32, offset.y(), 5.0);

        let offset = perpendicular_offset(Point::new(0.0, 0.0), Point::new(0.0, 10.0), 5.0);
        assert_approx_eq!(f32, offset.x(), -5.0);
        assert_approx_eq!(f32, offset.y(), 0.0);
    }

    #[test]
    fn test_perpendicular_offset_degenerate_segment() {
        let p = Point::new(3.0, 3.0);
        assert_eq!(perpendicular_offset(p, p, 10.0), Point::default());
        assert_eq!(
            perpendicular_offset(p, Point::new(f32::NAN, 0.0), 10.0),
            Point::default()
        );
    }
}
