//! Configuration types for Assay diagram sessions.
//!
//! This module provides configuration structures that control where new
//! nodes are placed and how the visibility state behaves. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources, and
//! every field falls back to its default when absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining placement and visibility settings.
//! - [`PlacementConfig`] - Node size, overlap padding, spiral search and snapping parameters.
//! - [`VisibilityConfig`] - Default expansion state, snapshot key and debounce delay.
//!
//! # Example
//!
//! ```
//! # use assay::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.placement().max_attempts(), 20);
//! assert!(!config.visibility().default_expanded());
//! ```

use std::time::Duration;

use serde::Deserialize;

use assay_core::geometry::{Point, Size};

use crate::visibility::VisibilityOptions;

/// Top-level application configuration combining placement and visibility settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Placement configuration section.
    #[serde(default)]
    placement: PlacementConfig,

    /// Visibility configuration section.
    #[serde(default)]
    visibility: VisibilityConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(placement: PlacementConfig, visibility: VisibilityConfig) -> Self {
        Self {
            placement,
            visibility,
        }
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the visibility configuration.
    pub fn visibility(&self) -> &VisibilityConfig {
        &self.visibility
    }

    /// Returns a mutable reference to the visibility configuration.
    pub fn visibility_mut(&mut self) -> &mut VisibilityConfig {
        &mut self.visibility
    }
}

/// Parameters of the placement solver and the snapping pipeline.
///
/// Distances are in diagram pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Size assumed for nodes that carry no measured size.
    node_size: Size,
    /// Gap kept around existing nodes when testing for overlap.
    padding: f32,
    /// Radius added per ring of the spiral search.
    radius_step: f32,
    /// Angle between consecutive spiral candidates, in degrees.
    angle_step_degrees: f32,
    /// Number of spiral candidates before falling back.
    max_attempts: usize,
    /// Offset of a "bottom" smart position from the source centroid.
    vertical_spacing: f32,
    /// Offset of a "right" smart position from the source centroid.
    horizontal_spacing: f32,
    /// Position used when a smart position has no source nodes.
    default_position: Point,
    grid_size: f32,
    snap_to_grid: bool,
    magnetic_snap: bool,
    /// Maximum distance between a node center and an alignment line for magnetic snapping.
    snap_threshold: f32,
    /// Maximum distance for a node to be reported as a connection hint.
    hint_max_distance: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            node_size: Size::new(250.0, 100.0),
            padding: 20.0,
            radius_step: 50.0,
            angle_step_degrees: 45.0,
            max_attempts: 20,
            vertical_spacing: 150.0,
            horizontal_spacing: 300.0,
            default_position: Point::new(100.0, 100.0),
            grid_size: 20.0,
            snap_to_grid: true,
            magnetic_snap: true,
            snap_threshold: 10.0,
            hint_max_distance: 400.0,
        }
    }
}

impl PlacementConfig {
    pub fn node_size(&self) -> Size {
        self.node_size
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn radius_step(&self) -> f32 {
        self.radius_step
    }

    /// Returns the spiral angle step in radians.
    ///
    /// Non-finite or non-positive configured values fall back to 45°.
    pub fn angle_step(&self) -> f32 {
        if self.angle_step_degrees.is_finite() && self.angle_step_degrees > 0.0 {
            self.angle_step_degrees.to_radians()
        } else {
            45.0f32.to_radians()
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn default_position(&self) -> Point {
        self.default_position
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn magnetic_snap(&self) -> bool {
        self.magnetic_snap
    }

    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    pub fn hint_max_distance(&self) -> f32 {
        self.hint_max_distance
    }

    /// Sets the default node size (builder style).
    pub fn with_node_size(mut self, node_size: Size) -> Self {
        self.node_size = node_size;
        self
    }

    /// Sets the overlap padding (builder style).
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the spiral attempt budget (builder style).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Enables or disables grid and magnetic snapping (builder style).
    pub fn with_snapping(mut self, snap_to_grid: bool, magnetic_snap: bool) -> Self {
        self.snap_to_grid = snap_to_grid;
        self.magnetic_snap = magnetic_snap;
        self
    }

    /// Sets the grid size (builder style).
    pub fn with_grid_size(mut self, grid_size: f32) -> Self {
        self.grid_size = grid_size;
        self
    }
}

/// Visibility state settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Whether nodes without an explicit entry are expanded.
    default_expanded: bool,
    /// Key under which the visibility snapshot is persisted; `None` disables persistence.
    snapshot_key: Option<String>,
    /// Quiet period of debounced bulk operations, in milliseconds.
    debounce_ms: u64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            default_expanded: false,
            snapshot_key: None,
            debounce_ms: 150,
        }
    }
}

impl VisibilityConfig {
    pub fn default_expanded(&self) -> bool {
        self.default_expanded
    }

    pub fn snapshot_key(&self) -> Option<&str> {
        self.snapshot_key.as_deref()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Sets the snapshot key.
    pub fn set_snapshot_key(&mut self, key: Option<String>) {
        self.snapshot_key = key;
    }

    /// Sets whether untouched nodes are expanded.
    pub fn set_default_expanded(&mut self, default_expanded: bool) {
        self.default_expanded = default_expanded;
    }

    /// Converts this section into options for a [`crate::visibility::VisibilityStore`].
    pub fn to_options(&self) -> VisibilityOptions {
        VisibilityOptions::new(self.default_expanded)
            .with_snapshot_key(self.snapshot_key.clone())
            .with_debounce(self.debounce())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "placement": { "padding": 5.0, "node_size": { "width": 100.0, "height": 40.0 } } }"#,
        )
        .unwrap();

        assert_eq!(config.placement().padding(), 5.0);
        assert_eq!(config.placement().node_size(), Size::new(100.0, 40.0));
        assert_eq!(config.placement().max_attempts(), 20);
        assert_eq!(config.visibility(), &VisibilityConfig::default());
    }

    #[test]
    fn test_invalid_angle_step_falls_back() {
        let config: PlacementConfig =
            serde_json::from_str(r#"{ "angle_step_degrees": -3.0 }"#).unwrap();
        assert_eq!(config.angle_step(), 45.0f32.to_radians());
    }

    #[test]
    fn test_visibility_options() {
        let config: VisibilityConfig = serde_json::from_str(
            r#"{ "default_expanded": true, "snapshot_key": "case-1", "debounce_ms": 40 }"#,
        )
        .unwrap();

        let options = config.to_options();
        assert!(options.default_expanded());
        assert_eq!(options.snapshot_key(), Some("case-1"));
        assert_eq!(options.debounce(), Duration::from_millis(40));
    }
}
