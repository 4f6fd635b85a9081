//! Spiral search for a non-overlapping position.

use log::trace;

use assay_core::geometry::{Bounds, Point, Size};

use super::{Occupancy, PlacementSolver};

/// How a [`Placement`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The desired position was already free.
    Free,
    /// A spiral candidate found a free position.
    Spiral,
    /// Every candidate collided; the position is the deterministic fallback and may overlap.
    Fallback,
}

/// The result of resolving a desired position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    position: Point,
    attempts: usize,
    outcome: PlacementOutcome,
}

impl Placement {
    pub fn position(&self) -> Point {
        self.position
    }

    /// Number of spiral candidates tested.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn outcome(&self) -> PlacementOutcome {
        self.outcome
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == PlacementOutcome::Fallback
    }
}

impl PlacementSolver {
    /// Returns `desired` if it is free, otherwise the first free spiral candidate
    /// around it, otherwise a deterministic fallback.
    ///
    /// See [`PlacementSolver::resolve_position`] for details.
    pub fn find_non_overlapping_position(
        &self,
        desired: Point,
        occupancy: &Occupancy,
        node_size: Size,
    ) -> Point {
        self.resolve_position(desired, occupancy, node_size).position()
    }

    /// Resolves `desired` to a position whose rectangle does not overlap
    /// any occupied rectangle grown by the configured padding.
    ///
    /// Candidate `i` (zero based) lies at angle `(i mod k)·step` and radius
    /// `(1 + i div k)·radius_step` from `desired`, where `k` is the number of
    /// candidates per full turn. After `max_attempts` candidates the result is the
    /// point one radius step beyond the next candidate, which may still overlap.
    /// Non-finite input is returned unchanged as a fallback.
    pub fn resolve_position(&self, desired: Point, occupancy: &Occupancy, node_size: Size) -> Placement {
        let padding = self.config.padding();
        let fits = |position: Point| {
            occupancy.is_free(Bounds::new_from_top_left(position, node_size), padding)
        };

        if !desired.is_finite() {
            return Placement {
                position: desired,
                attempts: 0,
                outcome: PlacementOutcome::Fallback,
            };
        }

        if fits(desired) {
            return Placement {
                position: desired,
                attempts: 0,
                outcome: PlacementOutcome::Free,
            };
        }

        let max_attempts = self.config.max_attempts();
        for attempt in 0..max_attempts {
            let (radius, angle) = self.spiral_candidate(attempt);
            let candidate = desired.polar_offset(radius, angle);
            if fits(candidate) {
                trace!(attempts = attempt + 1, radius, angle; "Spiral candidate found a free position");
                return Placement {
                    position: candidate,
                    attempts: attempt + 1,
                    outcome: PlacementOutcome::Spiral,
                };
            }
        }

        let (radius, angle) = self.spiral_candidate(max_attempts);
        let position = desired.polar_offset(radius + self.config.radius_step(), angle);
        trace!(attempts = max_attempts; "Spiral search exhausted, using fallback position");
        Placement {
            position,
            attempts: max_attempts,
            outcome: PlacementOutcome::Fallback,
        }
    }

    /// Returns the (radius, angle) of spiral candidate `index`.
    fn spiral_candidate(&self, index: usize) -> (f32, f32) {
        let step = self.config.angle_step();
        let per_turn = ((std::f32::consts::TAU / step).round() as usize).max(1);
        let ring = index / per_turn;
        let slot = index % per_turn;
        let radius = self.config.radius_step() * (ring + 1) as f32;
        (radius, slot as f32 * step)
    }
}
