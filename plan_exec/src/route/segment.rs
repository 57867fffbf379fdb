//! Plan segments and arc length

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::nav::{Plan, PlanPosition};
use nalgebra::Vector2;

use super::DEGENERATE_LENGTH;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A segment joining two consecutive plan points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSegment {
    /// Index of the start point in the plan. The end point is at `start_index + 1`.
    pub start_index: usize,

    /// The start point of the segment
    pub start_m: Vector2<f64>,

    /// The end point of the segment
    pub target_m: Vector2<f64>,

    /// Distance along the plan at which the segment starts
    pub start_dist_m: f64,

    /// The length of the segment
    pub length_m: f64,

    /// The heading (angle to the +ve x axis) of the segment
    pub heading_rad: f64,

    /// Unit vector pointing in the direction of the segment, zero for degenerate segments
    pub direction: Vector2<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PlanSegment {
    /// Build the segment from `plan.points[start_index]` to the point after it.
    ///
    /// Returns `None` if there is no point after `start_index`.
    pub fn between(plan: &Plan, start_index: usize, start_dist_m: f64) -> Option<Self> {
        let start = plan.points.get(start_index)?;
        let target = plan.points.get(start_index + 1)?;

        let start_m = Vector2::new(start.x, start.y);
        let target_m = Vector2::new(target.x, target.y);
        let diff = target_m - start_m;
        let length_m = diff.norm();

        let direction = if length_m < DEGENERATE_LENGTH {
            Vector2::zeros()
        } else {
            diff / length_m
        };

        Some(Self {
            start_index,
            start_m,
            target_m,
            start_dist_m,
            length_m,
            heading_rad: diff.y.atan2(diff.x),
            direction,
        })
    }

    /// Distance along the plan at which the segment ends
    pub fn end_dist_m(&self) -> f64 {
        self.start_dist_m + self.length_m
    }

    /// True if the segment's points coincide
    pub fn is_degenerate(&self) -> bool {
        self.length_m < DEGENERATE_LENGTH
    }

    /// The point at the given distance along the plan, following this segment's direction.
    ///
    /// Distances outside the segment extend along its line.
    pub fn point_at(&self, dist_m: f64) -> Vector2<f64> {
        self.start_m + self.direction * (dist_m - self.start_dist_m)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// All segments of the plan, in order, including degenerate ones.
pub fn segments(plan: &Plan) -> Vec<PlanSegment> {
    let mut segs: Vec<PlanSegment> = Vec::with_capacity(plan.points.len().saturating_sub(1));
    let mut dist_m = 0.0;

    for i in 0..plan.points.len().saturating_sub(1) {
        if let Some(seg) = PlanSegment::between(plan, i, dist_m) {
            dist_m = seg.end_dist_m();
            segs.push(seg);
        }
    }

    segs
}

/// Total length of the plan.
///
/// Plans with fewer than two points have zero length.
pub fn total_length(plan: &Plan) -> f64 {
    segments(plan).last().map(|s| s.end_dist_m()).unwrap_or(0.0)
}

/// Resolve a [`PlanPosition`] into a distance along the plan from its first point.
///
/// An index past the end of the plan is treated as the last point.
pub fn arc_length_at(plan: &Plan, position: &PlanPosition) -> f64 {
    let base_m: f64 = segments(plan)
        .iter()
        .take(position.index)
        .map(|s| s.length_m)
        .sum();

    base_m + position.distance
}
