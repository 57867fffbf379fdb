//! Frame transformation, projection, and orientation filling

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::nav::{Plan, PlanPoint};
use nalgebra::Point3;

use super::segments;
use crate::tf::Transform;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Transform every point of the plan into `target_frame`.
///
/// Point count, order, stop flags, the plan id and its stamp are preserved. Yaws supplied in the
/// source frame are not carried over and must be refilled with [`fill_orientations`].
pub fn transform_plan(plan: &Plan, transform: &Transform, target_frame: &str) -> Plan {
    let mut out = plan.clone();
    out.header.frame_id = target_frame.to_string();

    for point in out.points.iter_mut() {
        let p = transform.apply(&Point3::new(point.x, point.y, point.z));
        point.x = p.x;
        point.y = p.y;
        point.z = p.z;
        point.yaw = None;
    }

    out
}

/// Collapse the plan onto the XY plane used for drawing.
pub fn project_to_xy(plan: &Plan) -> Plan {
    let mut out = plan.clone();

    for point in out.points.iter_mut() {
        point.z = 0.0;
    }

    out
}

/// Fill in the yaw of every point which doesn't have one.
///
/// The yaw is the heading of the first non-degenerate segment leaving the point. Points with no
/// such segment after them (the end of the plan) take the heading of the last non-degenerate
/// segment arriving at them. If the plan has no non-degenerate segments at all (including single
/// point plans) yaws are left unset.
pub fn fill_orientations(plan: &Plan) -> Plan {
    let mut out = plan.clone();
    let segs = segments(plan);

    if segs.is_empty() {
        return out;
    }

    // Heading of the first usable segment at or after each point, found walking backwards
    let mut leaving: Vec<Option<f64>> = vec![None; out.points.len()];
    let mut next = None;
    for seg in segs.iter().rev() {
        if !seg.is_degenerate() {
            next = Some(seg.heading_rad);
        }
        leaving[seg.start_index] = next;
    }

    // Heading of the last usable segment before each point, walking forwards
    let mut arriving: Vec<Option<f64>> = vec![None; out.points.len()];
    let mut prev = None;
    for seg in segs.iter() {
        if !seg.is_degenerate() {
            prev = Some(seg.heading_rad);
        }
        arriving[seg.start_index + 1] = prev;
    }

    for (i, point) in out.points.iter_mut().enumerate() {
        if point.yaw.is_none() {
            point.yaw = leaving[i].or(arriving[i]);
        }
    }

    out
}

/// Produce the plan as drawn: transformed into `target_frame`, flattened, with all yaws filled.
pub fn prepare_for_display(plan: &Plan, transform: &Transform, target_frame: &str) -> Plan {
    fill_orientations(&project_to_xy(&transform_plan(plan, transform, target_frame)))
}

/// Iterate over the points marked as stops.
pub fn stop_points(plan: &Plan) -> impl Iterator<Item = &PlanPoint> {
    plan.points.iter().filter(|p| p.stop)
}
