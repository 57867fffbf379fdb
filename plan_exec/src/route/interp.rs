//! Interpolation of positions along a plan

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::nav::{Plan, PlanPoint};
use log::debug;
use util::maths::{lerp_angle, lin_map};

use super::{segments, PlanSegment};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the point at the given distance along the plan.
///
/// Position and z are interpolated linearly between the two points bracketing the distance, and
/// yaw along the shortest arc between their yaws. Points without a yaw use the heading of the
/// bracketing segment.
///
/// Distances before the start or past the end of the plan either return the end point unchanged
/// or, if `extrapolate` is set, continue in a straight line along the nearest non-degenerate end
/// segment with the end point's yaw.
///
/// Returns `None` if the plan has no points. A plan with no length (a single point, or all points
/// coincident) always gives its first point.
pub fn interpolate_position(plan: &Plan, dist_m: f64, extrapolate: bool) -> Option<PlanPoint> {
    let first = *plan.points.first()?;
    let last = *plan.points.last()?;

    // Only segments with a direction can carry the position
    let segs: Vec<PlanSegment> = segments(plan)
        .into_iter()
        .filter(|s| !s.is_degenerate())
        .collect();

    let (first_seg, last_seg) = match (segs.first(), segs.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => {
            debug!("Plan {} has no length, using its first point", plan.id);
            return Some(first);
        }
    };

    // Before the start
    if dist_m <= first_seg.start_dist_m {
        return Some(match extrapolate && dist_m < first_seg.start_dist_m {
            true => extend(&first, &first_seg, dist_m),
            false => first,
        });
    }

    // After the end
    let total_m = last_seg.end_dist_m();
    if dist_m >= total_m {
        return Some(match extrapolate && dist_m > total_m {
            true => extend(&last, &last_seg, dist_m),
            false => last,
        });
    }

    // Find the segment containing the distance. There must be one since the distance lies
    // strictly within the plan, and degenerate segments add no length.
    let idx = segs.partition_point(|s| s.end_dist_m() <= dist_m);
    let seg = segs.get(idx).unwrap_or(&last_seg);

    let start = &plan.points[seg.start_index];
    let target = &plan.points[seg.start_index + 1];
    let t = (dist_m - seg.start_dist_m) / seg.length_m;
    let pos = seg.point_at(dist_m);

    Some(PlanPoint {
        x: pos.x,
        y: pos.y,
        z: lin_map((0.0, 1.0), (start.z, target.z), t),
        yaw: Some(lerp_angle(
            start.yaw.unwrap_or(seg.heading_rad),
            target.yaw.unwrap_or(seg.heading_rad),
            t,
        )),
        stop: false,
    })
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Extend from an end point along an end segment's line.
fn extend(end: &PlanPoint, seg: &PlanSegment, dist_m: f64) -> PlanPoint {
    let pos = seg.point_at(dist_m);

    PlanPoint {
        x: pos.x,
        y: pos.y,
        z: end.z,
        yaw: Some(end.yaw.unwrap_or(seg.heading_rad)),
        stop: false,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::route::{fill_orientations, total_length};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn l_plan() -> Plan {
        fill_orientations(&Plan::from_xy("l", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]))
    }

    #[test]
    fn test_empty_plan() {
        assert!(interpolate_position(&Plan::from_xy("a", &[]), 0.0, true).is_none());
    }

    #[test]
    fn test_ends() {
        let plan = l_plan();
        let total = total_length(&plan);

        let start = interpolate_position(&plan, 0.0, false).unwrap();
        assert_eq!(start, plan.points[0]);

        let end = interpolate_position(&plan, total, true).unwrap();
        assert_eq!(end, plan.points[2]);
    }

    #[test]
    fn test_midpoint_of_segment() {
        let plan = fill_orientations(&Plan::from_xy("a", &[(2.0, 2.0), (4.0, 4.0)]));
        let mid = interpolate_position(&plan, total_length(&plan) / 2.0, false).unwrap();

        assert_relative_eq!(mid.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(mid.yaw.unwrap(), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_yaw_blends_at_corner() {
        let plan = l_plan();

        // Halfway along the first segment the yaw is halfway between the first point's heading
        // and the corner's, which looks along the second segment
        let p = interpolate_position(&plan, 5.0, false).unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.yaw.unwrap(), FRAC_PI_2 / 2.0, epsilon = 1e-12);

        let p = interpolate_position(&plan, 15.0, false).unwrap();
        assert_relative_eq!(p.x, 10.0);
        assert_relative_eq!(p.y, 5.0);
        assert_relative_eq!(p.yaw.unwrap(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_yaw_takes_short_way_round() {
        let mut plan = Plan::from_xy("a", &[(0.0, 0.0), (1.0, 0.0)]);
        plan.points[0].yaw = Some(PI - 0.2);
        plan.points[1].yaw = Some(-PI + 0.2);

        let p = interpolate_position(&plan, 0.5, false).unwrap();
        assert_relative_eq!(p.yaw.unwrap().abs(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_beyond_end() {
        let plan = l_plan();

        let clamped = interpolate_position(&plan, 25.0, false).unwrap();
        assert_eq!(clamped, plan.points[2]);

        let extended = interpolate_position(&plan, 25.0, true).unwrap();
        assert_relative_eq!(extended.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(extended.y, 15.0, epsilon = 1e-12);
        assert_relative_eq!(extended.yaw.unwrap(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_before_start() {
        let plan = l_plan();

        assert_eq!(
            interpolate_position(&plan, -3.0, false).unwrap(),
            plan.points[0]
        );

        let extended = interpolate_position(&plan, -3.0, true).unwrap();
        assert_relative_eq!(extended.x, -3.0, epsilon = 1e-12);
        assert_relative_eq!(extended.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point() {
        let plan = Plan::from_xy("a", &[(4.0, -1.0)]);

        for d in [-10.0, 0.0, 0.5, 100.0].iter() {
            for extrapolate in [true, false].iter() {
                let p = interpolate_position(&plan, *d, *extrapolate).unwrap();
                assert_eq!(p, plan.points[0]);
            }
        }
    }

    #[test]
    fn test_degenerate_segments_skipped() {
        let plan = fill_orientations(&Plan::from_xy(
            "a",
            &[(0.0, 0.0), (0.0, 0.0), (4.0, 0.0), (4.0, 0.0)],
        ));

        let p = interpolate_position(&plan, 1.0, false).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.yaw.unwrap(), 0.0);

        // Extrapolation past a trailing duplicate uses the last real segment's direction
        let p = interpolate_position(&plan, 6.0, true).unwrap();
        assert_relative_eq!(p.x, 6.0);
        assert_relative_eq!(p.y, 0.0);
    }
}
