//! # Navigation Plan Messages
//!
//! A [`Plan`] is an ordered sequence of [`PlanPoint`]s expressed in the frame named by its
//! header. Progress along a plan is reported by a [`PlanTrack`], which refers back to the plan by
//! id.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{serde::ts_milliseconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Frame and time information attached to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Name of the frame the message data is expressed in. May be empty, in which case consumers
    /// apply their own fallback.
    #[serde(default)]
    pub frame_id: String,

    /// UTC timestamp of the message
    #[serde(with = "ts_milliseconds", default = "unix_epoch")]
    pub stamp: DateTime<Utc>,
}

/// A navigation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub header: Header,

    /// Identifier used by [`PlanTrack`]s to refer to this plan.
    pub id: String,

    /// The waypoints of the plan, in the order they are to be visited.
    #[serde(default)]
    pub points: Vec<PlanPoint>,
}

/// A single waypoint in a [`Plan`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,

    /// Heading of the point about +Z, measured from +X.
    ///
    /// Units: radians
    ///
    /// `None` if the producer did not supply one.
    #[serde(default)]
    pub yaw: Option<f64>,

    /// Set if the vehicle is to come to a stop at this point.
    #[serde(default)]
    pub stop: bool,
}

/// A position along a plan, given as a distance beyond one of its points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPosition {
    /// Index of the point the distance is measured from.
    #[serde(default)]
    pub index: usize,

    /// Distance along the plan past the point at `index`. May be negative.
    ///
    /// Units: plan frame units (meters for projected frames)
    pub distance: f64,
}

/// Report of a vehicle's progress along a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTrack {
    #[serde(default)]
    pub header: Header,

    /// Id of the [`Plan`] this track refers to.
    pub plan_id: String,

    /// The position along that plan.
    pub plan_position: PlanPosition,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Any message that can be carried on a navigation topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavMsg {
    Plan(Plan),
    PlanTrack(PlanTrack),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Header {
    fn default() -> Self {
        Self {
            frame_id: String::new(),
            stamp: unix_epoch(),
        }
    }
}

impl Header {
    /// Create a header in the given frame stamped with the current time.
    pub fn now(frame_id: &str) -> Self {
        Self {
            frame_id: frame_id.into(),
            stamp: Utc::now(),
        }
    }
}

impl Plan {
    /// Create a plan from a list of (x, y) positions with no yaw and an empty frame.
    pub fn from_xy(id: &str, points: &[(f64, f64)]) -> Self {
        Self {
            header: Header::default(),
            id: id.into(),
            points: points
                .iter()
                .map(|&(x, y)| PlanPoint::new(x, y, 0.0))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PlanPoint {
    /// Create a new point with no yaw.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            yaw: None,
            stop: false,
        }
    }

    /// Return the yaw of the point, or zero if none has been set.
    pub fn yaw_or_zero(&self) -> f64 {
        self.yaw.unwrap_or(0.0)
    }
}

impl PlanPosition {
    /// A position the given distance along the plan from its first point.
    pub fn along(distance: f64) -> Self {
        Self { index: 0, distance }
    }
}

impl PlanTrack {
    pub fn new(plan_id: &str, plan_position: PlanPosition) -> Self {
        Self {
            header: Header::default(),
            plan_id: plan_id.into(),
            plan_position,
        }
    }
}

impl From<Plan> for NavMsg {
    fn from(plan: Plan) -> Self {
        NavMsg::Plan(plan)
    }
}

impl From<PlanTrack> for NavMsg {
    fn from(track: PlanTrack) -> Self {
        NavMsg::PlanTrack(track)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::UNIX_EPOCH)
}
