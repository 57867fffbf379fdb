//! # Frame transforms
//!
//! Provides the transforms used to move plans from the frame they were published in into the
//! frame the map is displayed in.
//!
//! Frame names are compared without any leading `/`, so `/map` and `map` name the same frame.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod local_xy;
mod params;
mod static_tf;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use nalgebra::{Point3, Similarity3};

pub use local_xy::LocalXyOrigin;
pub use params::{FrameParams, LocalXyParams, TfParams};
pub use static_tf::StaticTransforms;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the geodetic frame, in which x is longitude and y is latitude (degrees), and z is
/// altitude (meters).
pub const WGS84_FRAME: &str = "/wgs84";

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something which can provide transforms into a display frame.
pub trait TransformProvider {
    /// The frame transforms are provided into.
    fn target_frame(&self) -> &str;

    /// Get the transform from `source_frame` into the target frame, valid at `stamp`.
    fn lookup(&self, source_frame: &str, stamp: DateTime<Utc>) -> Result<Transform, TfError>;
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A transform between two frames.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// A rotation, uniform scale, and translation.
    Similarity(Similarity3<f64>),

    /// Projection of geodetic coordinates onto a local tangent plane, followed by a similarity from
    /// that plane into the target frame.
    Geodetic {
        origin: LocalXyOrigin,
        local_to_target: Similarity3<f64>,
    },
}

/// Errors that can occur when looking up a transform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TfError {
    #[error("No transform from frame \"{0}\" is known")]
    UnknownFrame(String),

    #[error("A geodetic transform was requested but no local XY origin is set")]
    NoLocalXyOrigin,

    #[error("Frame \"{frame}\" has scale {scale}, which must be finite and greater than zero")]
    InvalidScale { frame: String, scale: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Transform {
    pub fn identity() -> Self {
        Transform::Similarity(Similarity3::identity())
    }

    /// Apply the transform to a point.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        match self {
            Transform::Similarity(s) => s.transform_point(point),
            Transform::Geodetic {
                origin,
                local_to_target,
            } => local_to_target.transform_point(&origin.to_local_xy(point)),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Normalise a frame name so that `/map` and `map` compare equal.
pub fn normalise_frame(frame: &str) -> &str {
    frame.trim().trim_start_matches('/')
}

/// True if the frame names the geodetic frame
pub fn is_wgs84(frame: &str) -> bool {
    normalise_frame(frame) == normalise_frame(WGS84_FRAME)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalise_frame() {
        assert_eq!(normalise_frame("/map"), "map");
        assert_eq!(normalise_frame(" map "), "map");
        assert!(is_wgs84("wgs84"));
        assert!(is_wgs84("/wgs84"));
        assert!(!is_wgs84("/odom"));
    }

    #[test]
    fn test_identity() {
        let p = Point3::new(1.0, -2.0, 3.0);
        assert_eq!(Transform::identity().apply(&p), p);
    }
}
