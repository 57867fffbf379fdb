//! Static transform parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Similarity3, Translation3, UnitQuaternion};
use serde::Deserialize;

use super::TfError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for [`super::StaticTransforms`].
#[derive(Debug, Clone, Deserialize)]
pub struct TfParams {
    /// The frame the map is displayed in
    pub target_frame: String,

    /// Transforms from other frames into the target frame
    #[serde(default)]
    pub frames: Vec<FrameParams>,

    /// Origin used to display geodetic plans, if any
    #[serde(default)]
    pub local_xy: Option<LocalXyParams>,
}

/// The pose of one frame within the target frame.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameParams {
    /// Name of the frame
    pub name: String,

    /// Position of the frame's origin in the target frame
    ///
    /// Units: meters
    #[serde(default)]
    pub translation_m: [f64; 3],

    /// Roll, pitch, and yaw of the frame in the target frame
    ///
    /// Units: radians
    #[serde(default)]
    pub rpy_rad: [f64; 3],

    /// Uniform scale applied to points in the frame
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

/// Origin of the local XY plane geodetic points are projected onto.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalXyParams {
    /// Frame in which the local XY coordinates are expressed. Must be the target frame or one of
    /// the configured frames.
    pub frame: String,

    /// Units: degrees
    pub latitude_deg: f64,

    /// Units: degrees
    pub longitude_deg: f64,

    /// Units: meters
    #[serde(default)]
    pub altitude_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FrameParams {
    /// The similarity taking points in this frame into the target frame.
    ///
    /// Fails if the scale is zero, negative, or not finite.
    pub fn to_similarity(&self) -> Result<Similarity3<f64>, TfError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TfError::InvalidScale {
                frame: self.name.clone(),
                scale: self.scale,
            });
        }

        Ok(Similarity3::from_parts(
            Translation3::new(
                self.translation_m[0],
                self.translation_m[1],
                self.translation_m[2],
            ),
            UnitQuaternion::from_euler_angles(self.rpy_rad[0], self.rpy_rad[1], self.rpy_rad[2]),
            self.scale,
        ))
    }
}

fn unit_scale() -> f64 {
    1.0
}
