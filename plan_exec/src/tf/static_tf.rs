//! Table driven transform provider

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use log::{debug, warn};
use nalgebra::Similarity3;
use std::collections::HashMap;

use super::{
    is_wgs84, normalise_frame, LocalXyOrigin, TfError, TfParams, Transform, TransformProvider,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Provides fixed transforms from a set of known frames into a single target frame.
///
/// The transforms don't change with time, so the stamp given to `lookup` is ignored.
#[derive(Debug, Clone)]
pub struct StaticTransforms {
    target_frame: String,

    /// Frame name (normalised) to the similarity into the target frame
    frames: HashMap<String, Similarity3<f64>>,

    /// Local XY origin and the frame its coordinates are in
    local_xy: Option<(LocalXyOrigin, String)>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StaticTransforms {
    /// Create a provider which only knows the target frame itself.
    pub fn new(target_frame: &str) -> Self {
        Self {
            target_frame: target_frame.to_string(),
            frames: HashMap::new(),
            local_xy: None,
        }
    }

    /// Build the provider from its parameters.
    pub fn from_params(params: &TfParams) -> Self {
        let mut tf = Self::new(&params.target_frame);

        for frame in params.frames.iter() {
            match frame.to_similarity() {
                Ok(sim) => tf.insert(&frame.name, sim),
                Err(e) => warn!("Skipping frame: {}", e),
            }
        }

        if let Some(ref lxy) = params.local_xy {
            tf.set_local_xy(
                LocalXyOrigin::new(lxy.latitude_deg, lxy.longitude_deg, lxy.altitude_m),
                &lxy.frame,
            );
        }

        debug!(
            "StaticTransforms: {} frame(s) into {}, local XY {}",
            tf.frames.len(),
            tf.target_frame,
            match tf.local_xy {
                Some(_) => "set",
                None => "not set",
            }
        );

        tf
    }

    /// Set the transform from `frame` into the target frame, replacing any existing one.
    pub fn insert(&mut self, frame: &str, source_to_target: Similarity3<f64>) {
        if normalise_frame(frame) == normalise_frame(&self.target_frame) {
            warn!("Ignoring transform for the target frame {} itself", frame);
            return;
        }

        self.frames
            .insert(normalise_frame(frame).to_string(), source_to_target);
    }

    /// Set the origin used to project geodetic points, with the frame local XY points are in.
    pub fn set_local_xy(&mut self, origin: LocalXyOrigin, frame: &str) {
        self.local_xy = Some((origin, frame.to_string()));
    }

    /// Similarity from a non-geodetic frame into the target.
    fn similarity(&self, frame: &str) -> Result<Similarity3<f64>, TfError> {
        let frame = normalise_frame(frame);

        if frame == normalise_frame(&self.target_frame) {
            return Ok(Similarity3::identity());
        }

        self.frames
            .get(frame)
            .copied()
            .ok_or_else(|| TfError::UnknownFrame(frame.to_string()))
    }
}

impl TransformProvider for StaticTransforms {
    fn target_frame(&self) -> &str {
        &self.target_frame
    }

    fn lookup(&self, source_frame: &str, _stamp: DateTime<Utc>) -> Result<Transform, TfError> {
        if normalise_frame(source_frame) == normalise_frame(&self.target_frame) {
            return Ok(Transform::identity());
        }

        if is_wgs84(source_frame) {
            let (origin, frame) = self.local_xy.as_ref().ok_or(TfError::NoLocalXyOrigin)?;

            return Ok(Transform::Geodetic {
                origin: *origin,
                local_to_target: self.similarity(frame)?,
            });
        }

        self.similarity(source_frame).map(Transform::Similarity)
    }
}
