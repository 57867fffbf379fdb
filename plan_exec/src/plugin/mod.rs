//! # Plan display plugin
//!
//! Ties the route geometry, renderer and held plan state together into a map display layer.
//!
//! Each frame the newest plan is moved into the display frame and drawn, followed by a marker at
//! the newest plan track position if it refers to the same plan. Nothing derived from the plan is
//! kept between frames, so a failed frame is simply retried on the next one.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod nav_plan;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::Utc;
use comms_if::nav::{Plan, PlanPoint, PlanTrack};
use image::RgbaImage;
use log::debug;

use crate::{
    config::PlanDisplaySettings,
    render::{draw_position_marker, draw_route, Canvas},
    route::{arc_length_at, interpolate_position, prepare_for_display},
    status::{StatusLevel, StatusSink},
    tf::{TfError, TransformProvider, WGS84_FRAME},
};

pub use nav_plan::NavPlanPlugin;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A layer drawn by a map display host.
pub trait DisplayPlugin {
    type Canvas: Canvas;

    /// Give the plugin the canvas it will draw on. Returns `true` if the plugin is ready to draw.
    fn initialise(&mut self, canvas: Self::Canvas) -> bool;

    /// Draw one frame, with the view centred on (`x`, `y`) in the display frame at `scale` display
    /// frame units per pixel.
    fn draw(&mut self, x: f64, y: f64, scale: f64);

    /// Icon representing the layer in its current style.
    fn icon(&self) -> RgbaImage;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// What was drawn in a successful frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Number of plan points drawn
    pub num_points: usize,

    /// Frame the plan was transformed from
    pub source_frame: String,

    /// Position marker, in the display frame, if one was drawn
    pub marker: Option<PlanPoint>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a frame could not be fully drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanDisplayError {
    #[error("No valid route received.")]
    NoData,

    #[error("Failed to transform route from {frame}: {source}")]
    TransformUnavailable { frame: String, source: TfError },

    #[error("Failed to find plan position in plan (position is for \"{found}\", plan is \"{expected}\").")]
    PlanPositionMismatch { expected: String, found: String },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PlanDisplayError {
    /// Severity the error is reported with
    pub fn status_level(&self) -> StatusLevel {
        match self {
            PlanDisplayError::NoData => StatusLevel::Error,
            PlanDisplayError::TransformUnavailable { .. } => StatusLevel::Error,
            PlanDisplayError::PlanPositionMismatch { .. } => StatusLevel::Error,
        }
    }

    /// Short message shown on the status line.
    pub fn status_message(&self) -> &'static str {
        match self {
            PlanDisplayError::NoData => "No valid route received.",
            PlanDisplayError::TransformUnavailable { .. } => "Failed to transform route",
            PlanDisplayError::PlanPositionMismatch { .. } => "Failed to find plan position in plan.",
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// The frame a plan's points are in. Plans without a frame are taken to be geodetic.
pub fn resolve_frame(plan: &Plan) -> &str {
    if plan.header.frame_id.trim().is_empty() {
        WGS84_FRAME
    } else {
        &plan.header.frame_id
    }
}

/// Draw one frame of the plan display.
///
/// The plan is drawn if it can be moved into the display frame. The position marker is only
/// drawn if the track refers to the plan by id; a track for another plan leaves the plan drawn
/// and returns [`PlanDisplayError::PlanPositionMismatch`].
pub fn draw_frame<C, T>(
    canvas: &mut C,
    tf: &T,
    plan: Option<&Plan>,
    track: Option<&PlanTrack>,
    settings: &PlanDisplaySettings,
) -> Result<FrameReport, PlanDisplayError>
where
    C: Canvas + ?Sized,
    T: TransformProvider + ?Sized,
{
    let plan = match plan {
        Some(p) if !p.is_empty() => p,
        _ => return Err(PlanDisplayError::NoData),
    };

    let source_frame = resolve_frame(plan);
    let transform =
        tf.lookup(source_frame, Utc::now())
            .map_err(|e| PlanDisplayError::TransformUnavailable {
                frame: source_frame.to_string(),
                source: e,
            })?;

    let display_plan = prepare_for_display(plan, &transform, tf.target_frame());
    draw_route(canvas, &display_plan, &settings.draw_style, settings.color);

    let mut report = FrameReport {
        num_points: display_plan.points.len(),
        source_frame: source_frame.to_string(),
        marker: None,
    };

    let track = match track {
        Some(t) => t,
        None => return Ok(report),
    };

    if track.plan_id != plan.id {
        return Err(PlanDisplayError::PlanPositionMismatch {
            expected: plan.id.clone(),
            found: track.plan_id.clone(),
        });
    }

    let dist_m = arc_length_at(&display_plan, &track.plan_position);
    if let Some(point) = interpolate_position(&display_plan, dist_m, true) {
        draw_position_marker(
            canvas,
            &point,
            settings.position_color,
            settings.marker_size,
        );
        report.marker = Some(point);
    }

    Ok(report)
}

/// Report the outcome of a frame to a status sink.
pub fn report_frame<S: StatusSink + ?Sized>(
    sink: &mut S,
    result: &Result<FrameReport, PlanDisplayError>,
) {
    match result {
        Ok(_) => sink.report(StatusLevel::Info, "OK"),
        Err(e) => {
            debug!("Plan display frame failed: {}", e);
            sink.report(e.status_level(), e.status_message())
        }
    }
}
