//! # Route geometry
//!
//! Operations on [`Plan`]s needed to draw them: moving a plan into the display frame, collapsing
//! it onto the drawing plane, deriving point headings, and locating a position along it.
//!
//! All operations produce new plans rather than mutating their input, so the plan as received
//! remains the authoritative copy while each render pass works on its own derived copy.
//!
//! Distances along a plan are measured in the XY plane, summing the Euclidean length of each
//! segment joining consecutive points. Segments shorter than [`DEGENERATE_LENGTH`] are treated as
//! having no direction and are skipped wherever a heading is needed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod geometry;
mod interp;
mod segment;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use geometry::*;
pub use interp::*;
pub use segment::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Segments shorter than this are considered degenerate (coincident points).
///
/// Units: plan frame units
pub const DEGENERATE_LENGTH: f64 = 1e-9;
