//! # Plan display library.
//!
//! Draws navigation plans, and a vehicle's position along them, onto a 2D map display.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Display settings - topics, colours and draw style, and their persisted form
pub mod config;

/// Plan state - the newest plan and plan track received on the subscribed topics
pub mod plan_state;

/// Plan display plugin - draws the held plan and position each frame and reports the outcome
pub mod plugin;

/// Rendering - draws plans and markers as primitives onto a canvas
pub mod render;

/// Route geometry - transforms, orientations and interpolation along plans
pub mod route;

/// Status reporting
pub mod status;

/// Frame transforms - moves plans into the display frame
pub mod tf;
