//! # Rendering
//!
//! Plans are drawn as a small set of [`Primitive`]s onto a [`Canvas`]. Primitive coordinates are in
//! the display frame, while line widths and point sizes are in pixels.
//!
//! Two canvases are provided: [`PrimitiveList`] which just records what was drawn, and
//! [`RasterCanvas`] which rasterises onto an image.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod color;
mod icon;
mod list;
mod raster;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::nav::{Plan, PlanPoint};
use nalgebra::{Isometry2, Point2, Vector2};

use crate::{
    config::{DrawElement, DrawStyle},
    route::stop_points,
};

pub use color::{ColorParseError, Rgba};
pub use icon::{generate_icon, ICON_SIZE_PX};
pub use list::PrimitiveList;
pub use raster::RasterCanvas;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Width of route lines
///
/// Units: pixels
pub const ROUTE_LINE_WIDTH_PX: f32 = 3.0;

/// Size of route points, larger than the line width so they show on top of lines
///
/// Units: pixels
pub const ROUTE_POINT_SIZE_PX: f32 = 5.0;

/// Short side of the stop marker octagon
///
/// Units: display frame units
pub const STOP_MARKER_SIDE: f64 = 2.0;

/// Colour of stop markers
pub const STOP_MARKER_COLOR: Rgba = Rgba::RED;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A surface primitives can be drawn on.
pub trait Canvas {
    /// Set the view for the coming frame. `x` and `y` give the centre of the view in the display
    /// frame, `scale` the display frame units per pixel.
    fn set_view(&mut self, _x: f64, _y: f64, _scale: f64) {}

    /// Draw a primitive.
    fn draw(&mut self, primitive: Primitive);
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Connected line segments through each point in turn
    LineStrip {
        points: Vec<Point2<f64>>,
        width_px: f32,
        color: Rgba,
    },

    /// A filled round dot at each point, `size_px` across
    Points {
        points: Vec<Point2<f64>>,
        size_px: f32,
        color: Rgba,
    },

    /// A filled convex polygon
    Polygon {
        vertices: Vec<Point2<f64>>,
        color: Rgba,
    },
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Draw a plan in the given style, followed by markers for any stop points.
///
/// Lines need at least two points to be drawn. An empty plan draws nothing.
pub fn draw_route<C: Canvas + ?Sized>(canvas: &mut C, plan: &Plan, style: &DrawStyle, color: Rgba) {
    if plan.is_empty() {
        return;
    }

    let color = color.opaque();
    let points: Vec<Point2<f64>> = plan.points.iter().map(|p| Point2::new(p.x, p.y)).collect();

    if style.contains(DrawElement::Lines) && points.len() >= 2 {
        canvas.draw(Primitive::LineStrip {
            points: points.clone(),
            width_px: ROUTE_LINE_WIDTH_PX,
            color,
        });
    }

    if style.contains(DrawElement::Points) {
        canvas.draw(Primitive::Points {
            points,
            size_px: ROUTE_POINT_SIZE_PX,
            color,
        });
    }

    for stop in stop_points(plan) {
        draw_stop_marker(canvas, stop.x, stop.y);
    }
}

/// Draw an arrow at the point, pointing along its yaw.
///
/// The arrow's nose is `size` ahead of the point and its base `size` wide, centred on the point.
pub fn draw_position_marker<C: Canvas + ?Sized>(
    canvas: &mut C,
    point: &PlanPoint,
    color: Rgba,
    size: f64,
) {
    let pose = Isometry2::new(Vector2::new(point.x, point.y), point.yaw_or_zero());

    let vertices = [
        Point2::new(size, 0.0),
        Point2::new(0.0, size / 2.0),
        Point2::new(0.0, -size / 2.0),
    ]
    .iter()
    .map(|v| pose * v)
    .collect();

    canvas.draw(Primitive::Polygon {
        vertices,
        color: color.opaque(),
    });
}

/// Draw a stop sign octagon centred on the given position.
pub fn draw_stop_marker<C: Canvas + ?Sized>(canvas: &mut C, x: f64, y: f64) {
    let a = STOP_MARKER_SIDE / 2.0;
    let s = STOP_MARKER_SIDE * (1.0 + std::f64::consts::SQRT_2) / 2.0;

    let vertices = vec![
        Point2::new(x + s, y - a),
        Point2::new(x + s, y + a),
        Point2::new(x + a, y + s),
        Point2::new(x - a, y + s),
        Point2::new(x - s, y + a),
        Point2::new(x - s, y - a),
        Point2::new(x - a, y - s),
        Point2::new(x + a, y - s),
    ];

    canvas.draw(Primitive::Polygon {
        vertices,
        color: STOP_MARKER_COLOR,
    });
}
