//! Recording canvas

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;

use super::{Canvas, Primitive, Rgba};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A canvas which records the primitives drawn on it.
///
/// Useful for hosts which do their own drawing, and for checking what a frame drew.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,

    /// The last view set on the canvas
    view: Option<(f64, f64, f64)>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PrimitiveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The last view set, as `(x, y, scale)`
    pub fn view(&self) -> Option<(f64, f64, f64)> {
        self.view
    }

    /// Remove all recorded primitives
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn num_line_strips(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::LineStrip { .. }))
            .count()
    }

    pub fn num_point_sets(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Points { .. }))
            .count()
    }

    /// The vertices and colour of every polygon drawn, in draw order.
    pub fn polygons(&self) -> Vec<(Vec<Point2<f64>>, Rgba)> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Polygon { vertices, color } => Some((vertices.clone(), *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for PrimitiveList {
    fn set_view(&mut self, x: f64, y: f64, scale: f64) {
        self.view = Some((x, y, scale));
    }

    fn draw(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}
