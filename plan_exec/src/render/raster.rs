//! Rasterising canvas drawing onto an RGBA image through embedded-graphics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::{Rgb888, RgbColor},
    primitives::{Circle, Polyline, Primitive as _, PrimitiveStyle, Rectangle, Triangle},
    Drawable, Pixel,
};
use image::{ImageResult, RgbaImage};
use log::warn;
use nalgebra::Point2;
use std::{convert::Infallible, path::Path};

use super::{Canvas, Primitive, Rgba};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Pixel coordinates are clamped to this magnitude before drawing.
const MAX_PIXEL_COORD: f64 = (1 << 20) as f64;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A canvas which rasterises primitives onto an RGBA image.
///
/// The image has +Y up in the display frame, so the display frame's Y axis is flipped relative to
/// image rows. Setting the view starts a new frame and clears the image to the background colour.
/// Primitives are drawn opaque.
pub struct RasterCanvas {
    image: RgbaImage,

    background: Rgba,

    /// Display frame position of the image centre
    centre: Point2<f64>,

    /// Display frame units per pixel
    scale: f64,
}

/// Draw target writing opaque pixels into an RGBA image, discarding those outside it.
pub(super) struct ImageTarget<'a> {
    image: &'a mut RgbaImage,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RasterCanvas {
    /// Create a new canvas centred on the display frame origin at one unit per pixel.
    pub fn new(width_px: u32, height_px: u32, background: Rgba) -> Self {
        Self {
            image: RgbaImage::from_pixel(width_px, height_px, background.into()),
            background,
            centre: Point2::origin(),
            scale: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Save the current image, with the format taken from the path's extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image.save(path)
    }

    /// Fill the whole image with the background colour.
    pub fn clear(&mut self) {
        let bg: image::Rgba<u8> = self.background.into();
        for p in self.image.pixels_mut() {
            *p = bg;
        }
    }

    /// Convert a display frame position into continuous pixel coordinates.
    pub fn to_pixel(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            (point.x - self.centre.x) / self.scale + self.image.width() as f64 / 2.0,
            self.image.height() as f64 / 2.0 - (point.y - self.centre.y) / self.scale,
        )
    }

    /// The pixel containing a display frame position.
    fn to_pixel_index(&self, point: &Point2<f64>) -> Point {
        let p = self.to_pixel(point);
        let index = |c: f64| c.floor().max(-MAX_PIXEL_COORD).min(MAX_PIXEL_COORD) as i32;

        Point::new(index(p.x), index(p.y))
    }

    fn target(&mut self) -> ImageTarget<'_> {
        ImageTarget::new(&mut self.image)
    }
}

impl Canvas for RasterCanvas {
    fn set_view(&mut self, x: f64, y: f64, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.centre = Point2::new(x, y);
            self.scale = scale;
        } else {
            warn!("Ignoring invalid view scale {}", scale);
        }

        self.clear();
    }

    fn draw(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::LineStrip {
                points,
                width_px,
                color,
            } => {
                let points: Vec<Point> = points.iter().map(|p| self.to_pixel_index(p)).collect();
                let style =
                    PrimitiveStyle::with_stroke(Rgb888::from(color), whole_pixels(width_px));

                draw_ok(Polyline::new(&points).into_styled(style).draw(&mut self.target()));
            }
            Primitive::Points {
                points,
                size_px,
                color,
            } => {
                let style = PrimitiveStyle::with_fill(Rgb888::from(color));
                let diameter = whole_pixels(size_px);

                for p in points.iter() {
                    let centre = self.to_pixel_index(p);
                    draw_ok(
                        Circle::with_center(centre, diameter)
                            .into_styled(style)
                            .draw(&mut self.target()),
                    );
                }
            }
            Primitive::Polygon { vertices, color } => {
                let vertices: Vec<Point> =
                    vertices.iter().map(|p| self.to_pixel_index(p)).collect();
                let style = PrimitiveStyle::with_fill(Rgb888::from(color));

                // Convex polygons are filled as a fan of triangles
                for i in 1..vertices.len().saturating_sub(1) {
                    draw_ok(
                        Triangle::new(vertices[0], vertices[i], vertices[i + 1])
                            .into_styled(style)
                            .draw(&mut self.target()),
                    );
                }
            }
        }
    }
}

impl<'a> ImageTarget<'a> {
    pub(super) fn new(image: &'a mut RgbaImage) -> Self {
        Self { image }
    }

    fn put(&mut self, point: Point, color: Rgb888) {
        if point.x < 0 || point.y < 0 {
            return;
        }

        let (x, y) = (point.x as u32, point.y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image
                .put_pixel(x, y, image::Rgba([color.r(), color.g(), color.b(), 255]));
        }
    }
}

impl OriginDimensions for ImageTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for ImageTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.put(point, color);
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());

        let bottom_right = match area.bottom_right() {
            Some(p) => p,
            None => return Ok(()),
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.put(Point::new(x, y), color);
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Unwrap the result of drawing onto an [`ImageTarget`], which can't fail.
pub(super) fn draw_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(t) => t,
        Err(e) => match e {},
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Whole pixel width for a stroke or dot, at least one pixel.
fn whole_pixels(size_px: f32) -> u32 {
    if size_px.is_finite() && size_px >= 1.0 {
        size_px.round() as u32
    } else {
        1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn px(canvas: &RasterCanvas, x: u32, y: u32) -> Rgba {
        let p = canvas.image().get_pixel(x, y).0;
        Rgba {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        }
    }

    #[test]
    fn test_to_pixel() {
        let mut canvas = RasterCanvas::new(100, 50, Rgba::BLACK);
        canvas.set_view(10.0, 20.0, 0.5);

        assert_eq!(canvas.to_pixel(&Point2::new(10.0, 20.0)), Point2::new(50.0, 25.0));
        assert_eq!(canvas.to_pixel(&Point2::new(11.0, 21.0)), Point2::new(52.0, 23.0));
        assert_eq!(canvas.to_pixel_index(&Point2::new(11.2, 20.9)), Point::new(52, 23));
    }

    #[test]
    fn test_line_strip() {
        let mut canvas = RasterCanvas::new(20, 20, Rgba::BLACK);
        canvas.draw(Primitive::LineStrip {
            points: vec![Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0)],
            width_px: 3.0,
            color: Rgba::GREEN,
        });

        // Horizontal line through the middle row
        assert_eq!(px(&canvas, 10, 10), Rgba::GREEN);
        assert_eq!(px(&canvas, 7, 10), Rgba::GREEN);
        assert_eq!(px(&canvas, 10, 5), Rgba::BLACK);
        assert_eq!(px(&canvas, 2, 10), Rgba::BLACK);
    }

    #[test]
    fn test_polygon() {
        let mut canvas = RasterCanvas::new(20, 20, Rgba::BLACK);
        canvas.draw(Primitive::Polygon {
            vertices: vec![
                Point2::new(-4.0, -4.0),
                Point2::new(4.0, -4.0),
                Point2::new(4.0, 4.0),
                Point2::new(-4.0, 4.0),
            ],
            color: Rgba::RED,
        });

        assert_eq!(px(&canvas, 10, 10), Rgba::RED);
        assert_eq!(px(&canvas, 7, 12), Rgba::RED);
        assert_eq!(px(&canvas, 12, 7), Rgba::RED);
        assert_eq!(px(&canvas, 1, 1), Rgba::BLACK);
    }

    #[test]
    fn test_degenerate_polygon() {
        let mut canvas = RasterCanvas::new(10, 10, Rgba::BLACK);
        canvas.draw(Primitive::Polygon {
            vertices: vec![Point2::origin(), Point2::new(1.0, 1.0)],
            color: Rgba::RED,
        });

        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_points_are_round() {
        let mut canvas = RasterCanvas::new(20, 20, Rgba::BLACK);
        canvas.draw(Primitive::Points {
            points: vec![Point2::origin()],
            size_px: 9.0,
            color: Rgba::BLUE,
        });

        assert_eq!(px(&canvas, 10, 10), Rgba::BLUE);
        assert_eq!(px(&canvas, 13, 10), Rgba::BLUE);
        assert_eq!(px(&canvas, 10, 7), Rgba::BLUE);

        // The corners of the dot's bounding box are left uncovered
        assert_eq!(px(&canvas, 6, 6), Rgba::BLACK);
        assert_eq!(px(&canvas, 14, 14), Rgba::BLACK);
    }

    #[test]
    fn test_offscreen_is_clipped() {
        let mut canvas = RasterCanvas::new(10, 10, Rgba::BLACK);
        canvas.draw(Primitive::Points {
            points: vec![Point2::new(1.0e12, -1.0e12), Point2::new(4.5, 0.0)],
            size_px: 5.0,
            color: Rgba::BLUE,
        });

        // Only the point at the edge is partly drawn
        assert_eq!(px(&canvas, 9, 5), Rgba::BLUE);
        assert_eq!(px(&canvas, 0, 5), Rgba::BLACK);
    }

    #[test]
    fn test_set_view_clears() {
        let mut canvas = RasterCanvas::new(10, 10, Rgba::WHITE);
        canvas.draw(Primitive::Points {
            points: vec![Point2::origin()],
            size_px: 5.0,
            color: Rgba::BLUE,
        });
        assert_eq!(px(&canvas, 5, 5), Rgba::BLUE);

        canvas.set_view(0.0, 0.0, 1.0);
        assert_eq!(px(&canvas, 5, 5), Rgba::WHITE);
    }

    #[test]
    fn test_draws_opaque() {
        let mut canvas = RasterCanvas::new(10, 10, Rgba::TRANSPARENT);
        canvas.draw(Primitive::Points {
            points: vec![Point2::origin()],
            size_px: 3.0,
            color: Rgba::RED.with_alpha(10),
        });

        assert_eq!(px(&canvas, 5, 5), Rgba::RED);
        assert_eq!(px(&canvas, 0, 0), Rgba::TRANSPARENT);
    }
}
