//! Preview icon for the current draw style

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use embedded_graphics::{
    geometry::Point,
    pixelcolor::Rgb888,
    primitives::{Circle, Line, Primitive as _, PrimitiveStyle},
    Drawable,
};
use image::{imageops, RgbaImage};

use super::{
    raster::{draw_ok, ImageTarget},
    Rgba,
};
use crate::config::{DrawElement, DrawStyle};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Width and height of the icon
///
/// Units: pixels
pub const ICON_SIZE_PX: u32 = 16;

/// The icon is drawn this many times larger and then averaged down.
const SUPERSAMPLE: u32 = 4;

/// Diameter of the dot shown for the points style
///
/// Units: pixels
const DOT_DIAMETER_PX: u32 = 7;

/// Width of the line shown for the lines style
///
/// Units: pixels
const LINE_WIDTH_PX: u32 = 3;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate an icon showing how plans will be drawn with the given style and colour.
///
/// The background is transparent. A dot is drawn in the centre for the points style and a
/// diagonal line from bottom left to top right for the lines style. Edges are anti-aliased through
/// the alpha channel.
pub fn generate_icon(style: &DrawStyle, color: Rgba) -> RgbaImage {
    let size = ICON_SIZE_PX * SUPERSAMPLE;
    let at = |x: u32, y: u32| Point::new((x * SUPERSAMPLE) as i32, (y * SUPERSAMPLE) as i32);

    // The background carries the colour so averaging only changes the alpha
    let mut image = RgbaImage::from_pixel(size, size, color.with_alpha(0).into());
    let mut target = ImageTarget::new(&mut image);
    let rgb = Rgb888::from(color);

    if style.contains(DrawElement::Points) {
        draw_ok(
            Circle::with_center(at(8, 8), DOT_DIAMETER_PX * SUPERSAMPLE)
                .into_styled(PrimitiveStyle::with_fill(rgb))
                .draw(&mut target),
        );
    }

    if style.contains(DrawElement::Lines) {
        draw_ok(
            Line::new(at(1, 14), at(14, 1))
                .into_styled(PrimitiveStyle::with_stroke(rgb, LINE_WIDTH_PX * SUPERSAMPLE))
                .draw(&mut target),
        );
    }

    imageops::thumbnail(&image, ICON_SIZE_PX, ICON_SIZE_PX)
}

#[cfg(test)]
mod test {
    use super::*;

    fn alpha(icon: &RgbaImage, x: u32, y: u32) -> u8 {
        icon.get_pixel(x, y).0[3]
    }

    #[test]
    fn test_icon_size() {
        let icon = generate_icon(&DrawStyle::lines(), Rgba::GREEN);
        assert_eq!(icon.dimensions(), (ICON_SIZE_PX, ICON_SIZE_PX));
    }

    #[test]
    fn test_points_icon() {
        let icon = generate_icon(&DrawStyle::points(), Rgba::RED);

        // Solid in the centre, transparent in the corners
        assert_eq!(icon.get_pixel(8, 8).0, [255, 0, 0, 255]);
        assert_eq!(alpha(&icon, 7, 7), 255);
        assert_eq!(alpha(&icon, 0, 0), 0);
        assert_eq!(alpha(&icon, 1, 14), 0);
        assert_eq!(alpha(&icon, 14, 1), 0);

        // Partial coverage on the edge of the dot
        let edge = alpha(&icon, 11, 8);
        assert!(edge > 0 && edge < 255);
    }

    #[test]
    fn test_lines_icon() {
        let icon = generate_icon(&DrawStyle::lines(), Rgba::GREEN);

        // Pixels along the diagonal are covered, off-diagonal corners are not
        assert_eq!(alpha(&icon, 7, 7), 255);
        assert_eq!(alpha(&icon, 3, 11), 255);
        assert_eq!(alpha(&icon, 0, 0), 0);
        assert_eq!(alpha(&icon, 15, 15), 0);

        // Flat caps stop short of the image corners
        assert_eq!(alpha(&icon, 0, 15), 0);
        assert_eq!(alpha(&icon, 15, 0), 0);
    }

    #[test]
    fn test_points_and_lines_icon() {
        let both = generate_icon(&DrawStyle::points_and_lines(), Rgba::BLUE);
        let points = generate_icon(&DrawStyle::points(), Rgba::BLUE);
        let lines = generate_icon(&DrawStyle::lines(), Rgba::BLUE);

        for (x, y, p) in both.enumerate_pixels() {
            let expected = alpha(&points, x, y).max(alpha(&lines, x, y));
            assert!(p.0[3] >= expected);
        }
    }

    #[test]
    fn test_icon_ignores_colour_alpha() {
        let icon = generate_icon(&DrawStyle::points(), Rgba::GREEN.with_alpha(10));
        assert_eq!(alpha(&icon, 8, 8), 255);
    }
}
