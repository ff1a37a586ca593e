//! Drawing primitives on `(H, W, 3)` canvases. Out-of-canvas pixels are
//! clipped silently.

use ndarray::Array3;

use crate::geometry::{raster_line, Pixel};
use crate::image::Rgb;

/// Canvas filled with white.
pub fn white_canvas(height: usize, width: usize) -> Array3<u8> {
    Array3::from_elem((height, width, 3), 255u8)
}

#[inline]
pub fn put_pixel(canvas: &mut Array3<u8>, row: i32, col: i32, color: Rgb) {
    let (height, width, _) = canvas.dim();
    if row < 0 || col < 0 || row as usize >= height || col as usize >= width {
        return;
    }
    for c in 0..3 {
        canvas[[row as usize, col as usize, c]] = color[c];
    }
}

/// Filled disc of integer `radius` (0 draws one pixel).
pub fn stamp_disc(canvas: &mut Array3<u8>, center: Pixel, radius: i32, color: Rgb) {
    let r_sq = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dy * dy + dx * dx <= r_sq {
                put_pixel(canvas, center.0 + dy, center.1 + dx, color);
            }
        }
    }
}

/// Straight line of the given stroke width.
pub fn draw_line(canvas: &mut Array3<u8>, a: Pixel, b: Pixel, thickness: usize, color: Rgb) {
    let radius = (thickness / 2) as i32;
    for p in raster_line(a, b) {
        stamp_disc(canvas, p, radius, color);
    }
}
