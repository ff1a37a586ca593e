//! Planar geometry on traced pixel rings.
//!
//! Rings are closed implicitly (last point connects to the first) and use
//! pixel-center coordinates `(row, col)`.
//!
//! - **polygon**: segment distance, even-odd containment, signed distance
//! - **simplify**: closed Douglas-Peucker
//! - **pole**: pole of inaccessibility search

pub mod polygon;
pub mod simplify;
pub mod pole;

pub use pole::pole_of_inaccessibility;
pub use polygon::{contains, signed_distance, strictly_inside};
pub use simplify::simplify_closed;

/// Integer pixel coordinate `(row, col)`.
pub type Pixel = (i32, i32);

/// Real-valued coordinate `(row, col)`.
pub type Point = (f64, f64);

#[inline]
pub fn to_point(p: Pixel) -> Point {
    (p.0 as f64, p.1 as f64)
}

pub fn to_ring(pixels: &[Pixel]) -> Vec<Point> {
    pixels.iter().map(|&p| to_point(p)).collect()
}

#[inline]
pub(crate) fn distance(a: Point, b: Point) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Unsigned shoelace area of a closed ring.
pub fn ring_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        twice += a.1 * b.0 - b.1 * a.0;
    }
    twice.abs() * 0.5
}

/// Arc length of a closed ring, closing edge included.
pub fn ring_perimeter(ring: &[Point]) -> f64 {
    if ring.len() < 2 {
        return 0.0;
    }
    (0..ring.len())
        .map(|i| distance(ring[i], ring[(i + 1) % ring.len()]))
        .sum()
}

/// Pixels on the straight segment from `a` to `b` (Bresenham), both ends
/// included.
pub fn raster_line(a: Pixel, b: Pixel) -> Vec<Pixel> {
    let (mut y, mut x) = a;
    let dx = (b.1 - a.1).abs();
    let dy = -(b.0 - a.0).abs();
    let sx = if a.1 < b.1 { 1 } else { -1 };
    let sy = if a.0 < b.0 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut out = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        out.push((y, x));
        if (y, x) == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    out
}
