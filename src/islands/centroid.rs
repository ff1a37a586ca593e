//! Label anchor placement.

use crate::geometry::{
    pole_of_inaccessibility, ring_perimeter, simplify_closed, strictly_inside, to_ring, Point,
};
use crate::selection::Contour;

/// Search precision in pixels.
const POLE_PRECISION: f64 = 1.0;

/// Douglas-Peucker tolerance as a fraction of each ring's perimeter.
const SIMPLIFY_FRACTION: f64 = 0.01;

fn rounded_inside(rings: &[Vec<Point>], raw: &[Vec<Point>]) -> Option<(usize, usize)> {
    let ((r, c), _) = pole_of_inaccessibility(rings, POLE_PRECISION)?;
    let (r, c) = (r.round(), c.round());
    if r < 0.0 || c < 0.0 || !strictly_inside(raw, (r, c)) {
        return None;
    }
    Some((r as usize, c as usize))
}

/// Interior point of a contour hierarchy, suitable for a numeral.
///
/// The pole of inaccessibility of the simplified rings is rounded to a pixel
/// and accepted only when it lies strictly inside the traced rings (inside
/// the outer border, outside every hole). Otherwise the search is repeated on
/// the traced rings. `None` when neither yields a safe pixel.
pub fn locate_centroid(contours: &[Contour]) -> Option<(usize, usize)> {
    if contours.is_empty() {
        return None;
    }

    let raw: Vec<Vec<Point>> = contours.iter().map(|c| to_ring(&c.points)).collect();
    let simplified: Vec<Vec<Point>> = raw
        .iter()
        .map(|ring| {
            let simple = simplify_closed(ring, SIMPLIFY_FRACTION * ring_perimeter(ring));
            if simple.len() < 3 {
                ring.clone()
            } else {
                simple
            }
        })
        .collect();

    rounded_inside(&simplified, &raw).or_else(|| rounded_inside(&raw, &raw))
}
