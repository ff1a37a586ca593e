//! Point-in-polygon queries over sets of rings.
//!
//! All queries treat a list of rings with the even-odd rule: a point is
//! inside when it is enclosed by an odd number of rings, so holes subtract
//! from their outer ring.

use super::Point;

/// Boundary tolerance for [`strictly_inside`].
const BOUNDARY_EPS: f64 = 1e-9;

/// Squared distance from `p` to the segment `a`-`b`.
pub fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let (mut y, mut x) = a;
    let dy = b.0 - y;
    let dx = b.1 - x;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.1 - x) * dx + (p.0 - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            y = b.0;
            x = b.1;
        } else if t > 0.0 {
            y += dy * t;
            x += dx * t;
        }
    }

    (p.0 - y).powi(2) + (p.1 - x).powi(2)
}

fn edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    (0..ring.len()).map(move |i| (ring[i], ring[(i + 1) % ring.len()]))
}

/// Even-odd containment over all rings.
pub fn contains(rings: &[Vec<Point>], p: Point) -> bool {
    let mut inside = false;
    for ring in rings {
        for (a, b) in edges(ring) {
            if (a.0 > p.0) != (b.0 > p.0)
                && p.1 < (b.1 - a.1) * (p.0 - a.0) / (b.0 - a.0) + a.1
            {
                inside = !inside;
            }
        }
    }
    inside
}

/// Smallest distance from `p` to any ring edge.
pub fn boundary_distance(rings: &[Vec<Point>], p: Point) -> f64 {
    rings
        .iter()
        .flat_map(|ring| edges(ring))
        .map(|(a, b)| segment_distance_sq(p, a, b))
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Distance to the nearest edge, positive inside and negative outside.
pub fn signed_distance(rings: &[Vec<Point>], p: Point) -> f64 {
    let d = boundary_distance(rings, p);
    if contains(rings, p) {
        d
    } else {
        -d
    }
}

/// Inside and not on any edge.
pub fn strictly_inside(rings: &[Vec<Point>], p: Point) -> bool {
    contains(rings, p) && boundary_distance(rings, p) > BOUNDARY_EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lo: f64, hi: f64) -> Vec<Point> {
        vec![(lo, lo), (lo, hi), (hi, hi), (hi, lo)]
    }

    #[test]
    fn test_segment_distance() {
        assert_eq!(segment_distance_sq((1.0, 5.0), (0.0, 0.0), (0.0, 10.0)), 1.0);
        // Beyond the end clamps to the endpoint.
        assert_eq!(segment_distance_sq((0.0, 13.0), (0.0, 0.0), (0.0, 10.0)), 9.0);
        // Degenerate segment is a point.
        assert_eq!(segment_distance_sq((3.0, 4.0), (0.0, 0.0), (0.0, 0.0)), 25.0);
    }

    #[test]
    fn test_hole_subtracts() {
        let rings = vec![square(0.0, 10.0), square(3.0, 7.0)];
        assert!(contains(&rings, (1.0, 1.0)));
        assert!(!contains(&rings, (5.0, 5.0)));
        assert!(!contains(&rings, (12.0, 5.0)));
        assert!(signed_distance(&rings, (5.0, 5.0)) < 0.0);
        assert!((signed_distance(&rings, (1.5, 5.0)) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_is_not_strictly_inside() {
        let rings = vec![square(0.0, 4.0)];
        assert!(strictly_inside(&rings, (2.0, 2.0)));
        assert!(!strictly_inside(&rings, (0.0, 2.0)));
        assert!(!strictly_inside(&rings, (4.0, 4.0)));
    }
}
