//! Pole of inaccessibility: the interior point farthest from every edge.
//!
//! Branch-and-bound over square cells. A cell's best possible distance is
//! its center distance plus its half-diagonal; cells that cannot beat the
//! current best by more than `precision` are discarded, the rest are split
//! into quadrants.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::polygon::signed_distance;
use super::{ring_area, Point};

#[derive(Debug, Clone, Copy)]
struct Cell {
    center: Point,
    half: f64,
    /// Signed distance from the center to the rings.
    distance: f64,
    /// Upper bound for any point in the cell.
    potential: f64,
}

impl Cell {
    fn new(center: Point, half: f64, rings: &[Vec<Point>]) -> Self {
        let distance = signed_distance(rings, center);
        Self {
            center,
            half,
            distance,
            potential: distance + half * std::f64::consts::SQRT_2,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.potential.total_cmp(&other.potential) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.potential.total_cmp(&other.potential)
    }
}

/// Area-weighted centroid of a ring, falling back to its first vertex.
fn ring_centroid(ring: &[Point]) -> Point {
    let area = ring_area(ring);
    if area == 0.0 {
        return ring[0];
    }
    let (mut cy, mut cx, mut twice) = (0.0, 0.0, 0.0);
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let f = a.1 * b.0 - b.1 * a.0;
        cy += (a.0 + b.0) * f;
        cx += (a.1 + b.1) * f;
        twice += f;
    }
    (cy / (3.0 * twice), cx / (3.0 * twice))
}

/// Find the point inside `rings` (even-odd) farthest from every edge.
///
/// # Returns
/// `(point, distance)`, or `None` when the rings have no extent in one
/// direction (a single point or a straight line).
pub fn pole_of_inaccessibility(rings: &[Vec<Point>], precision: f64) -> Option<(Point, f64)> {
    let points = rings.iter().flatten();
    let (mut min_r, mut min_c) = (f64::INFINITY, f64::INFINITY);
    let (mut max_r, mut max_c) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(r, c) in points {
        min_r = min_r.min(r);
        min_c = min_c.min(c);
        max_r = max_r.max(r);
        max_c = max_c.max(c);
    }
    if !min_r.is_finite() {
        return None;
    }

    let height = max_r - min_r;
    let width = max_c - min_c;
    let cell_size = height.min(width);
    if cell_size <= 0.0 {
        return None;
    }
    let half = cell_size / 2.0;

    let mut queue = BinaryHeap::new();
    let mut r = min_r;
    while r < max_r {
        let mut c = min_c;
        while c < max_c {
            queue.push(Cell::new((r + half, c + half), half, rings));
            c += cell_size;
        }
        r += cell_size;
    }

    let mut best = Cell::new(ring_centroid(&rings[0]), 0.0, rings);
    let bbox_cell = Cell::new((min_r + height / 2.0, min_c + width / 2.0), 0.0, rings);
    if bbox_cell.distance > best.distance {
        best = bbox_cell;
    }

    while let Some(cell) = queue.pop() {
        if cell.distance > best.distance {
            best = cell;
        }
        if cell.potential - best.distance <= precision {
            continue;
        }

        let h = cell.half / 2.0;
        let (cr, cc) = cell.center;
        for (dr, dc) in [(-h, -h), (-h, h), (h, -h), (h, h)] {
            queue.push(Cell::new((cr + dr, cc + dc), h, rings));
        }
    }

    Some((best.center, best.distance))
}
