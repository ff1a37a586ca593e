//! Douglas-Peucker simplification of closed rings.

use super::polygon::segment_distance_sq;
use super::Point;

/// Mark the vertices of `points[first..=last]` to keep.
fn douglas_peucker(points: &[Point], first: usize, last: usize, tol_sq: f64, keep: &mut [bool]) {
    let mut stack = vec![(first, last)];
    while let Some((first, last)) = stack.pop() {
        let mut max_sq = tol_sq;
        let mut index = None;
        for i in first + 1..last {
            let d = segment_distance_sq(points[i], points[first], points[last]);
            if d > max_sq {
                index = Some(i);
                max_sq = d;
            }
        }
        if let Some(i) = index {
            keep[i] = true;
            stack.push((first, i));
            stack.push((i, last));
        }
    }
}

/// Simplify a closed ring, keeping vertices farther than `tolerance` from
/// the simplified outline.
///
/// The ring is split at the vertex farthest from its first vertex and both
/// halves are simplified as open chains. Rings with fewer than three
/// vertices come back unchanged.
pub fn simplify_closed(ring: &[Point], tolerance: f64) -> Vec<Point> {
    let n = ring.len();
    if n < 3 {
        return ring.to_vec();
    }

    let start = ring[0];
    let split = (1..n)
        .max_by(|&a, &b| {
            let da = (ring[a].0 - start.0).powi(2) + (ring[a].1 - start.1).powi(2);
            let db = (ring[b].0 - start.0).powi(2) + (ring[b].1 - start.1).powi(2);
            da.total_cmp(&db).then(b.cmp(&a))
        })
        .unwrap_or(1);

    // Closing copy of the first vertex at index n
    let mut closed = ring.to_vec();
    closed.push(start);

    let mut keep = vec![false; n + 1];
    keep[0] = true;
    keep[split] = true;
    let tol_sq = tolerance * tolerance;
    douglas_peucker(&closed, 0, split, tol_sq, &mut keep);
    douglas_peucker(&closed, split, n, tol_sq, &mut keep);

    closed[..n]
        .iter()
        .zip(&keep[..n])
        .filter(|(_, &k)| k)
        .map(|(&p, _)| p)
        .collect()
}
