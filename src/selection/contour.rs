//! Contour hierarchy extraction from binary masks.
//!
//! Topological border following (Suzuki & Abe): the mask is scanned in
//! raster order, every outer border and every hole border is traced exactly
//! once through the Moore neighborhood, and each border records the border
//! that immediately encloses it. Foreground is 8-connected, background
//! 4-connected, and cells outside the mask count as background.

use ndarray::{Array2, ArrayView2};

use crate::geometry::Pixel;

/// One traced border.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Border pixels in tracing order, `(row, col)`. Closed implicitly.
    pub points: Vec<Pixel>,
    /// Hole border (separates a foreground region from an enclosed hole).
    pub is_hole: bool,
    /// Index of the enclosing contour in the same list, `None` for
    /// top-level outer borders.
    pub parent: Option<usize>,
}

impl Contour {
    /// Shift every point by `(rows, cols)`.
    pub fn translated(mut self, rows: i32, cols: i32) -> Self {
        for p in self.points.iter_mut() {
            p.0 += rows;
            p.1 += cols;
        }
        self
    }
}

/// Moore neighborhood directions as `(drow, dcol)`, counter-clockwise
/// starting east.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),   // 0: east
    (-1, 1),  // 1: north-east
    (-1, 0),  // 2: north
    (-1, -1), // 3: north-west
    (0, -1),  // 4: west
    (1, -1),  // 5: south-west
    (1, 0),   // 6: south
    (1, 1),   // 7: south-east
];

#[inline]
fn direction(from: Pixel, to: Pixel) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRECTIONS
        .iter()
        .position(|&d| d == delta)
        .expect("neighbors are 8-adjacent")
}

#[inline]
fn step(p: Pixel, dir: usize) -> Pixel {
    (p.0 + DIRECTIONS[dir].0, p.1 + DIRECTIONS[dir].1)
}

#[inline]
fn at(f: &Array2<i32>, p: Pixel) -> i32 {
    f[[p.0 as usize, p.1 as usize]]
}

#[inline]
fn set(f: &mut Array2<i32>, p: Pixel, v: i32) {
    f[[p.0 as usize, p.1 as usize]] = v;
}

/// Follow one border starting at `start`, entered from background pixel
/// `from`. Marks traced pixels with `nbd` (negative where the east neighbor
/// is background) and returns the pixels in order.
fn trace_border(f: &mut Array2<i32>, start: Pixel, from: Pixel, nbd: i32) -> Vec<Pixel> {
    // Clockwise search for the first non-zero neighbor
    let d0 = direction(start, from);
    let first = (0..8)
        .map(|k| step(start, (d0 + 8 - k) % 8))
        .find(|&q| at(f, q) != 0);

    let Some(p1) = first else {
        // Isolated pixel
        set(f, start, -nbd);
        return vec![start];
    };

    let mut points = Vec::new();
    let mut p2 = p1;
    let mut p3 = start;
    loop {
        // Counter-clockwise search around p3, starting after p2
        let d2 = direction(p3, p2);
        let mut p4 = p2;
        let mut east_is_background = false;
        for k in 1..=8 {
            let d = (d2 + k) % 8;
            let q = step(p3, d);
            if at(f, q) != 0 {
                p4 = q;
                break;
            }
            if d == 0 {
                east_is_background = true;
            }
        }

        if east_is_background {
            set(f, p3, -nbd);
        } else if at(f, p3) == 1 {
            set(f, p3, nbd);
        }
        points.push(p3);

        if p4 == start && p3 == p1 {
            break;
        }
        p2 = p3;
        p3 = p4;
    }

    points
}

/// Extract every outer and hole border of a mask with its parent links.
///
/// Contours are listed in the order their starting pixel is met by a
/// row-major scan. Any non-zero cell is foreground.
pub fn find_contours(mask: ArrayView2<u8>) -> Vec<Contour> {
    let (height, width) = mask.dim();
    if height == 0 || width == 0 {
        return Vec::new();
    }

    // Working copy with a one-cell background frame
    let mut f = Array2::<i32>::zeros((height + 2, width + 2));
    for ((y, x), &v) in mask.indexed_iter() {
        if v != 0 {
            f[[y + 1, x + 1]] = 1;
        }
    }

    // Per border number: (is_hole, parent border, contour index).
    // Border 1 is the frame, a hole border with no contour.
    let mut borders: Vec<(bool, usize, Option<usize>)> = vec![(false, 0, None), (true, 0, None)];
    let mut contours: Vec<Contour> = Vec::new();

    for i in 1..=height as i32 {
        let mut lnbd = 1usize;
        for j in 1..=width as i32 {
            let fij = at(&f, (i, j));

            let start = if fij == 1 && at(&f, (i, j - 1)) == 0 {
                Some((false, (i, j - 1)))
            } else if fij >= 1 && at(&f, (i, j + 1)) == 0 {
                if fij > 1 {
                    lnbd = fij as usize;
                }
                Some((true, (i, j + 1)))
            } else {
                None
            };

            if let Some((is_hole, from)) = start {
                let nbd = borders.len();
                let (lnbd_hole, lnbd_parent, _) = borders[lnbd];
                let parent = if is_hole == lnbd_hole { lnbd_parent } else { lnbd };

                let points = trace_border(&mut f, (i, j), from, nbd as i32)
                    .into_iter()
                    .map(|(r, c)| (r - 1, c - 1))
                    .collect();

                borders.push((is_hole, parent, Some(contours.len())));
                contours.push(Contour {
                    points,
                    is_hole,
                    parent: borders[parent].2,
                });
            }

            let v = at(&f, (i, j));
            if v != 0 && v != 1 {
                lnbd = v.unsigned_abs() as usize;
            }
        }
    }

    contours
}
