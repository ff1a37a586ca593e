//! Contour filter: shape validity and border extraction for one component.

use std::collections::BTreeSet;

use crate::geometry::{raster_line, ring_area, ring_perimeter, to_ring};
use crate::selection::{find_contours, Component, Contour};

/// Thresholds applied to every component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Minimum area as a percentage of `total_area`.
    pub area_percent_threshold: f64,
    /// Maximum outer perimeter / net area.
    pub arc_ratio_threshold: f64,
    pub check_shape_validity: bool,
    /// Reference area, the padded canvas.
    pub total_area: f64,
}

/// Kept outline of one component. Empty when the component was rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredIsland {
    /// Canvas pixels on kept contours, sorted and unique.
    pub border: Vec<(usize, usize)>,
    /// Kept contours in canvas coordinates, parents indexing this list.
    pub contours: Vec<Contour>,
}

impl FilteredIsland {
    pub fn is_empty(&self) -> bool {
        self.border.is_empty()
    }
}

/// Net area and outer perimeter of a contour hierarchy.
///
/// Outer areas count positively and hole areas negatively; only outer
/// borders contribute to the perimeter.
pub fn shape_measures(contours: &[Contour]) -> (f64, f64) {
    let mut net_area = 0.0;
    let mut net_perimeter = 0.0;
    for contour in contours {
        let ring = to_ring(&contour.points);
        let area = ring_area(&ring);
        if contour.is_hole {
            net_area -= area;
        } else {
            net_area += area;
            net_perimeter += ring_perimeter(&ring);
        }
    }
    (net_area, net_perimeter)
}

/// Whether a contour hierarchy is big and compact enough to be numbered.
pub fn is_valid_shape(contours: &[Contour], params: &FilterParams) -> bool {
    if !params.check_shape_validity {
        return true;
    }
    let (net_area, net_perimeter) = shape_measures(contours);
    if net_area <= 0.0 || params.total_area <= 0.0 {
        return false;
    }
    let area_percent = net_area / params.total_area * 100.0;
    let ratio = net_perimeter / net_area;
    area_percent >= params.area_percent_threshold && ratio <= params.arc_ratio_threshold
}

/// Nearest kept ancestor of contour `index`, re-indexed into the kept list.
fn kept_parent(contours: &[Contour], new_index: &[Option<usize>], index: usize) -> Option<usize> {
    let mut parent = contours[index].parent;
    while let Some(p) = parent {
        if let Some(kept) = new_index[p] {
            return Some(kept);
        }
        parent = contours[p].parent;
    }
    None
}

/// Trace a component, decide its validity, and stamp its kept outlines.
pub fn filter_contours(component: &Component, params: &FilterParams) -> FilteredIsland {
    let (oy, ox) = component.origin;
    let contours: Vec<Contour> = find_contours(component.mask.view())
        .into_iter()
        .map(|c| c.translated(oy as i32, ox as i32))
        .collect();

    if !is_valid_shape(&contours, params) {
        return FilteredIsland::default();
    }

    let keep: Vec<bool> = contours
        .iter()
        .map(|c| {
            let percent = if params.total_area > 0.0 {
                ring_area(&to_ring(&c.points)) / params.total_area * 100.0
            } else {
                0.0
            };
            percent >= params.area_percent_threshold
        })
        .collect();

    let mut new_index = vec![None; contours.len()];
    let mut next = 0;
    for (i, &k) in keep.iter().enumerate() {
        if k {
            new_index[i] = Some(next);
            next += 1;
        }
    }

    let mut border = BTreeSet::new();
    let mut kept = Vec::with_capacity(next);
    for (i, contour) in contours.iter().enumerate() {
        if !keep[i] {
            continue;
        }
        let n = contour.points.len();
        for j in 0..n {
            for (r, c) in raster_line(contour.points[j], contour.points[(j + 1) % n]) {
                border.insert((r as usize, c as usize));
            }
        }
        kept.push(Contour {
            points: contour.points.clone(),
            is_hole: contour.is_hole,
            parent: kept_parent(&contours, &new_index, i),
        });
    }

    FilteredIsland {
        border: border.into_iter().collect(),
        contours: kept,
    }
}
