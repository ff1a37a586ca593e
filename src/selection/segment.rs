//! Segmenter: split a palette index map into per-color connected regions.
//!
//! For each color present the binary mask is padded, optionally cleaned with
//! a morphological opening, and labeled. Colors are independent and run in
//! parallel.

use std::collections::BTreeSet;

use ndarray::{s, Array2, ArrayView2};
use rayon::prelude::*;

use super::labeling::label_components;
use crate::filters::core::pad_mask;
use crate::filters::morphology::open_binary;

/// One connected same-color region.
///
/// Coordinates are in padded-canvas space. `mask` covers only the bounding
/// box whose top-left corner is `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// 1-based palette index.
    pub color_index: u32,
    /// 1-based id within this color, in row-major discovery order.
    pub component_id: usize,
    /// `(row, col)` of the bounding box in the padded canvas.
    pub origin: (usize, usize),
    /// Cropped 0/1 mask.
    pub mask: Array2<u8>,
    pub pixel_count: usize,
}

impl Component {
    /// Canvas coordinates of every pixel in the component.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (oy, ox) = self.origin;
        self.mask
            .indexed_iter()
            .filter(|(_, &v)| v != 0)
            .map(move |((y, x), _)| (oy + y, ox + x))
    }
}

/// Output of [`segment`].
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// `(H + 2p, W + 2p)`.
    pub padded_shape: (usize, usize),
    /// Sorted by `(color_index, component_id)`.
    pub components: Vec<Component>,
}

fn segment_color(
    index_map: ArrayView2<u32>,
    color_index: u32,
    padding: usize,
    open_kernel_size: usize,
) -> Vec<Component> {
    let mask = index_map.mapv(|v| u8::from(v == color_index));
    let mut mask = pad_mask(mask.view(), padding);
    if open_kernel_size > 0 {
        mask = open_binary(mask.view(), open_kernel_size);
    }

    let labeling = label_components(mask.view());
    labeling
        .stats
        .iter()
        .enumerate()
        .map(|(i, stats)| {
            let id = (i + 1) as u32;
            let crop = labeling
                .labels
                .slice(s![stats.min_row..=stats.max_row, stats.min_col..=stats.max_col])
                .mapv(|l| u8::from(l == id));
            Component {
                color_index,
                component_id: i + 1,
                origin: (stats.min_row, stats.min_col),
                mask: crop,
                pixel_count: stats.pixel_count,
            }
        })
        .collect()
}

/// Label the connected regions of every color in an index map.
///
/// # Arguments
/// * `index_map` - 1-based palette indices, 0 for unassigned cells
/// * `padding` - Background cells added on each side
/// * `open_kernel_size` - Opening kernel, 0 disables
pub fn segment(index_map: ArrayView2<u32>, padding: usize, open_kernel_size: usize) -> Segmentation {
    let (height, width) = index_map.dim();
    let padded_shape = (height + 2 * padding, width + 2 * padding);

    let colors: BTreeSet<u32> = index_map.iter().copied().filter(|&v| v != 0).collect();
    let colors: Vec<u32> = colors.into_iter().collect();

    let per_color: Vec<Vec<Component>> = colors
        .par_iter()
        .map(|&c| segment_color(index_map, c, padding, open_kernel_size))
        .collect();

    let components: Vec<Component> = per_color.into_iter().flatten().collect();
    tracing::debug!(
        colors = colors.len(),
        components = components.len(),
        "segmented index map"
    );

    Segmentation {
        padded_shape,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(rows: &[&str]) -> Array2<u32> {
        let h = rows.len();
        let w = rows[0].len();
        let mut map = Array2::<u32>::zeros((h, w));
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                map[[y, x]] = ch.to_digit(10).unwrap();
            }
        }
        map
    }

    #[test]
    fn test_components_cover_each_color_exactly() {
        let map = map_from(&[
            "11222",
            "12212",
            "11112",
            "33312",
        ]);
        let seg = segment(map.view(), 2, 0);
        assert_eq!(seg.padded_shape, (8, 9));

        for color in 1..=3u32 {
            let mut covered = Array2::<u32>::zeros(seg.padded_shape);
            for comp in seg.components.iter().filter(|c| c.color_index == color) {
                for (y, x) in comp.pixels() {
                    covered[[y, x]] += 1;
                }
            }
            for ((y, x), &v) in map.indexed_iter() {
                let expected = u32::from(v == color);
                assert_eq!(covered[[y + 2, x + 2]], expected);
            }
            assert_eq!(covered.sum(), map.iter().filter(|&&v| v == color).count() as u32);
        }
    }

    #[test]
    fn test_sorted_by_color_then_id() {
        let map = map_from(&[
            "2121",
            "2121",
        ]);
        let seg = segment(map.view(), 0, 0);
        let keys: Vec<(u32, usize)> = seg
            .components
            .iter()
            .map(|c| (c.color_index, c.component_id))
            .collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(seg.components[0].origin, (0, 1));
        assert_eq!(seg.components[0].mask.dim(), (2, 1));
    }

    #[test]
    fn test_opening_cuts_thin_bridge() {
        // Two 5x5 blobs of color 1 joined by a one-pixel bridge on color 2.
        let mut map = Array2::<u32>::from_elem((7, 13), 2);
        for y in 1..6 {
            for x in 1..6 {
                map[[y, x]] = 1;
                map[[y, x + 6]] = 1;
            }
        }
        map[[3, 6]] = 1;

        let joined = segment(map.view(), 2, 0);
        assert_eq!(joined.components.iter().filter(|c| c.color_index == 1).count(), 1);

        let opened = segment(map.view(), 2, 3);
        let blobs: Vec<&Component> = opened
            .components
            .iter()
            .filter(|c| c.color_index == 1)
            .collect();
        assert_eq!(blobs.len(), 2);
        assert!(blobs.iter().all(|c| c.pixel_count == 25));
    }

    #[test]
    fn test_unassigned_cells_are_skipped() {
        let map = map_from(&["010", "000"]);
        let seg = segment(map.view(), 1, 0);
        assert_eq!(seg.components.len(), 1);
        assert_eq!(seg.components[0].origin, (1, 2));
        assert_eq!(seg.components[0].pixel_count, 1);
    }
}
