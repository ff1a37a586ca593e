//! Nearest-palette quantization.

use ndarray::{Array2, Array3, ArrayView3};
use rayon::prelude::*;

use super::palette::Palette;
use crate::image::{pixel, Rgb};

/// Summed squared per-channel difference.
#[inline]
pub fn color_distance_sq(a: Rgb, b: Rgb) -> u32 {
    (0..3)
        .map(|c| {
            let d = a[c] as i32 - b[c] as i32;
            (d * d) as u32
        })
        .sum()
}

/// 0-based index of the closest color. Ties go to the lowest index.
#[inline]
pub fn nearest_index(color: Rgb, colors: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, &candidate) in colors.iter().enumerate() {
        let d = color_distance_sq(color, candidate);
        if d < best_dist {
            best = i;
            best_dist = d;
            if d == 0 {
                break;
            }
        }
    }
    best
}

/// Replace every pixel by its closest palette color.
///
/// # Returns
/// `(quantized_image, index_map)` where `index_map` holds 1-based palette
/// indices.
pub fn nearest_palette(image: ArrayView3<u8>, palette: &Palette) -> (Array3<u8>, Array2<u32>) {
    let (height, width, _) = image.dim();
    let colors = palette.colors();

    let mut indices = vec![0u32; height * width];
    indices
        .par_chunks_mut(width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = nearest_index(pixel(&image, y, x), colors) as u32 + 1;
            }
        });

    let index_map = Array2::from_shape_vec((height, width), indices)
        .expect("Shape mismatch in nearest_palette");
    let quantized = palette.paint(index_map.view());
    (quantized, index_map)
}
