//! Binary morphology on single-channel masks: Erode, Dilate, Open.
//!
//! Masks are `Array2<u8>` where any non-zero cell is foreground. Outputs hold
//! only `0` and `1`. The structuring element is a `k x k` square centered on
//! the pixel, so `k` should be odd.
//!
//! ## Performance
//!
//! A square element is separable: a horizontal pass followed by a vertical
//! pass gives O(n x 2k) instead of O(n x k²). Rows are processed in parallel
//! with Rayon.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

/// Shared separable pass. `keep_all` selects erosion (every sample set) over
/// dilation (any sample set). Out-of-bounds samples are background.
fn separable_pass(input: ArrayView2<u8>, kernel_size: usize, keep_all: bool) -> Array2<u8> {
    let (height, width) = input.dim();
    let r = (kernel_size / 2) as isize;

    let reduce = |set: usize, total: usize, in_bounds: bool| -> u8 {
        let hit = if keep_all {
            in_bounds && set == total
        } else {
            set > 0
        };
        hit as u8
    };

    // Pass 1: horizontal
    let mut temp = vec![0u8; height * width];
    temp.par_chunks_mut(width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let x_start = x as isize - r;
                let x_end = x as isize + r;
                let in_bounds = x_start >= 0 && x_end < width as isize;
                let lo = x_start.max(0) as usize;
                let hi = x_end.min(width as isize - 1) as usize;
                let set = (lo..=hi).filter(|&sx| input[[y, sx]] != 0).count();
                row[x] = reduce(set, hi - lo + 1, in_bounds);
            }
        });

    // Pass 2: vertical
    let mut output = vec![0u8; height * width];
    output
        .par_chunks_mut(width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            let y_start = y as isize - r;
            let y_end = y as isize + r;
            let in_bounds = y_start >= 0 && y_end < height as isize;
            let lo = y_start.max(0) as usize;
            let hi = y_end.min(height as isize - 1) as usize;
            for x in 0..width {
                let set = (lo..=hi).filter(|&sy| temp[sy * width + x] != 0).count();
                row[x] = reduce(set, hi - lo + 1, in_bounds);
            }
        });

    Array2::from_shape_vec((height, width), output).expect("Shape mismatch in morphology pass")
}

/// Erode a binary mask with a `kernel_size` square.
///
/// A pixel survives only if the whole window around it is foreground and
/// inside the mask.
pub fn erode_binary(input: ArrayView2<u8>, kernel_size: usize) -> Array2<u8> {
    if kernel_size <= 1 || input.is_empty() {
        return input.mapv(|v| (v != 0) as u8);
    }
    separable_pass(input, kernel_size, true)
}

/// Dilate a binary mask with a `kernel_size` square.
pub fn dilate_binary(input: ArrayView2<u8>, kernel_size: usize) -> Array2<u8> {
    if kernel_size <= 1 || input.is_empty() {
        return input.mapv(|v| (v != 0) as u8);
    }
    separable_pass(input, kernel_size, false)
}

/// Morphological opening: erosion followed by dilation.
///
/// Removes every feature narrower than `kernel_size`, such as one-pixel
/// bridges between blobs and isolated specks. `0` leaves the mask unchanged.
pub fn open_binary(input: ArrayView2<u8>, kernel_size: usize) -> Array2<u8> {
    let eroded = erode_binary(input, kernel_size);
    dilate_binary(eroded.view(), kernel_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_removes_single_pixel_speck() {
        let mut mask = Array2::<u8>::zeros((5, 5));
        mask[[2, 2]] = 1;
        let out = open_binary(mask.view(), 3);
        assert_eq!(out.sum(), 0);
    }

    #[test]
    fn test_open_keeps_square() {
        let mut mask = Array2::<u8>::zeros((7, 7));
        for y in 1..6 {
            for x in 1..6 {
                mask[[y, x]] = 255;
            }
        }
        let out = open_binary(mask.view(), 3);
        assert_eq!(out.sum(), 25);
        assert_eq!(out[[1, 1]], 1);
    }

    #[test]
    fn test_erode_treats_outside_as_background() {
        let mask = Array2::<u8>::ones((3, 3));
        let out = erode_binary(mask.view(), 3);
        assert_eq!(out.sum(), 1);
        assert_eq!(out[[1, 1]], 1);
    }

    #[test]
    fn test_dilate_grows_by_radius() {
        let mut mask = Array2::<u8>::zeros((5, 5));
        mask[[2, 2]] = 1;
        let out = dilate_binary(mask.view(), 3);
        assert_eq!(out.sum(), 9);
        assert_eq!(out[[1, 3]], 1);
        assert_eq!(out[[0, 2]], 0);
    }

    #[test]
    fn test_zero_kernel_is_identity() {
        let mut mask = Array2::<u8>::zeros((3, 3));
        mask[[0, 1]] = 7;
        let out = open_binary(mask.view(), 0);
        assert_eq!(out[[0, 1]], 1);
        assert_eq!(out.sum(), 1);
    }
}
