//! Core utilities shared by the smoothing and mask filters.
//!
//! - Gaussian kernel generation sized from an explicit kernel width
//! - Zero padding of binary masks

use ndarray::{s, Array2, ArrayView2};

/// Sigma implied by a Gaussian kernel width when none is given explicitly.
///
/// Matches the usual `0.3 * ((k - 1) * 0.5 - 1) + 0.8` rule, so a 3-wide
/// kernel gets sigma 0.8 and a 5-wide kernel sigma 1.1.
pub fn sigma_for_kernel_size(kernel_size: usize) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian kernel of exactly `kernel_size` taps.
///
/// # Arguments
/// * `kernel_size` - Number of taps, odd
/// * `sigma` - Standard deviation of the Gaussian
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    if kernel_size <= 1 || sigma <= 0.0 {
        return vec![1.0];
    }

    let half = kernel_size / 2;
    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Surround a mask with `padding` cells of zeros on every side.
///
/// Regions touching the image edge then get a closed border like every other
/// region.
pub fn pad_mask(mask: ArrayView2<u8>, padding: usize) -> Array2<u8> {
    let (h, w) = mask.dim();
    let mut out = Array2::<u8>::zeros((h + 2 * padding, w + 2 * padding));
    out.slice_mut(s![padding..padding + h, padding..padding + w])
        .assign(&mask);
    out
}
