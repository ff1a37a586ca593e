//! Denoiser entry point: picks a smoothing filter from the configuration.

use ndarray::{Array3, ArrayView3};

use super::blur::{box_blur_u8, gaussian_blur_u8};
use super::noise::{bilateral_u8, median_u8};
use crate::config::DenoiseAlgorithm;

/// Smooth an RGB image with the selected algorithm.
///
/// `kernel_size` drives Gaussian, box and median filtering; `strength` drives
/// the bilateral filter.
pub fn denoise(
    image: ArrayView3<u8>,
    algorithm: DenoiseAlgorithm,
    kernel_size: usize,
    strength: f32,
) -> Array3<u8> {
    match algorithm {
        DenoiseAlgorithm::Gaussian => gaussian_blur_u8(image, kernel_size),
        DenoiseAlgorithm::Box => box_blur_u8(image, kernel_size),
        DenoiseAlgorithm::Median => median_u8(image, kernel_size),
        DenoiseAlgorithm::Bilateral => bilateral_u8(image, strength),
    }
}
