//! Blur filters for RGB images.
//!
//! Provides Gaussian and box blur with an explicit kernel width. Out-of-image
//! samples are clamped to the nearest edge pixel.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use super::core::{gaussian_kernel_1d, sigma_for_kernel_size};

/// Apply Gaussian blur.
///
/// Uses separable 2-pass convolution, rows processed in parallel.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Kernel width in pixels, odd; 1 returns a copy
///
/// # Returns
/// Blurred image with same dimensions
pub fn gaussian_blur_u8(input: ArrayView3<u8>, kernel_size: usize) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if kernel_size <= 1 || height == 0 || width == 0 {
        return input.to_owned();
    }

    let kernel = gaussian_kernel_1d(kernel_size, sigma_for_kernel_size(kernel_size));
    let half = kernel.len() / 2;

    // Horizontal pass
    let mut temp = vec![0.0f32; height * width * channels];
    temp.par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sx = (x as isize + ki as isize - half as isize)
                            .clamp(0, width as isize - 1) as usize;
                        sum += input[[y, sx, c]] as f32 * kv;
                    }
                    row[x * channels + c] = sum;
                }
            }
        });

    // Vertical pass
    let mut output = vec![0u8; height * width * channels];
    output
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sy = (y as isize + ki as isize - half as isize)
                            .clamp(0, height as isize - 1) as usize;
                        sum += temp[(sy * width + x) * channels + c] * kv;
                    }
                    row[x * channels + c] = (sum + 0.5).clamp(0.0, 255.0) as u8;
                }
            }
        });

    Array3::from_shape_vec((height, width, channels), output)
        .expect("Shape mismatch in gaussian_blur_u8")
}

/// Apply box blur.
///
/// Faster than Gaussian blur but produces a blockier result.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Box width in pixels, odd; 1 returns a copy
///
/// # Returns
/// Blurred image with same dimensions
pub fn box_blur_u8(input: ArrayView3<u8>, kernel_size: usize) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if kernel_size <= 1 || height == 0 || width == 0 {
        return input.to_owned();
    }

    let r = (kernel_size / 2) as isize;
    let count = (kernel_size * kernel_size) as u32;

    let mut output = vec![0u8; height * width * channels];
    output
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0u32;
                    for dy in -r..=r {
                        let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                        for dx in -r..=r {
                            let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                            sum += input[[sy, sx, c]] as u32;
                        }
                    }
                    row[x * channels + c] = ((sum + count / 2) / count) as u8;
                }
            }
        });

    Array3::from_shape_vec((height, width, channels), output)
        .expect("Shape mismatch in box_blur_u8")
}
