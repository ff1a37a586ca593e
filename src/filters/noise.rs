//! Noise removal filters: Median, Bilateral.
//!
//! Both operate on every channel of an `(height, width, channels)` image and
//! clamp out-of-image samples to the nearest edge pixel.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

// ============================================================================
// Median Filter
// ============================================================================

/// Apply median filter.
///
/// Removes salt-and-pepper noise while preserving edges.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Window width, odd; 1 returns a copy
///
/// # Returns
/// Median-filtered image with same channel count
pub fn median_u8(input: ArrayView3<u8>, kernel_size: usize) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if kernel_size <= 1 || height == 0 || width == 0 {
        return input.to_owned();
    }

    let radius = (kernel_size / 2) as isize;
    let window_size = kernel_size * kernel_size;

    let mut output = vec![0u8; height * width * channels];
    output
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let mut values: Vec<u8> = Vec::with_capacity(window_size);
            for x in 0..width {
                for c in 0..channels {
                    values.clear();
                    for dy in -radius..=radius {
                        let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                        for dx in -radius..=radius {
                            let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                            values.push(input[[sy, sx, c]]);
                        }
                    }

                    values.sort_unstable();
                    row[x * channels + c] = values[values.len() / 2];
                }
            }
        });

    Array3::from_shape_vec((height, width, channels), output)
        .expect("Shape mismatch in median_u8")
}

// ============================================================================
// Bilateral
// ============================================================================

/// Apply an edge-preserving bilateral filter.
///
/// Averages a 5x5 neighborhood, weighting each neighbor by spatial distance
/// and by color similarity to the center pixel.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `strength` - Denoising strength; larger values tolerate bigger color
///   differences and smooth more
///
/// # Returns
/// Denoised image with same channel count
pub fn bilateral_u8(input: ArrayView3<u8>, strength: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if height == 0 || width == 0 {
        return input.to_owned();
    }

    let radius = 2isize;
    let sigma_space = 2.0f32;
    let sigma_color = (strength * 50.0 + 10.0).max(1.0);

    let mut output = vec![0u8; height * width * channels];
    output
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let mut sum = vec![0.0f32; channels];
            for x in 0..width {
                sum.iter_mut().for_each(|s| *s = 0.0);
                let mut weight_sum = 0.0f32;

                for dy in -radius..=radius {
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    for dx in -radius..=radius {
                        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;

                        let spatial_dist = ((dx * dx + dy * dy) as f32).sqrt();
                        let spatial_weight =
                            (-spatial_dist / (2.0 * sigma_space * sigma_space)).exp();

                        let color_dist: f32 = (0..channels)
                            .map(|c| (input[[y, x, c]] as f32 - input[[sy, sx, c]] as f32).powi(2))
                            .sum::<f32>()
                            .sqrt();
                        let color_weight = (-color_dist / (2.0 * sigma_color * sigma_color)).exp();

                        let weight = spatial_weight * color_weight;
                        for (c, s) in sum.iter_mut().enumerate() {
                            *s += input[[sy, sx, c]] as f32 * weight;
                        }
                        weight_sum += weight;
                    }
                }

                for c in 0..channels {
                    row[x * channels + c] = if weight_sum > 0.0 {
                        (sum[c] / weight_sum + 0.5).clamp(0.0, 255.0) as u8
                    } else {
                        input[[y, x, c]]
                    };
                }
            }
        });

    Array3::from_shape_vec((height, width, channels), output)
        .expect("Shape mismatch in bilateral_u8")
}
