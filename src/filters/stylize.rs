//! Luminance thresholding for two-tone stencil output.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

// BT.709 luminosity coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Luminance cut used for binarized stencils.
pub const STENCIL_THRESHOLD: u8 = 127;

/// Apply binary threshold.
///
/// Single-channel input is compared directly; RGB input is converted to
/// BT.709 luminosity first. Every output channel is either 0 or 255.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels)
/// * `threshold` - Pixels with luminosity above this become white
pub fn threshold_u8(input: ArrayView3<u8>, threshold: u8) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if height == 0 || width == 0 {
        return input.to_owned();
    }

    let mut output = vec![0u8; height * width * channels];
    output
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let lum = if channels < 3 {
                    input[[y, x, 0]] as f32
                } else {
                    LUMA_R * input[[y, x, 0]] as f32
                        + LUMA_G * input[[y, x, 1]] as f32
                        + LUMA_B * input[[y, x, 2]] as f32
                };

                let v = if lum > threshold as f32 { 255 } else { 0 };
                for c in 0..channels {
                    row[x * channels + c] = v;
                }
            }
        });

    Array3::from_shape_vec((height, width, channels), output)
        .expect("Shape mismatch in threshold_u8")
}
