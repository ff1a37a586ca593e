//! Conversion from raw interleaved buffers to the `(H, W, 3)` RGB layout.
//!
//! All pipeline stages work on `ndarray::Array3<u8>` RGB images. Callers that
//! hold a flat byte buffer (decoders, Python, JavaScript) go through
//! [`rgb_from_raw`] first.

use ndarray::Array3;

use crate::error::{Result, StencilError};

/// An RGB color, one byte per channel.
pub type Rgb = [u8; 3];

/// Build an RGB image from a flat interleaved buffer.
///
/// # Arguments
/// * `data` - Interleaved pixel bytes, row-major
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 (gray, replicated to RGB), 3 (RGB) or 4 (RGBA, alpha dropped)
pub fn rgb_from_raw(data: &[u8], width: usize, height: usize, channels: usize) -> Result<Array3<u8>> {
    if width == 0 || height == 0 {
        return Err(StencilError::config(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    if !matches!(channels, 1 | 3 | 4) {
        return Err(StencilError::UnsupportedChannels(channels));
    }

    let expected = width * height * channels;
    if data.len() != expected {
        return Err(StencilError::Shape {
            expected,
            actual: data.len(),
        });
    }

    let mut rgb = Array3::<u8>::zeros((height, width, 3));
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) * channels;
            for c in 0..3 {
                rgb[[y, x, c]] = if channels == 1 { data[idx] } else { data[idx + c] };
            }
        }
    }

    Ok(rgb)
}

/// Flatten an `(H, W, C)` image back into a row-major byte buffer.
pub fn into_raw(image: Array3<u8>) -> Vec<u8> {
    if image.is_standard_layout() {
        image.into_raw_vec_and_offset().0
    } else {
        image.iter().copied().collect()
    }
}

/// Fetch the RGB triple at `(y, x)`.
#[inline]
pub fn pixel(image: &ndarray::ArrayView3<u8>, y: usize, x: usize) -> Rgb {
    [image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]]]
}
