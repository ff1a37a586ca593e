//! WebAssembly exports for the stencil pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat interleaved byte arrays with explicit width, height and channel
//! count; palettes as flat RGB triples. Errors surface as JS exceptions
//! carrying the error message.

use wasm_bindgen::prelude::*;

use crate::config::Config;
use crate::error::{Result, StencilError};
use crate::image::{into_raw, rgb_from_raw, Rgb};
use crate::pipeline::ColorByNumber;
use crate::quantize::{nearest_palette, Palette, PaletteSource};

fn to_js(err: StencilError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn palette_from_flat(rgb: &[u8]) -> Result<Palette> {
    if rgb.len() % 3 != 0 {
        return Err(StencilError::config(format!(
            "palette buffer length {} is not a multiple of 3",
            rgb.len()
        )));
    }
    let colors: Vec<Rgb> = rgb.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
    Palette::new(colors)
}

// ============================================================================
// Stencil
// ============================================================================

/// Generate a color-by-number stencil.
///
/// # Arguments
/// * `data` - Flat image bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1, 3 or 4
/// * `palette` - Flat RGB palette; empty to derive `num_colors` colors
/// * `num_colors` - Colors to derive when `palette` is empty
/// * `config_json` - JSON configuration; empty string for defaults
///
/// # Returns
/// Flat RGB stencil of size (height + 2 * padding) x (width + 2 * padding)
#[wasm_bindgen]
pub fn color_by_number_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    palette: &[u8],
    num_colors: usize,
    config_json: &str,
) -> std::result::Result<Vec<u8>, JsValue> {
    let config = if config_json.trim().is_empty() {
        Config::default()
    } else {
        Config::from_json(config_json).map_err(to_js)?
    };
    let source = if palette.is_empty() {
        PaletteSource::Derive(num_colors)
    } else {
        PaletteSource::Explicit(palette_from_flat(palette).map_err(to_js)?)
    };
    let input = rgb_from_raw(data, width, height, channels).map_err(to_js)?;

    let output = ColorByNumber::new(config)
        .and_then(|generator| generator.run(input.view(), &source))
        .map_err(to_js)?;
    Ok(into_raw(output.stencil))
}

/// Snap every pixel to its nearest palette color.
///
/// # Returns
/// Flat RGB bytes of the quantized image (width x height)
#[wasm_bindgen]
pub fn nearest_palette_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    palette: &[u8],
) -> std::result::Result<Vec<u8>, JsValue> {
    let palette = palette_from_flat(palette).map_err(to_js)?;
    let input = rgb_from_raw(data, width, height, channels).map_err(to_js)?;
    let (quantized, _) = nearest_palette(input.view(), &palette);
    Ok(into_raw(quantized))
}

/// Default configuration as JSON, for building UIs.
#[wasm_bindgen]
pub fn default_config_json_wasm() -> std::result::Result<String, JsValue> {
    Config::default().to_json().map_err(to_js)
}
