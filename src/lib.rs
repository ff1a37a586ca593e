//! Color-by-number stencil generation.
//!
//! Turns a photo into a paint-by-number template: the image is reduced to a
//! small palette, split into connected same-color islands, cleaned of
//! degenerate shapes, and composited into a white canvas with island borders
//! and the palette number of each island printed at a safe interior point.
//!
//! ## Image Format
//! Every stage works on RGB images, `ndarray::Array3<u8>` of shape
//! (height, width, 3). Flat buffers with 1, 3 or 4 channels are converted
//! with [`image::rgb_from_raw`].
//!
//! ## Pipeline
//! - **quantize**: palette reduction (nearest color, k-means, matching)
//! - **filters**: denoising, morphology and thresholding
//! - **selection**: component labeling, contour hierarchy, segmentation
//! - **islands**: shape filter and label anchor placement
//! - **render**: border/numeral compositing
//!
//! [`ColorByNumber`] wires the stages together. Python (PyO3) and
//! WebAssembly bindings are available behind the `python` and `wasm`
//! features.

pub mod config;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod image;
pub mod islands;
pub mod pipeline;
pub mod quantize;
pub mod render;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{Config, DenoiseAlgorithm, DenoiseOrder};
pub use error::{Result, StencilError};
pub use islands::Island;
pub use pipeline::{color_by_number, ColorByNumber, StencilOutput};
pub use quantize::{Palette, PaletteSource};
pub use render::RenderStyle;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use ndarray::Array3;

    use crate::config::Config;
    use crate::error::StencilError;
    use crate::image::rgb_from_raw;
    use crate::pipeline::ColorByNumber;
    use crate::quantize::{nearest_palette as nearest_palette_impl, Palette, PaletteSource};

    fn to_py_err(err: StencilError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    /// Accept gray, RGB or RGBA arrays and return an owned RGB image.
    fn rgb_input(image: &PyReadonlyArray3<'_, u8>) -> PyResult<Array3<u8>> {
        let view = image.as_array();
        let (height, width, channels) = view.dim();
        if channels == 3 {
            return Ok(view.to_owned());
        }
        let data: Vec<u8> = view.iter().copied().collect();
        rgb_from_raw(&data, width, height, channels).map_err(to_py_err)
    }

    fn palette_from(colors: Vec<(u8, u8, u8)>) -> PyResult<Palette> {
        Palette::new(colors.into_iter().map(|(r, g, b)| [r, g, b]).collect()).map_err(to_py_err)
    }

    // ========================================================================
    // Stencil
    // ========================================================================

    /// Generate a color-by-number stencil.
    ///
    /// # Arguments
    /// * `image` - (H, W, C) u8 array with 1, 3 or 4 channels
    /// * `palette` - Optional list of (r, g, b) colors
    /// * `num_colors` - Colors to derive when no palette is given
    /// * `config_json` - Optional JSON configuration, missing fields default
    ///
    /// # Returns
    /// `(stencil, simplified, palette)` with the palette as (r, g, b) tuples
    #[pyfunction]
    #[pyo3(signature = (image, palette=None, num_colors=8, config_json=None))]
    pub fn color_by_number<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        palette: Option<Vec<(u8, u8, u8)>>,
        num_colors: usize,
        config_json: Option<&str>,
    ) -> PyResult<(Bound<'py, PyArray3<u8>>, Bound<'py, PyArray3<u8>>, Vec<(u8, u8, u8)>)> {
        let config = match config_json {
            Some(json) => Config::from_json(json).map_err(to_py_err)?,
            None => Config::default(),
        };
        let source = match palette {
            Some(colors) => PaletteSource::Explicit(palette_from(colors)?),
            None => PaletteSource::Derive(num_colors),
        };
        let input = rgb_input(&image)?;

        let output = py
            .allow_threads(|| {
                ColorByNumber::new(config).and_then(|generator| generator.run(input.view(), &source))
            })
            .map_err(to_py_err)?;

        let colors = output
            .palette
            .colors()
            .iter()
            .map(|c| (c[0], c[1], c[2]))
            .collect();
        Ok((
            output.stencil.into_pyarray(py),
            output.simplified.into_pyarray(py),
            colors,
        ))
    }

    /// Snap every pixel to its nearest palette color.
    ///
    /// # Returns
    /// `(quantized, index_map)` where index_map holds 1-based palette indices
    #[pyfunction]
    pub fn nearest_palette<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        palette: Vec<(u8, u8, u8)>,
    ) -> PyResult<(Bound<'py, PyArray3<u8>>, Bound<'py, PyArray2<u32>>)> {
        let palette = palette_from(palette)?;
        let input = rgb_input(&image)?;
        let (quantized, index_map) = nearest_palette_impl(input.view(), &palette);
        Ok((quantized.into_pyarray(py), index_map.into_pyarray(py)))
    }

    /// Default configuration as pretty-printed JSON.
    #[pyfunction]
    pub fn default_config_json() -> PyResult<String> {
        Config::default().to_json().map_err(to_py_err)
    }

    // ========================================================================
    // Module
    // ========================================================================

    #[pymodule]
    pub fn colorbynumber_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(color_by_number, m)?)?;
        m.add_function(wrap_pyfunction!(nearest_palette, m)?)?;
        m.add_function(wrap_pyfunction!(default_config_json, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::colorbynumber_rust;
