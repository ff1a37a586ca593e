//! Pipeline configuration.
//!
//! A [`Config`] is an immutable parameter set for one run. It can be built in
//! code (starting from [`Config::default`]) or parsed from JSON, which is how
//! the Python and WASM bindings receive it. Missing JSON fields fall back to
//! the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};
use crate::image::Rgb;
use crate::render::RenderStyle;

/// When the denoiser runs relative to palette quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenoiseOrder {
    BeforeSimplify,
    AfterSimplify,
}

/// Smoothing filter used by the denoiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenoiseAlgorithm {
    /// Separable Gaussian blur over `blur_kernel_size`.
    Gaussian,
    /// Mean filter over a `blur_kernel_size` square.
    Box,
    /// Per-channel median over a `blur_kernel_size` square.
    Median,
    /// Edge-preserving bilateral filter, falloff set by `denoise_strength`.
    Bilateral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable the denoiser.
    pub denoise: bool,
    pub denoise_order: DenoiseOrder,
    pub denoise_algorithm: DenoiseAlgorithm,
    /// Kernel size for Gaussian/box/median smoothing. Must be odd.
    pub blur_kernel_size: usize,
    /// Bilateral color falloff, 0.0 (sharp) and up.
    pub denoise_strength: f32,

    /// Pre-simplify with k-means before matching an explicit palette.
    pub apply_kmeans: bool,
    /// Number of k-means restarts; the most compact run wins.
    pub kmeans_attempts: usize,
    pub kmeans_max_iter: usize,
    /// Stop when no center moves farther than this (RGB units).
    pub kmeans_epsilon: f32,
    pub kmeans_seed: u64,

    /// Cells of background added around every color mask (and the canvas).
    pub border_padding: usize,
    /// Square opening kernel applied to each color mask, 0 disables. Must be odd.
    pub open_kernel_size: usize,
    /// Minimum island area as a percentage of the padded canvas area.
    pub area_percent_threshold: f64,
    /// Maximum outer perimeter / net area ratio for a valid island.
    pub arc_ratio_threshold: f64,
    pub check_shape_validity: bool,

    pub border_color: Rgb,
    /// Text scale; 1.0 renders digits about 21 pixels tall.
    pub font_size: f32,
    pub font_color: Rgb,
    pub font_thickness: usize,
    pub show_numbers: bool,
    /// Threshold the final stencil to pure black and white.
    pub binary_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            denoise: true,
            denoise_order: DenoiseOrder::AfterSimplify,
            denoise_algorithm: DenoiseAlgorithm::Gaussian,
            blur_kernel_size: 5,
            denoise_strength: 0.5,
            apply_kmeans: false,
            kmeans_attempts: 10,
            kmeans_max_iter: 10,
            kmeans_epsilon: 1.0,
            kmeans_seed: 42,
            border_padding: 2,
            open_kernel_size: 0,
            area_percent_threshold: 0.05,
            arc_ratio_threshold: 1.0,
            check_shape_validity: true,
            border_color: [0, 0, 0],
            font_size: 0.5,
            font_color: [0, 0, 0],
            font_thickness: 2,
            show_numbers: true,
            binary_output: false,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON, filling absent fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every range constraint. Called by the pipeline before any work.
    pub fn validate(&self) -> Result<()> {
        if self.denoise {
            match self.denoise_algorithm {
                DenoiseAlgorithm::Gaussian | DenoiseAlgorithm::Box | DenoiseAlgorithm::Median => {
                    if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
                        return Err(StencilError::config(format!(
                            "blur_kernel_size must be a positive odd number, got {}",
                            self.blur_kernel_size
                        )));
                    }
                }
                DenoiseAlgorithm::Bilateral => {}
            }
            if !(self.denoise_strength >= 0.0) {
                return Err(StencilError::config(format!(
                    "denoise_strength must be non-negative, got {}",
                    self.denoise_strength
                )));
            }
        }

        if self.kmeans_attempts == 0 || self.kmeans_max_iter == 0 {
            return Err(StencilError::config(
                "kmeans_attempts and kmeans_max_iter must be at least 1",
            ));
        }
        if !(self.kmeans_epsilon >= 0.0) {
            return Err(StencilError::config("kmeans_epsilon must be non-negative"));
        }

        if self.open_kernel_size % 2 == 0 && self.open_kernel_size != 0 {
            return Err(StencilError::config(format!(
                "open_kernel_size must be 0 or odd, got {}",
                self.open_kernel_size
            )));
        }
        if !(0.0..=100.0).contains(&self.area_percent_threshold) {
            return Err(StencilError::config(format!(
                "area_percent_threshold must lie in [0, 100], got {}",
                self.area_percent_threshold
            )));
        }
        if !(self.arc_ratio_threshold >= 0.0) {
            return Err(StencilError::config(format!(
                "arc_ratio_threshold must be non-negative, got {}",
                self.arc_ratio_threshold
            )));
        }

        self.render_style().validate()
    }

    /// Subset of the configuration consumed by the rasterizer.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            padding: self.border_padding,
            border_color: self.border_color,
            font_size: self.font_size,
            font_color: self.font_color,
            font_thickness: self.font_thickness,
            show_numbers: self.show_numbers,
            binary_output: self.binary_output,
        }
    }
}
