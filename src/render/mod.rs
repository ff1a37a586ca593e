//! Rasterizer: composites borders and numerals into the output stencil.
//!
//! - **draw**: pixel, disc and thick-line primitives on RGB canvases
//! - **font**: built-in stroke font for digits
//! - **stencil**: the compositing entry points

pub mod draw;
pub mod font;
pub mod stencil;

pub use stencil::{draw_numbers, overlay_borders, render_stencil};

use crate::error::{Result, StencilError};
use crate::image::Rgb;

/// Rendering parameters, derived from [`crate::Config::render_style`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// White margin added on every side.
    pub padding: usize,
    pub border_color: Rgb,
    /// Text scale; 1.0 is about 21 pixels tall.
    pub font_size: f32,
    pub font_color: Rgb,
    /// Stroke width in pixels.
    pub font_thickness: usize,
    pub show_numbers: bool,
    /// Threshold the result to black and white.
    pub binary_output: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            padding: 2,
            border_color: [0, 0, 0],
            font_size: 0.5,
            font_color: [0, 0, 0],
            font_thickness: 2,
            show_numbers: true,
            binary_output: false,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size > 0.0) || !self.font_size.is_finite() {
            return Err(StencilError::config(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.font_thickness == 0 {
            return Err(StencilError::config("font_thickness must be at least 1"));
        }
        Ok(())
    }
}
