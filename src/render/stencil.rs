//! Stencil compositing.

use ndarray::{s, Array3, ArrayView3};

use super::draw::{put_pixel, white_canvas};
use super::font::{draw_text, text_size};
use super::RenderStyle;
use crate::filters::stylize::{threshold_u8, STENCIL_THRESHOLD};
use crate::islands::Island;

fn paint_borders(canvas: &mut Array3<u8>, islands: &[Island], style: &RenderStyle) {
    for island in islands {
        for &(r, c) in &island.border {
            put_pixel(canvas, r as i32, c as i32, style.border_color);
        }
    }
}

/// Print each island's color index centered on its anchor.
///
/// Islands without an anchor are skipped. Can be applied to an existing
/// stencil to change the numbering style without re-segmenting.
pub fn draw_numbers(canvas: &mut Array3<u8>, islands: &[Island], style: &RenderStyle) {
    for island in islands {
        let Some((row, col)) = island.centroid else {
            continue;
        };
        let text = island.color_index.to_string();
        let (w, h) = text_size(&text, style.font_size);
        let left = col as f32 - w / 2.0;
        let baseline = row as f32 + h / 2.0;
        draw_text(
            canvas,
            &text,
            baseline,
            left,
            style.font_size,
            style.font_thickness,
            style.font_color,
        );
    }
}

/// Composite the numbered stencil.
///
/// # Arguments
/// * `islands` - Kept islands in canvas coordinates
/// * `image_shape` - `(height, width)` of the unpadded image
/// * `style` - Colors, font and output mode
///
/// # Returns
/// A `(height + 2p, width + 2p, 3)` canvas, white except for borders and
/// numerals; only 0 and 255 when `style.binary_output` is set.
pub fn render_stencil(islands: &[Island], image_shape: (usize, usize), style: &RenderStyle) -> Array3<u8> {
    let (height, width) = image_shape;
    let pad = style.padding;
    let mut canvas = white_canvas(height + 2 * pad, width + 2 * pad);

    paint_borders(&mut canvas, islands, style);
    if style.show_numbers {
        draw_numbers(&mut canvas, islands, style);
    }

    if style.binary_output {
        canvas = threshold_u8(canvas.view(), STENCIL_THRESHOLD);
    }
    canvas
}

/// Quantized image inside a white margin with island borders drawn on top.
pub fn overlay_borders(simplified: ArrayView3<u8>, islands: &[Island], style: &RenderStyle) -> Array3<u8> {
    let (height, width, _) = simplified.dim();
    let pad = style.padding;
    let mut canvas = white_canvas(height + 2 * pad, width + 2 * pad);
    canvas
        .slice_mut(s![pad..pad + height, pad..pad + width, ..])
        .assign(&simplified.slice(s![.., .., 0..3]));

    paint_borders(&mut canvas, islands, style);
    canvas
}
