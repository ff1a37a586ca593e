//! Stroke font for the digits printed on islands.
//!
//! Glyphs are polylines on a 20-unit advance with the cap line at y = 0 and
//! the baseline at y = 21 (y grows downward, as in image rows). A scale of
//! 1.0 maps one unit to one pixel.

use ndarray::Array3;

use super::draw::draw_line;
use crate::image::Rgb;

/// Horizontal advance per glyph, in font units.
pub const ADVANCE: f32 = 20.0;
/// Cap height, in font units.
pub const CAP_HEIGHT: f32 = 21.0;

type Stroke = &'static [(i8, i8)];

const ZERO: &[Stroke] = &[&[
    (9, 0), (6, 1), (4, 4), (3, 9), (3, 12), (4, 17), (6, 20), (9, 21), (11, 21),
    (14, 20), (16, 17), (17, 12), (17, 9), (16, 4), (14, 1), (11, 0), (9, 0),
]];
const ONE: &[Stroke] = &[&[(6, 4), (8, 3), (11, 0), (11, 21)]];
const TWO: &[Stroke] = &[&[
    (4, 5), (4, 4), (5, 2), (6, 1), (8, 0), (12, 0), (14, 1), (15, 2), (16, 4),
    (16, 6), (15, 8), (13, 11), (3, 21), (17, 21),
]];
const THREE: &[Stroke] = &[&[
    (5, 0), (16, 0), (10, 8), (13, 8), (15, 9), (16, 10), (17, 13), (17, 15),
    (16, 18), (14, 20), (11, 21), (8, 21), (5, 20), (4, 19), (3, 17),
]];
const FOUR: &[Stroke] = &[&[(13, 0), (3, 14), (18, 14)], &[(13, 0), (13, 21)]];
const FIVE: &[Stroke] = &[&[
    (15, 0), (5, 0), (4, 9), (5, 8), (8, 7), (11, 7), (14, 8), (16, 10), (17, 13),
    (17, 15), (16, 18), (14, 20), (11, 21), (8, 21), (5, 20), (4, 19), (3, 17),
]];
const SIX: &[Stroke] = &[&[
    (16, 3), (15, 1), (12, 0), (10, 0), (7, 1), (5, 4), (4, 9), (4, 14), (5, 18),
    (7, 20), (10, 21), (11, 21), (14, 20), (16, 18), (17, 15), (17, 14), (16, 11),
    (14, 9), (11, 8), (10, 8), (7, 9), (5, 11), (4, 14),
]];
const SEVEN: &[Stroke] = &[&[(17, 0), (7, 21)], &[(3, 0), (17, 0)]];
const EIGHT: &[Stroke] = &[&[
    (8, 0), (5, 1), (4, 3), (4, 5), (5, 7), (7, 8), (11, 9), (14, 10), (16, 12),
    (17, 14), (17, 17), (16, 19), (15, 20), (12, 21), (8, 21), (5, 20), (4, 19),
    (3, 17), (3, 14), (4, 12), (6, 10), (9, 9), (13, 8), (15, 7), (16, 5), (16, 3),
    (15, 1), (12, 0), (8, 0),
]];
const NINE: &[Stroke] = &[&[
    (16, 7), (15, 10), (13, 12), (10, 13), (9, 13), (6, 12), (4, 10), (3, 7), (3, 6),
    (4, 3), (6, 1), (9, 0), (10, 0), (13, 1), (15, 3), (16, 7), (16, 12), (15, 17),
    (13, 20), (10, 21), (8, 21), (5, 20), (4, 18),
]];

/// Strokes of a character, `None` for characters without a glyph.
pub fn glyph(ch: char) -> Option<&'static [Stroke]> {
    match ch {
        '0' => Some(ZERO),
        '1' => Some(ONE),
        '2' => Some(TWO),
        '3' => Some(THREE),
        '4' => Some(FOUR),
        '5' => Some(FIVE),
        '6' => Some(SIX),
        '7' => Some(SEVEN),
        '8' => Some(EIGHT),
        '9' => Some(NINE),
        _ => None,
    }
}

/// `(width, height)` of `text` in pixels at `scale`, stroke excluded.
pub fn text_size(text: &str, scale: f32) -> (f32, f32) {
    (text.chars().count() as f32 * ADVANCE * scale, CAP_HEIGHT * scale)
}

/// Draw `text` with its baseline-left corner at `(baseline_row, left_col)`.
///
/// Characters without a glyph advance the cursor but draw nothing.
pub fn draw_text(
    canvas: &mut Array3<u8>,
    text: &str,
    baseline_row: f32,
    left_col: f32,
    scale: f32,
    thickness: usize,
    color: Rgb,
) {
    let top = baseline_row - CAP_HEIGHT * scale;
    for (i, ch) in text.chars().enumerate() {
        let Some(strokes) = glyph(ch) else {
            continue;
        };
        let left = left_col + i as f32 * ADVANCE * scale;
        let to_canvas = |(x, y): (i8, i8)| {
            (
                (top + y as f32 * scale).round() as i32,
                (left + x as f32 * scale).round() as i32,
            )
        };
        for stroke in strokes {
            for pair in stroke.windows(2) {
                draw_line(canvas, to_canvas(pair[0]), to_canvas(pair[1]), thickness, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw::white_canvas;

    fn ink_bounds(canvas: &Array3<u8>) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for ((y, x, c), &v) in canvas.indexed_iter() {
            if c == 0 && v == 0 {
                bounds = Some(match bounds {
                    None => (y, x, y, x),
                    Some((y0, x0, y1, x1)) => (y0.min(y), x0.min(x), y1.max(y), x1.max(x)),
                });
            }
        }
        bounds
    }

    #[test]
    fn test_every_digit_has_a_glyph() {
        for ch in '0'..='9' {
            let strokes = glyph(ch).unwrap();
            assert!(strokes.iter().all(|s| s.len() >= 2));
            for stroke in strokes {
                for &(x, y) in stroke.iter() {
                    assert!((0..=20).contains(&x) && (0..=21).contains(&y));
                }
            }
        }
        assert!(glyph('a').is_none());
    }

    #[test]
    fn test_text_size_scales() {
        assert_eq!(text_size("12", 1.0), (40.0, 21.0));
        assert_eq!(text_size("7", 0.5), (10.0, 10.5));
    }

    #[test]
    fn test_one_is_a_vertical_bar() {
        let mut canvas = white_canvas(30, 30);
        draw_text(&mut canvas, "1", 25.0, 2.0, 1.0, 1, [0, 0, 0]);
        let (y0, _, y1, x1) = ink_bounds(&canvas).unwrap();
        assert_eq!(y0, 4);
        assert_eq!(y1, 25);
        assert_eq!(x1, 13);
        for row in 4..=25 {
            assert_eq!(canvas[[row, 13, 0]], 0);
        }
    }

    #[test]
    fn test_text_stays_in_its_box() {
        let mut canvas = white_canvas(40, 60);
        draw_text(&mut canvas, "2048", 30.0, 5.0, 0.5, 1, [0, 0, 0]);
        let (y0, x0, y1, x1) = ink_bounds(&canvas).unwrap();
        assert!(y0 >= 19 && y1 <= 30);
        assert!(x0 >= 5 && x1 <= 45);
    }
}
