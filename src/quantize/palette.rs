//! Ordered color palettes.
//!
//! Palette entries are addressed 1-based wherever they appear in an index
//! map, so `0` can mean "unassigned". The 1-based index is also the numeral
//! printed on the stencil.

use ndarray::{Array2, Array3, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};
use crate::image::Rgb;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a user palette. Colors must be non-empty and pairwise distinct.
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(StencilError::config("palette must contain at least one color"));
        }
        for (i, a) in colors.iter().enumerate() {
            if colors[..i].contains(a) {
                return Err(StencilError::config(format!(
                    "palette color {a:?} appears more than once"
                )));
            }
        }
        Ok(Self { colors })
    }

    /// Parse `#rrggbb` (or `rrggbb`) strings into a palette.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        let colors = hex
            .iter()
            .map(|h| parse_hex(h.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Palette derived from cluster centers. Centers may coincide after
    /// rounding, so distinctness is not enforced.
    pub(crate) fn from_centers(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color for a 1-based index, `None` for 0 or out of range.
    pub fn color(&self, index: u32) -> Option<Rgb> {
        (index as usize)
            .checked_sub(1)
            .and_then(|i| self.colors.get(i).copied())
    }

    /// Render an index map with this palette. Unassigned cells become black.
    pub fn paint(&self, index_map: ArrayView2<u32>) -> Array3<u8> {
        let (h, w) = index_map.dim();
        let mut out = Array3::<u8>::zeros((h, w, 3));
        for ((y, x), &idx) in index_map.indexed_iter() {
            if let Some(color) = self.color(idx) {
                for c in 0..3 {
                    out[[y, x, c]] = color[c];
                }
            }
        }
        out
    }
}

fn parse_hex(hex: &str) -> Result<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(StencilError::config(format!("invalid hex color {hex:?}")));
    }
    let mut rgb = [0u8; 3];
    for (c, chunk) in rgb.iter_mut().enumerate() {
        *chunk = u8::from_str_radix(&digits[c * 2..c * 2 + 2], 16)
            .map_err(|_| StencilError::config(format!("invalid hex color {hex:?}")))?;
    }
    Ok(rgb)
}

/// Count how many cells of `index_map` use each 1-based index.
///
/// Slot 0 of the result counts unassigned cells.
pub fn index_histogram(index_map: &Array2<u32>, palette_len: usize) -> Vec<usize> {
    let mut counts = vec![0usize; palette_len + 1];
    for &idx in index_map.iter() {
        if let Some(slot) = counts.get_mut(idx as usize) {
            *slot += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(Palette::new(vec![]).is_err());
        assert!(Palette::new(vec![[1, 2, 3], [1, 2, 3]]).is_err());
    }

    #[test]
    fn test_color_is_one_based() {
        let p = Palette::new(vec![[255, 0, 0], [0, 0, 255]]).unwrap();
        assert_eq!(p.color(0), None);
        assert_eq!(p.color(1), Some([255, 0, 0]));
        assert_eq!(p.color(2), Some([0, 0, 255]));
        assert_eq!(p.color(3), None);
    }

    #[test]
    fn test_from_hex() {
        let p = Palette::from_hex(&["#ff8000", "00ff7f"]).unwrap();
        assert_eq!(p.colors(), &[[255, 128, 0], [0, 255, 127]]);
        assert!(Palette::from_hex(&["#12345"]).is_err());
        assert!(Palette::from_hex(&["#zz0000"]).is_err());
    }

    #[test]
    fn test_paint_and_histogram() {
        let p = Palette::new(vec![[10, 10, 10], [200, 200, 200]]).unwrap();
        let map = Array2::from_shape_vec((1, 3), vec![1u32, 2, 2]).unwrap();
        let img = p.paint(map.view());
        assert_eq!(img[[0, 0, 0]], 10);
        assert_eq!(img[[0, 2, 1]], 200);
        assert_eq!(index_histogram(&map, 2), vec![0, 1, 2]);
    }
}
