//! End-to-end stencil pipeline.
//!
//! quantize -> segment -> filter contours -> place anchors -> composite.
//! Configuration is validated before any pixel work; per-color and
//! per-island stages run on the rayon pool.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::config::Config;
use crate::error::Result;
use crate::islands::{FilterParams, Island};
use crate::quantize::{simplify_image, Palette, PaletteSource};
use crate::render::{overlay_borders, render_stencil, RenderStyle};
use crate::selection::segment;

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct StencilOutput {
    /// Bordered, numbered canvas of `padded_shape`.
    pub stencil: Array3<u8>,
    /// The quantized image (unpadded).
    pub simplified: Array3<u8>,
    pub palette: Palette,
    /// Sorted by `(color_index, component_id)`.
    pub islands: Vec<Island>,
    pub padded_shape: (usize, usize),
}

impl StencilOutput {
    fn image_shape(&self) -> (usize, usize) {
        let (h, w, _) = self.simplified.dim();
        (h, w)
    }

    fn padding(&self) -> usize {
        (self.padded_shape.0 - self.simplified.dim().0) / 2
    }

    /// Re-render the stencil with a different style, reusing the islands.
    ///
    /// The padding of the original run is kept since island coordinates
    /// depend on it.
    pub fn restyle(&self, style: &RenderStyle) -> Result<Array3<u8>> {
        style.validate()?;
        let style = RenderStyle {
            padding: self.padding(),
            ..*style
        };
        Ok(render_stencil(&self.islands, self.image_shape(), &style))
    }

    /// Quantized image with island borders, for previewing the segmentation.
    pub fn islands_preview(&self, style: &RenderStyle) -> Array3<u8> {
        let style = RenderStyle {
            padding: self.padding(),
            ..*style
        };
        overlay_borders(self.simplified.view(), &self.islands, &style)
    }
}

/// Configured stencil generator.
#[derive(Debug, Clone, Default)]
pub struct ColorByNumber {
    config: Config,
}

impl ColorByNumber {
    /// # Errors
    /// Any out-of-range configuration value.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn an RGB image into a color-by-number stencil.
    ///
    /// # Arguments
    /// * `image` - RGB image (height, width, 3)
    /// * `source` - Explicit palette or number of colors to derive
    ///
    /// # Errors
    /// Empty images, non-RGB input, and palette requests the image cannot
    /// satisfy. Degenerate regions are dropped, never reported.
    pub fn run(&self, image: ArrayView3<u8>, source: &PaletteSource) -> Result<StencilOutput> {
        let config = &self.config;
        config.validate()?;

        let (height, width, _) = image.dim();
        let quantized = simplify_image(image, source, config)?;
        tracing::info!(
            width,
            height,
            palette = quantized.palette.len(),
            "quantized image"
        );

        let segmentation = segment(
            quantized.index_map.view(),
            config.border_padding,
            config.open_kernel_size,
        );
        let (ph, pw) = segmentation.padded_shape;
        tracing::info!(components = segmentation.components.len(), "segmented regions");

        let params = FilterParams {
            area_percent_threshold: config.area_percent_threshold,
            arc_ratio_threshold: config.arc_ratio_threshold,
            check_shape_validity: config.check_shape_validity,
            total_area: (ph * pw) as f64,
        };

        let mut islands: Vec<Island> = segmentation
            .components
            .par_iter()
            .filter_map(|component| Island::from_component(component, &params))
            .collect();
        islands.sort_by_key(|island| (island.color_index, island.component_id));

        let anchored = islands.iter().filter(|i| i.centroid.is_some()).count();
        tracing::info!(
            islands = islands.len(),
            anchored,
            dropped = segmentation.components.len() - islands.len(),
            "filtered islands"
        );

        let stencil = render_stencil(&islands, (height, width), &config.render_style());

        Ok(StencilOutput {
            stencil,
            simplified: quantized.image,
            palette: quantized.palette,
            islands,
            padded_shape: segmentation.padded_shape,
        })
    }
}

/// One-shot convenience wrapper around [`ColorByNumber::run`].
pub fn color_by_number(
    image: ArrayView3<u8>,
    source: &PaletteSource,
    config: &Config,
) -> Result<StencilOutput> {
    ColorByNumber::new(config.clone())?.run(image, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StencilError;
    use crate::geometry::{contains, to_ring};
    use crate::image::Rgb;

    const TEAL: Rgb = [20, 160, 150];
    const ORANGE: Rgb = [240, 140, 20];

    fn fill(h: usize, w: usize, color: Rgb) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((h, w, 3));
        for ((_, _, c), v) in img.indexed_iter_mut() {
            *v = color[c];
        }
        img
    }

    fn paint(img: &mut Array3<u8>, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>, color: Rgb) {
        for y in rows {
            for x in cols.clone() {
                for c in 0..3 {
                    img[[y, x, c]] = color[c];
                }
            }
        }
    }

    fn quiet() -> Config {
        Config {
            denoise: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_two_color_exact_palette() {
        let mut img = fill(4, 4, TEAL);
        paint(&mut img, 0..4, 2..4, ORANGE);
        let palette = Palette::new(vec![TEAL, ORANGE]).unwrap();

        let out = color_by_number(img.view(), &PaletteSource::Explicit(palette.clone()), &quiet())
            .unwrap();

        assert_eq!(out.palette, palette);
        assert_eq!(out.simplified, img);
        assert_eq!(out.padded_shape, (8, 8));
        assert_eq!(out.stencil.dim(), (8, 8, 3));
    }

    #[test]
    fn test_solid_square_gets_one_centered_number() {
        let img = fill(10, 10, ORANGE);
        let palette = Palette::new(vec![ORANGE]).unwrap();

        let out = color_by_number(img.view(), &PaletteSource::Explicit(palette), &Config::default())
            .unwrap();

        assert_eq!(out.padded_shape, (14, 14));
        assert_eq!(out.islands.len(), 1);
        let island = &out.islands[0];
        assert_eq!(island.color_index, 1);
        let (r, c) = island.centroid.unwrap();
        assert!((6..=7).contains(&r) && (6..=7).contains(&c));

        // Border around the padded square and ink near the center only.
        assert_eq!(out.stencil[[2, 2, 0]], 0);
        assert_eq!(out.stencil[[0, 0, 0]], 255);
        let center_ink = (4..11)
            .flat_map(|y| (3..11).map(move |x| (y, x)))
            .filter(|&(y, x)| out.stencil[[y, x, 0]] == 0)
            .count();
        assert!(center_ink > 0);
    }

    #[test]
    fn test_derived_single_color_gets_one_centered_number() {
        let img = fill(10, 10, ORANGE);

        let out = color_by_number(img.view(), &PaletteSource::Derive(1), &Config::default()).unwrap();

        assert_eq!(out.palette.colors().to_vec(), vec![ORANGE]);
        assert_eq!(out.simplified, img);
        assert_eq!(out.islands.len(), 1);
        assert_eq!(out.islands[0].color_index, 1);
        assert_eq!(out.islands[0].centroid, Some((7, 7)));
    }

    #[test]
    fn test_explicit_palette_skips_clustering() {
        // Two clusters cannot be fitted to a single pixel.
        let img = fill(1, 1, TEAL);
        let palette = Palette::new(vec![TEAL, ORANGE]).unwrap();

        let out = color_by_number(img.view(), &PaletteSource::Explicit(palette.clone()), &quiet())
            .unwrap();
        assert_eq!(out.simplified, img);
        assert_eq!(out.palette, palette);

        let clustered = Config {
            apply_kmeans: true,
            ..quiet()
        };
        let err = color_by_number(img.view(), &PaletteSource::Explicit(palette), &clustered)
            .unwrap_err();
        assert!(matches!(err, StencilError::Config(_)));
    }

    #[test]
    fn test_donut_keeps_hole_under_outer() {
        let mut img = fill(9, 9, TEAL);
        paint(&mut img, 3..6, 3..6, ORANGE);
        let palette = Palette::new(vec![TEAL, ORANGE]).unwrap();

        let out = color_by_number(img.view(), &PaletteSource::Explicit(palette), &quiet()).unwrap();

        // The 3x3 center is too ragged to number, the ring survives.
        assert_eq!(out.islands.len(), 1);
        let ring = &out.islands[0];
        assert_eq!(ring.color_index, 1);
        assert_eq!(ring.contours.len(), 2);
        assert!(!ring.contours[0].is_hole);
        assert!(ring.contours[1].is_hole);
        assert_eq!(ring.contours[1].parent, Some(0));

        let (r, c) = ring.centroid.unwrap();
        let p = (r as f64, c as f64);
        assert!(contains(&[to_ring(&ring.contours[0].points)], p));
        assert!(!contains(&[to_ring(&ring.contours[1].points)], p));
    }

    #[test]
    fn test_islands_shrink_with_area_threshold() {
        let mut img = fill(40, 40, TEAL);
        paint(&mut img, 2..20, 2..20, ORANGE);
        paint(&mut img, 25..31, 5..11, ORANGE);
        paint(&mut img, 24..38, 22..38, [30, 30, 200]);
        paint(&mut img, 5..9, 28..32, [30, 30, 200]);
        let palette = Palette::new(vec![TEAL, ORANGE, [30, 30, 200]]).unwrap();

        let mut previous = usize::MAX;
        for threshold in [0.0, 0.5, 2.0, 10.0, 30.0] {
            let config = Config {
                area_percent_threshold: threshold,
                ..quiet()
            };
            let out = color_by_number(img.view(), &PaletteSource::Explicit(palette.clone()), &config)
                .unwrap();
            assert!(out.islands.len() <= previous);
            previous = out.islands.len();
        }
        assert!(previous < 4);
    }

    #[test]
    fn test_derived_palette_and_restyle() {
        let mut img = fill(20, 20, TEAL);
        paint(&mut img, 0..20, 10..20, ORANGE);
        let out = color_by_number(img.view(), &PaletteSource::Derive(2), &quiet()).unwrap();
        assert_eq!(out.palette.len(), 2);
        assert_eq!(out.islands.len(), 2);

        let binary = out
            .restyle(&RenderStyle {
                binary_output: true,
                padding: 0,
                ..RenderStyle::default()
            })
            .unwrap();
        assert_eq!(binary.dim(), out.stencil.dim());
        assert!(binary.iter().all(|&v| v == 0 || v == 255));

        let preview = out.islands_preview(&RenderStyle::default());
        assert_eq!(preview.dim(), (24, 24, 3));
        assert_eq!(preview[[12, 6, 1]], out.simplified[[10, 4, 1]]);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = Config {
            area_percent_threshold: 150.0,
            ..Config::default()
        };
        let img = fill(4, 4, TEAL);
        let err = color_by_number(img.view(), &PaletteSource::Derive(1), &config).unwrap_err();
        assert!(matches!(err, StencilError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_image() {
        let img = Array3::<u8>::zeros((0, 4, 3));
        let err = ColorByNumber::default()
            .run(img.view(), &PaletteSource::Derive(1))
            .unwrap_err();
        assert!(matches!(err, StencilError::Config(_)));
    }

    #[test]
    fn test_rejects_non_rgb() {
        let img = Array3::<u8>::zeros((4, 4, 4));
        let err = ColorByNumber::default()
            .run(img.view(), &PaletteSource::Derive(1))
            .unwrap_err();
        assert!(matches!(err, StencilError::UnsupportedChannels(4)));
    }
}
