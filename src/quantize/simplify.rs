//! Image simplification: denoising plus palette quantization.
//!
//! Policy:
//! - With an explicit palette and `apply_kmeans` off, every pixel snaps to the
//!   nearest palette color.
//! - With an explicit palette and `apply_kmeans` on, k-means (k = palette
//!   size) pre-simplifies the image and each cluster is then matched to one
//!   palette color.
//! - Without a palette, the k-means centers become the palette.
//!
//! Denoising runs either on the input image or on the quantized result. In
//! the latter case smoothing introduces intermediate colors, so the result is
//! snapped to the palette once more.

use ndarray::{Array2, Array3, ArrayView3};

use super::kmeans::{cluster_colors, KMeansParams};
use super::matching::match_clusters_to_palette;
use super::nearest::nearest_palette;
use super::palette::Palette;
use crate::config::{Config, DenoiseOrder};
use crate::error::{Result, StencilError};
use crate::filters::denoise;

/// Where the palette comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteSource {
    /// Use these colors, in this order.
    Explicit(Palette),
    /// Derive this many colors by clustering.
    Derive(usize),
}

/// Output of [`simplify_image`].
#[derive(Debug, Clone)]
pub struct Quantized {
    /// The image repainted with palette colors.
    pub image: Array3<u8>,
    /// 1-based palette index per pixel.
    pub index_map: Array2<u32>,
    pub palette: Palette,
}

fn kmeans_params(config: &Config) -> KMeansParams {
    KMeansParams {
        max_iter: config.kmeans_max_iter,
        epsilon: config.kmeans_epsilon,
        attempts: config.kmeans_attempts,
        seed: config.kmeans_seed,
    }
}

fn run_denoise(image: ArrayView3<u8>, config: &Config) -> Array3<u8> {
    denoise(
        image,
        config.denoise_algorithm,
        config.blur_kernel_size,
        config.denoise_strength,
    )
}

/// Reduce an RGB image to a finite palette.
///
/// # Errors
/// Empty or non-RGB images, a zero or too-large cluster count, or a palette
/// larger than the image when k-means pre-simplification is requested.
pub fn simplify_image(
    image: ArrayView3<u8>,
    source: &PaletteSource,
    config: &Config,
) -> Result<Quantized> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 {
        return Err(StencilError::config(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    if channels != 3 {
        return Err(StencilError::UnsupportedChannels(channels));
    }

    let pre_denoised;
    let work = if config.denoise && config.denoise_order == DenoiseOrder::BeforeSimplify {
        pre_denoised = run_denoise(image, config);
        pre_denoised.view()
    } else {
        image.view()
    };

    let mut quantized = match source {
        PaletteSource::Derive(k) => {
            let clustering = cluster_colors(work, *k, &kmeans_params(config))?;
            let centers = clustering.centers_u8();
            for (i, c) in centers.iter().enumerate() {
                if centers[..i].contains(c) {
                    tracing::warn!(color = ?c, "k-means produced coinciding centers");
                }
            }
            let palette = Palette::from_centers(centers);
            let index_map = clustering.labels.mapv(|l| l + 1);
            Quantized {
                image: palette.paint(index_map.view()),
                index_map,
                palette,
            }
        }
        PaletteSource::Explicit(palette) if config.apply_kmeans => {
            let clustering = cluster_colors(work, palette.len(), &kmeans_params(config))?;
            let mapping =
                match_clusters_to_palette(&clustering.centers_u8(), palette, &clustering.counts)?;
            let index_map = clustering.labels.mapv(|l| mapping[l as usize] as u32 + 1);
            tracing::debug!(?mapping, "matched k-means clusters to palette");
            Quantized {
                image: palette.paint(index_map.view()),
                index_map,
                palette: palette.clone(),
            }
        }
        PaletteSource::Explicit(palette) => {
            let (image, index_map) = nearest_palette(work, palette);
            Quantized {
                image,
                index_map,
                palette: palette.clone(),
            }
        }
    };

    if config.denoise && config.denoise_order == DenoiseOrder::AfterSimplify {
        let smoothed = run_denoise(quantized.image.view(), config);
        let (image, index_map) = nearest_palette(smoothed.view(), &quantized.palette);
        quantized.image = image;
        quantized.index_map = index_map;
    }

    Ok(quantized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DenoiseAlgorithm;
    use crate::quantize::palette::index_histogram;

    const RED: [u8; 3] = [220, 30, 30];
    const BLUE: [u8; 3] = [20, 40, 210];

    fn split_image(h: usize, w: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((h, w, 3));
        for y in 0..h {
            for x in 0..w {
                let color = if x < w / 2 { RED } else { BLUE };
                for c in 0..3 {
                    img[[y, x, c]] = color[c];
                }
            }
        }
        img
    }

    #[test]
    fn test_exact_palette_uses_only_its_indices() {
        let img = split_image(4, 4);
        let palette = Palette::new(vec![RED, BLUE]).unwrap();
        let config = Config {
            denoise: false,
            ..Config::default()
        };

        let q = simplify_image(img.view(), &PaletteSource::Explicit(palette), &config).unwrap();

        assert!(q.index_map.iter().all(|&i| i == 1 || i == 2));
        assert_eq!(q.index_map[[0, 0]], 1);
        assert_eq!(q.index_map[[3, 3]], 2);
        assert_eq!(q.image, img);
    }

    #[test]
    fn test_denoise_after_simplify_resnaps_to_palette() {
        let img = split_image(6, 6);
        let palette = Palette::new(vec![RED, BLUE, [255, 255, 255]]).unwrap();

        let q = simplify_image(img.view(), &PaletteSource::Explicit(palette.clone()), &Config::default())
            .unwrap();

        for px in q.image.view().into_shape_with_order((36, 3)).unwrap().outer_iter() {
            let rgb = [px[0], px[1], px[2]];
            assert!(palette.colors().contains(&rgb));
        }
        assert_eq!(index_histogram(&q.index_map, 3)[3], 0);
    }

    #[test]
    fn test_denoise_before_simplify_removes_speckles() {
        let mut img = split_image(8, 8);
        // One stray pixel inside each half.
        for c in 0..3 {
            img[[3, 1, c]] = BLUE[c];
            img[[4, 6, c]] = RED[c];
        }
        let palette = Palette::new(vec![RED, BLUE]).unwrap();
        let source = PaletteSource::Explicit(palette);

        let raw = Config {
            denoise: false,
            ..Config::default()
        };
        let q = simplify_image(img.view(), &source, &raw).unwrap();
        assert_eq!(q.index_map[[3, 1]], 2);
        assert_eq!(q.index_map[[4, 6]], 1);

        let smoothed = Config {
            denoise_order: DenoiseOrder::BeforeSimplify,
            denoise_algorithm: DenoiseAlgorithm::Median,
            blur_kernel_size: 3,
            ..Config::default()
        };
        let q = simplify_image(img.view(), &source, &smoothed).unwrap();
        assert!(q.index_map.iter().all(|&i| i == 1 || i == 2));
        for ((_, x), &i) in q.index_map.indexed_iter() {
            assert_eq!(i, if x < 4 { 1 } else { 2 });
        }
        assert_eq!(q.image, split_image(8, 8));
    }

    #[test]
    fn test_derived_palette_comes_from_clusters() {
        let img = split_image(4, 6);
        let config = Config {
            denoise: false,
            ..Config::default()
        };

        let q = simplify_image(img.view(), &PaletteSource::Derive(2), &config).unwrap();

        assert_eq!(q.palette.len(), 2);
        assert!(q.palette.colors().contains(&RED));
        assert!(q.palette.colors().contains(&BLUE));
        assert_ne!(q.index_map[[0, 0]], q.index_map[[0, 5]]);
        assert_eq!(q.image, img);
    }

    #[test]
    fn test_kmeans_matching_maps_clusters_onto_user_colors() {
        let img = split_image(4, 4);
        // Slightly off user colors: clusters must be matched, not copied.
        let palette = Palette::new(vec![[0, 0, 255], [255, 0, 0]]).unwrap();
        let config = Config {
            denoise: false,
            apply_kmeans: true,
            ..Config::default()
        };

        let q = simplify_image(img.view(), &PaletteSource::Explicit(palette), &config).unwrap();

        assert_eq!(q.index_map[[0, 0]], 2);
        assert_eq!(q.index_map[[0, 3]], 1);
        assert_eq!(q.image[[1, 1, 0]], 255);
    }

    #[test]
    fn test_too_many_clusters_is_config_error() {
        let img = split_image(2, 2);
        let err = simplify_image(img.view(), &PaletteSource::Derive(5), &Config::default()).unwrap_err();
        assert!(matches!(err, StencilError::Config(_)));
    }
}
