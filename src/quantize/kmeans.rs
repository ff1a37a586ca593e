//! K-means color clustering.
//!
//! Each restart is one `kmeans_colors::get_kmeans` run in RGB space, with
//! initial centers drawn from the image's own pixels. Restart `i` is seeded
//! with `seed + i`, so a given seed always yields the same clustering.

use kmeans_colors::{get_kmeans, Kmeans};
use ndarray::{Array2, ArrayView3};
use palette::Srgb;
use rayon::prelude::*;

use crate::error::{Result, StencilError};
use crate::image::Rgb;

/// Cluster labels are stored as `u8` by the clustering backend.
pub const MAX_CLUSTERS: usize = u8::MAX as usize + 1;

/// Stopping rule and restart count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansParams {
    pub max_iter: usize,
    /// Converged once the centers move less than this, in 8-bit channel units.
    pub epsilon: f32,
    pub attempts: usize,
    pub seed: u64,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            max_iter: 10,
            epsilon: 1.0,
            attempts: 10,
            seed: 42,
        }
    }
}

/// Result of [`cluster_colors`].
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Centers in 8-bit channel units.
    pub centers: Vec<[f32; 3]>,
    /// Per-pixel cluster label in `[0, k)`.
    pub labels: Array2<u32>,
    /// Pixels assigned to each center.
    pub counts: Vec<usize>,
    /// Sum of squared distances from each pixel to its center.
    pub compactness: f64,
}

impl Clustering {
    /// Centers rounded to 8-bit RGB.
    pub fn centers_u8(&self) -> Vec<Rgb> {
        self.centers
            .iter()
            .map(|c| [0, 1, 2].map(|i| c[i].round().clamp(0.0, 255.0) as u8))
            .collect()
    }
}

fn to_srgb(px: Rgb) -> Srgb {
    Srgb::new(
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
    )
}

fn to_channels(color: &Srgb) -> [f32; 3] {
    [color.red * 255.0, color.green * 255.0, color.blue * 255.0]
}

/// Sum of squared pixel-to-center distances, in 8-bit channel units.
fn compactness(pixels: &[Srgb], run: &Kmeans<Srgb>) -> f64 {
    pixels
        .par_iter()
        .zip(run.indices.par_iter())
        .map(|(px, &label)| {
            let center = to_channels(&run.centroids[label as usize]);
            let px = to_channels(px);
            (0..3)
                .map(|i| {
                    let d = (px[i] - center[i]) as f64;
                    d * d
                })
                .sum::<f64>()
        })
        .sum()
}

/// Cluster the pixels of an RGB image into `k` representative colors.
///
/// Runs `params.attempts` restarts and keeps the most compact one.
///
/// # Errors
/// `k == 0`, `k` larger than the number of pixels, or `k` above
/// [`MAX_CLUSTERS`].
pub fn cluster_colors(image: ArrayView3<u8>, k: usize, params: &KMeansParams) -> Result<Clustering> {
    let (height, width, _) = image.dim();
    let n = height * width;
    if k == 0 {
        return Err(StencilError::config("cluster count must be positive"));
    }
    if k > n {
        return Err(StencilError::config(format!(
            "cluster count {k} exceeds pixel count {n}"
        )));
    }
    if k > MAX_CLUSTERS {
        return Err(StencilError::config(format!(
            "cluster count {k} exceeds the maximum of {MAX_CLUSTERS}"
        )));
    }

    let pixels: Vec<Srgb> = image
        .outer_iter()
        .flat_map(|row| {
            row.outer_iter()
                .map(|px| to_srgb([px[0], px[1], px[2]]))
                .collect::<Vec<_>>()
        })
        .collect();

    let converge = params.epsilon / 255.0;
    let run_attempt = |attempt: usize| {
        let seed = params.seed.wrapping_add(attempt as u64);
        let run = get_kmeans(k, params.max_iter, converge, false, &pixels, seed);
        let score = compactness(&pixels, &run);
        tracing::trace!(attempt, compactness = score, "k-means restart finished");
        (run, score)
    };

    let (mut best, mut best_score) = run_attempt(0);
    for attempt in 1..params.attempts {
        let (run, score) = run_attempt(attempt);
        if score < best_score {
            best = run;
            best_score = score;
        }
    }

    let centers: Vec<[f32; 3]> = best.centroids.iter().map(to_channels).collect();
    let mut counts = vec![0usize; centers.len()];
    for &l in &best.indices {
        counts[l as usize] += 1;
    }

    let labels: Vec<u32> = best.indices.iter().map(|&l| l as u32).collect();
    let labels = Array2::from_shape_vec((height, width), labels)
        .expect("Shape mismatch in cluster_colors");

    Ok(Clustering {
        centers,
        labels,
        counts,
        compactness: best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn two_tone(h: usize, w: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((h, w, 3));
        for y in 0..h {
            for x in w / 2..w {
                img[[y, x, 0]] = 250;
                img[[y, x, 1]] = 200;
                img[[y, x, 2]] = 10;
            }
        }
        img
    }

    #[test]
    fn test_recovers_two_colors() {
        let img = two_tone(6, 8);
        let result = cluster_colors(img.view(), 2, &KMeansParams::default()).unwrap();

        let mut centers = result.centers_u8();
        centers.sort();
        assert_eq!(centers, vec![[0, 0, 0], [250, 200, 10]]);
        assert_eq!(result.counts.iter().sum::<usize>(), 48);
        assert!(result.counts.iter().all(|&c| c == 24));
        assert!(result.compactness < 1e-3);

        // Both halves carry distinct, uniform labels.
        assert_ne!(result.labels[[0, 0]], result.labels[[0, 7]]);
        assert_eq!(result.labels[[5, 0]], result.labels[[0, 3]]);
        assert!(result.labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let mut img = Array3::<u8>::zeros((5, 5, 3));
        for ((y, x, c), v) in img.indexed_iter_mut() {
            *v = ((y * 37 + x * 59 + c * 11) % 256) as u8;
        }
        let params = KMeansParams::default();
        let a = cluster_colors(img.view(), 3, &params).unwrap();
        let b = cluster_colors(img.view(), 3, &params).unwrap();
        assert_eq!(a.centers, b.centers);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.counts.iter().sum::<usize>(), 25);
    }

    #[test]
    fn test_more_restarts_never_worse() {
        let mut img = Array3::<u8>::zeros((6, 6, 3));
        for ((y, x, c), v) in img.indexed_iter_mut() {
            *v = ((y * 41 + x * 23 + c * 67) % 256) as u8;
        }
        let single = KMeansParams {
            attempts: 1,
            ..KMeansParams::default()
        };
        let many = KMeansParams {
            attempts: 6,
            ..single
        };
        let a = cluster_colors(img.view(), 4, &single).unwrap();
        let b = cluster_colors(img.view(), 4, &many).unwrap();
        assert!(b.compactness <= a.compactness + 1e-6);
    }

    #[test]
    fn test_rejects_bad_k() {
        let img = two_tone(2, 2);
        assert!(cluster_colors(img.view(), 0, &KMeansParams::default()).is_err());
        assert!(cluster_colors(img.view(), 5, &KMeansParams::default()).is_err());

        let big = two_tone(20, 20);
        let err = cluster_colors(big.view(), MAX_CLUSTERS + 1, &KMeansParams::default()).unwrap_err();
        assert!(matches!(err, StencilError::Config(_)));
    }
}
