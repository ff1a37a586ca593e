//! Quantizer: maps raw pixels onto a finite palette.
//!
//! - **nearest**: per-pixel nearest palette color
//! - **kmeans**: color clustering with seeded restarts
//! - **matching**: cluster-to-palette bijection
//! - **simplify**: the policy combining the above with the denoiser

pub mod palette;
pub mod nearest;
pub mod kmeans;
pub mod matching;
pub mod simplify;

pub use kmeans::{cluster_colors, Clustering, KMeansParams};
pub use matching::match_clusters_to_palette;
pub use nearest::nearest_palette;
pub use palette::Palette;
pub use simplify::{simplify_image, PaletteSource, Quantized};
