//! Filter modules used around quantization and compositing.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Used by |
//! |--------|-------|------|---------|
//! | RGB8 | (H, W, 3) | u8 | denoiser, threshold |
//! | Mask | (H, W) | u8 | morphology, padding |
//!
//! Masks treat any non-zero cell as foreground and produce `0`/`1` values.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - Inputs are views, outputs are fresh arrays
//! - **Edge clamped** - Smoothing filters clamp samples at the image border
//! - **Thread-safe** - Rows are processed in parallel with rayon
//!
//! ## Filter Categories
//!
//! - **Smoothing**: gaussian_blur, box_blur, median, bilateral (the denoiser)
//! - **Morphology**: erode, dilate, open on binary masks
//! - **Stylize**: luminance threshold for binary stencils

pub mod core;
pub mod blur;
pub mod noise;
pub mod denoise;
pub mod morphology;
pub mod stylize;

pub use denoise::denoise;
