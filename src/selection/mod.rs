//! Region selection on index maps and binary masks.
//!
//! - **Labeling**: two-pass connected-component labeling
//! - **Contours**: border following with outer/hole hierarchy
//! - **Segment**: per-color regions of a palette index map

pub mod labeling;
pub mod contour;
pub mod segment;

pub use contour::{find_contours, Contour};
pub use labeling::{label_components, ComponentStats, Labeling};
pub use segment::{segment, Component, Segmentation};
