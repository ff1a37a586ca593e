//! Islands: numbered regions of the final stencil.
//!
//! A segmented [`Component`] becomes an [`Island`] once its contours pass the
//! shape filter and a label anchor has been searched for.

pub mod filter;
pub mod centroid;

pub use centroid::locate_centroid;
pub use filter::{filter_contours, is_valid_shape, shape_measures, FilterParams, FilteredIsland};

use crate::selection::{Component, Contour};

/// One kept region.
#[derive(Debug, Clone, PartialEq)]
pub struct Island {
    /// 1-based palette index, also the printed number.
    pub color_index: u32,
    pub component_id: usize,
    /// Canvas pixels painted as border. Never empty.
    pub border: Vec<(usize, usize)>,
    pub contours: Vec<Contour>,
    /// Numeral anchor `(row, col)`; `None` when no safe interior pixel exists.
    pub centroid: Option<(usize, usize)>,
}

impl Island {
    /// Filter a component and place its anchor.
    ///
    /// `None` when the component is rejected or keeps no contour.
    pub fn from_component(component: &Component, params: &FilterParams) -> Option<Self> {
        let filtered = filter_contours(component, params);
        if filtered.is_empty() {
            tracing::debug!(
                color = component.color_index,
                component = component.component_id,
                pixels = component.pixel_count,
                "dropped island"
            );
            return None;
        }

        let centroid = locate_centroid(&filtered.contours);
        if centroid.is_none() {
            tracing::debug!(
                color = component.color_index,
                component = component.component_id,
                "no interior anchor for island"
            );
        }

        Some(Self {
            color_index: component.color_index,
            component_id: component.component_id,
            border: filtered.border,
            contours: filtered.contours,
            centroid,
        })
    }
}
