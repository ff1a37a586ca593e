//! Bijective assignment of cluster centers to user palette colors.

use super::nearest::color_distance_sq;
use super::palette::Palette;
use crate::error::{Result, StencilError};
use crate::image::Rgb;

/// Assign every cluster center a distinct palette color.
///
/// Clusters covering more pixels choose first, each taking the closest color
/// not yet taken (ties to the lowest palette index). Large areas of the image
/// therefore get the best-fitting colors.
///
/// # Returns
/// `mapping[cluster]` = 0-based palette index.
///
/// # Errors
/// Empty input, or cluster and palette counts that differ.
pub fn match_clusters_to_palette(
    centers: &[Rgb],
    palette: &Palette,
    pixel_counts: &[usize],
) -> Result<Vec<usize>> {
    if centers.is_empty() {
        return Err(StencilError::config("no cluster centers to match"));
    }
    if palette.is_empty() {
        return Err(StencilError::config("palette must contain at least one color"));
    }
    if centers.len() != palette.len() {
        return Err(StencilError::config(format!(
            "cannot match {} cluster centers to {} palette colors",
            centers.len(),
            palette.len()
        )));
    }
    if pixel_counts.len() != centers.len() {
        return Err(StencilError::config(format!(
            "expected {} pixel counts, got {}",
            centers.len(),
            pixel_counts.len()
        )));
    }

    let mut order: Vec<usize> = (0..centers.len()).collect();
    order.sort_by(|&a, &b| pixel_counts[b].cmp(&pixel_counts[a]));

    let colors = palette.colors();
    let mut taken = vec![false; colors.len()];
    let mut mapping = vec![0usize; centers.len()];
    for cluster in order {
        let choice = (0..colors.len())
            .filter(|&i| !taken[i])
            .min_by_key(|&i| (color_distance_sq(centers[cluster], colors[i]), i))
            .expect("palette has an untaken color for every cluster");
        taken[choice] = true;
        mapping[cluster] = choice;
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_colors_match_directly() {
        let palette = Palette::new(vec![[255, 0, 0], [0, 0, 255], [0, 255, 0]]).unwrap();
        let centers = [[10, 240, 5], [240, 20, 20], [0, 0, 200]];
        let mapping = match_clusters_to_palette(&centers, &palette, &[5, 5, 5]).unwrap();
        assert_eq!(mapping, vec![2, 0, 1]);
    }

    #[test]
    fn test_largest_cluster_chooses_first() {
        let palette = Palette::new(vec![[100, 100, 100], [0, 0, 0]]).unwrap();
        // Both centers prefer gray; the bigger one gets it.
        let centers = [[90, 90, 90], [110, 110, 110]];
        let mapping = match_clusters_to_palette(&centers, &palette, &[3, 10]).unwrap();
        assert_eq!(mapping, vec![1, 0]);
    }

    #[test]
    fn test_mapping_is_bijection() {
        let palette = Palette::new(vec![[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]]).unwrap();
        let centers = [[0, 0, 0]; 4];
        let mut mapping = match_clusters_to_palette(&centers, &palette, &[1, 2, 3, 4]).unwrap();
        mapping.sort();
        assert_eq!(mapping, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_count_mismatch_is_config_error() {
        let palette = Palette::new(vec![[0, 0, 0], [9, 9, 9]]).unwrap();
        let err = match_clusters_to_palette(&[[0, 0, 0]], &palette, &[1]).unwrap_err();
        assert!(matches!(err, StencilError::Config(_)));
        assert!(match_clusters_to_palette(&[], &palette, &[]).is_err());
    }
}
