//! Region centroid estimation in physical coordinates.

use super::label::Region;
use crate::path::Point3D;
use crate::volume::SubVolume;

/// Unweighted geometric centroid of a region's member cells on volume
/// slice `z`, in physical coordinates. The z-coordinate is pinned to the
/// slice's world z-position.
///
/// Intensity does not weight the mean. The index→world mapping is affine,
/// so the mean is taken in index space and mapped once. Callers guarantee
/// the region is non-empty (the labeler never emits empty regions).
pub(crate) fn region_centroid(region: &Region, sub: &SubVolume<'_>, z: usize) -> Point3D {
    let n = region.cell_count() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for &(x, y) in &region.cells {
        sum_x += x as f64;
        sum_y += y as f64;
    }
    sub.cell_to_world(sum_x / n, sum_y / n, z).into()
}
