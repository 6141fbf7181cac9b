//! Shared synthetic-volume builders for unit tests.

use crate::volume::ScalarVolume;

/// Build a volume by evaluating `f` at every grid index (x fastest).
pub(crate) fn volume_from_fn(
    dims: [usize; 3],
    spacing: [f64; 3],
    origin: [f64; 3],
    f: impl Fn(usize, usize, usize) -> f32,
) -> ScalarVolume {
    let mut data = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
    for z in 0..dims[2] {
        for y in 0..dims[1] {
            for x in 0..dims[0] {
                data.push(f(x, y, z));
            }
        }
    }
    ScalarVolume::new(dims, spacing, origin, data).expect("valid synthetic volume")
}

/// Uniform-intensity volume with unit spacing and zero origin.
pub(crate) fn uniform_volume(dims: [usize; 3], value: f32) -> ScalarVolume {
    volume_from_fn(dims, [1.0; 3], [0.0; 3], |_, _, _| value)
}

/// Background volume with a single metal-intensity voxel column at
/// `(column_x, column_y)` running through every slice.
pub(crate) fn column_volume(
    dims: [usize; 3],
    column_x: usize,
    column_y: usize,
    metal: f32,
    background: f32,
) -> ScalarVolume {
    volume_from_fn(dims, [1.0; 3], [0.0; 3], |x, y, _| {
        if x == column_x && y == column_y {
            metal
        } else {
            background
        }
    })
}
