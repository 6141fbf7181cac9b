//! Scalar volume model and index-space sub-region access.
//!
//! The volume itself is produced by an external scan-loading collaborator;
//! this module only reads it. [`SubVolume`] restricts processing to an
//! axis-aligned index-space region of interest and hands out per-slice 2D
//! views for the downstream stages.

use image::{ImageBuffer, Luma};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One z-slice of scalar samples, row-major, x fastest.
pub type SliceImage = ImageBuffer<Luma<f32>, Vec<f32>>;

// ── Error type ─────────────────────────────────────────────────────────────

/// Structural errors, all detected before any slice processing begins.
///
/// Per-slice anomalies (no regions, several candidate regions) are not
/// errors; they are handled by the continuity policy and never abort a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The volume handle is unusable (degenerate dimensions, sample count
    /// mismatch, non-physical spacing).
    InvalidVolume(String),
    /// Requested bounds or slice range exceed the volume extent.
    OutOfRange(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVolume(msg) => write!(f, "invalid volume: {}", msg),
            Self::OutOfRange(msg) => write!(f, "out of range: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

// ── Index bounds ───────────────────────────────────────────────────────────

/// Axis-aligned index-space bounds, inclusive on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBounds {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
    pub z_min: usize,
    pub z_max: usize,
}

impl IndexBounds {
    pub fn new(
        x_min: usize,
        x_max: usize,
        y_min: usize,
        y_max: usize,
        z_min: usize,
        z_max: usize,
    ) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        }
    }

    /// Bounds covering the full extent of a volume with the given dims.
    pub fn full(dims: [usize; 3]) -> Self {
        Self {
            x_min: 0,
            x_max: dims[0].saturating_sub(1),
            y_min: 0,
            y_max: dims[1].saturating_sub(1),
            z_min: 0,
            z_max: dims[2].saturating_sub(1),
        }
    }

    /// Number of cells along x.
    pub fn width(&self) -> usize {
        self.x_max - self.x_min + 1
    }

    /// Number of cells along y.
    pub fn height(&self) -> usize {
        self.y_max - self.y_min + 1
    }

    /// Number of slices along z.
    pub fn depth(&self) -> usize {
        self.z_max - self.z_min + 1
    }

    /// Check ordering per axis and containment in `dims`.
    pub fn validate(&self, dims: [usize; 3]) -> Result<(), ExtractError> {
        let axes = [
            ("x", self.x_min, self.x_max, dims[0]),
            ("y", self.y_min, self.y_max, dims[1]),
            ("z", self.z_min, self.z_max, dims[2]),
        ];
        for (name, min, max, dim) in axes {
            if min > max {
                return Err(ExtractError::OutOfRange(format!(
                    "{name}_min {min} > {name}_max {max}"
                )));
            }
            if max >= dim {
                return Err(ExtractError::OutOfRange(format!(
                    "{name}_max {max} exceeds volume extent {dim}"
                )));
            }
        }
        Ok(())
    }
}

// ── Scalar volume ──────────────────────────────────────────────────────────

/// A 3D grid of intensity samples with physical spacing and origin.
///
/// Sample layout is x fastest: `data[(z * ny + y) * nx + x]`. The volume is
/// created once per scan load and is read-only for the duration of an
/// extraction run.
#[derive(Debug, Clone)]
pub struct ScalarVolume {
    dims: [usize; 3],
    spacing: Vector3<f64>,
    origin: Point3<f64>,
    data: Vec<f32>,
}

impl ScalarVolume {
    /// Validate and wrap raw sample data.
    ///
    /// Fails with [`ExtractError::InvalidVolume`] on degenerate dimensions,
    /// a sample-count mismatch, or non-positive/non-finite spacing.
    pub fn new(
        dims: [usize; 3],
        spacing: [f64; 3],
        origin: [f64; 3],
        data: Vec<f32>,
    ) -> Result<Self, ExtractError> {
        if dims.iter().any(|&d| d == 0) {
            return Err(ExtractError::InvalidVolume(format!(
                "degenerate dimensions {dims:?}"
            )));
        }
        let expected = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .ok_or_else(|| {
                ExtractError::InvalidVolume(format!("dimensions {dims:?} overflow"))
            })?;
        if data.len() != expected {
            return Err(ExtractError::InvalidVolume(format!(
                "{} samples for dimensions {dims:?} (expected {expected})",
                data.len()
            )));
        }
        if spacing.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ExtractError::InvalidVolume(format!(
                "non-physical spacing {spacing:?}"
            )));
        }
        if origin.iter().any(|o| !o.is_finite()) {
            return Err(ExtractError::InvalidVolume(format!(
                "non-finite origin {origin:?}"
            )));
        }
        Ok(Self {
            dims,
            spacing: Vector3::new(spacing[0], spacing[1], spacing[2]),
            origin: Point3::new(origin[0], origin[1], origin[2]),
            data,
        })
    }

    /// Grid dimensions `[nx, ny, nz]`.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Physical voxel spacing.
    pub fn spacing(&self) -> Vector3<f64> {
        self.spacing
    }

    /// Physical position of grid index (0, 0, 0).
    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Scalar value at a grid index. Callers guarantee the index is in range.
    pub fn value(&self, x: usize, y: usize, z: usize) -> f32 {
        debug_assert!(x < self.dims[0] && y < self.dims[1] && z < self.dims[2]);
        self.data[(z * self.dims[1] + y) * self.dims[0] + x]
    }

    /// Map a (possibly fractional) grid index to a physical-space point.
    pub fn index_to_world(&self, x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(
            self.origin.x + x * self.spacing.x,
            self.origin.y + y * self.spacing.y,
            self.origin.z + z * self.spacing.z,
        )
    }

    /// Restrict the volume to an axis-aligned region of interest.
    pub fn subvolume(&self, bounds: IndexBounds) -> Result<SubVolume<'_>, ExtractError> {
        bounds.validate(self.dims)?;
        Ok(SubVolume {
            volume: self,
            bounds,
        })
    }
}

// ── Sub-volume view ────────────────────────────────────────────────────────

/// Read-only view of a [`ScalarVolume`] restricted to an [`IndexBounds`].
///
/// Slice addressing stays in volume z indices; only the in-plane (x, y)
/// coordinates are region-local.
#[derive(Debug, Clone, Copy)]
pub struct SubVolume<'a> {
    volume: &'a ScalarVolume,
    bounds: IndexBounds,
}

impl<'a> SubVolume<'a> {
    pub fn bounds(&self) -> IndexBounds {
        self.bounds
    }

    pub fn volume(&self) -> &'a ScalarVolume {
        self.volume
    }

    /// Copy the region's samples at volume slice `z` into a 2D view.
    pub fn slice(&self, z: usize) -> SliceImage {
        debug_assert!(z >= self.bounds.z_min && z <= self.bounds.z_max);
        let w = self.bounds.width();
        let h = self.bounds.height();
        let mut data = Vec::with_capacity(w * h);
        for y in self.bounds.y_min..=self.bounds.y_max {
            for x in self.bounds.x_min..=self.bounds.x_max {
                data.push(self.volume.value(x, y, z));
            }
        }
        SliceImage::from_raw(w as u32, h as u32, data).expect("slice dimensions match")
    }

    /// Map a (possibly fractional) region-local cell index on slice `z` to
    /// physical coordinates.
    pub fn cell_to_world(&self, local_x: f64, local_y: f64, z: usize) -> Point3<f64> {
        self.volume.index_to_world(
            self.bounds.x_min as f64 + local_x,
            self.bounds.y_min as f64 + local_y,
            z as f64,
        )
    }
}
