//! Electrode-trace extraction pipeline.
//!
//! This module is the glue layer that wires together the stages:
//! region-of-interest crop → per-slice binarize → label → centroid →
//! continuity filter → path assembly.
//!
//! The per-slice stages have no data dependency on each other and run as a
//! parallel map phase; results are buffered in traversal order and the
//! continuity filter then reduces them strictly sequentially, because its
//! accept/reject decision depends on the previously accepted point.
//! Algorithmic primitives live in the stage submodules; this module owns
//! call order and data flow.

mod binarize;
mod centroid;
mod config;
mod continuity;
mod label;

#[cfg(test)]
mod tests;

pub use config::{ExtractConfig, SliceRange, ThresholdConfig};
pub use label::Connectivity;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::path::{ElectrodePath, Point3D};
use crate::volume::{ExtractError, IndexBounds, ScalarVolume, SubVolume};
use binarize::binarize_slice;
use centroid::region_centroid;
use continuity::ContinuityFilter;
use label::label_components;

/// Per-run counters for the extraction stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Slices visited by the traversal.
    pub n_slices: usize,
    /// Foreground cells across all binarized slices.
    pub n_foreground_cells: usize,
    /// Connected regions (= centroid candidates) across all slices.
    pub n_regions: usize,
    /// Candidates accepted into the path.
    pub n_accepted: usize,
    /// Candidates rejected by the proximity gate.
    pub n_rejected: usize,
}

/// Full extraction result for one volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Ordered electrode path; empty when no trace was found.
    pub path: ElectrodePath,
    /// Stage counters.
    pub stats: ExtractionStats,
}

/// One slice's worth of map-phase output, buffered for the sequential
/// reduce phase.
struct SliceDetections {
    z: usize,
    centroids: Vec<Point3D>,
    n_foreground: usize,
}

fn detect_slice(sub: &SubVolume<'_>, z: usize, config: &ExtractConfig) -> SliceDetections {
    let slice = sub.slice(z);
    let mask = binarize_slice(&slice, &config.threshold);
    let n_foreground = mask.as_raw().iter().filter(|&&v| v != 0).count();
    let regions = label_components(&mask, config.connectivity);
    let centroids = regions
        .iter()
        .map(|region| region_centroid(region, sub, z))
        .collect();
    SliceDetections {
        z,
        centroids,
        n_foreground,
    }
}

fn resolve_slice_range(
    roi: IndexBounds,
    slice_range: Option<SliceRange>,
) -> Result<SliceRange, ExtractError> {
    let range = slice_range.unwrap_or(SliceRange {
        top: roi.z_max,
        bottom: roi.z_min,
    });
    if range.bottom > range.top {
        return Err(ExtractError::OutOfRange(format!(
            "slice range bottom {} above top {}",
            range.bottom, range.top
        )));
    }
    if range.bottom < roi.z_min || range.top > roi.z_max {
        return Err(ExtractError::OutOfRange(format!(
            "slice range {}..{} outside ROI z extent {}..{}",
            range.bottom, range.top, roi.z_min, roi.z_max
        )));
    }
    Ok(range)
}

/// Run the full extraction pipeline on `volume`.
///
/// Structural errors (bad ROI, bad slice range) surface before any slice is
/// processed and no partial path is produced. Zero detections is not an
/// error: the result carries an empty path so the caller can decide whether
/// "no electrode found" warrants a user-facing warning.
pub fn extract_trace(
    volume: &ScalarVolume,
    config: &ExtractConfig,
) -> Result<ExtractionResult, ExtractError> {
    let roi = config.roi.unwrap_or_else(|| IndexBounds::full(volume.dims()));
    let sub = volume.subvolume(roi)?;
    let range = resolve_slice_range(roi, config.slice_range)?;

    // Map phase. Slices are independent; collect restores traversal order.
    let traversal: Vec<usize> = (range.bottom..=range.top).rev().collect();
    let per_slice: Vec<SliceDetections> = traversal
        .par_iter()
        .map(|&z| detect_slice(&sub, z, config))
        .collect();

    // Reduce phase: strictly sequential, top slice first.
    let mut stats = ExtractionStats {
        n_slices: per_slice.len(),
        ..Default::default()
    };
    let mut filter = ContinuityFilter::new(config.proximity_radius);
    for detections in &per_slice {
        stats.n_foreground_cells += detections.n_foreground;
        stats.n_regions += detections.centroids.len();
        let mut accepted_here = 0usize;
        for &candidate in &detections.centroids {
            if filter.offer(candidate) {
                stats.n_accepted += 1;
                accepted_here += 1;
            } else {
                stats.n_rejected += 1;
            }
        }
        if !detections.centroids.is_empty() {
            debug!(
                "slice {}: {} candidate(s), {} accepted",
                detections.z,
                detections.centroids.len(),
                accepted_here
            );
        }
    }

    let path = ElectrodePath::new(filter.into_path());
    info!(
        "extracted {} trace point(s) from {} slice(s), {} candidate region(s)",
        path.len(),
        stats.n_slices,
        stats.n_regions
    );
    Ok(ExtractionResult { path, stats })
}

/// Primary extraction interface.
///
/// Encapsulates an [`ExtractConfig`]. Create once, extract from many
/// volumes; every run starts from fresh per-run state.
///
/// # Examples
///
/// ```
/// use leadtrace::{ExtractConfig, Extractor, ScalarVolume};
///
/// let volume = ScalarVolume::new([8, 8, 4], [1.0; 3], [0.0; 3], vec![0.0; 256])?;
/// let extractor = Extractor::new(ExtractConfig::default());
/// let result = extractor.extract(&volume)?;
/// assert!(result.path.is_empty());
/// # Ok::<(), leadtrace::ExtractError>(())
/// ```
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Create an extractor with full config control.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extractor with defaults and the given region of interest.
    pub fn with_roi(roi: IndexBounds) -> Self {
        Self::new(ExtractConfig::with_roi(roi))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut ExtractConfig {
        &mut self.config
    }

    /// Extract the electrode path, with stage counters.
    pub fn extract(&self, volume: &ScalarVolume) -> Result<ExtractionResult, ExtractError> {
        extract_trace(volume, &self.config)
    }

    /// Convenience wrapper returning only the assembled path.
    pub fn extract_path(&self, volume: &ScalarVolume) -> Result<ElectrodePath, ExtractError> {
        Ok(self.extract(volume)?.path)
    }
}
