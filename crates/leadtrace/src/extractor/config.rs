//! Extraction configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::label::Connectivity;
use crate::volume::IndexBounds;

/// Dual intensity thresholds for slice binarization.
///
/// The electrode material occupies a narrow high-intensity band distinct
/// from bone and tissue; both cutoffs are plain configuration inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Samples at or below this value are zeroed before metal detection
    /// (suppresses bone/tissue clutter).
    pub tissue_reject: f32,
    /// Remaining samples at or above this value become mask foreground.
    pub metal_detect: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            tissue_reject: 1200.0,
            metal_detect: 2800.0,
        }
    }
}

/// Slice traversal range, walked once from `top` down to `bottom`
/// (inclusive, strictly descending, never revisited).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRange {
    pub top: usize,
    pub bottom: usize,
}

/// Top-level extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Binarization thresholds.
    pub threshold: ThresholdConfig,
    /// Planar distance gate for chaining detections across slices
    /// (physical units). A candidate is accepted iff its (x, y) distance
    /// to the last accepted point is strictly below this radius.
    pub proximity_radius: f64,
    /// Region of interest; `None` means the full volume extent.
    pub roi: Option<IndexBounds>,
    /// Traversal range in volume z indices; `None` derives the ROI's full
    /// z-extent, walked top-down.
    pub slice_range: Option<SliceRange>,
    /// Foreground adjacency rule for component labeling.
    pub connectivity: Connectivity,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdConfig::default(),
            proximity_radius: 5.0,
            roi: None,
            slice_range: None,
            connectivity: Connectivity::Eight,
        }
    }
}

impl ExtractConfig {
    /// Configuration with a region of interest and defaults everywhere else.
    pub fn with_roi(roi: IndexBounds) -> Self {
        Self {
            roi: Some(roi),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
