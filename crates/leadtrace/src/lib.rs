//! leadtrace — electrode-trace extraction from volumetric intensity scans.
//!
//! Locates a thin, high-density metallic electrode embedded in tissue and
//! reconstructs its trajectory as an ordered 3D polyline. The pipeline
//! stages are:
//!
//! 1. **Region extraction** – axis-aligned index-space crop bounding the
//!    anatomically plausible search region.
//! 2. **Binarization** – per-slice dual thresholding: suppress tissue-range
//!    intensities, keep the metal band.
//! 3. **Labeling** – connected-component analysis of each binary mask.
//! 4. **Centroids** – unweighted region centroids in physical coordinates.
//! 5. **Continuity** – a single sequential pass over slices in descending
//!    depth order, chaining per-slice detections into one coherent path.
//!
//! Per-slice stages run as a parallel map phase; the continuity filter then
//! reduces the buffered, index-ordered results sequentially.
//!
//! # Public API
//! The surface is intentionally small:
//! - [`Extractor`] and [`ExtractConfig`] as primary entry points
//! - [`ScalarVolume`] and [`IndexBounds`] as the input model
//! - [`ElectrodePath`] and [`ExtractionResult`] as outputs
//! - [`TraceSink`] as the seam to an external renderer
//!
//! Scan-file parsing and rendering live with external collaborators; this
//! crate neither reads NIfTI files nor draws.

mod extractor;
mod path;
mod volume;

#[cfg(test)]
pub(crate) mod test_utils;

pub use extractor::{
    extract_trace, Connectivity, ExtractConfig, ExtractionResult, ExtractionStats, Extractor,
    SliceRange, ThresholdConfig,
};
pub use path::{ElectrodePath, Point3D, TraceSink};
pub use volume::{ExtractError, IndexBounds, ScalarVolume, SliceImage, SubVolume};
