//! Dual-threshold slice binarization.

use image::GrayImage;

use super::config::ThresholdConfig;
use crate::volume::SliceImage;

/// Mask foreground sample value.
pub(crate) const FOREGROUND: u8 = 255;

/// Convert one scalar slice into a binary mask.
///
/// Two-stage rule: a first pass zeroes every sample at or below
/// `tissue_reject`, then a second pass maps the values still at or above
/// `metal_detect` to foreground and everything else to background.
pub(crate) fn binarize_slice(slice: &SliceImage, thresholds: &ThresholdConfig) -> GrayImage {
    let (w, h) = slice.dimensions();

    // Stage 1: suppress tissue-range intensities.
    let mut suppressed: Vec<f32> = slice.as_raw().clone();
    for v in &mut suppressed {
        if *v <= thresholds.tissue_reject {
            *v = 0.0;
        }
    }

    // Stage 2: keep only the metal band.
    let mask: Vec<u8> = suppressed
        .iter()
        .map(|&v| if v >= thresholds.metal_detect { FOREGROUND } else { 0 })
        .collect();

    GrayImage::from_raw(w, h, mask).expect("mask dimensions match")
}
