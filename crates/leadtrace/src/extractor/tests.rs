//! End-to-end pipeline scenarios on synthetic volumes.

use super::*;
use crate::test_utils::{column_volume, uniform_volume, volume_from_fn};

const METAL: f32 = 3000.0;
const TISSUE: f32 = 400.0;

#[test]
fn metal_column_yields_one_point_per_slice() {
    let volume = column_volume([24, 24, 10], 7, 9, METAL, TISSUE);
    let result = extract_trace(&volume, &ExtractConfig::default()).unwrap();

    assert_eq!(result.path.len(), 10);
    for (i, p) in result.path.iter().enumerate() {
        assert!((p.x - 7.0).abs() < 1e-9);
        assert!((p.y - 9.0).abs() < 1e-9);
        // Descending traversal: top slice first.
        assert!((p.z - (9 - i) as f64).abs() < 1e-9);
    }
    assert_eq!(result.stats.n_slices, 10);
    assert_eq!(result.stats.n_accepted, 10);
    assert_eq!(result.stats.n_rejected, 0);
}

#[test]
fn distant_detection_on_next_slice_is_discarded() {
    // Blob on slice 10, another more than 5 units away on slice 9.
    let volume = volume_from_fn([32, 32, 12], [1.0; 3], [0.0; 3], |x, y, z| {
        if z == 10 && x == 5 && y == 5 {
            METAL
        } else if z == 9 && x == 20 && y == 20 {
            METAL
        } else {
            TISSUE
        }
    });
    let result = extract_trace(&volume, &ExtractConfig::default()).unwrap();

    assert_eq!(result.path.len(), 1);
    let p = result.path.points()[0];
    assert!((p.x - 5.0).abs() < 1e-9 && (p.y - 5.0).abs() < 1e-9 && (p.z - 10.0).abs() < 1e-9);
    assert_eq!(result.stats.n_regions, 2);
    assert_eq!(result.stats.n_rejected, 1);
}

#[test]
fn all_background_volume_yields_an_empty_path() {
    let volume = uniform_volume([16, 16, 8], TISSUE);
    let result = extract_trace(&volume, &ExtractConfig::default()).unwrap();

    assert!(result.path.is_empty());
    assert_eq!(result.stats.n_slices, 8);
    assert_eq!(result.stats.n_foreground_cells, 0);
    assert_eq!(result.stats.n_regions, 0);
}

#[test]
fn inverted_z_bounds_fail_before_any_slice_is_processed() {
    let volume = uniform_volume([16, 16, 8], TISSUE);
    let config = ExtractConfig::with_roi(crate::volume::IndexBounds::new(0, 15, 0, 15, 6, 2));
    let err = extract_trace(&volume, &config).unwrap_err();
    assert!(matches!(err, ExtractError::OutOfRange(_)));
}

#[test]
fn roi_beyond_extent_is_rejected() {
    let volume = uniform_volume([16, 16, 8], TISSUE);
    let config = ExtractConfig::with_roi(crate::volume::IndexBounds::new(0, 16, 0, 15, 0, 7));
    assert!(matches!(
        extract_trace(&volume, &config),
        Err(ExtractError::OutOfRange(_))
    ));
}

#[test]
fn slice_range_outside_roi_is_rejected() {
    let volume = uniform_volume([16, 16, 8], TISSUE);
    let mut config = ExtractConfig::default();
    config.slice_range = Some(SliceRange { top: 8, bottom: 0 });
    assert!(matches!(
        extract_trace(&volume, &config),
        Err(ExtractError::OutOfRange(_))
    ));

    config.slice_range = Some(SliceRange { top: 3, bottom: 5 });
    assert!(matches!(
        extract_trace(&volume, &config),
        Err(ExtractError::OutOfRange(_))
    ));
}

#[test]
fn slice_range_restricts_the_traversal() {
    let volume = column_volume([16, 16, 10], 4, 4, METAL, TISSUE);
    let mut config = ExtractConfig::default();
    config.slice_range = Some(SliceRange { top: 6, bottom: 4 });
    let result = extract_trace(&volume, &config).unwrap();

    assert_eq!(result.stats.n_slices, 3);
    let zs: Vec<f64> = result.path.iter().map(|p| p.z).collect();
    assert_eq!(zs, vec![6.0, 5.0, 4.0]);
}

#[test]
fn roi_confines_the_search() {
    // Two columns; only one sits inside the ROI.
    let volume = volume_from_fn([32, 32, 8], [1.0; 3], [0.0; 3], |x, y, _| {
        if (x == 4 && y == 4) || (x == 28 && y == 28) {
            METAL
        } else {
            TISSUE
        }
    });
    let config = ExtractConfig::with_roi(crate::volume::IndexBounds::new(0, 15, 0, 15, 0, 7));
    let result = extract_trace(&volume, &config).unwrap();

    assert_eq!(result.path.len(), 8);
    assert!(result.path.iter().all(|p| (p.x - 4.0).abs() < 1e-9));
}

#[test]
fn two_close_regions_on_one_slice_both_accepted() {
    // Single-slice traversal with two separate blobs 3 units apart: the
    // first is accepted unconditionally, the second passes the gate
    // against the first.
    let volume = volume_from_fn([24, 24, 1], [1.0; 3], [0.0; 3], |x, y, _| {
        if y == 10 && (x == 10 || x == 13) {
            METAL
        } else {
            TISSUE
        }
    });
    let result = extract_trace(&volume, &ExtractConfig::default()).unwrap();

    assert_eq!(result.stats.n_regions, 2);
    assert_eq!(result.path.len(), 2);
    let xs: Vec<f64> = result.path.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![10.0, 13.0]);
}

#[test]
fn consecutive_path_points_stay_inside_the_gate() {
    // A column that drifts by one cell every other slice.
    let volume = volume_from_fn([32, 32, 16], [1.0; 3], [0.0; 3], |x, y, z| {
        if x == 8 + z / 2 && y == 12 {
            METAL
        } else {
            TISSUE
        }
    });
    let config = ExtractConfig::default();
    let result = extract_trace(&volume, &config).unwrap();

    assert_eq!(result.path.len(), 16);
    for pair in result.path.points().windows(2) {
        assert!(pair[1].planar_distance(pair[0]) < config.proximity_radius);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let volume = volume_from_fn([40, 40, 24], [1.0; 3], [0.0; 3], |x, y, z| {
        // A drifting column plus some disconnected metal specks.
        if x == 10 + z / 4 && y == 20 {
            METAL
        } else if (x * 7 + y * 3 + z) % 211 == 0 {
            2900.0
        } else {
            TISSUE
        }
    });
    let config = ExtractConfig::default();
    let first = extract_trace(&volume, &config).unwrap();
    let second = extract_trace(&volume, &config).unwrap();
    assert_eq!(first, second);
    assert!(!first.path.is_empty());
}

#[test]
fn world_coordinates_respect_spacing_and_origin() {
    let volume = volume_from_fn(
        [24, 24, 6],
        [0.5, 2.0, 1.5],
        [5.0, -3.0, 10.0],
        |x, y, _| {
            if x == 10 && y == 12 {
                METAL
            } else {
                TISSUE
            }
        },
    );
    let result = extract_trace(&volume, &ExtractConfig::default()).unwrap();

    assert_eq!(result.path.len(), 6);
    let top = result.path.points()[0];
    assert!((top.x - 10.0).abs() < 1e-9); // 5.0 + 10 * 0.5
    assert!((top.y - 21.0).abs() < 1e-9); // -3.0 + 12 * 2.0
    assert!((top.z - 17.5).abs() < 1e-9); // 10.0 + 5 * 1.5
}

#[test]
fn extractor_wrapper_matches_the_free_function() {
    let volume = column_volume([16, 16, 4], 8, 8, METAL, TISSUE);
    let extractor = Extractor::new(ExtractConfig::default());
    let via_extractor = extractor.extract(&volume).unwrap();
    let via_fn = extract_trace(&volume, extractor.config()).unwrap();
    assert_eq!(via_extractor, via_fn);

    let path = extractor.extract_path(&volume).unwrap();
    assert_eq!(path, via_fn.path);
}

#[test]
fn extractor_config_mut_tunes_the_gate() {
    let mut extractor = Extractor::with_roi(crate::volume::IndexBounds::full([16, 16, 4]));
    extractor.config_mut().proximity_radius = 0.5;
    assert!((extractor.config().proximity_radius - 0.5).abs() < 1e-12);
}

#[test]
fn result_serializes_to_json() {
    let volume = column_volume([12, 12, 3], 6, 6, METAL, TISSUE);
    let result = extract_trace(&volume, &ExtractConfig::default()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: ExtractionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
