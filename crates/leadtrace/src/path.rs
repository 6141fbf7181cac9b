//! Electrode path value objects and the renderer-facing capability seam.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A physical-space coordinate, immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the slice plane. The depth component is
    /// excluded; continuity is judged per slice.
    pub fn planar_distance(self, other: Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<Point3<f64>> for Point3D {
    fn from(p: Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Point3D> for Point3<f64> {
    fn from(p: Point3D) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

/// Ordered sequence of accepted trace points.
///
/// Insertion order is traversal order (descending slice index) and is never
/// reordered or deduplicated. An empty path is the valid "no electrode
/// trace found" outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectrodePath {
    points: Vec<Point3D>,
}

impl ElectrodePath {
    pub fn new(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3D> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<Point3D> {
        self.points
    }
}

/// Capability handed to the external rendering collaborator.
///
/// The extraction core never draws. Callers adapt this to whatever line
/// renderer turns the path into a drawable polyline, and to the visibility
/// toggle that shows or hides it.
pub trait TraceSink {
    /// Present (or re-present) an extracted path.
    fn render(&mut self, path: &ElectrodePath);

    /// Toggle visibility of the rendered trace.
    fn set_visible(&mut self, visible: bool);
}
