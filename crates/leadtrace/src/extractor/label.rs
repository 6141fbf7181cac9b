//! Connected-component labeling over binary masks.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Foreground adjacency rule.
///
/// Eight-connectivity is the default: it matches iso-contour extraction
/// semantics, where diagonally touching foreground cells belong to the
/// same component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            Self::Four => &FOUR,
            Self::Eight => &EIGHT,
        }
    }
}

/// A maximal connected set of foreground mask cells. Never empty.
#[derive(Debug, Clone)]
pub(crate) struct Region {
    /// Member cells as `(x, y)` mask indices, in fill-discovery order.
    pub cells: Vec<(u32, u32)>,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Region {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Find all connected foreground regions in `mask`.
///
/// Flood fill with an explicit stack. Regions are enumerated in row-major
/// order of their first-discovered cell, which makes the output
/// deterministic for a given mask. An all-background mask yields an empty
/// vector, not an error.
pub(crate) fn label_components(mask: &GrayImage, connectivity: Connectivity) -> Vec<Region> {
    let (w, h) = mask.dimensions();
    let data = mask.as_raw();
    let stride = w as usize;
    let offsets = connectivity.offsets();

    let mut visited = vec![false; data.len()];
    let mut regions = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y as usize * stride + x as usize;
            if data[idx] == 0 || visited[idx] {
                continue;
            }
            visited[idx] = true;
            stack.push((x, y));
            let mut region = Region {
                cells: Vec::new(),
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            };
            while let Some((cx, cy)) = stack.pop() {
                region.min_x = region.min_x.min(cx);
                region.min_y = region.min_y.min(cy);
                region.max_x = region.max_x.max(cx);
                region.max_y = region.max_y.max(cy);
                region.cells.push((cx, cy));
                for &(dx, dy) in offsets {
                    let nx = cx as i64 + dx as i64;
                    let ny = cy as i64 + dy as i64;
                    if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                        continue;
                    }
                    let nidx = ny as usize * stride + nx as usize;
                    if data[nidx] == 0 || visited[nidx] {
                        continue;
                    }
                    visited[nidx] = true;
                    stack.push((nx as u32, ny as u32));
                }
            }
            regions.push(region);
        }
    }
    regions
}
