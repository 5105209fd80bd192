//! Cube geometry tables.
//!
//! Corner and edge numbering shared by every cube and by the case table:
//!
//! ```text
//!        4 ----4---- 5            +y
//!       /|          /|             |
//!      8 7         9 5             +-- +x
//!     /  |        /  |            /
//!    0 ----0---- 1   |          +z (into the page)
//!    |   7 ----6-|-- 6
//!    3  /        1  /
//!    | 11        | 10
//!    |/          |/
//!    3 ----2---- 2
//! ```
//!
//! Corners 0-3 lie on the `z = 0` face, corners 4-7 on the `z = 1` face. Within
//! a face the order is top-left, top-right, bottom-right, bottom-left, with
//! `+y` up. Edge `e` for `e < 4` joins corner `e` and `(e + 1) % 4`, edges 4-7
//! do the same on the far face, and edges 8-11 join corner `e - 8` to `e - 4`.

use glam::{UVec3, Vec3};

/// Number of corners of a cube.
pub const CORNER_COUNT: usize = 8;

/// Number of edges of a cube.
pub const EDGE_COUNT: usize = 12;

/// Corner positions of a unit cube centered on the origin.
///
/// Corner `i` corresponds to bit `i` of an occupancy code.
pub const CORNER_POSITIONS: [Vec3; CORNER_COUNT] = [
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
];

/// Midpoints of the 12 edges of a unit cube centered on the origin.
pub const EDGE_MIDPOINTS: [Vec3; EDGE_COUNT] = [
    Vec3::new(0.0, 0.5, -0.5),
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(0.0, -0.5, -0.5),
    Vec3::new(-0.5, 0.0, -0.5),
    Vec3::new(0.0, 0.5, 0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(0.0, -0.5, 0.5),
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(-0.5, 0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
];

/// The two corners each edge connects.
pub const EDGE_CORNERS: [[usize; 2]; EDGE_COUNT] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Grid index offset of each corner from the cube's minimum corner.
pub const CORNER_GRID_OFFSETS: [UVec3; CORNER_COUNT] = [
    UVec3::new(0, 1, 0),
    UVec3::new(1, 1, 0),
    UVec3::new(1, 0, 0),
    UVec3::new(0, 0, 0),
    UVec3::new(0, 1, 1),
    UVec3::new(1, 1, 1),
    UVec3::new(1, 0, 1),
    UVec3::new(0, 0, 1),
];

/// Flattened-index offsets from a cube's base sample to its 8 corner samples.
///
/// Computed once from the grid strides and reused for every cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerOffsets([usize; CORNER_COUNT]);

impl CornerOffsets {
    /// Builds the offsets for a grid with the given dimensions.
    ///
    /// The flattened index of `(x, y, z)` is `x * ny * nz + y * nz + z`.
    pub fn new(dims: UVec3) -> Self {
        let stride_z = 1;
        let stride_y = dims.z as usize;
        let stride_x = (dims.y as usize) * (dims.z as usize);

        let mut offsets = [0; CORNER_COUNT];
        for (offset, corner) in offsets.iter_mut().zip(CORNER_GRID_OFFSETS) {
            *offset = corner.x as usize * stride_x
                + corner.y as usize * stride_y
                + corner.z as usize * stride_z;
        }
        Self(offsets)
    }

    /// Returns the offset of corner `i`.
    #[inline]
    pub fn get(&self, corner: usize) -> usize {
        self.0[corner]
    }

    /// Returns all 8 offsets in corner order.
    #[inline]
    pub fn as_array(&self) -> &[usize; CORNER_COUNT] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_midpoints_between_their_corners() {
        for (edge, [a, b]) in EDGE_CORNERS.iter().enumerate() {
            let midpoint = (CORNER_POSITIONS[*a] + CORNER_POSITIONS[*b]) * 0.5;
            assert_eq!(midpoint, EDGE_MIDPOINTS[edge], "edge {edge}");
        }
    }

    #[test]
    fn test_corner_positions_match_grid_offsets() {
        for (position, offset) in CORNER_POSITIONS.iter().zip(CORNER_GRID_OFFSETS) {
            assert_eq!(*position + Vec3::splat(0.5), offset.as_vec3());
        }
    }

    #[test]
    fn test_every_corner_has_three_edges() {
        let mut degree = [0; CORNER_COUNT];
        for [a, b] in EDGE_CORNERS {
            degree[a] += 1;
            degree[b] += 1;
        }
        assert_eq!(degree, [3; CORNER_COUNT]);
    }

    #[test]
    fn test_edges_are_axis_aligned_unit_length() {
        for [a, b] in EDGE_CORNERS {
            let d = (CORNER_POSITIONS[a] - CORNER_POSITIONS[b]).abs();
            assert_eq!(d.x + d.y + d.z, 1.0);
        }
    }

    #[test]
    fn test_corner_offsets_from_strides() {
        let offsets = CornerOffsets::new(UVec3::new(4, 3, 5));
        // x stride 15, y stride 5, z stride 1
        assert_eq!(offsets.as_array(), &[5, 20, 15, 0, 6, 21, 16, 1]);
        assert_eq!(offsets.get(3), 0);
    }
}
