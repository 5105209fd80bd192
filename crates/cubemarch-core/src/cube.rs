//! Cube decomposition and corner occupancy.

use glam::UVec3;

use crate::case_table;
use crate::error::{CubemarchError, Result};
use crate::grid::VoxelGrid;
use crate::tables::{CornerOffsets, CORNER_COUNT};

/// 8-bit corner occupancy pattern of a cube.
///
/// Bit `i` is set when corner `i`'s sample is strictly above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OccupancyCode(pub u8);

impl OccupancyCode {
    /// Every corner at or below the threshold.
    pub const EMPTY: Self = Self(0);
    /// Every corner above the threshold.
    pub const FULL: Self = Self(u8::MAX);

    /// Builds the code for 8 corner samples in corner order.
    #[inline]
    pub fn from_samples(samples: &[f32; CORNER_COUNT], threshold: f32) -> Self {
        let mut bits = 0_u8;
        for (corner, &sample) in samples.iter().enumerate() {
            if sample > threshold {
                bits |= 1 << corner;
            }
        }
        Self(bits)
    }

    /// Returns the raw bit pattern.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns whether `corner` is above the threshold.
    #[inline]
    pub fn is_set(self, corner: usize) -> bool {
        corner < CORNER_COUNT && (self.0 >> corner) & 1 == 1
    }

    /// Returns whether the cube lies entirely on one side of the surface.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self == Self::EMPTY || self == Self::FULL
    }

    /// Returns the case table entry for this code.
    #[inline]
    pub fn edge_sequence(self) -> &'static [u8] {
        case_table::edge_sequence(self.0)
    }

    /// Returns the number of triangles this code emits.
    #[inline]
    pub fn triangle_count(self) -> usize {
        case_table::triangle_count(self.0)
    }
}

/// Reads the 8 corner samples of the cube whose base sample is `base`.
#[inline]
pub(crate) fn corner_samples(
    values: &[f32],
    base: usize,
    offsets: &CornerOffsets,
) -> [f32; CORNER_COUNT] {
    offsets.as_array().map(|offset| values[base + offset])
}

/// One grid hexahedron, identified by its minimum corner indices.
///
/// A cell owns no storage; its corner samples are addressed through the
/// grid's [`CornerOffsets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCell {
    coord: UVec3,
}

impl CubeCell {
    /// Creates the cell at `coord`, which must be a valid cube of `grid`.
    pub fn new(grid: &VoxelGrid, coord: UVec3) -> Result<Self> {
        let cube_dims = grid.cube_dims();
        if coord.cmpge(cube_dims).any() {
            return Err(CubemarchError::IndexOutOfRange {
                index: coord,
                dims: cube_dims,
            });
        }
        Ok(Self { coord })
    }

    /// Returns the cell's minimum corner indices.
    #[must_use]
    pub fn coord(&self) -> UVec3 {
        self.coord
    }

    /// Returns the flattened index of the cell's minimum-corner sample.
    #[must_use]
    pub fn base_index(&self, grid: &VoxelGrid) -> usize {
        grid.flat_index_unchecked(self.coord.x, self.coord.y, self.coord.z)
    }

    /// Returns the cell's 8 corner samples in corner order.
    #[must_use]
    pub fn corner_samples(&self, grid: &VoxelGrid, offsets: &CornerOffsets) -> [f32; CORNER_COUNT] {
        corner_samples(grid.values(), self.base_index(grid), offsets)
    }

    /// Returns the cell's occupancy code for `threshold`.
    #[must_use]
    pub fn occupancy(
        &self,
        grid: &VoxelGrid,
        offsets: &CornerOffsets,
        threshold: f32,
    ) -> OccupancyCode {
        OccupancyCode::from_samples(&self.corner_samples(grid, offsets), threshold)
    }
}
