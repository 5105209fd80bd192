//! Mesh assembly: walks every cube, looks up its case and emits triangles.
//!
//! A rebuild runs in two passes over the grid. The first pass classifies every
//! cube into a preallocated code buffer and sums the exact vertex total; the
//! second writes vertices into disjoint ranges of the output buffer. Capacity
//! is checked between the passes, so a failed rebuild leaves the previous mesh
//! intact.

#![allow(clippy::cast_possible_truncation)]

use glam::{UVec3, Vec3};

use crate::case_table::MAX_VERTICES_PER_CUBE;
use crate::cube::{corner_samples, OccupancyCode};
use crate::error::{CubemarchError, Result};
use crate::grid::{checked_volume, validate_dims, VoxelGrid};
use crate::mesh::{MeshBuffer, MeshView, NormalMode};
use crate::tables::{CornerOffsets, EDGE_MIDPOINTS};

/// Returns the number of vertices a grid of `dims` can emit in the worst case,
/// saturating at `usize::MAX`.
pub fn worst_case_vertices(dims: UVec3) -> usize {
    let cubes = dims.saturating_sub(UVec3::ONE);
    checked_volume(cubes)
        .and_then(|n| n.checked_mul(MAX_VERTICES_PER_CUBE))
        .unwrap_or(usize::MAX)
}

/// Checks that a cube size is finite and positive.
pub fn validate_cube_size(cube_size: f32) -> Result<()> {
    if cube_size.is_finite() && cube_size > 0.0 {
        Ok(())
    } else {
        Err(CubemarchError::InvalidCubeSize(cube_size))
    }
}

/// Checks that an occupancy threshold is finite.
pub fn validate_threshold(threshold: f32) -> Result<()> {
    if threshold.is_finite() {
        Ok(())
    } else {
        Err(CubemarchError::ThresholdOutOfRange(threshold))
    }
}

/// World placement of cubes: the volume is centered on the origin.
#[derive(Debug, Clone, Copy)]
struct Placement {
    cube_dims: UVec3,
    cube_size: f32,
    first_center: Vec3,
}

impl Placement {
    fn new(cube_dims: UVec3, cube_size: f32) -> Self {
        let half = cube_size * 0.5;
        Self {
            cube_dims,
            cube_size,
            first_center: -cube_dims.as_vec3() * half + Vec3::splat(half),
        }
    }

    #[inline]
    fn center(&self, coord: UVec3) -> Vec3 {
        self.first_center + coord.as_vec3() * self.cube_size
    }

    #[inline]
    fn slab_len(&self) -> usize {
        self.cube_dims.y as usize * self.cube_dims.z as usize
    }
}

/// Classifies every cube of slab `cx` into `codes` and returns the slab's
/// vertex total.
fn classify_slab(
    grid: &VoxelGrid,
    offsets: &CornerOffsets,
    cube_dims: UVec3,
    cx: u32,
    threshold: f32,
    codes: &mut [OccupancyCode],
) -> usize {
    let values = grid.values();
    let mut codes = codes.iter_mut();
    let mut vertices = 0;
    for cy in 0..cube_dims.y {
        let row_base = grid.flat_index_unchecked(cx, cy, 0);
        for cz in 0..cube_dims.z as usize {
            let samples = corner_samples(values, row_base + cz, offsets);
            let code = OccupancyCode::from_samples(&samples, threshold);
            vertices += code.edge_sequence().len();
            if let Some(slot) = codes.next() {
                *slot = code;
            }
        }
    }
    vertices
}

/// Emits the vertices of the cubes in `codes`, which start at flattened cube
/// index `first_cube`, into `out`.
fn emit_cubes(placement: &Placement, first_cube: usize, codes: &[OccupancyCode], out: &mut [Vec3]) {
    let slab_len = placement.slab_len();
    let nz = placement.cube_dims.z as usize;
    let mut cursor = 0;
    for (i, code) in codes.iter().enumerate() {
        let edges = code.edge_sequence();
        if edges.is_empty() {
            continue;
        }
        let cube = first_cube + i;
        let coord = UVec3::new(
            (cube / slab_len) as u32,
            ((cube % slab_len) / nz) as u32,
            (cube % nz) as u32,
        );
        let center = placement.center(coord);
        for (slot, &edge) in out[cursor..cursor + edges.len()].iter_mut().zip(edges) {
            *slot = EDGE_MIDPOINTS[edge as usize] * placement.cube_size + center;
        }
        cursor += edges.len();
    }
    debug_assert_eq!(cursor, out.len());
}

/// Builds the triangle-soup mesh for a voxel grid.
///
/// The assembler owns the output buffer and a per-cube code buffer, both sized
/// once from the grid dimensions and reused by every rebuild.
#[derive(Debug, Clone)]
pub struct MeshAssembler {
    dims: UVec3,
    offsets: CornerOffsets,
    placement: Placement,
    normal_mode: NormalMode,
    codes: Vec<OccupancyCode>,
    #[cfg(feature = "parallel")]
    slab_vertices: Vec<usize>,
    buffer: MeshBuffer,
}

impl MeshAssembler {
    /// Creates an assembler for grids of `dims` with the given cube edge length.
    ///
    /// The output buffer holds the worst case of every cube emitting 5 triangles.
    pub fn new(dims: UVec3, cube_size: f32) -> Result<Self> {
        Self::with_capacity(dims, cube_size, worst_case_vertices(dims))
    }

    /// Creates an assembler with an explicit vertex capacity.
    ///
    /// A capacity below [`worst_case_vertices`] makes any rebuild that needs more
    /// vertices fail with [`CubemarchError::CapacityExceeded`]. A larger one is
    /// clamped to the worst case.
    pub fn with_capacity(dims: UVec3, cube_size: f32, capacity: usize) -> Result<Self> {
        validate_dims(dims)?;
        validate_cube_size(cube_size)?;
        let cube_dims = dims - UVec3::ONE;
        let num_cubes =
            checked_volume(cube_dims).ok_or(CubemarchError::GridTooLarge { dims })?;
        let capacity = capacity.min(worst_case_vertices(dims));
        Ok(Self {
            dims,
            offsets: CornerOffsets::new(dims),
            placement: Placement::new(cube_dims, cube_size),
            normal_mode: NormalMode::default(),
            codes: vec![OccupancyCode::EMPTY; num_cubes],
            #[cfg(feature = "parallel")]
            slab_vertices: vec![0; cube_dims.x as usize],
            buffer: MeshBuffer::with_capacity(capacity),
        })
    }

    /// Returns the grid dimensions this assembler was built for.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Returns the cube edge length in world units.
    #[must_use]
    pub fn cube_size(&self) -> f32 {
        self.placement.cube_size
    }

    /// Returns the corner offset table derived from the grid strides.
    #[must_use]
    pub fn corner_offsets(&self) -> &CornerOffsets {
        &self.offsets
    }

    /// Returns the output vertex capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the normal recomputation mode.
    #[must_use]
    pub fn normal_mode(&self) -> NormalMode {
        self.normal_mode
    }

    /// Sets the normal recomputation mode used by subsequent rebuilds.
    pub fn set_normal_mode(&mut self, mode: NormalMode) -> &mut Self {
        self.normal_mode = mode;
        self
    }

    /// Returns the world-space center of cube `coord`.
    #[must_use]
    pub fn cube_center(&self, coord: UVec3) -> Vec3 {
        self.placement.center(coord)
    }

    /// Returns the world-space size of the whole volume.
    #[must_use]
    pub fn volume_size(&self) -> Vec3 {
        self.placement.cube_dims.as_vec3() * self.placement.cube_size
    }

    /// Returns half the world-space size of the volume.
    #[must_use]
    pub fn volume_extent(&self) -> Vec3 {
        self.volume_size() * 0.5
    }

    /// Returns the occupancy codes of the last attempted rebuild.
    ///
    /// This is scratch state: a rebuild that fails with
    /// [`CubemarchError::CapacityExceeded`] has already classified every cube,
    /// so the codes can describe a newer grid than [`MeshAssembler::mesh`].
    #[must_use]
    pub fn codes(&self) -> &[OccupancyCode] {
        &self.codes
    }

    /// Returns the mesh produced by the last successful rebuild.
    #[must_use]
    pub fn mesh(&self) -> MeshView<'_> {
        self.buffer.view()
    }

    fn check_grid(&self, grid: &VoxelGrid, threshold: f32) -> Result<()> {
        validate_threshold(threshold)?;
        if grid.dims() != self.dims {
            return Err(CubemarchError::GridShapeMismatch {
                expected: self.dims,
                actual: grid.dims(),
            });
        }
        Ok(())
    }

    /// Rebuilds the mesh for `grid` at `threshold`.
    ///
    /// Cubes are visited x outer, y middle, z inner, and their vertices are
    /// appended in that order. On error the previous mesh is kept.
    pub fn rebuild(&mut self, grid: &VoxelGrid, threshold: f32) -> Result<MeshView<'_>> {
        self.check_grid(grid, threshold)?;

        let cube_dims = self.placement.cube_dims;
        let slab_len = self.placement.slab_len();
        let mut total = 0;
        for (cx, slab) in self.codes.chunks_mut(slab_len).enumerate() {
            total += classify_slab(grid, &self.offsets, cube_dims, cx as u32, threshold, slab);
        }

        let positions = self.buffer.resize_positions(total)?;
        emit_cubes(&self.placement, 0, &self.codes, positions);
        self.finish()
    }

    /// Rebuilds the mesh with cubes processed concurrently.
    ///
    /// Produces exactly the same vertex sequence as [`MeshAssembler::rebuild`].
    /// Each x-slab is classified in parallel, a prefix sum over slab vertex
    /// counts assigns every slab its own output range, and slabs then emit
    /// concurrently.
    #[cfg(feature = "parallel")]
    pub fn rebuild_parallel(&mut self, grid: &VoxelGrid, threshold: f32) -> Result<MeshView<'_>> {
        use rayon::prelude::*;

        self.check_grid(grid, threshold)?;

        let cube_dims = self.placement.cube_dims;
        let slab_len = self.placement.slab_len();
        let offsets = self.offsets;
        self.codes
            .par_chunks_mut(slab_len)
            .zip(self.slab_vertices.par_iter_mut())
            .enumerate()
            .for_each(|(cx, (slab, count))| {
                *count = classify_slab(grid, &offsets, cube_dims, cx as u32, threshold, slab);
            });

        let total = self.slab_vertices.iter().sum();
        let positions = self.buffer.resize_positions(total)?;

        let mut ranges = Vec::with_capacity(self.slab_vertices.len());
        let mut rest = positions;
        for &count in &self.slab_vertices {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(count);
            ranges.push(head);
            rest = tail;
        }

        let placement = self.placement;
        ranges
            .into_par_iter()
            .zip(self.codes.par_chunks(slab_len))
            .enumerate()
            .for_each(|(cx, (out, slab))| emit_cubes(&placement, cx * slab_len, slab, out));

        self.finish()
    }

    fn finish(&mut self) -> Result<MeshView<'_>> {
        self.buffer
            .recompute_normals(self.normal_mode, self.placement.cube_size * 0.5);
        log::debug!(
            "rebuilt mesh: {} cubes, {} triangles ({} of {} vertex slots)",
            self.codes.len(),
            self.buffer.triangle_count(),
            self.buffer.vertex_count(),
            self.buffer.capacity()
        );
        Ok(self.buffer.view())
    }
}
