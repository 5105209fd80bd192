//! The isosurface engine.
//!
//! [`IsoSurfaceEngine`] owns a voxel grid and a mesh assembler sized for it.
//! The host fills the grid (sample by sample or from a [`ScalarField`]) and
//! calls [`IsoSurfaceEngine::rebuild_mesh`] on its own schedule.
//!
//! # Example
//!
//! ```
//! use cubemarch::*;
//!
//! fn main() -> Result<()> {
//!     let mut engine = IsoSurfaceEngine::new(UVec3::splat(3), 2.0, 0.5)?;
//!     engine.set_sample(0, 0, 0, 1.0)?;
//!
//!     let mesh = engine.rebuild_mesh()?;
//!     assert_eq!(mesh.triangle_count(), 1);
//!     Ok(())
//! }
//! ```

use cubemarch_core::case_table::CASE_TABLE;
use cubemarch_core::tables::{
    CornerOffsets, CORNER_COUNT, CORNER_POSITIONS, EDGE_CORNERS, EDGE_COUNT, EDGE_MIDPOINTS,
};
use cubemarch_core::{
    assembler::validate_threshold, CubemarchError, EngineOptions, MeshAssembler, MeshView, NormalMode, Result,
    ScalarField, TimeVaryingField, VoxelGrid,
};
use glam::{UVec3, Vec3};

/// Marching cubes over a dense voxel grid.
#[derive(Debug, Clone)]
pub struct IsoSurfaceEngine {
    options: EngineOptions,
    grid: VoxelGrid,
    assembler: MeshAssembler,
}

impl IsoSurfaceEngine {
    /// Creates an engine from validated options.
    ///
    /// The grid starts with every sample at zero and the mesh empty.
    pub fn configure(options: EngineOptions) -> Result<Self> {
        options.validate()?;
        let grid = VoxelGrid::new(options.grid_dims)?;
        let mut assembler = MeshAssembler::new(options.grid_dims, options.cube_size)?;
        assembler.set_normal_mode(options.normal_mode);

        if options.parallel && cfg!(not(feature = "parallel")) {
            log::warn!("parallel rebuild requested but the `parallel` feature is disabled");
        }
        log::info!(
            "isosurface engine configured: {} points, cube size {}, threshold {}, {} vertex slots",
            options.grid_dims,
            options.cube_size,
            options.threshold,
            assembler.capacity()
        );

        Ok(Self {
            options,
            grid,
            assembler,
        })
    }

    /// Creates an engine with default options for the given shape.
    pub fn new(grid_dims: UVec3, cube_size: f32, threshold: f32) -> Result<Self> {
        Self::configure(EngineOptions::new(grid_dims, cube_size, threshold))
    }

    /// Returns the options the engine runs with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the voxel grid for bulk edits.
    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    pub fn set_sample(&mut self, x: u32, y: u32, z: u32, value: f32) -> Result<()> {
        self.grid.set(x, y, z, value)
    }

    pub fn get_sample(&self, x: u32, y: u32, z: u32) -> Result<f32> {
        self.grid.get(x, y, z)
    }

    /// Overwrites every sample from `provider`.
    pub fn fill_from_provider<F: ScalarField + ?Sized>(&mut self, provider: &F) {
        self.grid.fill_from(provider);
    }

    pub fn threshold(&self) -> f32 {
        self.options.threshold
    }

    /// Sets the occupancy threshold for later rebuilds.
    pub fn set_threshold(&mut self, threshold: f32) -> Result<()> {
        validate_threshold(threshold)?;
        self.options.threshold = threshold;
        Ok(())
    }

    pub fn set_normal_mode(&mut self, mode: NormalMode) {
        self.options.normal_mode = mode;
        self.assembler.set_normal_mode(mode);
    }

    /// Retriangulates the whole grid.
    ///
    /// Triangle `k` of the returned mesh is made of vertices `3k`, `3k + 1`
    /// and `3k + 2`. On error the previous mesh stays in place.
    pub fn rebuild_mesh(&mut self) -> Result<MeshView<'_>> {
        let threshold = self.options.threshold;
        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                return self.assembler.rebuild_parallel(&self.grid, threshold);
            }
        }
        self.assembler.rebuild(&self.grid, threshold)
    }

    /// Returns the mesh of the last successful rebuild.
    pub fn mesh(&self) -> MeshView<'_> {
        self.assembler.mesh()
    }

    /// Advances `field` by `elapsed` seconds, refills the grid from it and rebuilds.
    ///
    /// A field that reports [`TimeVaryingField::grid_dims`] must match the
    /// grid; otherwise this fails with [`CubemarchError::GridShapeMismatch`]
    /// before the field is advanced.
    pub fn update<F: TimeVaryingField>(
        &mut self,
        field: &mut F,
        elapsed: f32,
    ) -> Result<MeshView<'_>> {
        if let Some(actual) = field.grid_dims() {
            if actual != self.grid.dims() {
                return Err(CubemarchError::GridShapeMismatch {
                    expected: self.grid.dims(),
                    actual,
                });
            }
        }
        field.advance(elapsed);
        self.grid.fill_from(&*field);
        self.rebuild_mesh()
    }

    /// Returns the `(min, max)` world-space corners of the volume.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let extent = self.assembler.volume_extent();
        (-extent, extent)
    }

    /// Returns the world-space size of the volume.
    pub fn volume_size(&self) -> Vec3 {
        self.assembler.volume_size()
    }

    /// Returns the world-space center of cube `coord`.
    pub fn cube_center(&self, coord: UVec3) -> Vec3 {
        self.assembler.cube_center(coord)
    }

    pub fn corner_positions(&self) -> &'static [Vec3; CORNER_COUNT] {
        &CORNER_POSITIONS
    }

    pub fn edge_midpoints(&self) -> &'static [Vec3; EDGE_COUNT] {
        &EDGE_MIDPOINTS
    }

    pub fn edge_corners(&self) -> &'static [[usize; 2]; EDGE_COUNT] {
        &EDGE_CORNERS
    }

    /// Flattened-index offsets from a cube's base sample to its corners.
    pub fn corner_offsets(&self) -> CornerOffsets {
        *self.assembler.corner_offsets()
    }

    pub fn case_table(&self) -> &'static [&'static [u8]; 256] {
        &CASE_TABLE
    }
}
