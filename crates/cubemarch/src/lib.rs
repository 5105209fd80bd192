//! cubemarch-rs: marching cubes isosurface extraction over a dense voxel grid.
//!
//! Fill a regular grid of scalar samples, pick a threshold, and get back a
//! triangle soup approximating the surface where the field crosses it.
//!
//! # Quick Start
//!
//! ```
//! use cubemarch::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let dims = UVec3::new(31, 21, 21);
//!     let mut engine = IsoSurfaceEngine::new(dims, 2.0, 0.5)?;
//!     let mut noise = NoiseField::new(NoiseConfig::default(), dims)?;
//!
//!     // One host tick: advance the field by 1/60 s and retriangulate.
//!     let mesh = engine.update(&mut noise, 1.0 / 60.0)?;
//!     for [a, b, c] in mesh.triangles() {
//!         let _ = (a, b, c);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - `cubemarch-core`: grid, tables, occupancy, assembler (no rendering dependencies)
//! - `cubemarch-field`: Perlin noise and analytic scalar fields
//! - `cubemarch` (this crate): [`IsoSurfaceEngine`] and logging setup
//!
//! Enable the `parallel` feature and set [`EngineOptions::parallel`] to
//! triangulate with rayon; the output is identical to the serial path.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod engine;
mod init;

pub use engine::IsoSurfaceEngine;
pub use init::init_logging;

pub use cubemarch_core::{
    case_table, tables, worst_case_vertices, CornerOffsets, CubeCell, CubemarchError,
    EngineOptions, MeshAssembler, MeshBuffer, MeshView, NormalMode, OccupancyCode, Result,
    ScalarField, TimeVaryingField, VoxelGrid, CASE_TABLE, CORNER_COUNT, CORNER_GRID_OFFSETS,
    CORNER_POSITIONS, EDGE_CORNERS, EDGE_COUNT, EDGE_MIDPOINTS, MAX_TRIANGLES_PER_CUBE,
    MAX_VERTICES_PER_CUBE,
};
pub use cubemarch_field::{NoiseConfig, NoiseField, Perlin, SphereField};

pub use glam::{UVec3, Vec3};
