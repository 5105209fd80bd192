//! Core of cubemarch-rs.
//!
//! This crate provides the marching cubes machinery with no rendering dependencies:
//! - [`VoxelGrid`] dense scalar samples and the [`ScalarField`] provider contract
//! - Cube geometry [`tables`] and the 256-entry [`case_table`]
//! - Corner occupancy ([`OccupancyCode`], [`CubeCell`])
//! - [`MeshAssembler`] which turns a grid into a triangle-soup [`MeshView`]
//! - [`EngineOptions`] configuration and the [`CubemarchError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Grid coordinates are u32 and flattened indices usize
#![allow(clippy::cast_precision_loss)]

pub mod assembler;
pub mod case_table;
pub mod cube;
pub mod error;
pub mod field;
pub mod grid;
pub mod mesh;
pub mod options;
pub mod tables;

pub use assembler::{worst_case_vertices, MeshAssembler};
pub use case_table::{CASE_TABLE, MAX_TRIANGLES_PER_CUBE, MAX_VERTICES_PER_CUBE};
pub use cube::{CubeCell, OccupancyCode};
pub use error::{CubemarchError, Result};
pub use field::{ScalarField, TimeVaryingField};
pub use grid::VoxelGrid;
pub use mesh::{MeshBuffer, MeshView, NormalMode};
pub use options::EngineOptions;
pub use tables::{
    CornerOffsets, CORNER_COUNT, CORNER_GRID_OFFSETS, CORNER_POSITIONS, EDGE_CORNERS, EDGE_COUNT,
    EDGE_MIDPOINTS,
};

// Re-export glam types for convenience
pub use glam::{UVec3, Vec3};
