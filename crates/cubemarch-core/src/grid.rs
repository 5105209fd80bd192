//! Dense voxel grid of scalar samples.

use glam::UVec3;

use crate::case_table::MAX_VERTICES_PER_CUBE;
use crate::error::{CubemarchError, Result};
use crate::field::ScalarField;

/// Product of the three components, or `None` on overflow.
pub(crate) fn checked_volume(v: UVec3) -> Option<usize> {
    (v.x as usize)
        .checked_mul(v.y as usize)?
        .checked_mul(v.z as usize)
}

/// Checks that every axis has at least two sample points and that the
/// samples and the worst-case output vertices fit in addressable memory.
pub fn validate_dims(dims: UVec3) -> Result<()> {
    for (axis, value) in [('x', dims.x), ('y', dims.y), ('z', dims.z)] {
        if value < 2 {
            return Err(CubemarchError::InvalidDimension { axis, value });
        }
    }

    let max_bytes = isize::MAX.unsigned_abs();
    let samples = checked_volume(dims)
        .and_then(|n| n.checked_mul(std::mem::size_of::<f32>()))
        .filter(|&bytes| bytes <= max_bytes);
    let vertices = checked_volume(dims - UVec3::ONE)
        .and_then(|n| n.checked_mul(MAX_VERTICES_PER_CUBE))
        .and_then(|n| n.checked_mul(std::mem::size_of::<glam::Vec3>()))
        .filter(|&bytes| bytes <= max_bytes);
    if samples.is_none() || vertices.is_none() {
        return Err(CubemarchError::GridTooLarge { dims });
    }
    Ok(())
}

/// A regular 3D grid of scalar samples with a fixed shape.
///
/// Samples are stored flattened with `x` slowest and `z` fastest: the value for
/// `(x, y, z)` lives at `x * ny * nz + y * nz + z`. The shape never changes
/// after construction; the values are overwritten in place on every refresh.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    dims: UVec3,
    values: Vec<f32>,
}

impl VoxelGrid {
    /// Creates a grid of zeros with `dims` sample points per axis.
    pub fn new(dims: UVec3) -> Result<Self> {
        validate_dims(dims)?;
        let len = checked_volume(dims).ok_or(CubemarchError::GridTooLarge { dims })?;
        Ok(Self {
            dims,
            values: vec![0.0; len],
        })
    }

    /// Returns the number of sample points in each dimension.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Returns the number of cubes in each dimension.
    #[must_use]
    pub fn cube_dims(&self) -> UVec3 {
        self.dims - UVec3::ONE
    }

    /// Returns the total number of samples.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.values.len()
    }

    /// Returns the total number of cubes.
    #[must_use]
    pub fn num_cubes(&self) -> usize {
        let c = self.cube_dims();
        c.x as usize * c.y as usize * c.z as usize
    }

    /// Returns the flattened index of `(x, y, z)`.
    pub fn flat_index(&self, x: u32, y: u32, z: u32) -> Result<usize> {
        let index = UVec3::new(x, y, z);
        if index.cmpge(self.dims).any() {
            return Err(CubemarchError::IndexOutOfRange {
                index,
                dims: self.dims,
            });
        }
        Ok(self.flat_index_unchecked(x, y, z))
    }

    #[inline]
    pub(crate) fn flat_index_unchecked(&self, x: u32, y: u32, z: u32) -> usize {
        (x as usize * self.dims.y as usize + y as usize) * self.dims.z as usize + z as usize
    }

    /// Returns the sample at `(x, y, z)`.
    pub fn get(&self, x: u32, y: u32, z: u32) -> Result<f32> {
        let i = self.flat_index(x, y, z)?;
        Ok(self.values[i])
    }

    /// Sets the sample at `(x, y, z)`.
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: f32) -> Result<()> {
        let i = self.flat_index(x, y, z)?;
        self.values[i] = value;
        Ok(())
    }

    /// Sets every sample to `value`.
    pub fn fill(&mut self, value: f32) {
        self.values.fill(value);
    }

    /// Overwrites every sample from `field`, x outer, y middle, z inner.
    pub fn fill_from<F: ScalarField + ?Sized>(&mut self, field: &F) {
        let dims = self.dims;
        let mut values = self.values.iter_mut();
        for x in 0..dims.x {
            for y in 0..dims.y {
                for z in 0..dims.z {
                    if let Some(value) = values.next() {
                        *value = field.sample(x, y, z);
                    }
                }
            }
        }
    }

    /// Returns the flattened samples.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the flattened samples for in-place editing.
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}
