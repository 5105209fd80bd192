//! Output mesh buffers.
//!
//! The mesh is a triangle soup: triangle `k` is formed by vertices `3k`,
//! `3k + 1` and `3k + 2`, and no vertex is shared between triangles. The index
//! sequence is therefore the identity and is never stored.

use std::collections::HashMap;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{CubemarchError, Result};

/// How per-vertex normals are recomputed after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NormalMode {
    /// Each vertex takes the normal of the one triangle it belongs to.
    #[default]
    Flat,
    /// Face normals are averaged over geometrically coincident vertices.
    /// Positions are left untouched.
    Smooth,
}

/// Fixed-capacity vertex storage reused across rebuilds.
///
/// Both vectors are allocated once to `capacity` and only their logical length
/// changes afterwards, so filling the buffer never reallocates.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffer {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    capacity: usize,
}

impl MeshBuffer {
    /// Creates an empty buffer that can hold `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the maximum number of vertices the buffer holds.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of vertices currently stored.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles currently stored.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns true if the buffer holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Resets the logical length to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
    }

    /// Sets the logical length to `len` vertices and returns the position slots
    /// to be overwritten.
    pub(crate) fn resize_positions(&mut self, len: usize) -> Result<&mut [Vec3]> {
        if len > self.capacity {
            return Err(CubemarchError::CapacityExceeded {
                required: len,
                capacity: self.capacity,
            });
        }
        self.clear();
        self.positions.resize(len, Vec3::ZERO);
        Ok(&mut self.positions)
    }

    /// Recomputes one normal per vertex from the stored triangles.
    ///
    /// `lattice_step` is the spacing of the lattice all vertices lie on; the
    /// smooth mode uses it to recognise coincident vertices.
    pub fn recompute_normals(&mut self, mode: NormalMode, lattice_step: f32) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);
        match mode {
            NormalMode::Flat => {
                for (tri, normals) in self
                    .positions
                    .chunks_exact(3)
                    .zip(self.normals.chunks_exact_mut(3))
                {
                    normals.fill(face_normal(tri).normalize_or_zero());
                }
            }
            NormalMode::Smooth => self.smooth_normals(lattice_step),
        }
    }

    /// Accumulates area-weighted face normals on shared lattice points.
    fn smooth_normals(&mut self, lattice_step: f32) {
        let inv_step = if lattice_step > 0.0 {
            1.0 / lattice_step
        } else {
            1.0
        };
        #[allow(clippy::cast_possible_truncation)]
        let key = |p: Vec3| -> IVec3 { (p * inv_step).round().as_ivec3() };

        let mut sums: HashMap<IVec3, Vec3> = HashMap::with_capacity(self.positions.len() / 2);
        for tri in self.positions.chunks_exact(3) {
            let n = face_normal(tri);
            for &p in tri {
                *sums.entry(key(p)).or_insert(Vec3::ZERO) += n;
            }
        }
        for (normal, &p) in self.normals.iter_mut().zip(&self.positions) {
            *normal = sums
                .get(&key(p))
                .map_or(Vec3::ZERO, |n| n.normalize_or_zero());
        }
    }

    /// Returns a borrowed view of the stored mesh.
    #[must_use]
    pub fn view(&self) -> MeshView<'_> {
        MeshView {
            positions: &self.positions,
            normals: &self.normals,
        }
    }
}

/// Unnormalized geometric normal of triangle `(a, b, c)`: `(b - a) × (c - a)`.
#[inline]
pub(crate) fn face_normal(tri: &[Vec3]) -> Vec3 {
    (tri[1] - tri[0]).cross(tri[2] - tri[0])
}

/// Read-only view of a triangle-soup mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    positions: &'a [Vec3],
    normals: &'a [Vec3],
}

impl<'a> MeshView<'a> {
    /// Returns the vertex positions; every 3 consecutive vertices form a triangle.
    #[must_use]
    pub fn vertices(&self) -> &'a [Vec3] {
        self.positions
    }

    /// Returns one normal per vertex.
    #[must_use]
    pub fn normals(&self) -> &'a [Vec3] {
        self.normals
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns triangle `k`, if it exists.
    #[must_use]
    pub fn triangle(&self, k: usize) -> Option<[Vec3; 3]> {
        let start = k.checked_mul(3)?;
        let tri = self.positions.get(start..start + 3)?;
        Some([tri[0], tri[1], tri[2]])
    }

    /// Iterates over all triangles in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + 'a {
        self.positions
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Iterates over the identity index sequence `0, 1, 2, ...`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn indices(&self) -> impl Iterator<Item = u32> {
        0..self.positions.len() as u32
    }

    /// Returns the positions as raw bytes for upload to a renderer.
    #[must_use]
    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    /// Returns the normals as raw bytes for upload to a renderer.
    #[must_use]
    pub fn normal_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.normals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> [Vec3; 3] {
        [Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    fn buffer_with(capacity: usize, triangles: &[[Vec3; 3]]) -> MeshBuffer {
        let mut buffer = MeshBuffer::with_capacity(capacity);
        let slots = buffer.resize_positions(triangles.len() * 3).unwrap();
        for (slot, p) in slots.iter_mut().zip(triangles.iter().flatten()) {
            *slot = *p;
        }
        buffer
    }

    #[test]
    fn test_fill_and_view() {
        let buffer = buffer_with(6, &[unit_triangle()]);
        let view = buffer.view();
        assert_eq!(view.vertex_count(), 3);
        assert_eq!(view.triangle_count(), 1);
        assert_eq!(view.triangle(0), Some(unit_triangle()));
        assert_eq!(view.triangle(1), None);
        assert_eq!(view.indices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(view.position_bytes().len(), 3 * 12);
    }

    #[test]
    fn test_capacity_exceeded_keeps_contents() {
        let mut buffer = buffer_with(3, &[unit_triangle()]);
        let err = buffer.resize_positions(6).unwrap_err();
        assert!(matches!(
            err,
            CubemarchError::CapacityExceeded {
                required: 6,
                capacity: 3
            }
        ));
        assert_eq!(buffer.view().vertices(), &unit_triangle());
    }

    #[test]
    fn test_clear_keeps_allocation() {
        let mut buffer = buffer_with(30, &[unit_triangle(); 10]);
        let ptr = buffer.positions.as_ptr();
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.resize_positions(30).unwrap();
        assert_eq!(buffer.positions.as_ptr(), ptr);
    }

    #[test]
    fn test_flat_normals() {
        let mut buffer = buffer_with(3, &[unit_triangle()]);
        buffer.recompute_normals(NormalMode::Flat, 1.0);
        assert_eq!(buffer.view().normals(), &[Vec3::Z; 3]);
    }

    #[test]
    fn test_smooth_normals_average_shared_vertices() {
        // Two triangles folded along the x axis, 90 degrees apart.
        let mut buffer = buffer_with(
            6,
            &[[Vec3::ZERO, Vec3::X, Vec3::Y], [Vec3::X, Vec3::ZERO, Vec3::Z]],
        );
        buffer.recompute_normals(NormalMode::Smooth, 1.0);

        let normals = buffer.view().normals();
        let shared = (Vec3::Z + Vec3::Y).normalize();
        assert!((normals[0] - shared).length() < 1e-6);
        assert!((normals[1] - shared).length() < 1e-6);
        assert!((normals[2] - Vec3::Z).length() < 1e-6);
        assert!((normals[5] - Vec3::Y).length() < 1e-6);
        // Positions stay unwelded.
        assert_eq!(buffer.vertex_count(), 6);
    }
}
