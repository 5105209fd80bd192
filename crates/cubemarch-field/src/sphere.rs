//! Analytic sphere field.

use cubemarch_core::ScalarField;
use glam::{UVec3, Vec3};

/// Radial falloff around a center in grid-index space.
///
/// The value is `1 - 0.5 * d / radius`, so it equals 1 at the center, 0.5 on
/// the sphere of `radius` and keeps falling beyond it. With the default
/// threshold of 0.5 the extracted surface approximates the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereField {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereField {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere centered in a grid of `dims` sample points.
    pub fn centered(dims: UVec3, radius: f32) -> Self {
        Self::new((dims - UVec3::ONE).as_vec3() * 0.5, radius)
    }
}

impl ScalarField for SphereField {
    fn sample(&self, x: u32, y: u32, z: u32) -> f32 {
        let d = UVec3::new(x, y, z).as_vec3().distance(self.center);
        1.0 - 0.5 * d / self.radius
    }
}
