//! Animated noise field.

use cubemarch_core::grid::validate_dims;
use cubemarch_core::{Result, ScalarField, TimeVaryingField};
use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::perlin::Perlin;

/// Parameters of the animated noise field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Drift of the noise domain per second of advanced time.
    pub speed: Vec3,
    /// Extent of the noise domain covered by the whole grid, per axis.
    pub scale: Vec3,
    /// Constant shift subtracted from the noise domain.
    pub offset: Vec3,
    /// Seed of the permutation table.
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            speed: Vec3::new(0.1, 0.0, 0.0),
            scale: Vec3::ONE,
            offset: Vec3::ZERO,
            seed: 0,
        }
    }
}

/// Scalar field sampling clamped pseudo-3D Perlin noise over a grid.
///
/// Grid point `(x, y, z)` maps to the noise coordinate
/// `(x / (nx - 1), y / (ny - 1), z / (nz - 1)) * scale - offset + speed * time`.
#[derive(Debug, Clone)]
pub struct NoiseField {
    config: NoiseConfig,
    perlin: Perlin,
    inv_steps: Vec3,
    dims: UVec3,
    time: f32,
}

impl NoiseField {
    /// Creates a field covering a grid of `dims` sample points.
    pub fn new(config: NoiseConfig, dims: UVec3) -> Result<Self> {
        validate_dims(dims)?;
        Ok(Self {
            perlin: Perlin::new(config.seed),
            config,
            inv_steps: Vec3::ONE / (dims - UVec3::ONE).as_vec3(),
            dims,
            time: 0.0,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Replaces the configuration; the permutation table is rebuilt only when
    /// the seed changes.
    pub fn set_config(&mut self, config: NoiseConfig) {
        if config.seed != self.config.seed {
            self.perlin = Perlin::new(config.seed);
        }
        self.config = config;
    }

    /// Returns the grid dimensions the field was built for.
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Returns the noise-domain coordinate of grid point `(x, y, z)`.
    pub fn domain_point(&self, x: u32, y: u32, z: u32) -> Vec3 {
        let normalized = UVec3::new(x, y, z).as_vec3() * self.inv_steps;
        normalized * self.config.scale - self.config.offset + self.config.speed * self.time
    }
}

impl ScalarField for NoiseField {
    fn sample(&self, x: u32, y: u32, z: u32) -> f32 {
        self.perlin
            .sample_3d(self.domain_point(x, y, z))
            .clamp(0.0, 1.0)
    }
}

impl TimeVaryingField for NoiseField {
    fn advance(&mut self, elapsed: f32) {
        self.time += elapsed;
        log::trace!("noise field advanced to t={:.3}", self.time);
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn grid_dims(&self) -> Option<UVec3> {
        Some(self.dims)
    }
}
