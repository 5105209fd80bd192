//! Configuration options for the isosurface engine.

use glam::UVec3;
use serde::{Deserialize, Serialize};

use crate::assembler::{validate_cube_size, validate_threshold};
use crate::error::Result;
use crate::grid::validate_dims;
use crate::mesh::NormalMode;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Number of sample points along each axis (at least 2 each).
    pub grid_dims: UVec3,

    /// Edge length of one cube in world units.
    pub cube_size: f32,

    /// Samples strictly above this value count as inside.
    pub threshold: f32,

    /// How normals are recomputed after each rebuild.
    pub normal_mode: NormalMode,

    /// Whether rebuilds process cubes concurrently (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            grid_dims: UVec3::new(31, 21, 21),
            cube_size: 2.0,
            threshold: 0.5,
            normal_mode: NormalMode::Flat,
            parallel: false,
        }
    }
}

impl EngineOptions {
    /// Creates options for the given grid shape, cube size and threshold.
    pub fn new(grid_dims: UVec3, cube_size: f32, threshold: f32) -> Self {
        Self {
            grid_dims,
            cube_size,
            threshold,
            ..Self::default()
        }
    }

    /// Sets the normal mode.
    #[must_use]
    pub fn with_normal_mode(mut self, normal_mode: NormalMode) -> Self {
        self.normal_mode = normal_mode;
        self
    }

    /// Enables or disables parallel rebuilds.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks grid dimensions, cube size and threshold.
    pub fn validate(&self) -> Result<()> {
        validate_dims(self.grid_dims)?;
        validate_cube_size(self.cube_size)?;
        validate_threshold(self.threshold)
    }

    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CubemarchError;

    #[test]
    fn test_defaults_are_valid() {
        let options = EngineOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.threshold, 0.5);
        assert_eq!(options.cube_size, 2.0);
    }

    #[test]
    fn test_validate() {
        let options = EngineOptions::new(UVec3::new(1, 4, 4), 1.0, 0.5);
        assert!(matches!(
            options.validate(),
            Err(CubemarchError::InvalidDimension { axis: 'x', value: 1 })
        ));
        let options = EngineOptions::new(UVec3::splat(4), 1.0, f32::NAN);
        assert!(matches!(
            options.validate(),
            Err(CubemarchError::ThresholdOutOfRange(_))
        ));
        let options = EngineOptions::new(UVec3::splat(4), -1.0, 0.5);
        assert!(matches!(
            options.validate(),
            Err(CubemarchError::InvalidCubeSize(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let options = EngineOptions::new(UVec3::new(8, 6, 4), 0.5, 0.25)
            .with_normal_mode(NormalMode::Smooth);
        let json = options.to_json().unwrap();
        assert_eq!(EngineOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_json_partial_and_invalid() {
        let options = EngineOptions::from_json(r#"{ "threshold": 0.3 }"#).unwrap();
        assert_eq!(options.threshold, 0.3);
        assert_eq!(options.grid_dims, UVec3::new(31, 21, 21));

        assert!(matches!(
            EngineOptions::from_json(r#"{ "grid_dims": [1, 2, 2] }"#),
            Err(CubemarchError::InvalidDimension { .. })
        ));
        assert!(matches!(
            EngineOptions::from_json("not json"),
            Err(CubemarchError::Json(_))
        ));
    }
}
