//! Error types for cubemarch-rs.

use glam::UVec3;
use thiserror::Error;

/// The main error type for cubemarch-rs operations.
#[derive(Error, Debug)]
pub enum CubemarchError {
    /// A grid axis has fewer than two sample points, so it holds no cubes.
    #[error("invalid grid dimension: axis {axis} has {value} points, need at least 2")]
    InvalidDimension { axis: char, value: u32 },

    /// The grid has more samples, or more worst-case output vertices, than
    /// this platform can address.
    #[error("grid dimensions {dims} are too large to allocate")]
    GridTooLarge { dims: UVec3 },

    /// A grid access fell outside the grid bounds.
    #[error("grid index {index} out of range for dimensions {dims}")]
    IndexOutOfRange { index: UVec3, dims: UVec3 },

    /// The occupancy threshold is NaN or infinite.
    #[error("occupancy threshold {0} is not finite")]
    ThresholdOutOfRange(f32),

    /// A grid was handed to an assembler built for different dimensions.
    #[error("grid dimensions {actual} do not match assembler dimensions {expected}")]
    GridShapeMismatch { expected: UVec3, actual: UVec3 },

    /// The cube size is not a finite positive number.
    #[error("cube size {0} must be finite and positive")]
    InvalidCubeSize(f32),

    /// The output buffer cannot hold the vertices of a rebuild.
    #[error("mesh capacity exceeded: required {required} vertices, capacity {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for cubemarch-rs operations.
pub type Result<T> = std::result::Result<T, CubemarchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CubemarchError::InvalidDimension { axis: 'y', value: 1 };
        assert_eq!(
            err.to_string(),
            "invalid grid dimension: axis y has 1 points, need at least 2"
        );

        let err = CubemarchError::CapacityExceeded {
            required: 30,
            capacity: 15,
        };
        assert_eq!(
            err.to_string(),
            "mesh capacity exceeded: required 30 vertices, capacity 15"
        );

        let err = CubemarchError::GridTooLarge {
            dims: UVec3::new(2, 3, 4),
        };
        assert_eq!(
            err.to_string(),
            "grid dimensions [2, 3, 4] are too large to allocate"
        );

        let err = CubemarchError::ThresholdOutOfRange(f32::NAN);
        assert_eq!(err.to_string(), "occupancy threshold NaN is not finite");
    }
}
