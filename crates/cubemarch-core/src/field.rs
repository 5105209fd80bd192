//! Scalar field provider traits.
//!
//! A [`ScalarField`] supplies one value per grid point. The engine calls it once
//! per point per refresh, in x-outer, y-middle, z-inner order, but an
//! implementation must not rely on that order.

use glam::UVec3;

/// Supplies a scalar value for each integer grid coordinate.
///
/// Values are conventionally in `[0, 1]`, but any finite value is accepted.
/// Implementations must be pure for a given state: sampling the same point
/// twice without an intervening [`TimeVaryingField::advance`] yields the same
/// value.
pub trait ScalarField {
    /// Returns the value at grid point `(x, y, z)`.
    fn sample(&self, x: u32, y: u32, z: u32) -> f32;
}

/// Any `Fn(x, y, z) -> value` closure is a scalar field.
impl<F> ScalarField for F
where
    F: Fn(u32, u32, u32) -> f32,
{
    #[inline]
    fn sample(&self, x: u32, y: u32, z: u32) -> f32 {
        self(x, y, z)
    }
}

/// A scalar field that evolves with time.
///
/// The host decides how often to advance; the field only accumulates the
/// elapsed time it is given.
pub trait TimeVaryingField: ScalarField {
    /// Advances the field by `elapsed` seconds.
    fn advance(&mut self, elapsed: f32);

    /// Returns the total time the field has been advanced by.
    fn time(&self) -> f32;

    /// Returns the grid shape the field maps its domain onto, if it has one.
    ///
    /// A field that normalizes grid indices by its own shape reports it here
    /// so the engine can refuse to drive a grid of a different shape.
    fn grid_dims(&self) -> Option<UVec3> {
        None
    }
}
