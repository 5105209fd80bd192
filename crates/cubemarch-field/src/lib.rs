//! Scalar field providers for cubemarch-rs.
//!
//! - [`Perlin`] seeded 2D gradient noise with a pseudo-3D average
//! - [`NoiseField`] animated, clamped noise over a grid ([`NoiseConfig`])
//! - [`SphereField`] analytic radial falloff, handy for tests and demos

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod noise;
pub mod perlin;
pub mod sphere;

pub use noise::{NoiseConfig, NoiseField};
pub use perlin::Perlin;
pub use sphere::SphereField;
