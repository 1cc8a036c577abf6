//! # Cyclone Core
//!
//! The numeric core of a mass-aggregate physics engine: 3D vector algebra and
//! the per-tick particle integration step.
//!
//! ## Architecture
//!
//! - `types`: `Vector3` algebra and physical constants
//! - `particle`: Point masses, force accumulation and semi-implicit Euler integration
//! - `presets`: YAML-based particle preset loader
//! - `error`: Error types for all of the above
//!
//! Force generators, collision handling and the world that owns particles live
//! outside this crate. They touch it only through [`Particle::add_force`] and
//! [`Particle::integrate`].

pub mod error;
pub mod particle;
pub mod presets;
pub mod types;

pub use error::{ParticleError, PresetError, VectorError};
pub use particle::Particle;
pub use presets::{ParticlePreset, PresetLoader};
pub use types::{orthonormal_basis, Vector3};
