//! Error types for vector math, particle integration and preset loading.

use thiserror::Error;

/// Failures of the vector algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Division by a zero magnitude, e.g. normalizing the zero vector.
    #[error("cannot normalize a vector with zero magnitude")]
    ZeroMagnitude,

    #[error("cannot build a basis from parallel vectors")]
    ParallelVectors,
}

/// Failures when building or stepping a particle.
///
/// All of these are caller errors. None of them leave the particle partially
/// updated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParticleError {
    #[error("cannot integrate a particle with infinite mass")]
    InfiniteMass,

    #[error("cannot integrate over a non-positive duration ({0})")]
    NonPositiveDuration(f64),

    #[error("damping must be in (0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("inverse mass must be non-negative, got {0}")]
    NegativeInverseMass(f64),

    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),
}

/// Error type for preset loading operations.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("preset not found: {0}")]
    NotFound(String),

    #[error("invalid preset '{name}': {source}")]
    Invalid {
        name: String,
        #[source]
        source: ParticleError,
    },
}
