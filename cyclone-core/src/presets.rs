//! Particle preset loader.
//!
//! Loads initial particle state and physical parameters from YAML files, so
//! projectile types can be tuned without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! └── particles/
//!     ├── pistol.yaml
//!     ├── artillery.yaml
//!     └── ...
//! ```
//!
//! ## File Format
//!
//! ```yaml
//! name: Artillery
//! mass: 200.0            # or `inverse_mass: 0.005`; 0 inverse mass = immovable
//! damping: 0.99
//! velocity: { x: 0.0, y: 30.0, z: 40.0 }
//! acceleration: { x: 0.0, y: -20.0, z: 0.0 }
//! ```
//!
//! Omitted vectors default to zero and omitted damping to 1.0 (no drag).
//!
//! Presets only describe how a particle starts out. Live particle state is
//! never written back to disk, and `Particle` itself has no serde support.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ParticleError, PresetError};
use crate::particle::Particle;
use crate::types::Vector3;

/// Initial state and parameters for a particle, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticlePreset {
    pub name: String,

    #[serde(default)]
    pub position: Vector3,
    #[serde(default)]
    pub velocity: Vector3,
    #[serde(default)]
    pub acceleration: Vector3,

    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Mass in kg. Takes precedence over `inverse_mass` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_mass: Option<f64>,
}

fn default_damping() -> f64 {
    1.0
}

impl ParticlePreset {
    pub fn from_yaml_str(contents: &str) -> Result<Self, PresetError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Inverse mass this preset resolves to (1.0 when neither field is set).
    ///
    /// A non-positive `mass` or a negative `inverse_mass` is an error, never a
    /// silently infinite or negative value.
    pub fn resolved_inverse_mass(&self) -> Result<f64, ParticleError> {
        match (self.mass, self.inverse_mass) {
            (Some(mass), _) if mass > 0.0 => Ok(1.0 / mass),
            (Some(mass), _) => Err(ParticleError::NonPositiveMass(mass)),
            (None, Some(inverse_mass)) if inverse_mass >= 0.0 => Ok(inverse_mass),
            (None, Some(inverse_mass)) => Err(ParticleError::NegativeInverseMass(inverse_mass)),
            (None, None) => Ok(1.0),
        }
    }

    /// Build a particle, validating damping and mass.
    pub fn build(&self) -> Result<Particle, PresetError> {
        let invalid = |source| PresetError::Invalid {
            name: self.name.clone(),
            source,
        };

        let inverse_mass = self.resolved_inverse_mass().map_err(invalid)?;
        Particle::new(
            self.position,
            self.velocity,
            self.acceleration,
            self.damping,
            inverse_mass,
        )
        .map_err(invalid)
    }
}

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain a `particles/` subdirectory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn preset_path(&self, name: &str) -> PathBuf {
        self.base_path
            .join("particles")
            .join(format!("{}.yaml", name))
    }

    /// Load a preset by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let mut shot = loader.load("artillery")?.build()?;
    /// ```
    pub fn load(&self, name: &str) -> Result<ParticlePreset, PresetError> {
        let path = self.preset_path(name);
        if !path.exists() {
            return Err(PresetError::NotFound(name.to_string()));
        }
        log::debug!("loading particle preset from {}", path.display());
        let contents = fs::read_to_string(&path)?;
        ParticlePreset::from_yaml_str(&contents)
    }

    /// Load a preset and build a particle from it in one go.
    pub fn spawn(&self, name: &str) -> Result<Particle, PresetError> {
        self.load(name)?.build()
    }

    /// List all available presets, sorted by name.
    pub fn list(&self) -> Result<Vec<String>, PresetError> {
        let path = self.base_path.join("particles");
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let file_path = entry?.path();
            if file_path.extension().map_or(false, |ext| ext == "yaml") {
                if let Some(stem) = file_path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
