//! Point-mass particles and their integration step.
//!
//! A particle is advanced with semi-implicit (symplectic) Euler:
//!
//! ```text
//! 1. x += v * dt            // uses the velocity from before this step
//! 2. a += F_acc * (1/m)     // force adds onto the standing acceleration
//! 3. v += a * dt
//! 4. v *= damping^dt        // exponential drag, independent of tick rate
//! 5. F_acc = 0
//! ```
//!
//! The driver calls [`Particle::add_force`] any number of times per tick and
//! then [`Particle::integrate`] exactly once.
//!
//! ## Standing acceleration
//!
//! `acceleration` is never reset. Whatever it holds (typically gravity, set once
//! at creation) persists from tick to tick, and each tick's accumulated force is
//! added on top of it. Under a force applied every tick the acceleration keeps
//! growing; callers that want a per-tick force-only acceleration should reset
//! `acceleration` themselves before integrating.

use crate::error::ParticleError;
use crate::types::Vector3;

/// A point mass with kinematic state, damping, and a force accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector3,
    pub velocity: Vector3,
    pub acceleration: Vector3,

    /// Fraction of velocity kept per second, in (0, 1]
    damping: f64,

    /// Zero means infinite mass
    inverse_mass: f64,

    force_accum: Vector3,
}

impl Particle {
    /// Create a particle with the given state and physical parameters.
    ///
    /// `damping` must lie in (0, 1] and `inverse_mass` must be non-negative. An
    /// inverse mass of zero is accepted and makes the particle immovable.
    pub fn new(
        position: Vector3,
        velocity: Vector3,
        acceleration: Vector3,
        damping: f64,
        inverse_mass: f64,
    ) -> Result<Self, ParticleError> {
        check_damping(damping)?;
        check_inverse_mass(inverse_mass)?;
        Ok(Self {
            position,
            velocity,
            acceleration,
            damping,
            inverse_mass,
            force_accum: Vector3::ZERO,
        })
    }

    /// Unit-mass, undamped particle at rest at a given position
    pub fn at_rest(position: Vector3) -> Self {
        Self {
            position,
            velocity: Vector3::ZERO,
            acceleration: Vector3::ZERO,
            damping: 1.0,
            inverse_mass: 1.0,
            force_accum: Vector3::ZERO,
        }
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn set_damping(&mut self, damping: f64) -> Result<(), ParticleError> {
        check_damping(damping)?;
        self.damping = damping;
        Ok(())
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn set_inverse_mass(&mut self, inverse_mass: f64) -> Result<(), ParticleError> {
        check_inverse_mass(inverse_mass)?;
        self.inverse_mass = inverse_mass;
        Ok(())
    }

    /// Mass in kg, `f64::INFINITY` for an immovable particle
    pub fn mass(&self) -> f64 {
        if self.inverse_mass == 0.0 {
            f64::INFINITY
        } else {
            1.0 / self.inverse_mass
        }
    }

    /// Set a finite mass. Use `set_inverse_mass(0.0)` for an immovable particle.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), ParticleError> {
        if mass > 0.0 {
            self.inverse_mass = 1.0 / mass;
            Ok(())
        } else {
            Err(ParticleError::NonPositiveMass(mass))
        }
    }

    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Translational kinetic energy, `None` when the mass is infinite
    pub fn kinetic_energy(&self) -> Option<f64> {
        if !self.has_finite_mass() {
            return None;
        }
        Some(0.5 * self.mass() * self.velocity.squared_magnitude())
    }

    /// Add a force to be applied on the next integration step.
    pub fn add_force(&mut self, force: &Vector3) {
        self.force_accum += *force;
    }

    /// Sum of the forces added since the last integration step
    pub fn accumulated_force(&self) -> Vector3 {
        self.force_accum
    }

    pub fn clear_accumulator(&mut self) {
        self.force_accum.clear();
    }

    /// Advance the particle by `duration` seconds.
    ///
    /// Fails with [`ParticleError::InfiniteMass`] when the inverse mass is zero,
    /// then with [`ParticleError::NonPositiveDuration`] when `duration <= 0`. On
    /// failure nothing is modified, the accumulator included.
    pub fn integrate(&mut self, duration: f64) -> Result<(), ParticleError> {
        if self.inverse_mass <= 0.0 {
            log::debug!("rejected integration of particle with infinite mass");
            return Err(ParticleError::InfiniteMass);
        }
        if duration <= 0.0 {
            log::debug!("rejected integration over duration {}", duration);
            return Err(ParticleError::NonPositiveDuration(duration));
        }

        self.position = self.position.plus_scaled(&self.velocity, duration);
        self.acceleration = self
            .acceleration
            .plus_scaled(&self.force_accum, self.inverse_mass);
        self.velocity = self.velocity.plus_scaled(&self.acceleration, duration);
        self.velocity = self.velocity.scaled(self.damping.powf(duration));
        self.force_accum.clear();

        log::trace!(
            "integrated dt={} pos={:?} vel={:?}",
            duration,
            self.position,
            self.velocity
        );
        Ok(())
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::at_rest(Vector3::ZERO)
    }
}

fn check_damping(damping: f64) -> Result<(), ParticleError> {
    if damping > 0.0 && damping <= 1.0 {
        Ok(())
    } else {
        Err(ParticleError::InvalidDamping(damping))
    }
}

fn check_inverse_mass(inverse_mass: f64) -> Result<(), ParticleError> {
    // Written this way round so NaN is rejected too
    if inverse_mass >= 0.0 {
        Ok(())
    } else {
        Err(ParticleError::NegativeInverseMass(inverse_mass))
    }
}

// =============================================================================
// Tests
// =============================================================================
