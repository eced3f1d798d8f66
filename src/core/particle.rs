use crate::core::vector::Vector2;
use crate::error::{Error, Result};

/// Largest time step a single integration will take.
///
/// Larger `dt` values are truncated to this value rather than sub-stepped; use
/// [`ParticleSystem::advance`](crate::core::ParticleSystem::advance) to catch
/// up on long frames.
pub const MAX_TIME_STEP: f32 = 0.016;

/// RGB display color, each channel in `[0, 1]`. Has no physical meaning.
pub type Color = [f32; 3];

/// A circular mass point.
///
/// Fields:
/// - `position`, `velocity`: current state
/// - `acceleration`: derived from the pending force during the last integration
/// - `force_accumulator`: forces applied since the last integration; zeroed by [`Particle::integrate`]
/// - `mass`: must be > 0 (not checked by [`Particle::new`])
/// - `radius`: must be >= 0 (not checked by [`Particle::new`])
/// - `is_active`: inactive particles are frozen and skipped by collisions
/// - `color`: display-only
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Centre (x, y).
    pub position: Vector2,
    /// Velocity (vx, vy).
    pub velocity: Vector2,
    /// Acceleration from the last integration.
    pub acceleration: Vector2,
    /// Pending force, cleared by each integration.
    pub force_accumulator: Vector2,
    /// Mass (> 0).
    pub mass: f32,
    /// Radius (>= 0).
    pub radius: f32,
    /// Cleared to remove the particle at the next compaction.
    pub is_active: bool,
    /// Display color.
    pub color: Color,
}

impl Particle {
    /// Create an active particle at rest with respect to forces.
    pub fn new(position: Vector2, velocity: Vector2, mass: f32, radius: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::ZERO,
            force_accumulator: Vector2::ZERO,
            mass,
            radius,
            is_active: true,
            color,
        }
    }

    /// Create a particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `mass` is non-positive, `radius` is negative,
    ///   or any component is NaN/inf.
    pub fn try_new(
        position: Vector2,
        velocity: Vector2,
        mass: f32,
        radius: f32,
        color: Color,
    ) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParam("radius must be finite and >= 0".into()));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        if !color.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParam("color must be finite".into()));
        }
        Ok(Self::new(position, velocity, mass, radius, color))
    }

    /// Add `force` to the pending force. Velocity is untouched until the next
    /// [`Particle::integrate`].
    #[inline]
    pub fn apply_force(&mut self, force: Vector2) {
        self.force_accumulator += force;
    }

    /// Semi-implicit Euler step using the pending force, then clear it.
    ///
    /// `dt` is clamped to [`MAX_TIME_STEP`]. Velocity is updated first and the
    /// new velocity moves the position. Inactive particles are left untouched,
    /// including their pending force.
    pub fn integrate(&mut self, dt: f32) {
        if !self.is_active {
            return;
        }
        let dt = dt.min(MAX_TIME_STEP);
        self.acceleration = self.force_accumulator / self.mass;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.force_accumulator = Vector2::ZERO;
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum m v.
    #[inline]
    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }
}
