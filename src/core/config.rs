//! Global constants of a particle system.
//!
//! A [`SystemConfig`] is fixed for the lifetime of the system it builds. It is
//! `serde`-deserializable with every field defaulted, so a host can load a
//! partial description and fill the rest from the reference scene:
//!
//! ```json
//! {
//!   "gravity": { "x": 0.0, "y": -9.8 },
//!   "damping": 0.99,
//!   "bounds_min": { "x": -10.0, "y": -7.5 },
//!   "bounds_max": { "x": 10.0, "y": 7.5 },
//!   "restitution": 0.8
//! }
//! ```

use crate::core::vector::Vector2;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Width of the reference world.
pub const WORLD_WIDTH: f32 = 20.0;
/// Height of the reference world.
pub const WORLD_HEIGHT: f32 = 15.0;

/// Gravity, damping, world rectangle and restitution shared by every particle.
///
/// Missing fields take their [`Default`] value when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Gravitational acceleration; each particle receives `gravity * mass` per frame.
    pub gravity: Vector2,
    /// Velocity multiplier applied after every integration, expected in `(0, 1]`.
    pub damping: f32,
    /// Lower-left corner of the world rectangle.
    pub bounds_min: Vector2,
    /// Upper-right corner of the world rectangle.
    pub bounds_max: Vector2,
    /// Energy retention for wall and pair contacts, expected in `[0, 1]`.
    pub restitution: f32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, -9.8),
            damping: 0.99,
            bounds_min: Vector2::new(-WORLD_WIDTH / 2.0, -WORLD_HEIGHT / 2.0),
            bounds_max: Vector2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            restitution: 0.8,
        }
    }
}

impl SystemConfig {
    /// Zero gravity, no damping, fully elastic contacts inside the given box.
    pub fn frictionless(bounds_min: Vector2, bounds_max: Vector2) -> Self {
        Self {
            gravity: Vector2::ZERO,
            damping: 1.0,
            bounds_min,
            bounds_max,
            restitution: 1.0,
        }
    }

    /// Size of the world rectangle.
    pub fn extent(&self) -> Vector2 {
        self.bounds_max - self.bounds_min
    }

    /// Check the expected ranges.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any value is NaN/inf, `damping` is outside
    ///   `(0, 1]`, `restitution` is outside `[0, 1]`, or the bounds are empty
    ///   on either axis.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(Error::InvalidParam("gravity must be finite".into()));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(Error::InvalidParam(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !self.restitution.is_finite() || !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::InvalidParam(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !self.bounds_min.is_finite() || !self.bounds_max.is_finite() {
            return Err(Error::InvalidParam("world bounds must be finite".into()));
        }
        if self.bounds_min.x >= self.bounds_max.x || self.bounds_min.y >= self.bounds_max.y {
            return Err(Error::InvalidParam(
                "bounds_min must be strictly below bounds_max on both axes".into(),
            ));
        }
        Ok(())
    }
}
