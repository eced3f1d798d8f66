//! 2-D particle integrator with gravity, velocity damping, wall containment
//! and pairwise elastic collisions between circles.
//!
//! ```
//! use particle2d::core::{ParticleSystem, SystemConfig, Vector2};
//!
//! let mut system = ParticleSystem::new(SystemConfig::default());
//! system.spawn(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0, 0.2, [1.0, 0.0, 0.0]);
//! system.update(0.016);
//! assert!(system.particles()[0].position.x > 0.0);
//! ```
//!
//! Enable the `python` feature for the `ParticleSim` extension class.

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{Particle, ParticleSystem, SystemConfig, Vector2};
