//! Core simulation types for the 2-D particle engine.
//!
//! Leaf to root: [`Vector2`] math, [`Particle`] integration, [`SystemConfig`]
//! constants, [`ParticleSystem`] frame driver, and [`SceneBuilder`] for random
//! initial populations.

pub mod config;
pub mod particle;
pub mod scene;
pub mod system;
pub mod vector;

pub use config::SystemConfig;
pub use particle::{Color, Particle, MAX_TIME_STEP};
pub use scene::SceneBuilder;
pub use system::{ParticleSystem, MAX_SUBSTEPS};
pub use vector::Vector2;
