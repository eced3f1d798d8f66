use crate::core::config::SystemConfig;
use crate::core::particle::{Color, Particle};
use crate::core::system::ParticleSystem;
use crate::core::vector::Vector2;
use crate::error::{Error, Result};
use log::debug;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Number of grid steps used for positions, masses, radii and colors.
const STEPS: u32 = 100;

/// Random population of particles spread over the world rectangle.
///
/// Draws follow the reference demo:
/// - position on a 100-step grid starting at `bounds_min`
/// - velocity components are integers in `[-5, 4]`
/// - mass `1 + k/50` and radius `0.2 + k/200` for `k` in `0..100`
/// - color channels in steps of 0.01
///
/// Particles may start overlapping; the first few frames separate them.
#[derive(Debug)]
pub struct SceneBuilder {
    rng: StdRng,
}

impl SceneBuilder {
    /// `Some(seed)` gives a reproducible scene; `None` seeds from the thread RNG.
    pub fn new(seed: Option<u64>) -> Self {
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Self { rng }
    }

    /// Draw one particle inside the rectangle of `config`.
    pub fn particle(&mut self, config: &SystemConfig) -> Particle {
        let extent = config.extent();
        let steps = STEPS as f32;

        let gx = self.rng.random_range(0..STEPS) as f32;
        let gy = self.rng.random_range(0..STEPS) as f32;
        let position = Vector2::new(
            config.bounds_min.x + gx * extent.x / steps,
            config.bounds_min.y + gy * extent.y / steps,
        );

        let velocity = Vector2::new(
            self.rng.random_range(-5..5) as f32,
            self.rng.random_range(-5..5) as f32,
        );

        let mass = 1.0 + self.rng.random_range(0..STEPS) as f32 / 50.0;
        let radius = 0.2 + self.rng.random_range(0..STEPS) as f32 / 200.0;
        let color = self.color();

        Particle::new(position, velocity, mass, radius, color)
    }

    /// Add `count` random particles to `system`.
    ///
    /// Errors: `Error::InvalidParam` if `count` is zero.
    pub fn populate(&mut self, system: &mut ParticleSystem, count: usize) -> Result<()> {
        if count == 0 {
            return Err(Error::InvalidParam("count must be > 0".into()));
        }
        let config = *system.config();
        for _ in 0..count {
            let p = self.particle(&config);
            system.add_particle(p);
        }
        debug!("populated {count} random particles ({} total)", system.num_particles());
        Ok(())
    }

    /// Build a validated system holding `count` random particles.
    pub fn build(&mut self, config: SystemConfig, count: usize) -> Result<ParticleSystem> {
        let mut system = ParticleSystem::try_new(config)?;
        self.populate(&mut system, count)?;
        Ok(system)
    }

    fn color(&mut self) -> Color {
        let mut c = [0.0_f32; 3];
        c.iter_mut()
            .for_each(|ch| *ch = self.rng.random_range(0..STEPS) as f32 / STEPS as f32);
        c
    }
}
