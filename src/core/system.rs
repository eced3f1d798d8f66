use crate::core::config::SystemConfig;
use crate::core::particle::{Color, Particle, MAX_TIME_STEP};
use crate::core::vector::Vector2;
use crate::error::{Error, Result};
use log::{debug, trace};

/// Most sub-steps a single [`ParticleSystem::advance`] call will take
/// (160 time units at [`MAX_TIME_STEP`]).
pub const MAX_SUBSTEPS: usize = 10_000;

/// An ordered collection of particles in an axis-aligned box.
///
/// Each [`update`](Self::update) runs three passes in order:
/// 1. gravity, integration and damping for every active particle,
/// 2. wall containment, one axis at a time,
/// 3. pairwise overlap correction and impulse, visiting pairs `(i, j)` with
///    `i < j` in ascending order. Later pairs see the corrections made by
///    earlier ones.
///
/// Collision detection is a plain O(n²) sweep.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    config: SystemConfig,
    particles: Vec<Particle>,
    time_now: f64,
}

impl ParticleSystem {
    /// Create an empty system. The configuration is taken as-is.
    pub fn new(config: SystemConfig) -> Self {
        debug!("particle system created: {config:?}");
        Self {
            config,
            particles: Vec::new(),
            time_now: 0.0,
        }
    }

    /// Create an empty system after validating `config`.
    pub fn try_new(config: SystemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Simulated time consumed so far (sum of clamped frame steps).
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Append a particle and return its index.
    ///
    /// Indices stay valid until the next [`clear_inactive_particles`](Self::clear_inactive_particles).
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Convenience for `add_particle(Particle::new(..))`.
    pub fn spawn(
        &mut self,
        position: Vector2,
        velocity: Vector2,
        mass: f32,
        radius: f32,
        color: Color,
    ) -> usize {
        self.add_particle(Particle::new(position, velocity, mass, radius, color))
    }

    /// Read-only view for renderers. Only valid between frames.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view. The collection length cannot change through it.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Number of particles, active or not.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn num_active(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active).count()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> Vec<Vector2> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn velocities(&self) -> Vec<Vector2> {
        self.particles.iter().map(|p| p.velocity).collect()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.particles.iter().map(|p| p.color).collect()
    }

    /// Mark the particle at `index` inactive. It stays in the collection until
    /// [`clear_inactive_particles`](Self::clear_inactive_particles).
    pub fn deactivate(&mut self, index: usize) -> Result<()> {
        let len = self.particles.len();
        let p = self.particles.get_mut(index).ok_or_else(|| {
            Error::OutOfBounds(format!("particle index {index} (len {len})"))
        })?;
        p.is_active = false;
        Ok(())
    }

    /// Advance one frame. `dt` is clamped to [`MAX_TIME_STEP`] per particle,
    /// so frames longer than that lose simulated time.
    pub fn update(&mut self, dt: f32) {
        if dt > MAX_TIME_STEP {
            trace!("frame dt {dt} clamped to {MAX_TIME_STEP}");
        }
        self.integrate_all(dt);
        self.resolve_boundaries();
        let contacts = self.resolve_collisions();
        if contacts > 0 {
            trace!("resolved {contacts} contacts");
        }
        self.time_now += f64::from(dt.clamp(0.0, MAX_TIME_STEP));
    }

    /// Advance by `dt` in equal sub-steps no longer than [`MAX_TIME_STEP`],
    /// so that long frames are caught up instead of truncated.
    ///
    /// Returns the number of sub-steps taken; `dt == 0` takes none.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `dt` is NaN/inf or negative, or would need
    ///   more than [`MAX_SUBSTEPS`] sub-steps.
    pub fn advance(&mut self, dt: f32) -> Result<usize> {
        if !dt.is_finite() {
            return Err(Error::InvalidParam("dt must be finite".into()));
        }
        if dt < 0.0 {
            return Err(Error::InvalidParam("dt cannot be negative".into()));
        }
        if dt == 0.0 {
            return Ok(0);
        }
        let steps = (dt / MAX_TIME_STEP).ceil().max(1.0);
        if steps > MAX_SUBSTEPS as f32 {
            return Err(Error::InvalidParam(format!(
                "dt {dt} needs {steps} sub-steps, more than {MAX_SUBSTEPS}"
            )));
        }
        let steps = steps as usize;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.update(h);
        }
        Ok(steps)
    }

    /// Drop every inactive particle, keeping the order of the rest.
    ///
    /// Invalidates indices held across the call. Never invoked by `update`.
    pub fn clear_inactive_particles(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| p.is_active);
        let removed = before - self.particles.len();
        if removed > 0 {
            debug!("removed {removed} inactive particles, {} remain", self.particles.len());
        }
        removed
    }

    /// Total kinetic energy of active particles (diagnostic).
    pub fn kinetic_energy(&self) -> f32 {
        self.active().map(Particle::kinetic_energy).sum()
    }

    /// Total linear momentum of active particles (diagnostic).
    pub fn momentum(&self) -> Vector2 {
        self.active()
            .map(Particle::momentum)
            .fold(Vector2::ZERO, |acc, m| acc + m)
    }

    // ============ Internal helpers ============

    fn active(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_active)
    }

    fn integrate_all(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        let damping = self.config.damping;
        for p in self.particles.iter_mut().filter(|p| p.is_active) {
            p.apply_force(gravity * p.mass);
            p.integrate(dt);
            p.velocity = p.velocity * damping;
        }
    }

    fn resolve_boundaries(&mut self) {
        let (lo, hi) = (self.config.bounds_min, self.config.bounds_max);
        let restitution = self.config.restitution;
        for p in self.particles.iter_mut().filter(|p| p.is_active) {
            let r = p.radius;
            contain_axis(&mut p.position.x, &mut p.velocity.x, r, lo.x, hi.x, restitution);
            contain_axis(&mut p.position.y, &mut p.velocity.y, r, lo.y, hi.y, restitution);
        }
    }

    /// Sequential pair sweep. Returns the number of overlapping pairs found.
    fn resolve_collisions(&mut self) -> usize {
        let restitution = self.config.restitution;
        let n = self.particles.len();
        let mut contacts = 0usize;
        for i in 0..n {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let a = &mut head[i];
            if !a.is_active {
                continue;
            }
            for b in tail.iter_mut().filter(|p| p.is_active) {
                if resolve_pair(a, b, restitution) {
                    contacts += 1;
                }
            }
        }
        contacts
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(SystemConfig::default())
    }
}

// ============ Utility helpers ============

/// Clamp one axis against `[lo, hi]` and reflect the velocity component.
/// The min side wins when both are violated.
#[inline]
fn contain_axis(x: &mut f32, v: &mut f32, radius: f32, lo: f32, hi: f32, restitution: f32) {
    if *x - radius < lo {
        *x = lo + radius;
        *v = -*v * restitution;
    } else if *x + radius > hi {
        *x = hi - radius;
        *v = -*v * restitution;
    }
}

/// Separate an overlapping pair and apply the restitution impulse when they
/// approach. Returns whether the pair overlapped.
///
/// Coincident centres yield a zero normal, so nothing moves.
fn resolve_pair(a: &mut Particle, b: &mut Particle, restitution: f32) -> bool {
    let diff = a.position - b.position;
    let distance = diff.length();
    let min_distance = a.radius + b.radius;
    if distance >= min_distance {
        return false;
    }

    // Unit normal from b to a
    let normal = diff.normalized();

    let overlap = min_distance - distance;
    let correction = normal * (overlap / 2.0);
    a.position += correction;
    b.position -= correction;

    let velocity_along_normal = (a.velocity - b.velocity).dot(normal);
    if velocity_along_normal < 0.0 {
        let impulse =
            -(1.0 + restitution) * velocity_along_normal / (1.0 / a.mass + 1.0 / b.mass);
        a.velocity += normal * (impulse / a.mass);
        b.velocity -= normal * (impulse / b.mass);
    }
    true
}
