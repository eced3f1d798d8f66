use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Particle, ParticleSystem, SceneBuilder, SystemConfig, Vector2};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// ParticleSim Python-facing wrapper around the Rust ParticleSystem core.
///
/// API:
/// - __new__(gravity=(0, -9.8), damping=0.99, bounds_min=(-10, -7.5), bounds_max=(10, 7.5), restitution=0.8)
/// - add_particle(position, velocity, mass, radius, color) -> index
/// - update(dt), advance(dt)
/// - get_positions() -> np.ndarray, shape (N, 2)
/// - get_colors() -> np.ndarray, shape (N, 3)
#[pyclass]
pub struct ParticleSim {
    system: ParticleSystem,
}

#[pymethods]
impl ParticleSim {
    /// Create an empty particle system.
    ///
    /// Errors: raises ValueError if damping is outside (0, 1], restitution is
    /// outside [0, 1], or the bounds are empty.
    #[new]
    #[pyo3(signature = (
        gravity=(0.0, -9.8),
        damping=0.99,
        bounds_min=(-10.0, -7.5),
        bounds_max=(10.0, 7.5),
        restitution=0.8
    ))]
    fn new(
        gravity: (f32, f32),
        damping: f32,
        bounds_min: (f32, f32),
        bounds_max: (f32, f32),
        restitution: f32,
    ) -> PyResult<Self> {
        let config = SystemConfig {
            gravity: Vector2::from(gravity),
            damping,
            bounds_min: Vector2::from(bounds_min),
            bounds_max: Vector2::from(bounds_max),
            restitution,
        };
        let system = ParticleSystem::try_new(config).map_err(py_err)?;
        Ok(Self { system })
    }

    /// Append an active particle and return its index.
    ///
    /// Errors: raises ValueError if mass <= 0, radius < 0, or any value is not finite.
    #[pyo3(signature = (position, velocity, mass=1.0, radius=0.2, color=(1.0, 1.0, 1.0)))]
    fn add_particle(
        &mut self,
        position: (f32, f32),
        velocity: (f32, f32),
        mass: f32,
        radius: f32,
        color: (f32, f32, f32),
    ) -> PyResult<usize> {
        let p = Particle::try_new(
            Vector2::from(position),
            Vector2::from(velocity),
            mass,
            radius,
            [color.0, color.1, color.2],
        )
        .map_err(py_err)?;
        Ok(self.system.add_particle(p))
    }

    /// Add `count` random particles; `seed` makes the draw reproducible.
    #[pyo3(signature = (count, seed=None))]
    fn populate(&mut self, count: usize, seed: Option<u64>) -> PyResult<()> {
        SceneBuilder::new(seed)
            .populate(&mut self.system, count)
            .map_err(py_err)
    }

    /// Advance one frame; dt is clamped to 0.016 (releases the GIL during computation).
    fn update(&mut self, py: Python<'_>, dt: f32) {
        py.detach(|| self.system.update(dt))
    }

    /// Advance by dt in sub-steps of at most 0.016; returns the number of sub-steps.
    ///
    /// Errors: raises ValueError if dt is negative, not finite, or needs more than 10000 sub-steps.
    fn advance(&mut self, py: Python<'_>, dt: f32) -> PyResult<usize> {
        py.detach(|| self.system.advance(dt)).map_err(py_err)
    }

    /// Mark a particle inactive. Errors: raises ValueError on an invalid index.
    fn deactivate(&mut self, index: usize) -> PyResult<()> {
        self.system.deactivate(index).map_err(py_err)
    }

    /// Drop inactive particles; returns how many were removed.
    fn clear_inactive_particles(&mut self) -> usize {
        self.system.clear_inactive_particles()
    }

    fn num_particles(&self) -> usize {
        self.system.num_particles()
    }

    fn time(&self) -> f64 {
        self.system.time()
    }

    fn kinetic_energy(&self) -> f32 {
        self.system.kinetic_energy()
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float32.
    fn get_positions<'py>(&self, py: Python<'py>) -> Py<PyArray2<f32>> {
        rows(py, self.system.particles(), |p| <[f32; 2]>::from(p.position))
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float32.
    fn get_velocities<'py>(&self, py: Python<'py>) -> Py<PyArray2<f32>> {
        rows(py, self.system.particles(), |p| <[f32; 2]>::from(p.velocity))
    }

    /// Return colors as a NumPy array of shape (N, 3), dtype=float32.
    fn get_colors<'py>(&self, py: Python<'py>) -> Py<PyArray2<f32>> {
        rows(py, self.system.particles(), |p| p.color)
    }

    /// Return radii as a NumPy array of shape (N,), dtype=float32.
    fn get_radii<'py>(&self, py: Python<'py>) -> Py<PyArray1<f32>> {
        let radii: Array1<f32> = self.system.particles().iter().map(|p| p.radius).collect();
        radii.into_pyarray(py).unbind()
    }
}

fn rows<const W: usize>(
    py: Python<'_>,
    particles: &[Particle],
    f: impl Fn(&Particle) -> [f32; W],
) -> Py<PyArray2<f32>> {
    let mut arr = Array2::<f32>::zeros((particles.len(), W));
    for (i, p) in particles.iter().enumerate() {
        for (k, v) in f(p).into_iter().enumerate() {
            arr[[i, k]] = v;
        }
    }
    arr.into_pyarray(py).unbind()
}

/// The particle2d Python module entry point.
#[pymodule]
fn particle2d(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ParticleSim>()?;
    Ok(())
}
