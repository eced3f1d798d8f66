use particle2d::core::{ParticleSystem, SystemConfig, Vector2, MAX_TIME_STEP};
use particle2d::error::Result;
use particle2d::Particle;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

fn free_space() -> SystemConfig {
    SystemConfig::frictionless(Vector2::new(-1000.0, -1000.0), Vector2::new(1000.0, 1000.0))
}

/// With no force and no damping a particle moves by exactly v0 * min(dt, 0.016).
#[test]
fn free_particle_moves_by_clamped_step() {
    for dt in [0.005_f32, 0.016, 0.25] {
        let mut sys = ParticleSystem::new(free_space());
        let p0 = Vector2::new(1.5, -2.0);
        let v0 = Vector2::new(3.0, 7.0);
        sys.add_particle(Particle::new(p0, v0, 2.0, 0.5, WHITE));
        sys.update(dt);

        let p = &sys.particles()[0];
        assert_eq!(p.position, p0 + v0 * dt.min(MAX_TIME_STEP), "dt = {dt}");
        assert_eq!(p.velocity, v0);
    }
}

/// F = m g, so the velocity change per frame does not depend on mass.
#[test]
fn gravity_acceleration_is_mass_independent() {
    let config = SystemConfig {
        gravity: Vector2::new(0.0, -9.8),
        ..free_space()
    };
    let mut sys = ParticleSystem::new(config);
    sys.add_particle(Particle::new(Vector2::new(-50.0, 0.0), Vector2::ZERO, 1.0, 0.5, WHITE));
    sys.add_particle(Particle::new(Vector2::new(50.0, 0.0), Vector2::ZERO, 37.5, 0.5, WHITE));

    for _ in 0..10 {
        let before = sys.velocities();
        sys.update(0.016);
        let after = sys.velocities();
        let dv_light = after[0] - before[0];
        let dv_heavy = after[1] - before[1];
        assert!((dv_light.y - dv_heavy.y).abs() < 1e-5, "{dv_light:?} vs {dv_heavy:?}");
        assert!((dv_light.y - (-9.8 * 0.016)).abs() < 1e-5);
        assert_eq!(dv_light.x, 0.0);
    }
}

/// Damping compounds geometrically: |v_n| = |v0| d^n.
#[test]
fn damping_decays_velocity_geometrically() {
    let d = 0.95_f32;
    let config = SystemConfig {
        damping: d,
        ..free_space()
    };
    let mut sys = ParticleSystem::new(config);
    let v0 = Vector2::new(6.0, -8.0);
    sys.add_particle(Particle::new(Vector2::ZERO, v0, 1.0, 0.5, WHITE));

    for n in 1..=30 {
        sys.update(0.01);
        let expected = v0.length() * d.powi(n);
        let got = sys.particles()[0].velocity.length();
        assert!(
            (got - expected).abs() <= 1e-4 * expected,
            "frame {n}: |v| = {got}, expected {expected}"
        );
    }
}

/// Updating an empty system does nothing.
#[test]
fn empty_system_update_is_noop() {
    let mut sys = ParticleSystem::default();
    sys.update(0.016);
    sys.update(10.0);
    assert!(sys.is_empty());
    assert_eq!(sys.kinetic_energy(), 0.0);
    assert_eq!(sys.clear_inactive_particles(), 0);
}

/// Marking k of n inactive and compacting keeps the remaining n - k in order.
#[test]
fn compaction_preserves_relative_order() -> Result<()> {
    let mut sys = ParticleSystem::new(free_space());
    for k in 0..7 {
        let x = k as f32 * 10.0;
        sys.add_particle(Particle::new(Vector2::new(x, 0.0), Vector2::ZERO, 1.0, 0.5, WHITE));
    }
    for idx in [0usize, 3, 4] {
        sys.deactivate(idx)?;
    }
    // Inactive entries survive update
    sys.update(0.016);
    assert_eq!(sys.num_particles(), 7);

    let removed = sys.clear_inactive_particles();
    assert_eq!(removed, 3);
    assert_eq!(sys.num_particles(), 4);
    assert!(sys.particles().iter().all(|p| p.is_active));
    let xs: Vec<f32> = sys.positions().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![10.0, 20.0, 50.0, 60.0]);
    Ok(())
}

/// Sub-stepped advance covers the whole frame that update would truncate.
#[test]
fn advance_catches_up_long_frames() -> Result<()> {
    let mut clamped = ParticleSystem::new(free_space());
    let mut stepped = ParticleSystem::new(free_space());
    let p = Particle::new(Vector2::ZERO, Vector2::new(2.0, 0.0), 1.0, 0.5, WHITE);
    clamped.add_particle(p.clone());
    stepped.add_particle(p);

    clamped.update(0.5);
    stepped.advance(0.5)?;

    assert!((clamped.particles()[0].position.x - 2.0 * MAX_TIME_STEP).abs() < 1e-6);
    assert!((stepped.particles()[0].position.x - 1.0).abs() < 1e-4);
    assert!((stepped.time() - 0.5).abs() < 1e-4);
    Ok(())
}
