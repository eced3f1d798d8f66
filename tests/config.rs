use particle2d::core::{ParticleSystem, SceneBuilder, SystemConfig, Vector2};
use particle2d::error::Result;

#[test]
fn partial_json_config_uses_defaults() -> std::result::Result<(), serde_json::Error> {
    let cfg: SystemConfig = serde_json::from_str(r#"{ "damping": 0.5, "gravity": { "x": 1.0, "y": 0.0 } }"#)?;
    assert_eq!(cfg.damping, 0.5);
    assert_eq!(cfg.gravity, Vector2::new(1.0, 0.0));
    assert_eq!(cfg.restitution, SystemConfig::default().restitution);
    assert_eq!(cfg.bounds_max, SystemConfig::default().bounds_max);
    Ok(())
}

#[test]
fn config_json_roundtrip() -> std::result::Result<(), serde_json::Error> {
    let cfg = SystemConfig::frictionless(Vector2::new(-2.0, -1.0), Vector2::new(2.0, 1.0));
    let text = serde_json::to_string(&cfg)?;
    let back: SystemConfig = serde_json::from_str(&text)?;
    assert_eq!(cfg, back);
    Ok(())
}

#[test]
fn invalid_loaded_config_is_rejected() -> std::result::Result<(), serde_json::Error> {
    let cfg: SystemConfig = serde_json::from_str(r#"{ "restitution": 1.5 }"#)?;
    let err = ParticleSystem::try_new(cfg).unwrap_err();
    assert!(err.to_string().contains("restitution"));
    Ok(())
}

/// The reference scene: 100 random particles settling under gravity.
#[test]
fn reference_scene_stays_finite_and_contained() -> Result<()> {
    let config = SystemConfig::default();
    let mut sys = SceneBuilder::new(Some(2024)).build(config, 100)?;
    for _ in 0..300 {
        sys.update(0.016);
    }
    assert_eq!(sys.num_particles(), 100);
    // Centres stay in the world; pair correction can leave an edge slightly past a wall
    for p in sys.particles() {
        assert!(p.position.is_finite() && p.velocity.is_finite());
        assert!(p.position.x >= config.bounds_min.x && p.position.x <= config.bounds_max.x);
        assert!(p.position.y >= config.bounds_min.y && p.position.y <= config.bounds_max.y);
    }
    assert!(sys.kinetic_energy().is_finite());
    Ok(())
}
