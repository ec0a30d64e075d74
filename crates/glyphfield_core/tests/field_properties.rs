//! # Field Property Tests
//!
//! Motion and seeding properties of both effects, checked over many
//! particles and frames.

use glyphfield_core::{
    Dimensions, DrawCommand, DrawList, FieldConfig, ParticleField, RainConfig, SymbolRain, Vec2,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn seeded(width: f32, height: f32, config: &FieldConfig, seed: u64) -> ParticleField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ParticleField::seed(Dimensions::new(width, height), config, &mut rng)
}

/// Test: 800x600 at divisor 15000 holds 32 particles, all resting in bounds.
#[test]
fn test_seed_count_and_bounds() {
    let config = FieldConfig::default();
    let field = seeded(800.0, 600.0, &config, 1);

    assert_eq!(field.len(), 32);
    for p in field.particles() {
        assert_eq!(p.position, p.rest());
        assert!(p.rest().x >= 0.0 && p.rest().x < 800.0);
        assert!(p.rest().y >= 0.0 && p.rest().y < 600.0);
    }
}

/// Test: with the pointer gone, every particle converges on its rest position.
#[test]
fn test_particles_converge_without_pointer() {
    let config = FieldConfig::default().with_density_divisor(2_000.0);
    let mut field = seeded(800.0, 600.0, &config, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for p in field.particles_mut() {
        p.position = p.rest() + Vec2::new(rng.gen_range(-200.0..200.0), rng.gen_range(-200.0..200.0));
    }

    let mut list = DrawList::default();
    let mut previous: Vec<f32> = field.particles().iter().map(|p| p.displacement()).collect();
    for _ in 0..150 {
        list.begin_frame();
        field.advance(None, &mut list);
        for (p, before) in field.particles().iter().zip(previous.iter_mut()) {
            let now = p.displacement();
            assert!(now <= *before + 1e-3, "displacement grew from {before} to {now}");
            *before = now;
        }
    }

    let worst = previous.iter().copied().fold(0.0_f32, f32::max);
    println!("Worst displacement after 150 frames: {worst:.6}");
    assert!(worst < 0.01);
}

/// Test: one frame of repulsion moves a particle at most `density` pixels,
/// directly away from the pointer.
#[test]
fn test_repulsion_step_is_bounded() {
    let config = FieldConfig::default().with_density_divisor(500.0);
    let mut field = seeded(600.0, 600.0, &config, 4);
    let pointer = Vec2::new(300.0, 300.0);
    let radius = config.pointer_influence_radius;

    let before: Vec<_> = field.particles().to_vec();
    let mut list = DrawList::default();
    field.advance(Some(pointer), &mut list);

    let mut repelled = 0;
    for (old, new) in before.iter().zip(field.particles()) {
        let distance = old.position.distance(pointer);
        let moved = new.position.distance(old.position);
        if distance > 0.0 && distance < radius {
            repelled += 1;
            let force = (radius - distance) / radius;
            assert!(moved <= old.density() * force + 1e-3);
            assert!(new.position.distance(pointer) >= distance);
        } else {
            // At rest and outside the radius: nothing to restore.
            assert_eq!(new.position, old.position);
        }
    }
    assert!(repelled > 0, "no particle landed inside the radius");
}

/// Test: particles outside the radius ignore the pointer entirely.
#[test]
fn test_pointer_outside_radius_has_no_effect() {
    let config = FieldConfig::default();
    let mut with_pointer = seeded(800.0, 600.0, &config, 5);
    let mut without = with_pointer.clone();

    let far = Vec2::new(-10_000.0, -10_000.0);
    let mut list = DrawList::default();
    for _ in 0..30 {
        with_pointer.advance(Some(far), &mut list);
        without.advance(None, &mut list);
    }
    assert_eq!(with_pointer.particles(), without.particles());
}

/// Test: radius 0 turns interaction off even with the pointer on a particle.
#[test]
fn test_zero_radius_disables_interaction() {
    let config = FieldConfig::default().with_pointer_radius(0.0);
    let mut field = seeded(800.0, 600.0, &config, 6);
    let target = field.particles()[0].rest() + Vec2::new(1.0, 1.0);

    let mut list = DrawList::default();
    field.advance(Some(target), &mut list);
    assert!(field.particles().iter().all(|p| p.position == p.rest()));
}

/// Test: the particle cap applies after the area formula.
#[test]
fn test_cap_limits_dense_fields() {
    let config = FieldConfig {
        max_particles: Some(80),
        ..FieldConfig::default().with_density_divisor(10_000.0)
    };
    assert_eq!(seeded(1920.0, 1080.0, &config, 7).len(), 80);
    assert_eq!(seeded(800.0, 600.0, &config, 7).len(), 48);
}

/// Test: rain columns fall by one step per tick until they pass the floor.
#[test]
fn test_rain_columns_fall_and_reset() {
    let config = RainConfig {
        reset_floor: 100.0,
        reset_span: 0.0,
        ..RainConfig::default()
    };
    let mut rain = SymbolRain::seed(Dimensions::new(1024.0, 768.0), &config);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut list = DrawList::default();

    assert_eq!(rain.len(), 51);

    // 0, 20, ..., 100, 120 then reset on the tick that finds y = 120.
    let mut depths = Vec::new();
    for _ in 0..8 {
        list.begin_frame();
        rain.advance(&mut rng, &mut list);
        depths.push(rain.columns()[0]);
    }
    assert_eq!(depths, vec![20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 0.0, 20.0]);
}

/// Test: every rain tick starts with the translucent trail fill.
#[test]
fn test_rain_paints_trail_first() {
    let config = RainConfig::default();
    let mut rain = SymbolRain::seed(Dimensions::new(400.0, 300.0), &config);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut list = DrawList::default();
    rain.advance(&mut rng, &mut list);

    match &list.commands()[0] {
        DrawCommand::FillRect { width, height, color, .. } => {
            assert_eq!((*width, *height), (400.0, 300.0));
            assert!(color.a < 0.1);
        }
        other => panic!("expected trail fill, got {other:?}"),
    }
    assert_eq!(list.glyph_count(), 20);
}
