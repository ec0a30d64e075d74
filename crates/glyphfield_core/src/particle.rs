//! # Free-Particle Field
//!
//! A field of glyphs scattered over the surface. Each glyph has a rest
//! position it springs back to and flees the pointer when it comes close.
//!
//! ## Motion
//!
//! ```text
//! pointer within radius:   p -= unit(pointer - p) * (r - dist) / r * density
//! otherwise:               p += (rest - p) * restoring_rate     (per axis)
//! ```
//!
//! The repulsion term is bounded by `density`, and the decay term shrinks the
//! displacement geometrically by `(1 - restoring_rate)` each frame.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FieldConfig;
use crate::host::Dimensions;
use crate::math::Vec2;
use crate::render::{DrawCommand, DrawList};
use crate::style::Color;

/// One drifting glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Live position.
    pub position: Vec2,
    /// Position the particle returns to. Fixed at spawn.
    rest: Vec2,
    /// Glyph drawn. Fixed at spawn.
    glyph: char,
    /// Font size. Fixed at spawn.
    size: f32,
    /// Pointer response multiplier. Fixed at spawn.
    density: f32,
}

impl Particle {
    /// Creates a particle at rest.
    #[must_use]
    pub const fn new(rest: Vec2, glyph: char, size: f32, density: f32) -> Self {
        Self {
            position: rest,
            rest,
            glyph,
            size,
            density,
        }
    }

    /// Rest position.
    #[must_use]
    pub const fn rest(&self) -> Vec2 {
        self.rest
    }

    /// Glyph drawn.
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// Font size.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Pointer response multiplier.
    #[must_use]
    pub const fn density(&self) -> f32 {
        self.density
    }

    /// Distance from the rest position.
    #[must_use]
    pub fn displacement(&self) -> f32 {
        self.position.distance(self.rest)
    }

    /// Advances the particle by one frame.
    ///
    /// Returns true if the pointer moved it.
    #[inline]
    pub fn step(&mut self, pointer: Option<Vec2>, radius: f32, restoring_rate: f32) -> bool {
        if radius > 0.0 {
            if let Some(pointer) = pointer {
                let toward = pointer - self.position;
                let distance = toward.length();
                if distance > 0.0 && distance < radius {
                    let force = (radius - distance) / radius;
                    self.position -= toward * (force * self.density / distance);
                    return true;
                }
            }
        }

        let dx = self.rest.x - self.position.x;
        if dx != 0.0 {
            self.position.x += dx * restoring_rate;
        }
        let dy = self.rest.y - self.position.y;
        if dy != 0.0 {
            self.position.y += dy * restoring_rate;
        }
        false
    }
}

/// The particle set of one session plus the constants that drive it.
#[derive(Debug, Clone)]
pub struct ParticleField {
    /// All particles, drawn in order.
    particles: Vec<Particle>,
    /// Surface the field was seeded for.
    dimensions: Dimensions,
    /// Pointer radius (0 = no interaction).
    radius: f32,
    /// Fraction of displacement recovered per frame.
    restoring_rate: f32,
    /// Glyph color.
    color: Color,
}

impl ParticleField {
    /// Number of particles for a surface: `fixed_count` when set, otherwise
    /// `floor(width * height / divisor)`. Capped by `max_particles` when set.
    #[must_use]
    pub fn particle_count(dimensions: Dimensions, config: &FieldConfig) -> usize {
        let count = if let Some(fixed) = config.fixed_count {
            fixed
        } else if config.cell_density_divisor.is_nan() || config.cell_density_divisor <= 0.0 {
            return 0;
        } else {
            let area = f64::from(dimensions.width) * f64::from(dimensions.height);
            (area / f64::from(config.cell_density_divisor)).floor().max(0.0) as usize
        };
        match config.max_particles {
            Some(cap) => count.min(cap),
            None => count,
        }
    }

    /// Seeds a field for the surface.
    pub fn seed<R: Rng + ?Sized>(dimensions: Dimensions, config: &FieldConfig, rng: &mut R) -> Self {
        let count = Self::particle_count(dimensions, config);
        let size = config.particle_size_range;
        let density = config.density_range;

        let particles = (0..count)
            .map(|_| {
                let rest = Vec2::new(
                    sample(rng, 0.0, dimensions.width),
                    sample(rng, 0.0, dimensions.height),
                );
                let glyph = config.glyph_alphabet.choose(rng).copied().unwrap_or('0');
                Particle::new(
                    rest,
                    glyph,
                    sample(rng, size.min, size.max),
                    sample(rng, density.min, density.max),
                )
            })
            .collect();

        Self {
            particles,
            dimensions,
            radius: config.pointer_influence_radius,
            restoring_rate: config.restoring_rate,
            color: config.color,
        }
    }

    /// Advances every particle one frame and records the frame.
    pub fn advance(&mut self, pointer: Option<Vec2>, list: &mut DrawList) {
        list.push(DrawCommand::Clear {
            width: self.dimensions.width,
            height: self.dimensions.height,
        });
        for particle in &mut self.particles {
            particle.step(pointer, self.radius, self.restoring_rate);
            list.push(DrawCommand::Glyph {
                glyph: particle.glyph,
                x: particle.position.x,
                y: particle.position.y,
                size: particle.size,
                color: self.color,
            });
        }
    }

    /// Records the current state without moving anything.
    pub fn draw(&self, list: &mut DrawList) {
        list.push(DrawCommand::Clear {
            width: self.dimensions.width,
            height: self.dimensions.height,
        });
        list.extend(self.particles.iter().map(|p| DrawCommand::Glyph {
            glyph: p.glyph,
            x: p.position.x,
            y: p.position.y,
            size: p.size,
            color: self.color,
        }));
    }

    /// Particles in draw order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable particles (hosts and tests can displace them).
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the field holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface the field was seeded for.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

/// Uniform sample in `[low, high)`, or `low` for an empty range.
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field(width: f32, height: f32, config: &FieldConfig) -> ParticleField {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        ParticleField::seed(Dimensions::new(width, height), config, &mut rng)
    }

    #[test]
    fn test_count_is_area_over_divisor() {
        let config = FieldConfig::default().with_density_divisor(15_000.0);
        assert_eq!(field(800.0, 600.0, &config).len(), 32);
        assert_eq!(field(1920.0, 1080.0, &config).len(), 138);
        assert_eq!(field(100.0, 100.0, &config).len(), 0);
    }

    #[test]
    fn test_count_respects_cap() {
        let config = FieldConfig {
            max_particles: Some(10),
            ..FieldConfig::default()
        };
        assert_eq!(field(1920.0, 1080.0, &config).len(), 10);
    }

    #[test]
    fn test_fixed_count_ignores_area() {
        let config = FieldConfig {
            fixed_count: Some(80),
            ..FieldConfig::default()
        };
        assert_eq!(field(1280.0, 500.0, &config).len(), 80);
        assert_eq!(field(300.0, 200.0, &config).len(), 80);
    }

    #[test]
    fn test_spawn_ranges() {
        let config = FieldConfig::default().with_density_divisor(1_000.0);
        let field = field(400.0, 300.0, &config);

        for p in field.particles() {
            assert!((0.0..400.0).contains(&p.rest().x));
            assert!((0.0..300.0).contains(&p.rest().y));
            assert_eq!(p.position, p.rest());
            assert!(p.glyph() == '0' || p.glyph() == '1');
            assert!((10.0..15.0).contains(&p.size()));
            assert!((1.0..31.0).contains(&p.density()));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = FieldConfig::default();
        let a = field(800.0, 600.0, &config);
        let b = field(800.0, 600.0, &config);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_decay_is_geometric() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), '1', 12.0, 10.0);
        p.position = Vec2::new(200.0, 100.0);

        p.step(None, 120.0, 0.1);
        assert!((p.position.x - 190.0).abs() < 1e-4);
        assert_eq!(p.position.y, 100.0);

        let mut last = p.displacement();
        for _ in 0..200 {
            p.step(None, 120.0, 0.1);
            let now = p.displacement();
            assert!(now <= last);
            last = now;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn test_repulsion_moves_away() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), '0', 12.0, 10.0);
        let moved = p.step(Some(Vec2::new(130.0, 100.0)), 120.0, 0.1);

        assert!(moved);
        // force = (120 - 30) / 120 = 0.75, displacement = 0.75 * 10
        assert!((p.position.x - 92.5).abs() < 1e-4);
        assert_eq!(p.position.y, 100.0);
    }

    #[test]
    fn test_pointer_on_top_is_ignored() {
        let mut p = Particle::new(Vec2::new(50.0, 50.0), '0', 12.0, 10.0);
        let moved = p.step(Some(Vec2::new(50.0, 50.0)), 120.0, 0.1);
        assert!(!moved);
        assert!(p.position.x.is_finite());
        assert_eq!(p.position, p.rest());
    }

    #[test]
    fn test_advance_records_clear_then_glyphs() {
        let config = FieldConfig::default().with_density_divisor(10_000.0);
        let mut field = field(200.0, 100.0, &config);
        let mut list = DrawList::default();

        field.advance(None, &mut list);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(list.glyph_count(), field.len());
    }
}
