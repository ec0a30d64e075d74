//! The effect a session runs, chosen by [`Mode`].

use rand::Rng;

use crate::config::{FieldConfig, Mode};
use crate::host::{Dimensions, Schedule};
use crate::math::Vec2;
use crate::particle::ParticleField;
use crate::rain::SymbolRain;
use crate::render::DrawList;

/// Seeded simulation state of one surface.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Free particles.
    Particles(ParticleField),
    /// Falling columns.
    Rain(SymbolRain),
}

impl Effect {
    /// Seeds the effect selected by `config.mode`.
    pub fn seed<R: Rng + ?Sized>(dimensions: Dimensions, config: &FieldConfig, rng: &mut R) -> Self {
        match config.mode {
            Mode::FreeParticles => Self::Particles(ParticleField::seed(dimensions, config, rng)),
            Mode::SymbolRain => Self::Rain(SymbolRain::seed(dimensions, &config.rain)),
        }
    }

    /// Runs one frame or tick and records it.
    pub fn advance<R: Rng + ?Sized>(&mut self, pointer: Option<Vec2>, rng: &mut R, list: &mut DrawList) {
        match self {
            Self::Particles(field) => field.advance(pointer, list),
            Self::Rain(rain) => rain.advance(rng, list),
        }
    }

    /// Records the current state without advancing.
    pub fn draw(&self, list: &mut DrawList) {
        match self {
            Self::Particles(field) => field.draw(list),
            Self::Rain(rain) => rain.draw(list),
        }
    }

    /// Particle or column count.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Particles(field) => field.len(),
            Self::Rain(rain) => rain.len(),
        }
    }

    /// Returns true if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How the loop driving a config is armed.
    #[must_use]
    pub fn schedule(config: &FieldConfig) -> Schedule {
        match config.mode {
            Mode::FreeParticles => Schedule::NextFrame,
            Mode::SymbolRain => Schedule::Every(config.rain.tick_interval_ms),
        }
    }

    /// The particle field, if this is one.
    #[must_use]
    pub fn as_particles(&self) -> Option<&ParticleField> {
        match self {
            Self::Particles(field) => Some(field),
            Self::Rain(_) => None,
        }
    }

    /// Mutable particle field, if this is one.
    pub fn as_particles_mut(&mut self) -> Option<&mut ParticleField> {
        match self {
            Self::Particles(field) => Some(field),
            Self::Rain(_) => None,
        }
    }

    /// The rain, if this is one.
    #[must_use]
    pub fn as_rain(&self) -> Option<&SymbolRain> {
        match self {
            Self::Rain(rain) => Some(rain),
            Self::Particles(_) => None,
        }
    }
}
