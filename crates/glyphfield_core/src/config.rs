//! # Field Configuration
//!
//! Everything a hosting section can tune. Configs are plain data: loaded once
//! from TOML (files) or JSON (the browser entry point), validated once, and
//! never mutated by a running session.
//!
//! Missing keys fall back to the defaults below, so a section only spells out
//! the constants that make it different.

use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, GlyphResult};
use crate::style::Color;

/// Which effect the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Independent glyphs that flee the pointer and spring back.
    #[default]
    FreeParticles,
    /// Falling columns of glyphs on a fixed tick.
    SymbolRain,
}

/// When a session animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountPolicy {
    /// Animate from mount until unmount.
    #[default]
    Immediate,
    /// Animate only while the host reports the section visible.
    WhenVisible,
}

/// Inclusive-exclusive range of glyph sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    /// Smallest size.
    pub min: f32,
    /// Largest size.
    pub max: f32,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 10.0, max: 15.0 }
    }
}

/// Range of per-particle pointer response multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityRange {
    /// Lowest multiplier.
    pub min: f32,
    /// Highest multiplier (exclusive).
    pub max: f32,
}

impl Default for DensityRange {
    fn default() -> Self {
        Self { min: 1.0, max: 31.0 }
    }
}

/// Overrides applied on viewports narrower than `breakpoint`.
///
/// A config may carry several tiers; the narrowest one that still matches the
/// viewport wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactProfile {
    /// Viewports narrower than this (in CSS pixels) are compact.
    pub breakpoint: f32,
    /// Replacement density divisor.
    pub cell_density_divisor: Option<f32>,
    /// Replacement pointer radius (`0` turns interaction off).
    pub pointer_influence_radius: Option<f32>,
    /// Replacement frame cap.
    pub target_frame_rate: Option<u32>,
    /// Replacement particle cap.
    pub max_particles: Option<usize>,
    /// Replacement fixed particle count.
    pub fixed_count: Option<usize>,
    /// Replacement rain column width.
    pub column_width: Option<f32>,
    /// Replacement rain tick interval.
    pub tick_interval_ms: Option<f64>,
}

impl CompactProfile {
    /// Default compact breakpoint (CSS pixels).
    pub const DEFAULT_BREAKPOINT: f32 = 768.0;
}

impl Default for CompactProfile {
    fn default() -> Self {
        Self {
            breakpoint: Self::DEFAULT_BREAKPOINT,
            cell_density_divisor: None,
            pointer_influence_radius: None,
            target_frame_rate: None,
            max_particles: None,
            fixed_count: None,
            column_width: None,
            tick_interval_ms: None,
        }
    }
}

/// Constants of the symbol-rain mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Glyphs sampled for ordinary drops.
    pub alphabet: String,
    /// Horizontal spacing of columns.
    pub column_width: f32,
    /// Font size of every drop.
    pub font_size: f32,
    /// Vertical advance per tick.
    pub step: f32,
    /// Tick period.
    pub tick_interval_ms: f64,
    /// Chance per column per tick of drawing a highlight word instead.
    pub highlight_chance: f32,
    /// Words drawn as highlights.
    pub highlight_words: Vec<String>,
    /// A column never resets before passing this depth.
    pub reset_floor: f32,
    /// Random extra depth before a column may reset.
    pub reset_span: f32,
    /// Color of ordinary drops.
    pub glyph_color: Color,
    /// Color of highlight words.
    pub highlight_color: Color,
    /// Translucent fill painted each tick to fade old drops.
    pub trail_color: Color,
}

impl RainConfig {
    /// Katakana, Latin capitals and digits.
    pub const DEFAULT_ALPHABET: &'static str = concat!(
        "アァカサタナハマヤャラワガザダバパイィキシチニヒミリヰギジヂビピウゥクスツヌフムユュルグズブプエェケセテネヘメレヱゲゼデベペオォコソトノホモヨョロヲゴゾドボポヴッン",
        "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        "0123456789",
    );
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            alphabet: Self::DEFAULT_ALPHABET.to_owned(),
            column_width: 20.0,
            font_size: 16.0,
            step: 20.0,
            tick_interval_ms: 33.0,
            highlight_chance: 0.005,
            highlight_words: Vec::new(),
            reset_floor: 100.0,
            reset_span: 10_000.0,
            glyph_color: Color::LIME.with_alpha(0.7),
            highlight_color: Color::WHITE,
            trail_color: Color::TRAIL,
        }
    }
}

/// Complete configuration of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Effect to run.
    pub mode: Mode,
    /// Glyphs drawn by free particles.
    pub glyph_alphabet: Vec<char>,
    /// Surface area per particle; larger means sparser.
    pub cell_density_divisor: f32,
    /// Glyph size range.
    pub particle_size_range: SizeRange,
    /// Pointer repulsion radius; `0` disables interaction.
    pub pointer_influence_radius: f32,
    /// Frame cap, `None` = every display frame.
    pub target_frame_rate: Option<u32>,
    /// Fraction of displacement recovered per frame.
    pub restoring_rate: f32,
    /// Per-particle pointer response range.
    pub density_range: DensityRange,
    /// Optional particle cap after the area formula.
    pub max_particles: Option<usize>,
    /// Fixed particle count replacing the area formula.
    pub fixed_count: Option<usize>,
    /// Glyph color.
    pub color: Color,
    /// Quiet period before a resize re-seeds.
    pub resize_debounce_ms: f64,
    /// When the session animates.
    pub mount_policy: MountPolicy,
    /// Fixed RNG seed, `None` = host entropy.
    pub seed: Option<u64>,
    /// Narrow-viewport override tiers.
    pub compact: Vec<CompactProfile>,
    /// Symbol-rain constants.
    pub rain: RainConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mode: Mode::FreeParticles,
            glyph_alphabet: vec!['0', '1'],
            cell_density_divisor: 15_000.0,
            particle_size_range: SizeRange::default(),
            pointer_influence_radius: 120.0,
            target_frame_rate: None,
            restoring_rate: 0.1,
            density_range: DensityRange::default(),
            max_particles: None,
            fixed_count: None,
            color: Color::LIME,
            resize_debounce_ms: 150.0,
            mount_policy: MountPolicy::Immediate,
            seed: None,
            compact: Vec::new(),
            rain: RainConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Creates a symbol-rain config with default constants.
    #[must_use]
    pub fn symbol_rain() -> Self {
        Self {
            mode: Mode::SymbolRain,
            pointer_influence_radius: 0.0,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::ConfigParse`] for malformed TOML and
    /// [`GlyphError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> GlyphResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::ConfigParse`] for malformed JSON and
    /// [`GlyphError::InvalidConfig`] for out-of-range values.
    pub fn from_json_str(source: &str) -> GlyphResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::ConfigParse`] if a value has no TOML form.
    pub fn to_toml_string(&self) -> GlyphResult<String> {
        toml::to_string(self).map_err(|e| GlyphError::ConfigParse(e.to_string()))
    }

    /// Sets the density divisor.
    #[must_use]
    pub fn with_density_divisor(mut self, divisor: f32) -> Self {
        self.cell_density_divisor = divisor;
        self
    }

    /// Sets the pointer radius.
    #[must_use]
    pub fn with_pointer_radius(mut self, radius: f32) -> Self {
        self.pointer_influence_radius = radius;
        self
    }

    /// Sets the restoring rate.
    #[must_use]
    pub fn with_restoring_rate(mut self, rate: f32) -> Self {
        self.restoring_rate = rate;
        self
    }

    /// Sets the frame cap.
    #[must_use]
    pub fn with_frame_rate(mut self, fps: Option<u32>) -> Self {
        self.target_frame_rate = fps;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns true if the pointer can move particles.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.mode == Mode::FreeParticles && self.pointer_influence_radius > 0.0
    }

    /// Returns the config in effect for a viewport of the given width.
    ///
    /// The narrowest tier whose breakpoint lies above `viewport_width`
    /// replaces the base values. The result carries no tiers of its own.
    #[must_use]
    pub fn resolve(&self, viewport_width: f32) -> Self {
        let mut effective = self.clone();
        effective.compact = Vec::new();

        let Some(compact) = self
            .compact
            .iter()
            .filter(|c| viewport_width < c.breakpoint)
            .min_by(|a, b| a.breakpoint.total_cmp(&b.breakpoint))
        else {
            return effective;
        };

        if let Some(divisor) = compact.cell_density_divisor {
            effective.cell_density_divisor = divisor;
        }
        if let Some(radius) = compact.pointer_influence_radius {
            effective.pointer_influence_radius = radius;
        }
        if let Some(fps) = compact.target_frame_rate {
            effective.target_frame_rate = Some(fps);
        }
        if let Some(cap) = compact.max_particles {
            effective.max_particles = Some(cap);
        }
        if let Some(count) = compact.fixed_count {
            effective.fixed_count = Some(count);
        }
        if let Some(width) = compact.column_width {
            effective.rain.column_width = width;
        }
        if let Some(interval) = compact.tick_interval_ms {
            effective.rain.tick_interval_ms = interval;
        }
        effective
    }

    /// Checks every value for range errors.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> GlyphResult<()> {
        fn invalid(msg: impl Into<String>) -> GlyphResult<()> {
            Err(GlyphError::InvalidConfig(msg.into()))
        }
        fn positive(v: f32) -> bool {
            v.is_finite() && v > 0.0
        }

        if self.glyph_alphabet.is_empty() {
            return invalid("glyph_alphabet is empty");
        }
        if !positive(self.cell_density_divisor) {
            return invalid(format!(
                "cell_density_divisor must be positive, got {}",
                self.cell_density_divisor
            ));
        }
        let size = self.particle_size_range;
        if !positive(size.min) || !size.max.is_finite() || size.max < size.min {
            return invalid(format!("particle_size_range {}..{} is invalid", size.min, size.max));
        }
        if !self.pointer_influence_radius.is_finite() || self.pointer_influence_radius < 0.0 {
            return invalid(format!(
                "pointer_influence_radius must be non-negative, got {}",
                self.pointer_influence_radius
            ));
        }
        if self.target_frame_rate == Some(0) {
            return invalid("target_frame_rate must be positive");
        }
        if !positive(self.restoring_rate) || self.restoring_rate > 1.0 {
            return invalid(format!(
                "restoring_rate must be in (0, 1], got {}",
                self.restoring_rate
            ));
        }
        let density = self.density_range;
        if !density.min.is_finite() || density.min < 0.0 || !density.max.is_finite() || density.max < density.min {
            return invalid(format!("density_range {}..{} is invalid", density.min, density.max));
        }
        if !self.resize_debounce_ms.is_finite() || self.resize_debounce_ms < 0.0 {
            return invalid("resize_debounce_ms must be non-negative");
        }
        for compact in &self.compact {
            if !positive(compact.breakpoint) {
                return invalid("compact.breakpoint must be positive");
            }
            if compact.cell_density_divisor.is_some_and(|d| !positive(d)) {
                return invalid("compact.cell_density_divisor must be positive");
            }
            if compact
                .pointer_influence_radius
                .is_some_and(|r| !r.is_finite() || r < 0.0)
            {
                return invalid("compact.pointer_influence_radius must be non-negative");
            }
            if compact.target_frame_rate == Some(0) {
                return invalid("compact.target_frame_rate must be positive");
            }
            if compact.column_width.is_some_and(|w| !positive(w)) {
                return invalid("compact.column_width must be positive");
            }
            if compact
                .tick_interval_ms
                .is_some_and(|t| !t.is_finite() || t <= 0.0)
            {
                return invalid("compact.tick_interval_ms must be positive");
            }
        }
        self.validate_rain()
    }

    fn validate_rain(&self) -> GlyphResult<()> {
        let rain = &self.rain;
        let error = if self.mode == Mode::SymbolRain && rain.alphabet.is_empty() {
            Some("rain.alphabet is empty".to_owned())
        } else if !(rain.column_width.is_finite() && rain.column_width > 0.0) {
            Some(format!("rain.column_width must be positive, got {}", rain.column_width))
        } else if !(rain.step.is_finite() && rain.step > 0.0) {
            Some(format!("rain.step must be positive, got {}", rain.step))
        } else if !(rain.font_size.is_finite() && rain.font_size > 0.0) {
            Some(format!("rain.font_size must be positive, got {}", rain.font_size))
        } else if !(rain.tick_interval_ms.is_finite() && rain.tick_interval_ms > 0.0) {
            Some(format!("rain.tick_interval_ms must be positive, got {}", rain.tick_interval_ms))
        } else if !(0.0..=1.0).contains(&rain.highlight_chance) {
            Some(format!("rain.highlight_chance must be in [0, 1], got {}", rain.highlight_chance))
        } else if !(rain.reset_floor.is_finite() && rain.reset_span.is_finite() && rain.reset_span >= 0.0) {
            Some("rain reset depth is invalid".to_owned())
        } else {
            None
        };

        match error {
            Some(msg) => Err(GlyphError::InvalidConfig(msg)),
            None => Ok(()),
        }
    }
}
