//! Canvas state tracking shared by every platform.
//!
//! Setting `font` or `fillStyle` on a 2D context parses a string each time.
//! Particles mostly share one color and a handful of sizes, so [`PenState`]
//! only hands out a new value when it actually changed.

use glyphfield_core::Color;

/// Last font and fill applied to a context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenState {
    font_size: Option<f32>,
    fill: Option<Color>,
}

impl PenState {
    /// Creates a state that knows nothing about the context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            font_size: None,
            fill: None,
        }
    }

    /// Returns the CSS font to apply, or `None` if `size` is already set.
    pub fn font(&mut self, size: f32) -> Option<String> {
        if self.font_size == Some(size) {
            return None;
        }
        self.font_size = Some(size);
        Some(font(size))
    }

    /// Returns the CSS fill to apply, or `None` if `color` is already set.
    pub fn fill(&mut self, color: Color) -> Option<String> {
        if self.fill == Some(color) {
            return None;
        }
        self.fill = Some(color);
        Some(color.to_css())
    }

    /// Forgets everything. Resizing a canvas resets its context.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// CSS font for a glyph size.
#[must_use]
pub fn font(size: f32) -> String {
    format!("{size}px monospace")
}

/// Converts client coordinates to surface-local ones.
#[must_use]
pub fn surface_point(client_x: f64, client_y: f64, left: f64, top: f64) -> (f32, f32) {
    ((client_x - left) as f32, (client_y - top) as f32)
}

/// Share of the observed section that must be on screen to count as visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Reads an intersection entry. Observers also report entries that just
/// dropped below the threshold, so the ratio is checked as well.
#[must_use]
pub fn is_visible(is_intersecting: bool, ratio: f64) -> bool {
    is_intersecting && ratio >= VISIBILITY_THRESHOLD
}

/// Packs two uniform `[0, 1)` draws into a seed.
#[must_use]
pub fn seed_from_unit(high: f64, low: f64) -> u64 {
    let scale = f64::from(u32::MAX);
    let high = (high.clamp(0.0, 1.0) * scale) as u64;
    let low = (low.clamp(0.0, 1.0) * scale) as u64;
    (high << 32) | low
}
