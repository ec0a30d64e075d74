//! # Symbol Rain
//!
//! Falling columns of glyphs. Each column carries one cursor; every tick draws
//! one glyph per column at the cursor and moves it down a fixed step. Columns
//! reset at randomized depths, so they drift out of phase over time.
//!
//! Old drops are never erased. A translucent fill each tick fades them into
//! the background, which is what leaves the trails.

use rand::Rng;

use crate::config::RainConfig;
use crate::host::Dimensions;
use crate::render::{DrawCommand, DrawList};

/// Column state of one symbol-rain surface.
#[derive(Debug, Clone)]
pub struct SymbolRain {
    /// Cursor depth per column.
    columns: Vec<f32>,
    /// Glyphs for ordinary drops.
    alphabet: Vec<char>,
    /// Surface the rain was seeded for.
    dimensions: Dimensions,
    /// Constants.
    config: RainConfig,
    /// Highlight words drawn so far.
    highlights: u64,
}

impl SymbolRain {
    /// Number of columns for a surface: `floor(width / column_width)`.
    #[must_use]
    pub fn column_count(dimensions: Dimensions, config: &RainConfig) -> usize {
        if config.column_width.is_nan() || config.column_width <= 0.0 {
            return 0;
        }
        (dimensions.width / config.column_width).floor().max(0.0) as usize
    }

    /// Seeds every column at the top of the surface.
    #[must_use]
    pub fn seed(dimensions: Dimensions, config: &RainConfig) -> Self {
        Self {
            columns: vec![0.0; Self::column_count(dimensions, config)],
            alphabet: config.alphabet.chars().collect(),
            dimensions,
            config: config.clone(),
            highlights: 0,
        }
    }

    /// Runs one tick and records it.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, list: &mut DrawList) {
        let rain = &self.config;
        list.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: self.dimensions.width,
            height: self.dimensions.height,
            color: rain.trail_color,
        });

        for (index, y) in self.columns.iter_mut().enumerate() {
            let x = index as f32 * rain.column_width;

            let highlight = !rain.highlight_words.is_empty() && rng.gen::<f32>() < rain.highlight_chance;
            if highlight {
                let word = &rain.highlight_words[rng.gen_range(0..rain.highlight_words.len())];
                list.push(DrawCommand::Text {
                    text: word.clone(),
                    x,
                    y: *y,
                    size: rain.font_size,
                    color: rain.highlight_color,
                });
                self.highlights += 1;
            } else if !self.alphabet.is_empty() {
                let glyph = self.alphabet[rng.gen_range(0..self.alphabet.len())];
                list.push(DrawCommand::Glyph {
                    glyph,
                    x,
                    y: *y,
                    size: rain.font_size,
                    color: rain.glyph_color,
                });
            }

            if *y > rain.reset_floor + rng.gen::<f32>() * rain.reset_span {
                *y = 0.0;
            } else {
                *y += rain.step;
            }
        }
    }

    /// Records a single frame without moving the columns.
    pub fn draw(&self, list: &mut DrawList) {
        let rain = &self.config;
        list.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: self.dimensions.width,
            height: self.dimensions.height,
            color: rain.trail_color,
        });
        if let Some(&glyph) = self.alphabet.first() {
            list.extend(self.columns.iter().enumerate().map(|(index, &y)| DrawCommand::Glyph {
                glyph,
                x: index as f32 * rain.column_width,
                y,
                size: rain.font_size,
                color: rain.glyph_color,
            }));
        }
    }

    /// Cursor depth of every column.
    #[must_use]
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the surface is too narrow for a column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Highlight words drawn since seeding.
    #[must_use]
    pub const fn highlights(&self) -> u64 {
        self.highlights
    }
}
