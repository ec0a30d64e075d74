//! Pointer tracking for field interaction.
//!
//! The host forwards pointer-move and pointer-leave in surface-local
//! coordinates. Particles only read the position.

use crate::math::Vec2;

/// Last known pointer position over the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Current position, absent when the pointer left.
    position: Option<Vec2>,
    /// Pointer moves received since the last clear.
    moves: u64,
}

impl PointerState {
    /// Creates a state with no pointer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: None,
            moves: 0,
        }
    }

    /// Updates pointer position.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.position = Some(Vec2::new(x, y));
            self.moves += 1;
        }
    }

    /// Forgets the pointer (it left the page).
    pub fn leave(&mut self) {
        self.position = None;
    }

    /// Resets to the initial state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns the current position, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Returns the number of moves received.
    #[must_use]
    pub const fn moves(&self) -> u64 {
        self.moves
    }
}
