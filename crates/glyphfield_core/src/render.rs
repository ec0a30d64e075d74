//! Draw command batching.
//!
//! Effects never touch the surface directly. They append commands to a
//! [`DrawList`], and the session hands the finished list to the host once per
//! executed frame.

use crate::style::Color;

/// A single drawing operation on the host surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface to transparent.
    Clear {
        /// Surface width.
        width: f32,
        /// Surface height.
        height: f32,
    },
    /// Filled rectangle (translucent fills leave trails).
    FillRect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: Color,
    },
    /// One glyph in a monospace font.
    Glyph {
        /// Character drawn.
        glyph: char,
        /// Baseline X position.
        x: f32,
        /// Baseline Y position.
        y: f32,
        /// Font size.
        size: f32,
        /// Fill color.
        color: Color,
    },
    /// A word in a monospace font.
    Text {
        /// Text content.
        text: String,
        /// Baseline X position.
        x: f32,
        /// Baseline Y position.
        y: f32,
        /// Font size.
        size: f32,
        /// Fill color.
        color: Color,
    },
}

/// Collects the commands of one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Commands in submission order.
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates a list with room for `capacity` commands.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Begins a new frame, keeping the allocation.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Adds a command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Adds multiple commands.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    /// Returns the commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the command count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Counts the glyph and text commands.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { .. } | DrawCommand::Text { .. }))
            .count()
    }
}
