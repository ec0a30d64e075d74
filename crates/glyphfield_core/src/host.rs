//! # Host Abstraction
//!
//! Everything the engine needs from the platform: a surface to measure and
//! draw on, event listener registration and frame scheduling.
//!
//! ```text
//!   Host ──events──▶ Session ──DrawList──▶ Host::present
//!     ▲                 │
//!     └──listen/schedule┘
//! ```
//!
//! The host owns the actual callbacks. The session only keeps the ids it was
//! handed, and gives every one of them back on teardown.

use crate::error::GlyphResult;
use crate::render::DrawList;

/// Size of the drawable surface in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimensions {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Dimensions {
    /// Creates dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface area.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Returns true if nothing can be drawn on a surface this size.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Events a session can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// Pointer moved over the page.
    PointerMove,
    /// Pointer left the page.
    PointerLeave,
    /// Viewport or container resized.
    Resize,
    /// Section scrolled in or out of view.
    Visibility,
}

/// How the next callback is armed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Schedule {
    /// One callback on the next display frame.
    NextFrame,
    /// Repeating callback every given number of milliseconds.
    Every(f64),
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Handle for an armed frame request or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Platform services used by a [`Session`](crate::Session).
///
/// Implementations call back into the session (`on_frame`, `on_resize`, ...)
/// for every event and timer they registered.
pub trait Host {
    /// Measures the surface, sizing it to its container first.
    ///
    /// Returns `None` if the surface is gone or cannot be measured.
    fn measure(&mut self) -> Option<Dimensions>;

    /// Current viewport width, used for responsive overrides.
    fn viewport_width(&self) -> f32;

    /// A fresh random seed.
    fn entropy(&mut self) -> u64;

    /// Draws one frame.
    fn present(&mut self, list: &DrawList);

    /// Registers a listener for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::ListenerRejected`](crate::GlyphError::ListenerRejected)
    /// if the platform refuses.
    fn listen(&mut self, event: HostEvent) -> GlyphResult<ListenerId>;

    /// Releases a listener. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);

    /// Arms a frame request or interval.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::ScheduleRejected`](crate::GlyphError::ScheduleRejected)
    /// if the platform refuses.
    fn schedule(&mut self, schedule: Schedule) -> GlyphResult<TimerId>;

    /// Cancels an armed timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}
