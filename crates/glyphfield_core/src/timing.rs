//! # Frame Timing
//!
//! Frame-rate capping and resize debouncing.
//!
//! ## Design
//!
//! Time is whatever the host says it is: milliseconds as delivered by the
//! animation-frame callback. Nothing here reads a clock, so both types are
//! fully deterministic under test.
//!
//! The limiter is a skip policy. The loop keeps re-arming every display
//! frame; the limiter only decides whether a given callback does any work.
//! Counting executed and skipped callbacks is left to the caller.

/// Caps how often frame callbacks execute.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    /// Minimum spacing between executed frames, `None` = uncapped.
    interval_ms: Option<f64>,
    /// Reference time of the last executed frame.
    last_ms: Option<f64>,
}

impl FrameLimiter {
    /// Creates a limiter for the given rate (`None` = uncapped).
    #[must_use]
    pub fn new(target_frame_rate: Option<u32>) -> Self {
        Self {
            interval_ms: target_frame_rate
                .filter(|&fps| fps > 0)
                .map(|fps| 1000.0 / f64::from(fps)),
            last_ms: None,
        }
    }

    /// Returns true if the frame at `now_ms` should execute.
    ///
    /// The first frame always executes. After that, a frame executes once at
    /// least one interval has elapsed; the remainder carries over so a 30 fps
    /// cap on a 60 Hz display lands on every second frame without drift.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        let Some(interval) = self.interval_ms else {
            return true;
        };

        match self.last_ms {
            None => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(last) => {
                let delta = now_ms - last;
                if delta >= interval {
                    self.last_ms = Some(now_ms - delta % interval);
                    true
                } else if delta < 0.0 {
                    // Host clock went backwards (new timeline); restart.
                    self.last_ms = Some(now_ms);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Forgets the last frame time (the next frame executes).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Collapses bursts of notifications into one trailing event.
///
/// Every [`notify`](Self::notify) pushes the deadline out; [`poll`](Self::poll)
/// fires once the deadline passes with no further notifications.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period required before firing.
    window_ms: f64,
    /// When the pending event fires.
    deadline_ms: Option<f64>,
}

impl Debouncer {
    /// Default resize quiet period.
    pub const DEFAULT_WINDOW_MS: f64 = 150.0;

    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            deadline_ms: None,
        }
    }

    /// Records a notification at `now_ms`.
    pub fn notify(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.window_ms);
    }

    /// Returns true once, when the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending notification.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW_MS)
    }
}
