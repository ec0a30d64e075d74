//! # Session Lifecycle
//!
//! One [`Session`] drives one surface from mount to unmount.
//!
//! ```text
//! create ──▶ RUNNING ──resize (debounced)──▶ re-seed ──▶ RUNNING
//!               │                                           │
//!               └──────────────── destroy / drop ───────────┴──▶ DESTROYED
//! ```
//!
//! ## Frame Loop
//!
//! Free particles re-arm a single next-frame request after every callback,
//! including callbacks the frame limiter skipped. Symbol rain runs on a
//! repeating interval that stays armed until cancelled.
//!
//! ## Degradation
//!
//! Nothing here returns an error to the host:
//!
//! - Invalid config, missing surface or zero area: the session is inert.
//!   No effect, no listeners, no timer.
//! - Listener or timer refused: everything already registered is released,
//!   one static frame is drawn, and the loop stays off.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::{FieldConfig, MountPolicy};
use crate::effect::Effect;
use crate::error::GlyphError;
use crate::host::{Dimensions, Host, HostEvent, ListenerId, Schedule, TimerId};
use crate::pointer::PointerState;
use crate::render::DrawList;
use crate::timing::{Debouncer, FrameLimiter};

/// Lifecycle state visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Mounted. The loop may be suspended, degraded or never started.
    Running,
    /// Torn down. Every callback is a no-op.
    Destroyed,
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Callbacks that advanced the effect.
    pub frames_executed: u64,
    /// Callbacks skipped by the frame cap.
    pub frames_skipped: u64,
    /// Re-seeds after resize.
    pub reseeds: u64,
    /// Draw lists handed to the host.
    pub presents: u64,
}

/// An armed timer and how it was armed.
#[derive(Debug, Clone, Copy)]
struct Armed {
    id: TimerId,
    schedule: Schedule,
}

/// A running field bound to one host surface.
pub struct Session<H: Host> {
    /// Platform services.
    host: H,
    /// Config as supplied.
    config: FieldConfig,
    /// Config resolved for the current viewport.
    effective: FieldConfig,
    /// Lifecycle state.
    state: SessionState,
    /// Seeded effect, absent while inert or without a surface.
    effect: Option<Effect>,
    /// Pointer tracker.
    pointer: PointerState,
    /// Frame cap.
    limiter: FrameLimiter,
    /// Resize burst collapse.
    debouncer: Debouncer,
    /// Session RNG.
    rng: ChaCha8Rng,
    /// Reused per-frame command buffer.
    draw_list: DrawList,
    /// Listeners to release on teardown.
    listeners: Vec<ListenerId>,
    /// Armed frame request or interval.
    timer: Option<Armed>,
    /// False while hidden under [`MountPolicy::WhenVisible`].
    visible: bool,
    /// False once the loop is off for good (inert or degraded).
    animated: bool,
    /// Surface size at the last seed.
    dimensions: Option<Dimensions>,
    /// Counters.
    stats: SessionStats,
}

impl<H: Host> Session<H> {
    /// Mounts a field on the host's surface.
    ///
    /// Never fails. See the module docs for how problems degrade.
    pub fn create(mut host: H, config: FieldConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| host.entropy());
        let effective = config.resolve(host.viewport_width());

        let mut session = Self {
            limiter: FrameLimiter::new(effective.target_frame_rate),
            debouncer: Debouncer::new(config.resize_debounce_ms),
            visible: config.mount_policy == MountPolicy::Immediate,
            host,
            config,
            effective,
            state: SessionState::Running,
            effect: None,
            pointer: PointerState::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            draw_list: DrawList::default(),
            listeners: Vec::new(),
            timer: None,
            animated: false,
            dimensions: None,
            stats: SessionStats::default(),
        };

        if let Err(err) = session.config.validate() {
            warn!(error = %err, "field config rejected, session is inert");
            return session;
        }

        let Some(dimensions) = session.host.measure().filter(|d| !d.is_empty()) else {
            warn!("surface unavailable or empty, session is inert");
            return session;
        };

        let effect = Effect::seed(dimensions, &session.effective, &mut session.rng);
        session.draw_list = DrawList::with_capacity(effect.len() + 1);
        session.effect = Some(effect);
        session.dimensions = Some(dimensions);
        session.animated = true;

        if let Err(err) = session.register_listeners() {
            session.degrade(&err);
            return session;
        }
        if session.visible {
            if let Err(err) = session.arm() {
                session.degrade(&err);
                return session;
            }
        }

        info!(
            width = dimensions.width,
            height = dimensions.height,
            count = session.particle_count(),
            mode = ?session.effective.mode,
            "field session created"
        );
        session
    }

    /// Frame or interval callback. `now_ms` is the host's frame timestamp.
    pub fn on_frame(&mut self, now_ms: f64) {
        if self.state == SessionState::Destroyed {
            return;
        }
        // A next-frame request is spent once it fires.
        if matches!(self.timer, Some(Armed { schedule: Schedule::NextFrame, .. })) {
            self.timer = None;
        }

        if self.debouncer.poll(now_ms) {
            self.reseed();
        }
        if !self.animated || !self.visible {
            return;
        }

        if self.limiter.admit(now_ms) {
            if let Some(effect) = self.effect.as_mut() {
                self.draw_list.begin_frame();
                effect.advance(self.pointer.position(), &mut self.rng, &mut self.draw_list);
                self.host.present(&self.draw_list);
                self.stats.presents += 1;
            }
            self.stats.frames_executed += 1;
        } else {
            self.stats.frames_skipped += 1;
        }

        if self.timer.is_none() {
            if let Err(err) = self.arm() {
                self.degrade(&err);
            }
        }
    }

    /// Pointer moved, in surface-local coordinates.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.state == SessionState::Running {
            self.pointer.move_to(x, y);
        }
    }

    /// Pointer left the page.
    pub fn on_pointer_leave(&mut self) {
        if self.state == SessionState::Running {
            self.pointer.leave();
        }
    }

    /// Viewport resized. The re-seed runs once the burst settles.
    pub fn on_resize(&mut self, now_ms: f64) {
        if self.state == SessionState::Running {
            self.debouncer.notify(now_ms);
        }
    }

    /// Section entered or left the viewport.
    ///
    /// Only sessions mounted with [`MountPolicy::WhenVisible`] react.
    pub fn on_visibility(&mut self, visible: bool) {
        if self.state == SessionState::Destroyed
            || self.config.mount_policy != MountPolicy::WhenVisible
            || !self.animated
            || self.visible == visible
        {
            return;
        }

        self.visible = visible;
        if visible {
            self.limiter.reset();
            if let Err(err) = self.arm() {
                self.degrade(&err);
                return;
            }
            debug!("field resumed");
        } else {
            self.disarm();
            debug!("field suspended");
        }
    }

    /// Tears the session down. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.state == SessionState::Destroyed {
            return;
        }
        self.disarm();
        self.release_listeners();
        self.effect = None;
        self.pointer.clear();
        self.debouncer.cancel();
        self.animated = false;
        self.state = SessionState::Destroyed;
        info!(
            frames = self.stats.frames_executed,
            reseeds = self.stats.reseeds,
            "field session destroyed"
        );
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true if the session never got a surface or a valid config.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.state == SessionState::Running
            && self.effect.is_none()
            && self.listeners.is_empty()
            && self.timer.is_none()
    }

    /// Returns true while the loop may run (not inert, degraded or destroyed).
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.animated
    }

    /// Returns true if a frame request or interval is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns true unless suspended by [`on_visibility`](Self::on_visibility).
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Particles (or rain columns) currently alive.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.effect.as_ref().map_or(0, Effect::len)
    }

    /// Seeded effect.
    #[must_use]
    pub fn effect(&self) -> Option<&Effect> {
        self.effect.as_ref()
    }

    /// Mutable effect.
    pub fn effect_mut(&mut self) -> Option<&mut Effect> {
        self.effect.as_mut()
    }

    /// Config as supplied.
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Config in effect for the current viewport.
    #[must_use]
    pub const fn effective_config(&self) -> &FieldConfig {
        &self.effective
    }

    /// Pointer tracker.
    #[must_use]
    pub const fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Counters.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Surface size at the last seed.
    #[must_use]
    pub const fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    fn register_listeners(&mut self) -> Result<(), GlyphError> {
        let mut events = vec![HostEvent::Resize];
        if self.config.is_interactive() {
            events.extend([HostEvent::PointerMove, HostEvent::PointerLeave]);
        }
        if self.config.mount_policy == MountPolicy::WhenVisible {
            events.push(HostEvent::Visibility);
        }

        for event in events {
            let id = self.host.listen(event)?;
            self.listeners.push(id);
        }
        Ok(())
    }

    fn release_listeners(&mut self) {
        for id in self.listeners.drain(..) {
            self.host.unlisten(id);
        }
    }

    fn arm(&mut self) -> Result<(), GlyphError> {
        let schedule = Effect::schedule(&self.effective);
        let id = self.host.schedule(schedule)?;
        self.timer = Some(Armed { id, schedule });
        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(armed) = self.timer.take() {
            self.host.cancel(armed.id);
        }
    }

    /// Falls back to one static frame with nothing registered.
    fn degrade(&mut self, err: &GlyphError) {
        warn!(error = %err, "field degraded to a static frame");
        self.disarm();
        self.release_listeners();
        self.animated = false;

        if let Some(effect) = self.effect.as_ref() {
            self.draw_list.begin_frame();
            effect.draw(&mut self.draw_list);
            self.host.present(&self.draw_list);
            self.stats.presents += 1;
        }
    }

    /// Discards the effect and seeds a fresh one for the current surface.
    fn reseed(&mut self) {
        let previous = Effect::schedule(&self.effective);
        self.effective = self.config.resolve(self.host.viewport_width());
        self.limiter = FrameLimiter::new(self.effective.target_frame_rate);
        self.stats.reseeds += 1;

        let Some(dimensions) = self.host.measure().filter(|d| !d.is_empty()) else {
            debug!("surface unavailable after resize, field emptied");
            self.effect = None;
            self.dimensions = None;
            return;
        };

        let effect = Effect::seed(dimensions, &self.effective, &mut self.rng);
        debug!(
            width = dimensions.width,
            height = dimensions.height,
            count = effect.len(),
            "field re-seeded"
        );
        self.effect = Some(effect);
        self.dimensions = Some(dimensions);

        let next = Effect::schedule(&self.effective);
        if next != previous && matches!(self.timer, Some(Armed { schedule: Schedule::Every(_), .. })) {
            self.disarm();
            if let Err(err) = self.arm() {
                self.degrade(&err);
            }
        }
    }
}

impl<H: Host> Drop for Session<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<H: Host> std::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("mode", &self.effective.mode)
            .field("particles", &self.particle_count())
            .field("listeners", &self.listeners.len())
            .field("armed", &self.timer.is_some())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
