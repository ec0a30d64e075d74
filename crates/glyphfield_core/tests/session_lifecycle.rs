//! # Session Lifecycle Tests
//!
//! Mount, resize, visibility and teardown against a scripted host.

mod common;

use common::ScriptedHost;
use glyphfield_core::{
    Dimensions, Effect, FieldConfig, HostEvent, MountPolicy, Schedule, Section, Session,
    SessionState, Vec2,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn mount(host: ScriptedHost, config: FieldConfig) -> Session<ScriptedHost> {
    Session::create(host, config.with_seed(42))
}

/// Test: destroy releases everything and a second destroy changes nothing.
#[test]
fn test_destroy_releases_everything() {
    let mut session = mount(ScriptedHost::sized(800.0, 600.0), FieldConfig::default());
    for i in 0..5 {
        session.on_frame(f64::from(i) * FRAME_MS);
    }
    assert_eq!(session.host().listeners.len(), 3);
    assert_eq!(session.host().timers.len(), 1);

    session.destroy();
    assert_eq!(session.state(), SessionState::Destroyed);
    assert!(session.host().listeners.is_empty());
    assert!(session.host().timers.is_empty());
    assert_eq!(session.particle_count(), 0);

    let calls = session.host().schedule_calls;
    session.destroy();
    session.on_frame(1_000.0);
    assert_eq!(session.host().schedule_calls, calls);
    assert_eq!(session.host().frames.len(), 5);
}

/// Test: dropping a live session releases its listeners and timer.
#[test]
fn test_drop_releases_listeners() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glyphfield_core::{Dimensions, DrawList, GlyphResult, Host, ListenerId, TimerId};

    /// Host that shares its bookkeeping with the test.
    struct SharedHost(Rc<RefCell<ScriptedHost>>);

    impl Host for SharedHost {
        fn measure(&mut self) -> Option<Dimensions> {
            self.0.borrow_mut().measure()
        }
        fn viewport_width(&self) -> f32 {
            self.0.borrow().viewport_width()
        }
        fn entropy(&mut self) -> u64 {
            self.0.borrow_mut().entropy()
        }
        fn present(&mut self, list: &DrawList) {
            self.0.borrow_mut().present(list);
        }
        fn listen(&mut self, event: HostEvent) -> GlyphResult<ListenerId> {
            self.0.borrow_mut().listen(event)
        }
        fn unlisten(&mut self, id: ListenerId) {
            self.0.borrow_mut().unlisten(id);
        }
        fn schedule(&mut self, schedule: Schedule) -> GlyphResult<TimerId> {
            self.0.borrow_mut().schedule(schedule)
        }
        fn cancel(&mut self, id: TimerId) {
            self.0.borrow_mut().cancel(id);
        }
    }

    let shared = Rc::new(RefCell::new(ScriptedHost::sized(800.0, 600.0)));
    {
        let session = Session::create(SharedHost(Rc::clone(&shared)), FieldConfig::default());
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(shared.borrow().listeners.len(), 3);
    }
    assert!(shared.borrow().listeners.is_empty());
    assert!(shared.borrow().timers.is_empty());
}

/// Test: a burst of resizes re-seeds exactly once, after the window.
#[test]
fn test_resize_burst_reseeds_once() {
    let mut session = mount(ScriptedHost::sized(800.0, 600.0), FieldConfig::default());
    assert_eq!(session.particle_count(), 32);

    session.host_mut().resize(1200.0, 900.0);
    for t in [0.0, 40.0, 80.0, 120.0] {
        session.on_resize(t);
        session.on_frame(t);
    }
    session.on_frame(200.0);
    assert_eq!(session.stats().reseeds, 0, "re-seeded inside the window");

    session.on_frame(270.0);
    assert_eq!(session.stats().reseeds, 1);
    assert_eq!(session.particle_count(), 72);

    session.on_frame(500.0);
    assert_eq!(session.stats().reseeds, 1);
}

/// Test: a settled resize throws away displaced particles and seeds a field
/// at rest inside the new surface.
#[test]
fn test_resize_discards_displaced_particles() {
    let mut session = mount(ScriptedHost::sized(800.0, 600.0), FieldConfig::default());
    let field = session.effect_mut().and_then(Effect::as_particles_mut).unwrap();
    for particle in field.particles_mut() {
        particle.position = Vec2::new(790.0, 590.0);
    }

    session.host_mut().resize(400.0, 300.0);
    session.on_resize(0.0);
    session.on_frame(150.0);

    assert_eq!(session.stats().reseeds, 1);
    assert_eq!(session.dimensions(), Some(Dimensions::new(400.0, 300.0)));
    let field = session.effect().and_then(Effect::as_particles).unwrap();
    assert_eq!(field.dimensions(), Dimensions::new(400.0, 300.0));
    assert_eq!(field.len(), 8);
    for particle in field.particles() {
        assert_eq!(particle.position, particle.rest());
        assert!((0.0..=400.0).contains(&particle.position.x), "{:?}", particle.position);
        assert!((0.0..=300.0).contains(&particle.position.y), "{:?}", particle.position);
    }
}

/// Test: a surface that disappears empties the field until the next resize.
#[test]
fn test_surface_loss_empties_field() {
    let mut session = mount(ScriptedHost::sized(800.0, 600.0), FieldConfig::default());

    session.host_mut().surface = None;
    session.on_resize(0.0);
    session.on_frame(200.0);
    assert_eq!(session.particle_count(), 0);
    assert_eq!(session.state(), SessionState::Running);

    session.host_mut().resize(800.0, 600.0);
    session.on_resize(300.0);
    session.on_frame(500.0);
    assert_eq!(session.particle_count(), 32);
}

/// Test: an unmeasurable surface gives an inert session.
#[test]
fn test_unmeasurable_surface_is_inert() {
    let host = ScriptedHost::default();
    let mut session = mount(host, FieldConfig::default());

    assert!(session.is_inert());
    assert!(session.host().listeners.is_empty());
    assert_eq!(session.host().schedule_calls, 0);

    session.on_frame(0.0);
    assert!(session.host().frames.is_empty());
}

/// Test: a refused listener leaves one static frame and nothing registered.
#[test]
fn test_refused_listener_degrades_to_static_frame() {
    let host = ScriptedHost::sized(800.0, 600.0).refusing(HostEvent::PointerLeave);
    let session = mount(host, FieldConfig::default());

    assert!(!session.is_animated());
    assert!(session.host().listeners.is_empty());
    assert!(session.host().timers.is_empty());
    assert_eq!(session.host().frames.len(), 1);
    assert_eq!(session.host().frames[0].glyph_count(), 32);
}

/// Test: a refused schedule also degrades.
#[test]
fn test_refused_schedule_degrades() {
    let host = ScriptedHost::sized(800.0, 600.0).refusing_schedule();
    let session = mount(host, FieldConfig::default());

    assert!(!session.is_animated());
    assert!(session.host().listeners.is_empty());
    assert_eq!(session.host().frames.len(), 1);
    assert_eq!(session.host().schedule_calls, 1);
}

/// Test: a 30 fps cap on a 60 Hz display draws every second frame and still
/// re-arms every frame.
#[test]
fn test_frame_cap_skips_but_rearms() {
    let mut session = mount(
        ScriptedHost::sized(800.0, 600.0),
        FieldConfig::default().with_frame_rate(Some(30)),
    );
    let initial = session.host().schedule_calls;

    for i in 0..12 {
        session.on_frame(f64::from(i) * 16.7);
    }
    assert_eq!(session.host().frames.len(), 6);
    assert_eq!(session.stats().frames_executed, 6);
    assert_eq!(session.stats().frames_skipped, 6);
    assert_eq!(session.host().schedule_calls, initial + 12);
}

/// Test: when-visible sessions only animate while visible.
#[test]
fn test_visibility_suspends_and_resumes() {
    let config = FieldConfig {
        mount_policy: MountPolicy::WhenVisible,
        ..FieldConfig::default()
    };
    let mut session = mount(ScriptedHost::sized(800.0, 600.0), config);

    assert!(session.host().events().contains(&HostEvent::Visibility));
    assert!(session.host().timers.is_empty());

    session.on_visibility(true);
    assert_eq!(session.host().timers.len(), 1);
    session.on_frame(0.0);
    assert_eq!(session.host().frames.len(), 1);

    session.on_visibility(false);
    assert!(session.host().timers.is_empty());
    session.on_frame(FRAME_MS);
    assert_eq!(session.host().frames.len(), 1);
}

/// Test: immediate sessions ignore visibility.
#[test]
fn test_immediate_ignores_visibility() {
    let mut session = mount(ScriptedHost::sized(800.0, 600.0), FieldConfig::default());
    session.on_visibility(false);
    assert!(session.is_visible());
    assert_eq!(session.host().timers.len(), 1);
}

/// Test: compact overrides follow the viewport across a resize.
#[test]
fn test_compact_profile_tracks_viewport() {
    let mut session = mount(ScriptedHost::sized(1280.0, 800.0), Section::Skills.config());
    assert_eq!(session.effective_config().cell_density_divisor, 10_000.0);
    assert_eq!(session.particle_count(), 102);

    session.host_mut().resize(400.0, 800.0);
    session.on_resize(0.0);
    session.on_frame(150.0);
    assert_eq!(session.effective_config().cell_density_divisor, 20_000.0);
    assert_eq!(session.particle_count(), 16);
}

/// Test: the tech-stack rain re-arms its interval when a resize changes it.
#[test]
fn test_rain_interval_follows_compact_profile() {
    let mut session = mount(ScriptedHost::sized(1280.0, 800.0), Section::TechStack.config());
    assert_eq!(session.host().timers[0].1, Schedule::Every(33.0));
    assert_eq!(session.particle_count(), 64);
    assert_eq!(session.host().events(), vec![HostEvent::Resize]);

    session.host_mut().resize(480.0, 800.0);
    session.on_resize(0.0);
    session.on_frame(200.0);

    assert_eq!(session.host().timers.len(), 1);
    assert_eq!(session.host().timers[0].1, Schedule::Every(50.0));
    assert_eq!(session.particle_count(), 20);
}
