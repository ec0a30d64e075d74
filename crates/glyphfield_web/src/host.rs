//! [`Host`] on a canvas element.
//!
//! Every DOM callback and timer closure is owned by the host and holds only a
//! `Weak` reference to its session. Released closures are parked instead of
//! dropped, because the browser may be running one of them at that very
//! moment; the next callback reaps them.

use std::cell::RefCell;
use std::rc::Weak;

use glyphfield_core::{
    Dimensions, DrawCommand, DrawList, GlyphError, GlyphResult, Host, HostEvent, ListenerId, Schedule,
    Session, SessionState, TimerId,
};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Element, Event, EventTarget, HtmlCanvasElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};

use crate::canvas::{self, PenState};

/// Session bound to a canvas.
pub(crate) type WebSession = Session<WebHost>;

/// A registered listener and the closure backing it.
enum Listener {
    Dom {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    },
    Observer {
        observer: IntersectionObserver,
        _closure: Closure<dyn FnMut(js_sys::Array)>,
    },
}

/// An armed timer and the closure backing it.
enum Timer {
    Frame {
        handle: i32,
        _closure: Closure<dyn FnMut(f64)>,
    },
    Interval {
        handle: i32,
        _closure: Closure<dyn FnMut()>,
    },
}

/// Browser host for one canvas.
pub(crate) struct WebHost {
    window: Option<Window>,
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
    session: Weak<RefCell<WebSession>>,
    listeners: Vec<(ListenerId, Listener)>,
    timers: Vec<(TimerId, Timer)>,
    spent_listeners: Vec<Listener>,
    spent_timers: Vec<Timer>,
    pen: PenState,
    next_id: u32,
}

impl WebHost {
    /// Wraps a canvas. A missing window or 2D context leaves the host unable
    /// to measure, which makes its session inert.
    pub(crate) fn new(canvas: HtmlCanvasElement, session: Weak<RefCell<WebSession>>) -> Self {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        Self {
            window: web_sys::window(),
            canvas,
            context,
            session,
            listeners: Vec::new(),
            timers: Vec::new(),
            spent_listeners: Vec::new(),
            spent_timers: Vec::new(),
            pen: PenState::new(),
            next_id: 0,
        }
    }

    /// Drops closures released by earlier callbacks.
    pub(crate) fn reap(&mut self) {
        self.spent_listeners.clear();
        self.spent_timers.clear();
    }

    fn next_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    fn now(&self) -> f64 {
        self.window
            .as_ref()
            .and_then(Window::performance)
            .map_or(0.0, |p| p.now())
    }

    fn window(&self) -> GlyphResult<&Window> {
        self.window
            .as_ref()
            .ok_or_else(|| GlyphError::ScheduleRejected("no window".to_owned()))
    }

    fn dom_listener(
        &self,
        event: HostEvent,
        target: EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(&mut WebSession, Event) + 'static,
    ) -> GlyphResult<Listener> {
        let weak = self.session.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            dispatch(&weak, |session| handler(session, e));
        });
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|err| rejected(event, &err))?;
        Ok(Listener::Dom { target, kind, closure })
    }

    fn visibility_listener(&self) -> GlyphResult<Listener> {
        let weak = self.session.clone();
        let closure = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let visible = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .last()
                .map(|e| canvas::is_visible(e.is_intersecting(), e.intersection_ratio()));
            if let Some(visible) = visible {
                dispatch(&weak, |session| session.on_visibility(visible));
            }
        });
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(canvas::VISIBILITY_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
                .map_err(|err| rejected(HostEvent::Visibility, &err))?;
        // Watch the section the canvas fills.
        let section: Element = self
            .canvas
            .parent_element()
            .unwrap_or_else(|| self.canvas.clone().into());
        observer.observe(&section);
        Ok(Listener::Observer {
            observer,
            _closure: closure,
        })
    }
}

impl Host for WebHost {
    fn measure(&mut self) -> Option<Dimensions> {
        self.context.as_ref()?;
        let (width, height) = match self.canvas.parent_element() {
            Some(parent) => (parent.client_width(), parent.client_height()),
            None => (self.canvas.client_width(), self.canvas.client_height()),
        };
        if width <= 0 || height <= 0 {
            return None;
        }
        self.canvas.set_width(width.unsigned_abs());
        self.canvas.set_height(height.unsigned_abs());
        self.pen.reset();
        Some(Dimensions::new(width as f32, height as f32))
    }

    fn viewport_width(&self) -> f32 {
        self.window
            .as_ref()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .map_or(0.0, |w| w as f32)
    }

    fn entropy(&mut self) -> u64 {
        canvas::seed_from_unit(js_sys::Math::random(), js_sys::Math::random())
    }

    fn present(&mut self, list: &DrawList) {
        let Some(ctx) = self.context.as_ref() else {
            return;
        };
        let mut utf8 = [0_u8; 4];
        for command in list.commands() {
            match command {
                DrawCommand::Clear { width, height } => {
                    ctx.clear_rect(0.0, 0.0, f64::from(*width), f64::from(*height));
                }
                DrawCommand::FillRect { x, y, width, height, color } => {
                    if let Some(fill) = self.pen.fill(*color) {
                        ctx.set_fill_style_str(&fill);
                    }
                    ctx.fill_rect(f64::from(*x), f64::from(*y), f64::from(*width), f64::from(*height));
                }
                DrawCommand::Glyph { glyph, x, y, size, color } => {
                    if let Some(fill) = self.pen.fill(*color) {
                        ctx.set_fill_style_str(&fill);
                    }
                    if let Some(font) = self.pen.font(*size) {
                        ctx.set_font(&font);
                    }
                    let text = glyph.encode_utf8(&mut utf8);
                    let _ = ctx.fill_text(text, f64::from(*x), f64::from(*y));
                }
                DrawCommand::Text { text, x, y, size, color } => {
                    if let Some(fill) = self.pen.fill(*color) {
                        ctx.set_fill_style_str(&fill);
                    }
                    if let Some(font) = self.pen.font(*size) {
                        ctx.set_font(&font);
                    }
                    let _ = ctx.fill_text(text, f64::from(*x), f64::from(*y));
                }
            }
        }
    }

    fn listen(&mut self, event: HostEvent) -> GlyphResult<ListenerId> {
        let window = self
            .window
            .clone()
            .ok_or_else(|| rejected(event, &JsValue::from_str("no window")))?;

        let listener = match event {
            HostEvent::Resize => self.dom_listener(event, window.into(), "resize", |session, e| {
                session.on_resize(e.time_stamp());
            })?,
            HostEvent::PointerMove => {
                let canvas = self.canvas.clone();
                self.dom_listener(event, window.into(), "mousemove", move |session, e| {
                    if let Ok(mouse) = e.dyn_into::<MouseEvent>() {
                        let rect = canvas.get_bounding_client_rect();
                        let (x, y) = canvas::surface_point(
                            f64::from(mouse.client_x()),
                            f64::from(mouse.client_y()),
                            rect.left(),
                            rect.top(),
                        );
                        session.on_pointer_move(x, y);
                    }
                })?
            }
            HostEvent::PointerLeave => {
                let target: EventTarget = window
                    .document()
                    .and_then(|d| d.document_element())
                    .map_or_else(|| window.clone().into(), Into::into);
                self.dom_listener(event, target, "mouseleave", |session, _| {
                    session.on_pointer_leave();
                })?
            }
            HostEvent::Visibility => self.visibility_listener()?,
        };

        let id = ListenerId(self.next_id());
        self.listeners.push((id, listener));
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(index) = self.listeners.iter().position(|(l, _)| *l == id) else {
            return;
        };
        let (_, listener) = self.listeners.swap_remove(index);
        match &listener {
            Listener::Dom { target, kind, closure } => {
                let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            Listener::Observer { observer, .. } => observer.disconnect(),
        }
        self.spent_listeners.push(listener);
    }

    fn schedule(&mut self, schedule: Schedule) -> GlyphResult<TimerId> {
        let weak = self.session.clone();
        let timer = match schedule {
            Schedule::NextFrame => {
                // Frame requests are one-shot; anything still listed has fired.
                let (fired, live): (Vec<_>, Vec<_>) = self
                    .timers
                    .drain(..)
                    .partition(|(_, t)| matches!(t, Timer::Frame { .. }));
                self.timers = live;
                self.spent_timers.extend(fired.into_iter().map(|(_, t)| t));

                let closure = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
                    dispatch(&weak, |session| session.on_frame(now));
                });
                let handle = self
                    .window()?
                    .request_animation_frame(closure.as_ref().unchecked_ref())
                    .map_err(|err| schedule_rejected(&err))?;
                Timer::Frame {
                    handle,
                    _closure: closure,
                }
            }
            Schedule::Every(interval_ms) => {
                let closure = Closure::<dyn FnMut()>::new(move || {
                    dispatch(&weak, |session| {
                        let now = session.host().now();
                        session.on_frame(now);
                    });
                });
                let handle = self
                    .window()?
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        interval_ms.round() as i32,
                    )
                    .map_err(|err| schedule_rejected(&err))?;
                Timer::Interval {
                    handle,
                    _closure: closure,
                }
            }
        };

        let id = TimerId(self.next_id());
        self.timers.push((id, timer));
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        let Some(index) = self.timers.iter().position(|(t, _)| *t == id) else {
            return;
        };
        let (_, timer) = self.timers.swap_remove(index);
        if let Some(window) = self.window.as_ref() {
            match &timer {
                Timer::Frame { handle, .. } => {
                    let _ = window.cancel_animation_frame(*handle);
                }
                Timer::Interval { handle, .. } => window.clear_interval_with_handle(*handle),
            }
        }
        self.spent_timers.push(timer);
    }
}

/// Runs `f` on a live session. Callbacks that outlived their session, or
/// that arrive while it is already borrowed, do nothing.
pub(crate) fn dispatch(weak: &Weak<RefCell<WebSession>>, f: impl FnOnce(&mut WebSession)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut session) = shared.try_borrow_mut() else {
        return;
    };
    if session.state() == SessionState::Destroyed {
        return;
    }
    session.host_mut().reap();
    f(&mut session);
}

fn rejected(event: HostEvent, err: &JsValue) -> GlyphError {
    let reason = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    warn!(?event, %reason, "listener registration failed");
    GlyphError::ListenerRejected { event, reason }
}

fn schedule_rejected(err: &JsValue) -> GlyphError {
    GlyphError::ScheduleRejected(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
