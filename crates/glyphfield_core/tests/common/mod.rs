//! Scripted host shared by the integration tests.

#![allow(dead_code)]

use glyphfield_core::{
    Dimensions, DrawList, GlyphError, GlyphResult, Host, HostEvent, ListenerId, Schedule, TimerId,
};

/// Host whose surface, viewport and failures are set by the test.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    /// What `measure` returns.
    pub surface: Option<Dimensions>,
    /// What `viewport_width` returns.
    pub viewport: f32,
    /// Live listeners.
    pub listeners: Vec<(ListenerId, HostEvent)>,
    /// Live timers.
    pub timers: Vec<(TimerId, Schedule)>,
    /// Every presented frame.
    pub frames: Vec<DrawList>,
    /// Refuse this listener.
    pub refuse_event: Option<HostEvent>,
    /// Refuse every schedule call.
    pub refuse_schedule: bool,
    /// Number of `schedule` calls.
    pub schedule_calls: usize,
    next_id: u32,
}

impl ScriptedHost {
    /// Host with a surface that fills a viewport of the same width.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            surface: Some(Dimensions::new(width, height)),
            viewport: width,
            ..Self::default()
        }
    }

    /// Refuses listener registration for `event`.
    pub fn refusing(mut self, event: HostEvent) -> Self {
        self.refuse_event = Some(event);
        self
    }

    /// Refuses every schedule call.
    pub fn refusing_schedule(mut self) -> Self {
        self.refuse_schedule = true;
        self
    }

    /// Resizes the surface and viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface = Some(Dimensions::new(width, height));
        self.viewport = width;
    }

    /// Events with a live listener.
    pub fn events(&self) -> Vec<HostEvent> {
        self.listeners.iter().map(|(_, e)| *e).collect()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for ScriptedHost {
    fn measure(&mut self) -> Option<Dimensions> {
        self.surface
    }

    fn viewport_width(&self) -> f32 {
        self.viewport
    }

    fn entropy(&mut self) -> u64 {
        0x5EED
    }

    fn present(&mut self, list: &DrawList) {
        self.frames.push(list.clone());
    }

    fn listen(&mut self, event: HostEvent) -> GlyphResult<ListenerId> {
        if self.refuse_event == Some(event) {
            return Err(GlyphError::ListenerRejected {
                event,
                reason: "refused by test".to_owned(),
            });
        }
        let id = ListenerId(self.next());
        self.listeners.push((id, event));
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _)| *l != id);
    }

    fn schedule(&mut self, schedule: Schedule) -> GlyphResult<TimerId> {
        self.schedule_calls += 1;
        if self.refuse_schedule {
            return Err(GlyphError::ScheduleRejected("refused by test".to_owned()));
        }
        let id = TimerId(self.next());
        // A fired frame request is gone; keep only the live one.
        self.timers.retain(|(_, s)| *s != Schedule::NextFrame);
        self.timers.push((id, schedule));
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|(t, _)| *t != id);
    }
}
