//! JavaScript entry points.

use std::cell::RefCell;
use std::rc::Rc;

use glyphfield_core::{FieldConfig, GlyphResult, Section, Session, SessionState};
use tracing::warn;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::HtmlCanvasElement;

use crate::host::{WebHost, WebSession};

/// Installs the panic hook once the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// A mounted field. Dropping or freeing it unmounts.
#[wasm_bindgen]
pub struct FieldHandle {
    session: Option<Rc<RefCell<WebSession>>>,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Tears the field down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(shared) = self.session.take() {
            if let Ok(mut session) = shared.try_borrow_mut() {
                session.destroy();
            }
        }
    }

    /// Live particle (or rain column) count.
    #[wasm_bindgen(js_name = particleCount)]
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.try_borrow().ok().map(|s| s.particle_count()))
            .unwrap_or(0)
    }

    /// Returns true while the field animates.
    #[wasm_bindgen(js_name = isRunning)]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| {
            s.try_borrow()
                .is_ok_and(|s| s.state() == SessionState::Running && s.is_animated())
        })
    }
}

/// Mounts a field configured by a JSON document (snake_case keys, missing
/// keys take their defaults).
///
/// A malformed or invalid config yields an inert handle.
#[wasm_bindgen]
#[must_use]
pub fn mount(canvas: HtmlCanvasElement, config_json: &str) -> FieldHandle {
    mount_with(canvas, FieldConfig::from_json_str(config_json))
}

/// Mounts the preset of a named section (`"hero"`, `"tech-stack"`, ...).
///
/// An unknown name yields an inert handle.
#[wasm_bindgen]
#[must_use]
pub fn mount_section(canvas: HtmlCanvasElement, section: &str) -> FieldHandle {
    mount_with(canvas, Section::config_for(section))
}

fn mount_with(canvas: HtmlCanvasElement, config: GlyphResult<FieldConfig>) -> FieldHandle {
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "field not mounted");
            return FieldHandle { session: None };
        }
    };

    let session = Rc::new_cyclic(|weak| {
        RefCell::new(Session::create(WebHost::new(canvas, weak.clone()), config))
    });
    FieldHandle {
        session: Some(session),
    }
}
