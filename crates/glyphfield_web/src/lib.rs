//! # GLYPHFIELD Web
//!
//! Browser host for the glyph field engine.
//!
//! ```text
//! JS: mount(canvas, json) ──▶ Rc<RefCell<Session<WebHost>>> ◀──Weak── DOM callbacks
//!          │                          │
//!          ▼                          ▼
//!     FieldHandle               2D context draws
//! ```
//!
//! ## Usage (JavaScript)
//!
//! ```js
//! import init, { mount_section } from "./glyphfield_web.js";
//!
//! await init();
//! const field = mount_section(canvas, "skills");
//! // ...on unmount:
//! field.unmount();
//! ```
//!
//! Everything browser-specific only builds for `wasm32`. The drawing helpers
//! in [`canvas`] are platform independent.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::perf)]
#![warn(clippy::pedantic)]

pub mod canvas;

#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod mount;

#[cfg(target_arch = "wasm32")]
pub use mount::{mount, mount_section, FieldHandle};
