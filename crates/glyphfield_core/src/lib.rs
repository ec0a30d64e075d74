//! # GLYPHFIELD Core
//!
//! The particle field animation engine behind the portfolio's "binary rain"
//! section backgrounds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        SESSION PIPELINE                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Host Events → Session → Effect → DrawList → Host::present     │
//! │       ↓           ↓         ↓          ↓                      │
//! │  pointer/resize  limiter  particles   one batch per frame     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One [`Session`] is bound to one host surface. It seeds its [`Effect`],
//! registers the listeners it needs and arms its own frame loop. Dropping or
//! destroying the session releases all of it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use glyphfield_core::{FieldConfig, Section, Session};
//!
//! let config = Section::Skills.config();
//! let mut session = Session::create(my_host, config);
//!
//! // From the host's animation-frame callback:
//! session.on_frame(timestamp_ms);
//!
//! // On unmount (or just drop it):
//! session.destroy();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod effect;
pub mod error;
pub mod host;
pub mod math;
pub mod particle;
pub mod pointer;
pub mod presets;
pub mod rain;
pub mod render;
pub mod session;
pub mod style;
pub mod timing;

pub use config::{CompactProfile, DensityRange, FieldConfig, Mode, MountPolicy, RainConfig, SizeRange};
pub use effect::Effect;
pub use error::{GlyphError, GlyphResult};
pub use host::{Dimensions, Host, HostEvent, ListenerId, Schedule, TimerId};
pub use math::Vec2;
pub use particle::{Particle, ParticleField};
pub use pointer::PointerState;
pub use presets::Section;
pub use rain::SymbolRain;
pub use render::{DrawCommand, DrawList};
pub use session::{Session, SessionState, SessionStats};
pub use style::Color;
pub use timing::{Debouncer, FrameLimiter};
