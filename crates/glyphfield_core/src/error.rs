//! # Engine Error Types
//!
//! Errors never reach the page. The session turns every one of these into a
//! degraded (inert or static) field and logs it.

use thiserror::Error;

use crate::host::HostEvent;

/// Errors that can occur while configuring or mounting a field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    /// No preset exists under the given section name.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// The host refused to register an event listener.
    #[error("host rejected {event:?} listener: {reason}")]
    ListenerRejected {
        /// The event the listener was for.
        event: HostEvent,
        /// Host-provided reason.
        reason: String,
    },

    /// The host could not arm a frame or interval timer.
    #[error("host could not schedule frame: {0}")]
    ScheduleRejected(String),
}

/// Result type for engine operations.
pub type GlyphResult<T> = Result<T, GlyphError>;

impl From<toml::de::Error> for GlyphError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for GlyphError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
