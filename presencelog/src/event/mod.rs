//! Detection event model.
//!
//! This module contains the data types delivered by the sensing platform and
//! the predicates the logging pipeline evaluates against them. Types here
//! mirror the platform's JSON wire format; interpretation (whitelisting,
//! logging decisions) is the responsibility of consumers like the
//! [`crate::logfile`] module.
//!
//! # Example
//!
//! ```ignore
//! use presencelog::event::{DetectionEvent, EventCategory};
//!
//! let event: DetectionEvent = serde_json::from_str(datagram)?;
//! if event.is_valid() && !event.tiraid.is_infrastructure_transmission() {
//!     // hand to the logger
//! }
//! ```

mod criteria;
pub mod csv;
mod tiraid;

use serde::{Deserialize, Serialize};

pub use criteria::{passes_criteria, FilterSpec};
pub use tiraid::{Identifier, RadioDecoding, Tiraid};

/// Category of a detection event, as emitted by the sensing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    /// A device has been detected for the first time.
    Appearance,
    /// A device moved to a different strongest receiver.
    Displacement,
    /// A device is no longer detected.
    Disappearance,
    /// A device is still present and unchanged.
    KeepAlive,
}

impl EventCategory {
    /// The wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Appearance => "appearance",
            EventCategory::Displacement => "displacement",
            EventCategory::Disappearance => "disappearance",
            EventCategory::KeepAlive => "keep-alive",
        }
    }

    /// All categories the platform emits.
    pub fn all() -> [EventCategory; 4] {
        [
            EventCategory::Appearance,
            EventCategory::Displacement,
            EventCategory::Disappearance,
            EventCategory::KeepAlive,
        ]
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detection event: one sighting of a transmitting device.
///
/// Events are consumed once per delivery and not retained after logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Event category.
    #[serde(rename = "event")]
    pub category: EventCategory,

    /// Event time in milliseconds since the Unix epoch.
    pub time: i64,

    /// Transmitter-identification record for the sighted device.
    pub tiraid: Tiraid,
}

impl DetectionEvent {
    /// Create a new detection event.
    pub fn new(category: EventCategory, time: i64, tiraid: Tiraid) -> Self {
        Self {
            category,
            time,
            tiraid,
        }
    }

    /// Structural validity of this event.
    ///
    /// An event is valid when it carries a positive timestamp and a
    /// non-empty transmitter identifier. An event with zero radio decodings
    /// is still valid: receivers are only required by a finite whitelist.
    pub fn is_valid(&self) -> bool {
        self.time > 0 && !self.tiraid.identifier.value.is_empty()
    }
}
