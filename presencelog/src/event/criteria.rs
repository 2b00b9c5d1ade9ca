//! Accept/reject pass criteria.
//!
//! A [`FilterSpec`] describes constraints an event can be tested against.
//! The logger is configured with an optional accept spec and an optional
//! reject spec: an absent accept spec accepts everything, an absent reject
//! spec rejects nothing, and rejection wins over acceptance.

use serde::{Deserialize, Serialize};

use super::{DetectionEvent, EventCategory};

/// Constraints an event must satisfy to match this spec.
///
/// Every present field must hold for the spec to match; absent fields are
/// unconstrained. RSSI constraints apply to the strongest decoding and
/// never match an event with no decodings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Restrict to these event categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<EventCategory>>,

    /// Minimum RSSI of the strongest decoding, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rssi: Option<i16>,

    /// Maximum RSSI of the strongest decoding, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rssi: Option<i16>,

    /// Restrict to events decoded by at least one of these receivers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receivers: Option<Vec<String>>,
}

impl FilterSpec {
    /// Create an unconstrained spec (matches every event).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given categories.
    pub fn with_categories(mut self, categories: Vec<EventCategory>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Set the minimum strongest-decoding RSSI.
    pub fn with_min_rssi(mut self, rssi: i16) -> Self {
        self.min_rssi = Some(rssi);
        self
    }

    /// Set the maximum strongest-decoding RSSI.
    pub fn with_max_rssi(mut self, rssi: i16) -> Self {
        self.max_rssi = Some(rssi);
        self
    }

    /// Restrict to events seen by at least one of the given receivers.
    pub fn with_receivers(mut self, receivers: Vec<String>) -> Self {
        self.receivers = Some(receivers);
        self
    }

    /// Whether the given event satisfies every present constraint.
    pub fn matches(&self, event: &DetectionEvent) -> bool {
        if let Some(ref categories) = self.categories {
            if !categories.contains(&event.category) {
                return false;
            }
        }

        if self.min_rssi.is_some() || self.max_rssi.is_some() {
            let Some(strongest) = event.tiraid.strongest_decoding() else {
                return false;
            };
            if let Some(min) = self.min_rssi {
                if strongest.rssi < min {
                    return false;
                }
            }
            if let Some(max) = self.max_rssi {
                if strongest.rssi > max {
                    return false;
                }
            }
        }

        if let Some(ref receivers) = self.receivers {
            let seen = event
                .tiraid
                .radio_decodings
                .iter()
                .any(|d| receivers.iter().any(|r| r == &d.identifier.value));
            if !seen {
                return false;
            }
        }

        true
    }
}

/// Evaluate an event against optional accept and reject specs.
///
/// The event passes when it matches the accept spec (or none is given) and
/// does not match the reject spec.
pub fn passes_criteria(
    event: &DetectionEvent,
    accept: Option<&FilterSpec>,
    reject: Option<&FilterSpec>,
) -> bool {
    let accepted = accept.map_or(true, |spec| spec.matches(event));
    let rejected = reject.is_some_and(|spec| spec.matches(event));
    accepted && !rejected
}
