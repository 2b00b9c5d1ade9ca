//! GPS position access for logfile augmentation.
//!
//! The position is read at serialization time, never at event-generation
//! time, so the logger takes a read-only accessor rather than a snapshot.
//! [`SharedGpsPosition`] is the standard implementation: a clonable handle
//! to externally updated state that may or may not currently hold a fix.

use std::sync::Arc;

use parking_lot::RwLock;

/// A GPS fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
}

impl GpsFix {
    /// Create a new fix.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Read-only access to the current position.
pub trait PositionProvider: Send + Sync {
    /// The current fix, or `None` when no position is known.
    fn current_position(&self) -> Option<GpsFix>;
}

/// Clonable, externally updated position state.
///
/// The owner (a GPS bridge, a telemetry task) calls [`update`](Self::update)
/// as fixes arrive; readers see whatever was most recently written.
#[derive(Debug, Clone, Default)]
pub struct SharedGpsPosition {
    state: Arc<RwLock<Option<GpsFix>>>,
}

impl SharedGpsPosition {
    /// Create with no known position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial fix (stationary deployments).
    pub fn with_fix(fix: GpsFix) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(fix))),
        }
    }

    /// Record a new fix.
    pub fn update(&self, fix: GpsFix) {
        *self.state.write() = Some(fix);
    }

    /// Forget the current fix (signal lost).
    pub fn clear(&self) {
        *self.state.write() = None;
    }
}

impl PositionProvider for SharedGpsPosition {
    fn current_position(&self) -> Option<GpsFix> {
        *self.state.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_without_fix() {
        let position = SharedGpsPosition::new();
        assert!(position.current_position().is_none());
    }

    #[test]
    fn test_update_and_read() {
        let position = SharedGpsPosition::new();
        position.update(GpsFix::new(45.5, -73.6));

        let fix = position.current_position().unwrap();
        assert_eq!(fix.latitude, 45.5);
        assert_eq!(fix.longitude, -73.6);
    }

    #[test]
    fn test_clones_share_state() {
        let position = SharedGpsPosition::new();
        let reader = position.clone();

        position.update(GpsFix::new(1.0, 2.0));
        assert_eq!(reader.current_position(), Some(GpsFix::new(1.0, 2.0)));
    }

    #[test]
    fn test_clear_forgets_fix() {
        let position = SharedGpsPosition::with_fix(GpsFix::new(1.0, 2.0));
        position.clear();
        assert!(position.current_position().is_none());
    }
}
