//! Atomic counters for the logging pipeline.

use std::sync::atomic::{AtomicU64, Ordering};

use super::TelemetrySnapshot;

/// Counters recorded by the event logger.
///
/// All counters are monotonic and updated with relaxed ordering; readers
/// take a [`TelemetrySnapshot`] rather than reading counters individually.
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    events_received: AtomicU64,
    events_suppressed: AtomicU64,
    events_filtered: AtomicU64,
    rows_written: AtomicU64,
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// An event was delivered to the logger.
    pub fn event_received(&self) {
        self.events_received.fetch_add(1, Ordering::Relaxed);
    }

    /// An infrastructure transmission was suppressed.
    pub fn event_suppressed(&self) {
        self.events_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// An event was dropped by validity, criteria or whitelist checks.
    pub fn event_filtered(&self) {
        self.events_filtered.fetch_add(1, Ordering::Relaxed);
    }

    /// A row was appended to the logfile.
    pub fn row_written(&self) {
        self.rows_written.fetch_add(1, Ordering::Relaxed);
    }

    /// An append failed.
    pub fn write_failed(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            events_received: self.events_received.load(Ordering::Relaxed),
            events_suppressed: self.events_suppressed.load(Ordering::Relaxed),
            events_filtered: self.events_filtered.load(Ordering::Relaxed),
            rows_written: self.rows_written.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}
