//! Point-in-time view of the pipeline counters.

use std::fmt;

/// A copy of the logger counters at one moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Events delivered to the logger.
    pub events_received: u64,
    /// Infrastructure transmissions suppressed.
    pub events_suppressed: u64,
    /// Events dropped by validity, criteria or whitelist checks.
    pub events_filtered: u64,
    /// Rows appended to the logfile.
    pub rows_written: u64,
    /// Appends that failed.
    pub write_failures: u64,
}

impl TelemetrySnapshot {
    /// Events that were neither written nor counted as failures.
    pub fn events_dropped(&self) -> u64 {
        self.events_suppressed + self.events_filtered
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received {}, suppressed {}, filtered {}, written {}, write failures {}",
            self.events_received,
            self.events_suppressed,
            self.events_filtered,
            self.rows_written,
            self.write_failures
        )
    }
}
