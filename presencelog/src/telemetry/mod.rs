//! Pipeline telemetry for observability and shutdown reporting.
//!
//! Lock-free atomic counters instrumenting the logging pipeline: how many
//! events arrived, how many each filter stage dropped, how many rows made
//! it to disk and how many appends failed.
//!
//! ```text
//! EventLogger ─────► LoggerMetrics ─────► TelemetrySnapshot ─────► CLI
//!                    (atomic counters)    (point-in-time copy)
//! ```

mod metrics;
mod snapshot;

pub use metrics::LoggerMetrics;
pub use snapshot::TelemetrySnapshot;
