//! Presencelog - durable audit trail for device-detection events
//!
//! This library subscribes to a stream of proximity/presence events emitted
//! by a sensing platform and persists a filtered subset to an append-only,
//! timestamped CSV logfile for downstream analysis.
//!
//! # Architecture
//!
//! ```text
//! UDP datagrams ─► EventReceiver ─► DetectionFeed ─► EventLogger ─► CSV file
//!                  (JSON parse)     (broadcast)      (filter chain)
//! ```
//!
//! The [`logfile::EventLogger`] runs the synchronous filter chain for every
//! delivered event: infrastructure-transmission suppression, structural
//! validity, accept/reject criteria, receiver whitelisting. Accepted events
//! are serialized to CSV, optionally suffixed with the current GPS position,
//! and appended to a logfile whose name is fixed at construction.

pub mod config;
pub mod event;
pub mod feed;
pub mod gps;
pub mod log;
pub mod logfile;
pub mod telemetry;

/// Library version, from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
