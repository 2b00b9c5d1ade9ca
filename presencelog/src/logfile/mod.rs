//! Event logfile writing.
//!
//! [`EventLogger`] is the heart of the pipeline: it owns an immutable
//! configuration, runs the synchronous filter chain for every delivered
//! event and appends accepted events as CSV rows to a single logfile whose
//! name is fixed at construction.
//!
//! # Filter chain
//!
//! 1. Infrastructure suppression (when `ignore_infrastructure_tx` is set)
//! 2. Structural validity
//! 3. Accept/reject pass criteria
//! 4. Receiver whitelist
//!
//! Events failing any stage are silently dropped (counted in telemetry).
//! Accepted events become one CRLF-terminated append each, suffixed with
//! the current GPS position when a provider is attached.
//!
//! # Example
//!
//! ```ignore
//! use presencelog::logfile::{EventLogger, LogfileConfig, spawn_event_logger};
//!
//! let config = LogfileConfig::new("/var/log/presence");
//! let logger = EventLogger::create(config, None)?;
//! let handle = spawn_event_logger(logger.into(), feed.subscribe(), cancellation);
//! ```

mod config;
mod error;
pub mod filename;
mod sink;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::event::{csv, passes_criteria, DetectionEvent, FilterSpec};
use crate::gps::PositionProvider;
use crate::telemetry::LoggerMetrics;

pub use config::{LogfileConfig, Whitelist, DEFAULT_IGNORE_INFRASTRUCTURE_TX, DEFAULT_LOGFILE_NAME};
pub use error::LogfileError;
pub use sink::{AppendSink, FileAppendSink};

/// Line terminator for logfile rows.
const LINE_TERMINATOR: &str = "\r\n";

/// GPS columns appended to the header when a position provider is attached.
const GPS_HEADER_SUFFIX: &str = ",Lat,Lon";

/// Writes detection events to a local logfile.
pub struct EventLogger {
    whitelist: Whitelist,
    accept: Option<FilterSpec>,
    reject: Option<FilterSpec>,
    ignore_infrastructure_tx: bool,
    path: PathBuf,
    sink: Box<dyn AppendSink>,
    position: Option<Arc<dyn PositionProvider>>,
    metrics: Arc<LoggerMetrics>,
}

impl EventLogger {
    /// Create a logger writing to a file under the configured directory.
    ///
    /// The filename is computed exactly once, from the current local time,
    /// and never changes thereafter. The CSV header row (with `,Lat,Lon`
    /// iff a position provider is given) is appended before any event line.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or the header
    /// cannot be written. Per-event append failures later on are logged and
    /// counted, never returned.
    pub fn create(
        config: LogfileConfig,
        position: Option<Arc<dyn PositionProvider>>,
    ) -> Result<Self, LogfileError> {
        std::fs::create_dir_all(&config.directory).map_err(|source| {
            LogfileError::CreateDirectoryFailed {
                path: config.directory.clone(),
                source,
            }
        })?;

        let name = filename::logfile_name(&config.base_name, Local::now());
        let path = config.directory.join(name);
        let sink = Box::new(FileAppendSink::new(path.clone()));

        Self::with_sink(config, path, sink, position)
    }

    /// Create a logger writing through the given sink.
    ///
    /// This is the seam used by tests; `create` builds a [`FileAppendSink`]
    /// and delegates here. The header row is written immediately.
    pub fn with_sink(
        config: LogfileConfig,
        path: PathBuf,
        sink: Box<dyn AppendSink>,
        position: Option<Arc<dyn PositionProvider>>,
    ) -> Result<Self, LogfileError> {
        let logger = Self {
            whitelist: config.whitelist,
            accept: config.accept,
            reject: config.reject,
            ignore_infrastructure_tx: config.ignore_infrastructure_tx,
            path,
            sink,
            position,
            metrics: Arc::new(LoggerMetrics::new()),
        };

        let mut header = csv::CSV_HEADER.to_string();
        if logger.position.is_some() {
            header.push_str(GPS_HEADER_SUFFIX);
        }
        header.push_str(LINE_TERMINATOR);

        logger
            .sink
            .append(&header)
            .map_err(|source| LogfileError::HeaderWriteFailed {
                path: logger.path.clone(),
                source,
            })?;

        info!(path = %logger.path.display(), "event logfile created");
        Ok(logger)
    }

    /// The logfile path, fixed at construction.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The pipeline counters for this logger.
    pub fn metrics(&self) -> Arc<LoggerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Process one delivered event, appending a row if it passes the chain.
    ///
    /// Runs synchronously relative to delivery. Append failures are warned
    /// and counted; they never interrupt the pipeline.
    pub fn handle_event(&self, event: &DetectionEvent) {
        self.metrics.event_received();

        let is_ignored =
            self.ignore_infrastructure_tx && event.tiraid.is_infrastructure_transmission();
        if is_ignored {
            trace!(device = %event.tiraid.identifier.value, "infrastructure transmission suppressed");
            self.metrics.event_suppressed();
            return;
        }

        if !event.is_valid()
            || !passes_criteria(event, self.accept.as_ref(), self.reject.as_ref())
            || !self.whitelist.allows(&event.tiraid)
        {
            self.metrics.event_filtered();
            return;
        }

        // No row, no write
        let Some(mut row) = csv::to_csv_row(event) else {
            self.metrics.event_filtered();
            return;
        };

        // Position is read now, not at event-generation time
        if let Some(ref provider) = self.position {
            if let Some(fix) = provider.current_position() {
                row.push_str(&format!(",{},{}", fix.latitude, fix.longitude));
            }
        }
        row.push_str(LINE_TERMINATOR);

        match self.sink.append(&row) {
            Ok(()) => self.metrics.row_written(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "logfile append failed");
                self.metrics.write_failed();
            }
        }
    }
}

/// Spawn the subscription loop: one handler for all event categories.
///
/// Each received event is processed to completion before the next is taken.
/// The task ends on cancellation or when the feed closes. Lagged receivers
/// skip the overwritten events; the logger provides best-effort, in-order
/// submission only.
pub fn spawn_event_logger(
    logger: Arc<EventLogger>,
    mut events: broadcast::Receiver<DetectionEvent>,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = cancellation.cancelled() => {
                    debug!("event logger cancelled");
                    break;
                }

                result = events.recv() => {
                    match result {
                        Ok(event) => logger.handle_event(&event),
                        Err(broadcast::error::RecvError::Closed) => {
                            debug!("event feed closed");
                            break;
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            trace!("event logger lagged by {} events", n);
                        }
                    }
                }
            }
        }
    })
}
