//! Daemon run loop: config resolution, runtime setup, shutdown wiring.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::info;

use presencelog::config::{parse_whitelist, ConfigFile};
use presencelog::feed::{DetectionFeed, EventReceiver, EventReceiverConfig};
use presencelog::gps::{GpsFix, PositionProvider, SharedGpsPosition};
use presencelog::log::{init_tracing, init_tracing_to_file};
use presencelog::logfile::{spawn_event_logger, EventLogger, LogfileConfig, Whitelist};

use crate::error::CliError;
use crate::Cli;

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone)]
struct ResolvedSettings {
    directory: PathBuf,
    base_name: String,
    whitelist: Whitelist,
    ignore_infrastructure: bool,
    port: u16,
    fix: Option<GpsFix>,
}

/// Merge settings: CLI > config file > default.
fn resolve_settings(cli: &Cli, config_file: &ConfigFile) -> ResolvedSettings {
    ResolvedSettings {
        directory: cli
            .directory
            .clone()
            .unwrap_or_else(|| config_file.logfile.directory.clone()),
        base_name: cli
            .name
            .clone()
            .unwrap_or_else(|| config_file.logfile.name.clone()),
        whitelist: match cli.whitelist {
            Some(ref value) => parse_whitelist(value),
            None => config_file.logfile.whitelist.clone(),
        },
        ignore_infrastructure: cli.ignore_infrastructure
            || config_file.logfile.ignore_infrastructure_tx,
        port: cli.port.unwrap_or(config_file.feed.port),
        fix: cli
            .lat
            .zip(cli.lon)
            .or_else(|| config_file.gps.fix())
            .map(|(lat, lon)| GpsFix::new(lat, lon)),
    }
}

/// Run the logging daemon until Ctrl-C.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let config_file = match cli.config {
        Some(ref path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    let settings = resolve_settings(&cli, &config_file);
    let port = settings.port;

    // The guard flushes the file writer on drop; hold it until exit
    let _log_guard = if cli.log_to_file {
        Some(init_tracing_to_file(&settings.directory, cli.verbose).map_err(CliError::Logging)?)
    } else {
        init_tracing(cli.verbose);
        None
    };

    let position: Option<Arc<dyn PositionProvider>> = settings
        .fix
        .map(|f| Arc::new(SharedGpsPosition::with_fix(f)) as Arc<dyn PositionProvider>);

    let mut logfile_config = LogfileConfig::new(settings.directory)
        .with_base_name(settings.base_name)
        .with_whitelist(settings.whitelist)
        .with_ignore_infrastructure_tx(settings.ignore_infrastructure);
    if let Some(accept) = config_file.filter.accept.clone() {
        logfile_config = logfile_config.with_accept(accept);
    }
    if let Some(reject) = config_file.filter.reject.clone() {
        logfile_config = logfile_config.with_reject(reject);
    }

    let runtime = Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;

    let cancellation = CancellationToken::new();
    let ctrlc_cancel = cancellation.clone();
    ctrlc::set_handler(move || {
        ctrlc_cancel.cancel();
    })
    .map_err(|e| CliError::Config(format!("failed to install Ctrl-C handler: {}", e)))?;

    runtime.block_on(async {
        let logger = Arc::new(EventLogger::create(logfile_config, position)?);
        let metrics = logger.metrics();

        println!("Presencelog v{}", presencelog::VERSION);
        println!("Logging events to {}", logger.path().display());
        println!("Listening for events on UDP port {}", port);
        println!("Press Ctrl-C to stop");

        let feed = DetectionFeed::with_defaults();
        let logger_handle =
            spawn_event_logger(Arc::clone(&logger), feed.subscribe(), cancellation.clone());

        let receiver_config = EventReceiverConfig {
            port,
            ..Default::default()
        };
        let receiver = EventReceiver::new(receiver_config, feed.clone());
        let receiver_result = receiver.run(cancellation.clone()).await;

        // Stop the logger whether the receiver ended by cancel or error
        cancellation.cancel();
        drop(feed);
        let _ = logger_handle.await;

        info!("pipeline stopped");
        println!("{}", metrics.snapshot());

        receiver_result.map_err(CliError::Feed)
    })
}
