//! Tracing bootstrap.
//!
//! The CLI calls one of these once at startup. `RUST_LOG` overrides the
//! default filter in both modes.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize console logging.
///
/// `verbose` lowers the default level from `info` to `debug`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Initialize logging to `presencelog.log` in the given directory.
///
/// Returns the worker guard; dropping it flushes and stops the writer, so
/// the caller must hold it for the process lifetime.
pub fn init_tracing_to_file(directory: &Path, verbose: bool) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, "presencelog.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
