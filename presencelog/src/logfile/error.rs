//! Error types for the logfile module.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while constructing an event logger.
///
/// Per-event append failures are deliberately not represented here: they
/// are logged and counted, never propagated.
#[derive(Debug)]
pub enum LogfileError {
    /// Failed to create the logfile directory.
    CreateDirectoryFailed { path: PathBuf, source: io::Error },

    /// Failed to write the CSV header row.
    HeaderWriteFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for LogfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogfileError::CreateDirectoryFailed { path, source } => {
                write!(
                    f,
                    "failed to create logfile directory {}: {}",
                    path.display(),
                    source
                )
            }
            LogfileError::HeaderWriteFailed { path, source } => {
                write!(
                    f,
                    "failed to write header to {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for LogfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogfileError::CreateDirectoryFailed { source, .. } => Some(source),
            LogfileError::HeaderWriteFailed { source, .. } => Some(source),
        }
    }
}
