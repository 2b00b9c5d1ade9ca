//! CLI error type.

use std::fmt;

use presencelog::config::ConfigError;
use presencelog::feed::FeedError;
use presencelog::logfile::LogfileError;

/// Errors surfaced to the user by the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem (file or flags).
    Config(String),

    /// Failed to load the configuration file.
    ConfigFile(ConfigError),

    /// Failed to create the event logfile.
    Logfile(LogfileError),

    /// Event feed failure (bind or receive).
    Feed(FeedError),

    /// Failed to create the Tokio runtime.
    Runtime(String),

    /// Failed to set up logging.
    Logging(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "configuration file error: {}", e),
            CliError::Logfile(e) => write!(f, "logfile error: {}", e),
            CliError::Feed(e) => write!(f, "event feed error: {}", e),
            CliError::Runtime(msg) => write!(f, "failed to create runtime: {}", msg),
            CliError::Logging(e) => write!(f, "failed to set up logging: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Logfile(e) => Some(e),
            CliError::Feed(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Config(_) | CliError::Runtime(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LogfileError> for CliError {
    fn from(e: LogfileError) -> Self {
        CliError::Logfile(e)
    }
}

impl From<FeedError> for CliError {
    fn from(e: FeedError) -> Self {
        CliError::Feed(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("missing whitelist".to_string());
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("missing whitelist"));
    }

    #[test]
    fn test_logfile_error_converts() {
        let err: CliError = LogfileError::CreateDirectoryFailed {
            path: "/nope".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(matches!(err, CliError::Logfile(_)));
    }
}
