//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/presencelog/config.ini`
//! (e.g. `~/.config/presencelog/config.ini` on Linux). A missing file or
//! missing keys fall back to defaults; CLI flags override file values.
//!
//! ```ini
//! [logfile]
//! directory = /var/log/presence
//! name = eventlog
//! whitelist = all            ; or comma-separated receiver ids
//! ignore_infrastructure_tx = false
//!
//! [feed]
//! port = 50001
//!
//! [filter]
//! min_rssi = -85             ; accept criteria, optional
//!
//! [gps]
//! lat = 45.5                 ; static fix, optional
//! lon = -73.6
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::event::FilterSpec;
use crate::feed::DEFAULT_EVENT_PORT;
use crate::logfile::{Whitelist, DEFAULT_LOGFILE_NAME};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the INI file.
    #[error("failed to load config from {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// A key holds a value of the wrong type.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Path of the configuration file, under the platform config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("presencelog")
        .join("config.ini")
}

/// Logfile settings.
#[derive(Debug, Clone)]
pub struct LogfileSection {
    /// Directory the logfile is created in.
    pub directory: PathBuf,
    /// Logfile base name.
    pub name: String,
    /// Receiver whitelist.
    pub whitelist: Whitelist,
    /// Drop infrastructure transmissions.
    pub ignore_infrastructure_tx: bool,
}

impl Default for LogfileSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            name: DEFAULT_LOGFILE_NAME.to_string(),
            whitelist: Whitelist::All,
            ignore_infrastructure_tx: false,
        }
    }
}

/// Event feed settings.
#[derive(Debug, Clone)]
pub struct FeedSection {
    /// UDP port the event receiver listens on.
    pub port: u16,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            port: DEFAULT_EVENT_PORT,
        }
    }
}

/// Accept/reject criteria settings.
#[derive(Debug, Clone, Default)]
pub struct FilterSection {
    /// Accept criteria; absent accepts everything.
    pub accept: Option<FilterSpec>,
    /// Reject criteria; absent rejects nothing.
    pub reject: Option<FilterSpec>,
}

/// Static GPS fix settings, for stationary deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpsSection {
    /// Latitude in degrees.
    pub lat: Option<f64>,
    /// Longitude in degrees.
    pub lon: Option<f64>,
}

impl GpsSection {
    /// The configured fix when both coordinates are present.
    pub fn fix(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// The loaded configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    /// `[logfile]` section.
    pub logfile: LogfileSection,
    /// `[feed]` section.
    pub feed: FeedSection,
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[gps]` section.
    pub gps: GpsSection,
}

impl ConfigFile {
    /// Load from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some("logfile")) {
            if let Some(directory) = section.get("directory") {
                config.logfile.directory = PathBuf::from(directory);
            }
            if let Some(name) = section.get("name") {
                config.logfile.name = name.to_string();
            }
            if let Some(whitelist) = section.get("whitelist") {
                config.logfile.whitelist = parse_whitelist(whitelist);
            }
            if let Some(ignore) = section.get("ignore_infrastructure_tx") {
                config.logfile.ignore_infrastructure_tx =
                    parse_bool("logfile.ignore_infrastructure_tx", ignore)?;
            }
        }

        if let Some(section) = ini.section(Some("feed")) {
            if let Some(port) = section.get("port") {
                config.feed.port =
                    port.parse()
                        .map_err(|_| ConfigError::InvalidValue {
                            key: "feed.port".to_string(),
                            value: port.to_string(),
                        })?;
            }
        }

        if let Some(section) = ini.section(Some("filter")) {
            let mut accept = FilterSpec::new();
            let mut constrained = false;
            if let Some(min) = section.get("min_rssi") {
                accept.min_rssi = Some(parse_i16("filter.min_rssi", min)?);
                constrained = true;
            }
            if let Some(max) = section.get("max_rssi") {
                accept.max_rssi = Some(parse_i16("filter.max_rssi", max)?);
                constrained = true;
            }
            if constrained {
                config.filter.accept = Some(accept);
            }
        }

        if let Some(section) = ini.section(Some("gps")) {
            if let Some(lat) = section.get("lat") {
                config.gps.lat = Some(parse_f64("gps.lat", lat)?);
            }
            if let Some(lon) = section.get("lon") {
                config.gps.lon = Some(parse_f64("gps.lon", lon)?);
            }
        }

        Ok(config)
    }
}

/// Parse a whitelist value: the `all` sentinel or comma-separated ids.
pub fn parse_whitelist(value: &str) -> Whitelist {
    if value.trim().eq_ignore_ascii_case("all") {
        Whitelist::All
    } else {
        Whitelist::receivers(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        )
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_i16(key: &str, value: &str) -> Result<i16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
