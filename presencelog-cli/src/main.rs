//! Presencelog CLI.
//!
//! Listens for presence detection events from the sensing platform and
//! appends a filtered subset to a timestamped CSV logfile. Runs until
//! interrupted; Ctrl-C shuts the pipeline down and prints the counters.

mod error;
mod run;

use std::path::PathBuf;

use clap::Parser;

/// Append-only CSV audit trail for presence detection events.
#[derive(Debug, Parser)]
#[command(name = "presencelog", version = presencelog::VERSION)]
pub struct Cli {
    /// UDP port to listen on for platform events
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory the logfile is created in
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Logfile base name (timestamp and .csv extension are appended)
    #[arg(long)]
    pub name: Option<String>,

    /// Receiver whitelist: "all" or comma-separated receiver identifiers
    #[arg(long)]
    pub whitelist: Option<String>,

    /// Drop transmissions originating from the sensing infrastructure
    #[arg(long)]
    pub ignore_infrastructure: bool,

    /// Static GPS latitude to append to each row
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Static GPS longitude to append to each row
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Path to config.ini (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write diagnostics to presencelog.log instead of the console
    #[arg(long)]
    pub log_to_file: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_lat_requires_lon() {
        let result = Cli::try_parse_from(["presencelog", "--lat", "45.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_longitude_parses() {
        let cli =
            Cli::try_parse_from(["presencelog", "--lat", "45.5", "--lon", "-73.6"]).unwrap();
        assert_eq!(cli.lat, Some(45.5));
        assert_eq!(cli.lon, Some(-73.6));
    }
}
