//! Logger configuration.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::event::FilterSpec;
use crate::event::Tiraid;

/// Default logfile base name.
pub const DEFAULT_LOGFILE_NAME: &str = "eventlog";

/// Default infrastructure-transmission handling: log them.
pub const DEFAULT_IGNORE_INFRASTRUCTURE_TX: bool = false;

/// Receiver whitelist: either the accept-all sentinel or a finite set of
/// receiver identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Whitelist {
    /// Accept every tiraid, decodings or not.
    #[default]
    All,

    /// Accept a tiraid when any of its decoding receivers is in the set.
    Receivers(HashSet<String>),
}

impl Whitelist {
    /// Build a finite whitelist from receiver identifiers.
    pub fn receivers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Whitelist::Receivers(ids.into_iter().map(Into::into).collect())
    }

    /// Whether the given tiraid passes this whitelist.
    ///
    /// The check is order-independent and short-circuits on the first
    /// matching receiver. A tiraid with zero decodings never passes a
    /// finite whitelist.
    pub fn allows(&self, tiraid: &Tiraid) -> bool {
        match self {
            Whitelist::All => true,
            Whitelist::Receivers(set) => tiraid
                .radio_decodings
                .iter()
                .any(|d| set.contains(&d.identifier.value)),
        }
    }
}

/// Configuration for an [`EventLogger`](super::EventLogger).
///
/// Immutable for the logger's lifetime once construction completes.
#[derive(Debug, Clone)]
pub struct LogfileConfig {
    /// Directory the logfile is created in.
    pub directory: PathBuf,

    /// Logfile base name; the timestamp and extension are appended.
    pub base_name: String,

    /// Receiver whitelist.
    pub whitelist: Whitelist,

    /// Accept criteria; absent accepts everything.
    pub accept: Option<FilterSpec>,

    /// Reject criteria; absent rejects nothing.
    pub reject: Option<FilterSpec>,

    /// Drop transmissions originating from the sensing infrastructure.
    pub ignore_infrastructure_tx: bool,
}

impl LogfileConfig {
    /// Create a config with defaults, targeting the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            base_name: DEFAULT_LOGFILE_NAME.to_string(),
            whitelist: Whitelist::All,
            accept: None,
            reject: None,
            ignore_infrastructure_tx: DEFAULT_IGNORE_INFRASTRUCTURE_TX,
        }
    }

    /// Set the logfile base name.
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Set the receiver whitelist.
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Set the accept criteria.
    pub fn with_accept(mut self, spec: FilterSpec) -> Self {
        self.accept = Some(spec);
        self
    }

    /// Set the reject criteria.
    pub fn with_reject(mut self, spec: FilterSpec) -> Self {
        self.reject = Some(spec);
        self
    }

    /// Enable or disable infrastructure-transmission suppression.
    pub fn with_ignore_infrastructure_tx(mut self, ignore: bool) -> Self {
        self.ignore_infrastructure_tx = ignore;
        self
    }
}
