//! Append sinks.
//!
//! The logger writes through an [`AppendSink`] so the append primitive can
//! be swapped out in tests. The standard sink is [`FileAppendSink`], which
//! opens, appends and closes per call: no buffering and no sync guarantee
//! beyond what the filesystem provides.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Destination for logfile lines.
pub trait AppendSink: Send + Sync {
    /// Append the given text verbatim.
    fn append(&self, text: &str) -> io::Result<()>;
}

/// Appends to a single file, creating it on first write.
#[derive(Debug)]
pub struct FileAppendSink {
    path: PathBuf,
}

impl FileAppendSink {
    /// Create a sink targeting the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AppendSink for FileAppendSink {
    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }
}
