//! Best-effort append-only jsonl logs. A failed write is reported on the
//! server's own diagnostic output and otherwise dropped; callers never see
//! the error and requests never fail because of it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::error;

#[derive(Debug, Clone)]
pub struct JsonlLog {
    path: PathBuf,
}

impl JsonlLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single JSON line. Errors are swallowed.
    pub fn append(&self, record: &Value) {
        if let Err(err) = self.try_append(record) {
            error!("failed to append to {}: {err}", self.path.display());
        }
    }

    fn try_append(&self, record: &Value) -> std::io::Result<()> {
        let mut line = record.to_string();
        line.push('\n');
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        // One write_all per record so concurrent writers interleave only at
        // the OS append granularity, keeping every line intact JSON.
        file.write_all(line.as_bytes())
    }
}
