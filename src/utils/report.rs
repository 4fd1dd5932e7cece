//! Result log.
//!
//! The log is append-only plain text, one record per trial:
//!
//! ```text
//! <abs error kernel 1>\t<abs error kernel 2>\t...
//! <ms kernel 1>\t<ms kernel 2>\t...
//! <blank line>
//! ```
//!
//! Columns follow registry order.

use crate::error::Result;
use crate::experiment::TrialRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Format one trial as its two log lines plus the separator.
pub fn format_record(record: &TrialRecord) -> String {
    let join = |values: Vec<f64>, precision: Option<usize>| {
        values
            .iter()
            .map(|v| match precision {
                Some(p) => format!("{:.*}", p, v),
                None => format!("{:e}", v),
            })
            .collect::<Vec<_>>()
            .join("\t")
    };
    format!(
        "{}\n{}\n\n",
        join(record.errors(), None),
        join(record.times_ms(), Some(3))
    )
}

/// Append-only result log
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record; the file is created on first use.
    pub fn append(&self, record: &TrialRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_record(record).as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
