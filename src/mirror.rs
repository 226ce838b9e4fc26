//! Dual-destination table persistence.
//!
//! Each table has a local CSV file and, optionally, a remote spreadsheet
//! copy. Both are mirrors of the in-memory table that a store owns for the
//! session:
//!
//! * loading prefers the remote copy and falls back to the local file on any
//!   remote failure;
//! * persisting always writes the local file first and then tries the remote
//!   one; a remote failure is reported back but never undoes the local write.
//!
//! Writes are whole-table overwrites with last-writer-wins semantics. A
//! single admin session is assumed; two concurrent writers silently lose
//! each other's updates.

use crate::error::Result;
use crate::record::Record;
use crate::remote::RemoteStore;
use crate::saving;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a loaded table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Local,
    /// Neither mirror had data
    Empty,
}

/// Outcome of a persist that reached at least the local file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PersistReport {
    /// Set when the remote copy could not be updated
    pub remote_warning: Option<String>,
}

impl PersistReport {
    pub fn is_clean(&self) -> bool {
        self.remote_warning.is_none()
    }
}

/// The pair of destinations backing one table
#[derive(Clone)]
pub struct Mirror {
    table: String,
    local: PathBuf,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl Mirror {
    pub fn new(table: &str, local: impl Into<PathBuf>, remote: Option<Arc<dyn RemoteStore>>) -> Self {
        Self {
            table: table.to_string(),
            local: local.into(),
            remote,
        }
    }

    /// Load the table: remote, then local file, then nothing
    ///
    /// # Errors
    /// * Only local read/parse failures; remote problems are logged and skipped
    pub fn load<R: Record>(&self) -> Result<(Vec<R>, Source)> {
        if let Some(remote) = &self.remote {
            match remote.read(&self.table) {
                Ok(rows) if !rows.is_empty() => {
                    log::debug!("Loaded {} rows of {} from remote", rows.len(), self.table);
                    return Ok((rows.iter().map(R::from_sheet).collect(), Source::Remote));
                }
                Ok(_) => log::info!("Remote {} is empty, trying local copy", self.table),
                Err(e) => log::warn!(
                    "Remote read of {} failed, falling back to {}: {}",
                    self.table,
                    self.local.display(),
                    e
                ),
            }
        }

        match saving::load_table(&self.local)? {
            Some(rows) => Ok((rows, Source::Local)),
            None => Ok((Vec::new(), Source::Empty)),
        }
    }

    /// Write the whole table to both destinations
    ///
    /// # Errors
    /// * Only if the local write fails; the remote is best-effort
    pub fn persist<R: Record>(&self, rows: &[R]) -> Result<PersistReport> {
        saving::save_table(rows, &self.local)?;

        let Some(remote) = &self.remote else {
            return Ok(PersistReport::default());
        };

        let cells: Vec<Vec<String>> = rows.iter().map(Record::to_fields).collect();
        match remote.update(&self.table, R::COLUMNS, &cells) {
            Ok(()) => Ok(PersistReport::default()),
            Err(e) => {
                log::warn!("Remote update of {} failed, local copy kept: {}", self.table, e);
                Ok(PersistReport {
                    remote_warning: Some(format!(
                        "Saved locally, but the cloud copy of {} was not updated: {}",
                        self.table, e
                    )),
                })
            }
        }
    }
}
