#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use storefront::config::AppConfig;
use storefront::error::RemoteError;
use storefront::record::Fields;
use storefront::remote::RemoteStore;

/// In-process stand-in for the remote sheet API
#[derive(Default)]
pub struct MemorySheet {
    tables: Mutex<HashMap<String, Vec<Fields>>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemorySheet {
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn rows(&self, table: &str) -> Vec<Fields> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn seed(&self, table: &str, rows: Vec<Fields>) {
        self.tables.lock().unwrap().insert(table.to_string(), rows);
    }
}

impl RemoteStore for MemorySheet {
    fn read(&self, table: &str) -> Result<Vec<Fields>, RemoteError> {
        if self.fail_reads {
            return Err(RemoteError::Unavailable("connection refused".to_string()));
        }
        Ok(self.rows(table))
    }

    fn update(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        if self.fail_writes {
            return Err(RemoteError::Unavailable("timed out".to_string()));
        }
        let rows = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| c.to_string())
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect();
        self.seed(table, rows);
        Ok(())
    }
}

pub fn as_remote(sheet: &Arc<MemorySheet>) -> Option<Arc<dyn RemoteStore>> {
    let remote: Arc<dyn RemoteStore> = sheet.clone();
    Some(remote)
}

/// Config keeping every table inside `dir` and no logo
pub fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        logo_path: None,
        ..Default::default()
    }
}

pub fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
