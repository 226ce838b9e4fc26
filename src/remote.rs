//! Remote spreadsheet mirror.
//!
//! The remote service is a plain sheet-of-values API: every table is a grid
//! whose first row holds the column headers, read with `GET {base}/{table}`
//! and replaced wholesale with `PUT {base}/{table}`. Both directions use the
//! body `{"values": [[...header], [...row], ...]}`.

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::record::Fields;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A secondary, best-effort table mirror
pub trait RemoteStore: Send + Sync {
    /// Fetch every row of `table` keyed by header
    fn read(&self, table: &str) -> Result<Vec<Fields>, RemoteError>;

    /// Replace the whole content of `table`
    fn update(&self, table: &str, columns: &[&str], rows: &[Vec<String>])
    -> Result<(), RemoteError>;
}

#[derive(Deserialize)]
struct SheetValues {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Serialize)]
struct SheetUpdate<'a> {
    values: Vec<Vec<&'a str>>,
}

/// HTTP client for the sheet API with a bounded timeout and linear retry
pub struct HttpSheetClient {
    client: Client,
    config: RemoteConfig,
}

impl HttpSheetClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Run `send` until it succeeds or the retry budget is spent
    fn with_retries<F>(&self, what: &str, send: F) -> Result<Response, RemoteError>
    where
        F: Fn() -> Result<Response, reqwest::Error>,
    {
        let mut attempt = 0;
        loop {
            let result = match send() {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) => Err(RemoteError::Status(resp.status().as_u16())),
                Err(e) => Err(RemoteError::Unavailable(e.to_string())),
            };
            if attempt >= self.config.retries {
                return result;
            }
            attempt += 1;
            if let Err(e) = &result {
                log::warn!("{} failed ({}), retry {}/{}", what, e, attempt, self.config.retries);
            }
            std::thread::sleep(self.config.backoff(attempt));
        }
    }
}

impl RemoteStore for HttpSheetClient {
    fn read(&self, table: &str) -> Result<Vec<Fields>, RemoteError> {
        let url = self.table_url(table);
        let resp = self.with_retries(&format!("GET {}", url), || {
            self.authorize(self.client.get(&url)).send()
        })?;
        let sheet: SheetValues = resp
            .json()
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        grid_to_rows(sheet.values)
    }

    fn update(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        let url = self.table_url(table);
        let mut values = Vec::with_capacity(rows.len() + 1);
        values.push(columns.to_vec());
        values.extend(rows.iter().map(|r| r.iter().map(String::as_str).collect()));
        let body = SheetUpdate { values };

        self.with_retries(&format!("PUT {}", url), || {
            self.authorize(self.client.put(&url)).json(&body).send()
        })?;
        Ok(())
    }
}

/// Convert a header-first grid into keyed rows
///
/// Cells may come back as numbers or booleans; they are stringified so the
/// row mapping can apply the same parsing as for CSV.
pub fn grid_to_rows(values: Vec<Vec<Value>>) -> Result<Vec<Fields>, RemoteError> {
    let mut grid = values.into_iter();
    let header: Vec<String> = match grid.next() {
        Some(h) => h.iter().map(cell_text).collect(),
        None => return Ok(Vec::new()),
    };
    if header.iter().all(|h| h.is_empty()) {
        return Err(RemoteError::Malformed("empty header row".to_string()));
    }

    Ok(grid
        .map(|row| {
            header
                .iter()
                .cloned()
                .zip(row.iter().map(cell_text))
                .filter(|(h, _)| !h.is_empty())
                .collect()
        })
        .collect())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
