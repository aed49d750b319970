//! Blocking Elasticsearch client

use super::{SearchError, SubmissionError};
use crate::config::{ConfigError, ConnectionSettings};
use crate::types::Record;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// How many per-item error reasons to quote in an aggregated bulk failure.
const MAX_ITEM_ERRORS: usize = 3;

/// Seam between the import loop and the indexing backend.
///
/// One call carries all records parsed from one file; success or failure is
/// reported for the batch as a unit.
pub trait BulkIndex {
    fn bulk_index(&self, records: &[Record]) -> Result<(), SubmissionError>;
}

/// Handle to one Elasticsearch node and index.
///
/// Construction validates the settings and performs no network round-trip.
/// The inner HTTP client pools connections, so a single handle serves every
/// file submission in a run.
#[derive(Debug)]
pub struct ElasticClient {
    http: Client,
    base: Url,
    index: String,
}

impl ElasticClient {
    /// Build a client from connection settings.
    pub fn create(settings: &ConnectionSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let base = Url::parse(&format!("http://{}:{}/", settings.host, settings.port)).map_err(
            |e| ConfigError::Endpoint {
                host: settings.host.clone(),
                port: settings.port,
                reason: e.to_string(),
            },
        )?;

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base,
            index: settings.index.clone(),
        })
    }

    /// The index this client writes to and searches.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Execute a raw `_search` request and return the response body.
    pub fn search(&self, body: &Value) -> Result<Value, SearchError> {
        let url = self.base.join(&format!("{}/_search", self.index))?;
        debug!("POST {}", url);

        let response = self.http.post(url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Rejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.json()?)
    }
}

impl BulkIndex for ElasticClient {
    fn bulk_index(&self, records: &[Record]) -> Result<(), SubmissionError> {
        let body = bulk_body(&self.index, records)?;
        let url = self.base.join(&format!("{}/_bulk", self.index))?;
        debug!("POST {} ({} records)", url, records.len());

        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let payload: Value = response.json()?;
        if payload
            .get("errors")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Err(SubmissionError::ItemFailures {
                count: records.len(),
                summary: summarize_item_errors(&payload),
            });
        }

        Ok(())
    }
}

/// Assemble the newline-delimited `_bulk` payload: an action line followed by
/// the document, per record. Records that carry an id keep it as `_id` so a
/// re-run overwrites instead of duplicating them.
fn bulk_body(index: &str, records: &[Record]) -> Result<String, serde_json::Error> {
    let mut body = String::new();
    for record in records {
        let action = match record.id() {
            Some(id) => json!({ "index": { "_index": index, "_id": id } }),
            None => json!({ "index": { "_index": index } }),
        };
        body.push_str(&serde_json::to_string(&action)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(record.as_value())?);
        body.push('\n');
    }
    Ok(body)
}

/// Condense a `_bulk` response with `"errors": true` into one message:
/// the number of rejected items plus the first few reasons.
fn summarize_item_errors(payload: &Value) -> String {
    let mut failed = 0;
    let mut reasons: Vec<String> = Vec::new();

    if let Some(items) = payload.get("items").and_then(Value::as_array) {
        for item in items {
            let Some(op) = item.get("index").or_else(|| item.get("create")) else {
                continue;
            };
            if let Some(error) = op.get("error") {
                failed += 1;
                if reasons.len() < MAX_ITEM_ERRORS {
                    let kind = error
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or("error");
                    let reason = error
                        .get("reason")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown reason");
                    reasons.push(format!("{}: {}", kind, reason));
                }
            }
        }
    }

    if failed == 0 {
        "backend reported errors without item detail".to_string()
    } else {
        format!("{} items rejected ({})", failed, reasons.join("; "))
    }
}
