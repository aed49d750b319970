//! Core types for the tweedex import pipeline

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Timestamp format used by Twitter data exports, e.g.
/// `Wed Sep 05 00:37:15 +0000 2012`.
pub const TWEET_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

// ============================================================================
// Record
// ============================================================================

/// One tweet as found in a data export file.
///
/// The export carries no fixed schema, so a record is an opaque JSON value
/// that is counted and forwarded to Elasticsearch verbatim. The accessors
/// below are a thin view over the handful of fields the search output needs;
/// everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Value);

impl Record {
    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Document id for indexing: `id_str` when present, otherwise the
    /// numeric `id` rendered as a string.
    pub fn id(&self) -> Option<String> {
        if let Some(id) = self.0.get("id_str").and_then(Value::as_str) {
            return Some(id.to_string());
        }
        self.0.get("id").and_then(Value::as_u64).map(|id| id.to_string())
    }

    /// The tweet text, if present.
    pub fn text(&self) -> Option<&str> {
        self.0.get("text").and_then(Value::as_str)
    }

    /// The raw `created_at` string, if present.
    pub fn created_at_raw(&self) -> Option<&str> {
        self.0.get("created_at").and_then(Value::as_str)
    }

    /// The `created_at` field parsed from the export's timestamp format.
    /// Returns `None` when the field is absent or does not parse.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.created_at_raw()?;
        DateTime::parse_from_str(raw, TWEET_TIME_FORMAT).ok()
    }

    /// All URL entities attached to the record, in export order.
    ///
    /// The full list is preserved here; how many to display is the
    /// presentation layer's call.
    pub fn urls(&self) -> Vec<UrlEntity> {
        self.0
            .get("entities")
            .and_then(|e| e.get("urls"))
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(|u| serde_json::from_value(u.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Record(value)
    }
}

/// Typed view over one entry of `entities.urls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlEntity {
    /// Shortened (t.co) URL
    pub url: Option<String>,
    /// Resolved target URL
    pub expanded_url: Option<String>,
    /// Display form shown in the tweet text
    pub display_url: Option<String>,
}

// ============================================================================
// Per-file outcomes
// ============================================================================

/// Outcome of processing one data export file.
///
/// Exactly one of these exists per discovered file; `error` is present if
/// and only if `success` is false, which the constructors enforce.
#[derive(Debug, Clone, Serialize)]
pub struct ImportedFile {
    /// Source file path
    path: String,
    /// Number of records accepted by the backend (0 for empty or failed files)
    record_count: usize,
    /// Whether the file parsed and submitted cleanly
    success: bool,
    /// Failure detail, present only when `success` is false
    error: Option<String>,
}

impl ImportedFile {
    /// A file that parsed and (when non-empty) submitted successfully.
    pub fn succeeded(path: impl Into<String>, record_count: usize) -> Self {
        Self {
            path: path.into(),
            record_count,
            success: true,
            error: None,
        }
    }

    /// A file that failed to parse or submit.
    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            record_count: 0,
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component, for compact display.
    pub fn file_name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path)
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl fmt::Display for ImportedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "{}: {} records", self.path, self.record_count)
        } else {
            write!(
                f,
                "{}: failed ({})",
                self.path,
                self.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

// ============================================================================
// Run aggregate
// ============================================================================

/// Ordered, append-only collection of per-file outcomes for one run.
///
/// Outcomes land in discovery order, one per file the enumerator returned.
/// The importer appends during the run; callers only read.
#[derive(Debug, Default, Serialize)]
pub struct ImportResult {
    files: Vec<ImportedFile>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's outcome. Called once per discovered file.
    pub fn push(&mut self, outcome: ImportedFile) {
        self.files.push(outcome);
    }

    /// All outcomes in discovery order.
    pub fn files(&self) -> &[ImportedFile] {
        &self.files
    }

    /// Number of files processed this run.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total records accepted by the backend across all files.
    pub fn total_records(&self) -> usize {
        self.files.iter().map(ImportedFile::record_count).sum()
    }

    /// The failed outcomes, in discovery order.
    pub fn failures(&self) -> impl Iterator<Item = &ImportedFile> {
        self.files.iter().filter(|f| !f.success())
    }

    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| !f.success())
    }
}
