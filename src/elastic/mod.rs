//! Elasticsearch transport
//!
//! A thin, blocking layer over the Elasticsearch REST API: one pooled HTTP
//! client per run, `_bulk` for imports, `_search` for the query catalog.
//! The import loop talks to this module only through the [`BulkIndex`]
//! trait, which keeps the backend mockable in tests.

mod client;

pub use client::{BulkIndex, ElasticClient};

use thiserror::Error;

/// Errors from a bulk submission.
///
/// One error covers the whole batch; this layer has no partial-success
/// semantics. When the backend accepts the request but rejects individual
/// items, the per-item reasons are aggregated into a single message.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("bulk request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bulk request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("bulk write of {count} records failed: {summary}")]
    ItemFailures { count: usize, summary: String },

    #[error("malformed bulk response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors from a search request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed search response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}
