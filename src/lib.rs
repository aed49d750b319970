//! tweedex: bulk importer for Twitter archive data exports
//!
//! Reads the `.js` data files of a Twitter archive export, strips the
//! JavaScript assignment wrapper around each file's embedded JSON array,
//! and bulk-loads the records into an Elasticsearch index. Each run returns
//! a per-file result (path, record count, success, error) so one corrupt
//! file never takes down the rest of the import. A small catalog of named
//! queries can then be run against the imported data.

pub mod config;
pub mod elastic;
pub mod import;
pub mod search;
pub mod types;

pub use config::{Config, ConnectionSettings};
pub use import::Importer;
pub use types::{ImportResult, ImportedFile, Record};
