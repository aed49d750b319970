//! Bulk import of Twitter data export files
//!
//! A Twitter archive export ships tweets as `.js` files, each one holding a
//! JSON array behind a JavaScript assignment wrapper
//! (`Grailbird.data.tweets_2013_01 = [ ... ];`). This module discovers those
//! files under a source directory, strips the wrapper, and pushes every
//! file's records into Elasticsearch as one bulk write, collecting a
//! per-file outcome so a single corrupt file never aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use tweedex::config::ConnectionSettings;
//! use tweedex::import::Importer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConnectionSettings::new("localhost", 9200, "tweets");
//! let importer = Importer::new("export/data/js/tweets", settings)?;
//!
//! let result = importer.run()?;
//! println!(
//!     "{} files, {} records imported",
//!     result.file_count(),
//!     result.total_records()
//! );
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod importer;
pub mod parser;
pub mod progress;

pub use importer::{CancelToken, Importer};
pub use parser::ParseError;
pub use progress::ImportProgress;
