//! Import orchestration

use super::discovery;
use super::parser::{self, ParseError};
use super::progress::ImportProgress;
use crate::config::{ConfigError, ConnectionSettings, ImportConfig};
use crate::elastic::{BulkIndex, ElasticClient, SubmissionError};
use crate::types::{ImportResult, ImportedFile};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Everything that can go wrong while processing a single file.
///
/// Contained at the file boundary: the run loop converts it into a failed
/// `ImportedFile` and moves on to the next file.
#[derive(Debug, Error)]
enum FileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Cooperative cancellation handle.
///
/// Checked between files only; the file currently being parsed or submitted
/// always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Imports every data file under a source directory into Elasticsearch.
///
/// Construction validates the source directory and connection settings, so
/// a misconfigured run fails before any file is touched. The run itself
/// processes files sequentially in discovery order and records one outcome
/// per file; a file that fails to parse or submit is reported in the result
/// and never aborts the rest of the run.
#[derive(Debug)]
pub struct Importer {
    /// Directory holding the export's data files
    root: PathBuf,
    /// Where to reach Elasticsearch
    settings: ConnectionSettings,
    /// Discovery knobs
    config: ImportConfig,
    /// Suppress progress output
    quiet: bool,
}

impl Importer {
    /// Create an importer for `root`, failing fast on a missing directory or
    /// invalid connection settings.
    pub fn new(
        root: impl AsRef<Path>,
        settings: ConnectionSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            return Err(ConfigError::MissingSourceDir(root));
        }
        if !root.is_dir() {
            return Err(ConfigError::NotADirectory(root));
        }

        Ok(Self {
            root,
            settings,
            config: ImportConfig::default(),
            quiet: false,
        })
    }

    /// Set the data file extension to discover (default `js`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// Descend into subdirectories during discovery (default off).
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Suppress progress output.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Run the import against a real Elasticsearch client built from the
    /// importer's settings. Client construction is cheap and performs no
    /// network round-trip.
    pub fn run(&self) -> Result<ImportResult, ConfigError> {
        let client = ElasticClient::create(&self.settings)?;
        self.run_with(&client, &CancelToken::new())
    }

    /// Run the import against any bulk-capable client.
    ///
    /// One bulk write per non-empty file; zero-record files are recorded as
    /// successes without touching the backend. The returned result holds
    /// exactly one entry per discovered file, in discovery order, unless the
    /// token cancels the run early.
    pub fn run_with<C: BulkIndex>(
        &self,
        client: &C,
        cancel: &CancelToken,
    ) -> Result<ImportResult, ConfigError> {
        let files =
            discovery::data_files(&self.root, &self.config.extension, self.config.recursive)?;
        info!(
            "importing {} data files from {}",
            files.len(),
            self.root.display()
        );

        let progress = ImportProgress::new(files.len() as u64, self.quiet);
        let mut result = ImportResult::new();

        for path in &files {
            if cancel.is_cancelled() {
                info!(
                    "import cancelled after {} of {} files",
                    result.file_count(),
                    files.len()
                );
                break;
            }

            let outcome = match self.process_file(path, client) {
                Ok(count) => {
                    debug!("{}: {} records", path.display(), count);
                    ImportedFile::succeeded(path.to_string_lossy(), count)
                }
                Err(e) => {
                    warn!("{}: {}", path.display(), e);
                    ImportedFile::failed(path.to_string_lossy(), e.to_string())
                }
            };

            progress.file_done(&outcome);
            result.push(outcome);
        }

        progress.finish();
        Ok(result)
    }

    /// Parse one file and, when it yields records, submit them as a single
    /// bulk write. Returns the record count claimed in the file's outcome.
    fn process_file<C: BulkIndex>(&self, path: &Path, client: &C) -> Result<usize, FileError> {
        let records = parser::parse_file(path)?;

        if !records.is_empty() {
            client.bulk_index(&records)?;
        }

        Ok(records.len())
    }
}
