//! Progress reporting for import runs

use crate::types::ImportedFile;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the discovered files of one run.
///
/// The file count is known before the loop starts, so this is a plain bar
/// rather than a spinner. Quiet mode drops the bar entirely; counts still
/// accumulate in the `ImportResult`.
pub struct ImportProgress {
    bar: Option<ProgressBar>,
}

impl ImportProgress {
    pub fn new(total_files: u64, quiet: bool) -> Self {
        let bar = if quiet {
            None
        } else {
            let pb = ProgressBar::new(total_files);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        };

        Self { bar }
    }

    /// Advance the bar after one file's outcome is known.
    pub fn file_done(&self, outcome: &ImportedFile) {
        if let Some(ref pb) = self.bar {
            pb.inc(1);
            let label = if outcome.success() {
                format!(
                    "{} ({} records)",
                    outcome.file_name(),
                    outcome.record_count()
                )
            } else {
                format!("{} (failed)", outcome.file_name())
            };
            pb.set_message(label);
        }
    }

    pub fn finish(&self) {
        if let Some(ref pb) = self.bar {
            pb.finish_and_clear();
        }
    }
}
