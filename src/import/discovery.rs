//! Data file discovery

use crate::config::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// List the data files under `root` whose extension matches `extension`
/// (compared without the dot, case-insensitively).
///
/// The walk is sorted by file name so discovery order is deterministic
/// across runs. Exports keep their tweet files in one flat directory, so
/// the walk stays at the top level unless `recursive` is set.
pub fn data_files(
    root: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, ConfigError> {
    if !root.exists() {
        return Err(ConfigError::MissingSourceDir(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ConfigError::NotADirectory(root.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    debug!(
        "discovered {} .{} files under {}",
        files.len(),
        extension,
        root.display()
    );
    Ok(files)
}
