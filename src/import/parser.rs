//! Parser for the JavaScript-wrapped data files in a Twitter export
//!
//! Each file assigns a JSON array to a dotted variable:
//!
//! ```text
//! Grailbird.data.tweets_2013_01 = [ { "text": "...", ... }, ... ];
//! ```
//!
//! The assignment target and the optional trailing `;` are not JSON and must
//! be stripped before the array can be deserialized. Whitespace around every
//! token is accepted, and an empty array is a valid zero-record file.

use crate::types::Record;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while turning one file into records. Each carries the
/// source path so a failure message is self-describing in the run summary.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}': no assignment wrapper found (expected `name = [ ... ]`)", .path.display())]
    MissingAssignment { path: PathBuf },

    #[error("'{}': invalid assignment target '{target}'", .path.display())]
    InvalidTarget { path: PathBuf, target: String },

    #[error("'{}': expected a JSON array after `=`", .path.display())]
    NotAnArray { path: PathBuf },

    #[error("'{}': invalid record data: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse one data file into its records.
pub fn parse_file(path: &Path) -> Result<Vec<Record>, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(path, &text)
}

/// Parse file content that has already been read.
///
/// Stateless, so parsing the same content twice yields identical records.
/// `path` is only used to label errors.
pub fn parse_str(path: &Path, text: &str) -> Result<Vec<Record>, ParseError> {
    // Exports written on Windows may carry a UTF-8 BOM.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let eq = text.find('=').ok_or_else(|| ParseError::MissingAssignment {
        path: path.to_path_buf(),
    })?;

    let target = text[..eq].trim();
    if target.is_empty() || !target.chars().all(is_target_char) {
        return Err(ParseError::InvalidTarget {
            path: path.to_path_buf(),
            target: truncate(target, 60),
        });
    }

    let mut payload = text[eq + 1..].trim();
    if let Some(stripped) = payload.strip_suffix(';') {
        payload = stripped.trim_end();
    }

    if !payload.starts_with('[') {
        return Err(ParseError::NotAnArray {
            path: path.to_path_buf(),
        });
    }

    let values: Vec<Value> = serde_json::from_str(payload).map_err(|source| ParseError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(values.into_iter().map(Record).collect())
}

/// Characters allowed in the assignment target, e.g.
/// `Grailbird.data.tweets_2013_01`.
fn is_target_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '$'
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
