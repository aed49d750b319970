//! End-to-end tests for the import pipeline
//!
//! These drive the importer against real files in a temporary directory,
//! with a recording client standing in for Elasticsearch, and verify the
//! per-file isolation and accounting guarantees.

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;
use tweedex::config::{ConfigError, ConnectionSettings};
use tweedex::elastic::{BulkIndex, SubmissionError};
use tweedex::import::{parser, CancelToken, Importer};
use tweedex::types::Record;

/// Bulk client that records every batch instead of talking to a backend.
#[derive(Default)]
struct RecordingClient {
    batch_sizes: Mutex<Vec<usize>>,
    fail_with: Option<String>,
}

impl RecordingClient {
    fn new() -> Self {
        Self::default()
    }

    /// A client whose every submission fails with `message`.
    fn failing(message: &str) -> Self {
        Self {
            batch_sizes: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

impl BulkIndex for RecordingClient {
    fn bulk_index(&self, records: &[Record]) -> Result<(), SubmissionError> {
        self.batch_sizes.lock().unwrap().push(records.len());
        if let Some(ref message) = self.fail_with {
            return Err(SubmissionError::ItemFailures {
                count: records.len(),
                summary: message.clone(),
            });
        }
        Ok(())
    }
}

fn settings() -> ConnectionSettings {
    ConnectionSettings::new("localhost", 9200, "tweets")
}

fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn importer(dir: &Path) -> Importer {
    Importer::new(dir, settings()).unwrap().with_quiet(true)
}

#[test]
fn every_discovered_file_gets_exactly_one_outcome() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a_good.js", r#"x = [{"text":"one"},{"text":"two"}];"#);
    write_file(dir.path(), "b_broken.js", "this is not a data file");
    write_file(dir.path(), "c_empty.js", "x = [];");
    write_file(dir.path(), "d_good.js", r#"x = [{"text":"three"}];"#);

    let client = RecordingClient::new();
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    assert_eq!(result.file_count(), 4);
    assert_eq!(result.failures().count(), 1);
    assert_eq!(result.total_records(), 3);
}

#[test]
fn empty_array_is_success_without_submission() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "empty.js", "x = [];");

    let client = RecordingClient::new();
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    assert_eq!(result.file_count(), 1);
    let outcome = &result.files()[0];
    assert!(outcome.success());
    assert_eq!(outcome.record_count(), 0);
    assert!(
        client.batch_sizes().is_empty(),
        "a zero-record file must not trigger a bulk write"
    );
}

#[test]
fn single_record_submits_one_batch_of_one() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "one.js", r#"x = [{"text":"hello"}];"#);

    let client = RecordingClient::new();
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    assert_eq!(result.file_count(), 1);
    let outcome = &result.files()[0];
    assert!(outcome.success());
    assert_eq!(outcome.record_count(), 1);
    assert_eq!(client.batch_sizes(), vec![1]);
}

#[test]
fn malformed_wrapper_does_not_abort_the_run() {
    let dir = TempDir::new().unwrap();
    // Discovery is sorted by name, so the broken file comes first.
    write_file(dir.path(), "a_broken.js", r#"[{"text":"missing wrapper"}]"#);
    write_file(dir.path(), "b_unterminated.js", r#"x = [{"text":"oops""#);
    write_file(dir.path(), "c_good.js", r#"x = [{"text":"survivor"}];"#);

    let client = RecordingClient::new();
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    assert_eq!(result.file_count(), 3);

    let outcomes = result.files();
    assert!(!outcomes[0].success());
    assert!(!outcomes[0].error().unwrap().is_empty());
    assert!(!outcomes[1].success());
    assert!(outcomes[2].success());
    assert_eq!(outcomes[2].record_count(), 1);

    // Only the good file's batch reached the client.
    assert_eq!(client.batch_sizes(), vec![1]);
}

#[test]
fn bulk_failure_is_recorded_and_the_run_continues() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.js", r#"x = [{"text":"first"}];"#);
    write_file(dir.path(), "b.js", r#"x = [{"text":"second"},{"text":"third"}];"#);

    let client = RecordingClient::failing("index_not_found_exception");
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    assert_eq!(result.file_count(), 2);
    for outcome in result.files() {
        assert!(!outcome.success());
        assert!(outcome
            .error()
            .unwrap()
            .contains("index_not_found_exception"));
    }
    // Both files were still attempted.
    assert_eq!(client.batch_sizes(), vec![1, 2]);
    assert_eq!(result.total_records(), 0);
}

#[test]
fn outcomes_follow_discovery_order_and_extension_filter() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.js", "x = [];");
    write_file(dir.path(), "a.js", "x = [];");
    write_file(dir.path(), "notes.txt", "not a data file");

    let client = RecordingClient::new();
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    let paths: Vec<&str> = result.files().iter().map(|f| f.file_name()).collect();
    assert_eq!(paths, vec!["a.js", "b.js"]);
}

#[test]
fn parsing_the_same_file_twice_yields_identical_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("same.js");
    std::fs::write(
        &path,
        r#"x = [{"text":"stable","entities":{"urls":[{"expanded_url":"https://example.com"}]}}];"#,
    )
    .unwrap();

    let first = parser::parse_file(&path).unwrap();
    let second = parser::parse_file(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn missing_source_dir_fails_before_any_work() {
    let client = RecordingClient::new();

    let err = Importer::new("/no/such/export", settings()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingSourceDir(_)));

    // Nothing was enumerated, parsed, or submitted.
    assert!(client.batch_sizes().is_empty());
}

#[test]
fn invalid_connection_settings_fail_before_any_work() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.js", r#"x = [{"text":"never seen"}];"#);

    let bad = ConnectionSettings::new("", 0, "");
    let err = Importer::new(dir.path(), bad).unwrap_err();
    assert!(matches!(err, ConfigError::Connection(_)));
}

#[test]
fn cancelled_token_stops_the_run_between_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.js", r#"x = [{"text":"one"}];"#);
    write_file(dir.path(), "b.js", r#"x = [{"text":"two"}];"#);

    let client = RecordingClient::new();
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = importer(dir.path()).run_with(&client, &cancel).unwrap();

    assert_eq!(result.file_count(), 0);
    assert!(client.batch_sizes().is_empty());
}

#[test]
fn empty_directory_is_a_valid_empty_run() {
    let dir = TempDir::new().unwrap();

    let client = RecordingClient::new();
    let result = importer(dir.path())
        .run_with(&client, &CancelToken::new())
        .unwrap();

    assert_eq!(result.file_count(), 0);
    assert_eq!(result.total_records(), 0);
    assert!(!result.has_failures());
}

#[test]
fn importer_is_reusable_across_runs() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.js", r#"x = [{"text":"one"}];"#);

    let imp = importer(dir.path());
    let client = RecordingClient::new();

    let first = imp.run_with(&client, &CancelToken::new()).unwrap();
    let second = imp.run_with(&client, &CancelToken::new()).unwrap();

    assert_eq!(first.file_count(), second.file_count());
    assert_eq!(first.total_records(), second.total_records());
    assert_eq!(client.batch_sizes(), vec![1, 1]);
}
