use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tweedex::config::{Config, ConnectionSettings};
use tweedex::import::Importer;

/// How many failure messages the summary quotes before cutting off.
const MAX_FAILURES_SHOWN: usize = 3;

pub fn run(
    config: &Config,
    settings: ConnectionSettings,
    source_dir: PathBuf,
    ext: Option<String>,
    recursive: bool,
    quiet: bool,
) -> Result<()> {
    let extension = ext.unwrap_or_else(|| config.import.extension.clone());
    let recursive = recursive || config.import.recursive;

    let importer = Importer::new(&source_dir, settings)
        .context("import configuration rejected")?
        .with_extension(extension)
        .with_recursive(recursive)
        .with_quiet(quiet);

    info!("importing from {}", source_dir.display());
    let started = Instant::now();
    let result = importer.run()?;
    let elapsed = started.elapsed();

    println!(
        "Finished processing {} files in {:.3}s.",
        result.file_count(),
        elapsed.as_secs_f64()
    );
    println!("{} tweets have been imported.", result.total_records());

    if result.has_failures() {
        let failed = result.failures().count();
        println!(
            "{} files failed to import. Errors (max of {} will be shown):",
            failed, MAX_FAILURES_SHOWN
        );
        for failure in result.failures().take(MAX_FAILURES_SHOWN) {
            println!(
                "  {} : {}",
                failure.file_name(),
                failure.error().unwrap_or("unknown error")
            );
        }
        anyhow::bail!("import completed with {} failed files", failed);
    }

    Ok(())
}
