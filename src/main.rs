//! tweedex: import Twitter archive data exports into Elasticsearch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tweedex::config::{Config, ConnectionSettings};

mod commands;

#[derive(Parser)]
#[command(name = "tweedex")]
#[command(about = "Import Twitter archive data exports into Elasticsearch")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "tweedex.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import all data files from an export directory
    Import {
        /// Directory containing the export's .js data files
        source_dir: PathBuf,

        /// Elasticsearch host
        #[arg(long)]
        host: Option<String>,

        /// Elasticsearch port
        #[arg(long)]
        port: Option<u16>,

        /// Index to import into
        #[arg(long)]
        index: Option<String>,

        /// Data file extension to discover
        #[arg(long)]
        ext: Option<String>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Quiet mode (no progress output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a named query against the index
    Search {
        /// Query name (see `tweedex queries`)
        query: String,

        /// Maximum number of results to fetch
        #[arg(short, long, default_value = "1000")]
        max_results: usize,

        /// Elasticsearch host
        #[arg(long)]
        host: Option<String>,

        /// Elasticsearch port
        #[arg(long)]
        port: Option<u16>,

        /// Index to search
        #[arg(long)]
        index: Option<String>,
    },

    /// List the available named queries
    Queries,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // Setup logging; -v overrides the configured level
    let log_level = match cli.verbose {
        0 => config.logging.level.to_tracing(),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Import {
            source_dir,
            host,
            port,
            index,
            ext,
            recursive,
            quiet,
        } => {
            let settings = apply_overrides(config.connection.clone(), host, port, index);
            commands::import::run(&config, settings, source_dir, ext, recursive, quiet)
        }
        Commands::Search {
            query,
            max_results,
            host,
            port,
            index,
        } => {
            let settings = apply_overrides(config.connection.clone(), host, port, index);
            commands::search::run(settings, &query, max_results)
        }
        Commands::Queries => commands::search::list_queries(),
    }
}

/// Explicit CLI flags win over the config file.
fn apply_overrides(
    mut settings: ConnectionSettings,
    host: Option<String>,
    port: Option<u16>,
    index: Option<String>,
) -> ConnectionSettings {
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    if let Some(index) = index {
        settings.index = index;
    }
    settings
}
