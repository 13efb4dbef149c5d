//! Sitewatch main entry point
//!
//! This is the command-line interface for the Sitewatch change detector.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sitewatch::checker::{fatal_message, run_check};
use sitewatch::config::{load_config, validate, Config};
use sitewatch::output::{
    write_markdown_summary, ConsoleNotifier, Notification, Notifier, TracingNotifier,
};
use sitewatch::registry::{debug_enabled, SiteRegistry};
use sitewatch::store::{FileStore, StateStore};
use sitewatch::WatchResult;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sitewatch: detects content changes and outages of websites
///
/// Each run fetches every site listed in the state file, compares the
/// content fingerprint and reachability with the previous run, stores the
/// new state and reports sites that were added, changed, came back up or
/// went down. Run it from a scheduler.
#[derive(Parser, Debug)]
#[command(name = "sitewatch")]
#[command(version)]
#[command(about = "Detects content changes and outages of websites", long_about = None)]
struct Cli {
    /// Path to an optional TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// State file to use instead of ~/.websitechangetracker/.properties
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Per-site fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Content digest (sha256, sha512, or md5 for state written by older tools)
    #[arg(long, value_name = "NAME")]
    digest: Option<String>,

    /// Where notifications are delivered
    #[arg(long, value_enum, default_value_t = NotifyTarget::Console)]
    notify: NotifyTarget,

    /// Also write a markdown summary of the run to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Validate the state file and list sites without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NotifyTarget {
    /// Print to stdout/stderr
    Console,
    /// Emit as log events
    Log,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut notifier: Box<dyn Notifier> = match cli.notify {
        NotifyTarget::Console => Box::new(ConsoleNotifier),
        NotifyTarget::Log => Box::new(TracingNotifier),
    };

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            notifier.notify(&Notification::error(format!("{:#}", e)));
            return ExitCode::FAILURE;
        }
    };

    // Handlers deliver their own error notifications
    let result = if cli.dry_run {
        handle_dry_run(&config, notifier.as_mut())
    } else {
        handle_check(&config, cli.summary.as_deref(), notifier.as_mut()).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Exiting after error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewatch=info,warn"),
            1 => EnvFilter::new("sitewatch=debug,info"),
            2 => EnvFilter::new("sitewatch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the settings file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(state) = &cli.state {
        config.state.path = Some(state.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
        config.fetch.connect_timeout_secs = config.fetch.connect_timeout_secs.min(timeout);
    }
    if let Some(digest) = &cli.digest {
        config.fetch.digest = digest.clone();
    }

    validate(&config).context("Invalid command-line options")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates state and lists the sites
fn handle_dry_run(config: &Config, notifier: &mut dyn Notifier) -> anyhow::Result<()> {
    dry_run(config).map_err(|e| {
        notifier.notify(&Notification::error(fatal_message(&e)));
        anyhow::Error::new(e)
    })
}

fn dry_run(config: &Config) -> WatchResult<()> {
    let path = config.state_path()?;
    let store = FileStore::open(&path)?;
    let mut properties = store.load()?;

    println!("=== Sitewatch Dry Run ===\n");
    println!("State file: {}", path.display());
    println!("Digest: {}", config.fetch.digest);
    println!("Timeout: {}s", config.fetch.timeout_secs);
    if debug_enabled(&properties) {
        println!("Debug flag: set");
    }

    let registry = SiteRegistry::load(&mut properties)?;

    println!("\nSites ({}):", registry.unique_count());
    for site in registry.sites() {
        let hash = site
            .hash
            .as_ref()
            .map(|h| h.as_stored().to_string())
            .unwrap_or_else(|| "(new)".to_string());
        let status = if site.down { "down" } else { "up" };
        println!("  - {} [{}] {}", site.name, status, site.url);
        println!("    hash: {}", hash);
    }

    println!("\n✓ State file is valid");
    println!("✓ Would check {} sites", registry.names().len());
    Ok(())
}

/// Handles the main check operation
async fn handle_check(
    config: &Config,
    summary: Option<&Path>,
    notifier: &mut dyn Notifier,
) -> anyhow::Result<()> {
    let report = run_check(config, notifier).await?;

    if let Some(path) = summary {
        if let Err(e) = write_markdown_summary(&report, path) {
            let message = format!("Failed to write summary {}: {}", path.display(), e);
            notifier.notify(&Notification::error(message.clone()));
            anyhow::bail!(message);
        }
        tracing::info!("Summary written to {}", path.display());
    }

    Ok(())
}
