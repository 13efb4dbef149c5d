//! Checker module for fetching sites and detecting changes
//!
//! This module contains the core checking logic, including:
//! - HTTP fetching with content fingerprinting
//! - Comparing fingerprints and availability against stored state
//! - Overall run coordination

mod coordinator;
mod diff;
mod fetcher;
mod fingerprint;

pub use coordinator::Checker;
pub use diff::apply_outcome;
pub use fetcher::{build_http_client, FetchOutcome, Fetcher, HttpFetcher};
pub use fingerprint::{fingerprint_bytes, ContentHasher, DigestAlgorithm, Fingerprint};

use crate::config::Config;
use crate::output::{CheckReport, Notification, Notifier};
use crate::store::FileStore;
use crate::WatchError;

/// Runs a complete check against the configured state file
///
/// This is the main entry point for a run. It will:
/// 1. Resolve the digest algorithm (before any site is touched)
/// 2. Open or create the state file
/// 3. Build the HTTP client
/// 4. Check every site and persist the new state
/// 5. Deliver one notification per non-empty result category
///
/// On a fatal error a single error notification is delivered instead and the
/// error is returned; the state file is left as it was.
///
/// # Arguments
///
/// * `config` - The checker configuration
/// * `notifier` - Where notifications go
///
/// # Returns
///
/// * `Ok(CheckReport)` - Run completed and state was persisted
/// * `Err(WatchError)` - Run aborted
pub async fn run_check(
    config: &Config,
    notifier: &mut dyn Notifier,
) -> Result<CheckReport, WatchError> {
    match execute(config, notifier).await {
        Ok(report) => {
            report.deliver(notifier);
            Ok(report)
        }
        Err(e) => {
            tracing::error!("Check aborted: {}", e);
            notifier.notify(&Notification::error(fatal_message(&e)));
            Err(e)
        }
    }
}

async fn execute(config: &Config, notifier: &mut dyn Notifier) -> Result<CheckReport, WatchError> {
    let digest: DigestAlgorithm = config.fetch.digest.parse()?;
    let state_path = config.state_path()?;
    tracing::info!(
        "Using state file {} with {} fingerprints",
        state_path.display(),
        digest.name()
    );

    let store = FileStore::open(&state_path)?;
    let fetcher = HttpFetcher::new(&config.fetch, digest)?;

    Checker::new(fetcher, store).run(notifier).await
}

/// User-facing text for a fatal error
///
/// Configuration problems are shown as-is; other errors keep their prefix.
pub fn fatal_message(error: &WatchError) -> String {
    match error {
        WatchError::Config(e) => e.to_string(),
        WatchError::Store(e) => e.to_string(),
        other => other.to_string(),
    }
}
