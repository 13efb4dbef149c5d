//! Check coordinator - main run orchestration logic
//!
//! This module runs one complete pass:
//! - Loading state and building the site registry
//! - Fetching each site in list order
//! - Applying the diff engine and collecting the report
//! - Persisting the updated state once at the end

use crate::checker::diff::apply_outcome;
use crate::checker::fetcher::{FetchOutcome, Fetcher};
use crate::output::{CheckReport, Notification, Notifier};
use crate::registry::{debug_enabled, SiteRegistry};
use crate::store::StateStore;
use crate::WatchError;

/// Runs checks of a state store's sites with a given fetcher
pub struct Checker<F, S> {
    fetcher: F,
    store: S,
}

impl<F: Fetcher, S: StateStore> Checker<F, S> {
    pub fn new(fetcher: F, store: S) -> Self {
        Self { fetcher, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs one check pass
    ///
    /// Sites are fetched one at a time in list order. All updates stay in
    /// memory until every site has been processed, then the state is
    /// persisted once. On error nothing is persisted.
    ///
    /// `notifier` only receives the startup notice for the `debug` flag,
    /// sent once the registry is known to be usable; category results are
    /// returned for the caller to deliver.
    pub async fn run(&mut self, notifier: &mut dyn Notifier) -> Result<CheckReport, WatchError> {
        let mut properties = self.store.load()?;
        let mut registry = SiteRegistry::load(&mut properties)?;

        if debug_enabled(&properties) {
            notifier.notify(&Notification::info("Debug flag set"));
        }

        tracing::info!(
            "Checking {} sites ({} unique)",
            registry.names().len(),
            registry.unique_count()
        );

        let mut report = CheckReport::new();

        for name in registry.names().to_vec() {
            let Some(site) = registry.get_mut(&name) else {
                continue;
            };

            tracing::debug!("Fetching {} from {}", name, site.url);
            let outcome = self.fetcher.fetch(&site.url).await;

            match &outcome {
                FetchOutcome::Fetched(fingerprint) => {
                    tracing::debug!("{}: fingerprint {}", name, fingerprint);
                }
                FetchOutcome::Unavailable { reason } => {
                    tracing::warn!("{} is unavailable: {}", name, reason);
                }
            }

            let transitions = apply_outcome(site, &outcome);
            if !transitions.is_empty() {
                tracing::info!(
                    "{}: {}",
                    name,
                    transitions
                        .iter()
                        .map(|t| t.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            report.record(&name, &transitions);
        }

        registry.store_into(&mut properties);
        self.store.persist(&properties)?;

        tracing::info!(
            "Check complete: {} added, {} changed, {} up, {} down",
            report.added.len(),
            report.changed.len(),
            report.up.len(),
            report.down.len()
        );

        Ok(report)
    }
}
