//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the checker, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Streaming response bodies into a content digest
//! - Turning every network failure into an `Unavailable` outcome

use crate::checker::fingerprint::{ContentHasher, DigestAlgorithm, Fingerprint};
use crate::config::FetchConfig;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The full body was read and fingerprinted
    Fetched(Fingerprint),

    /// The site could not be read (DNS, connect, timeout, non-2xx, reset...)
    Unavailable {
        /// Error description for logging
        reason: String,
    },
}

impl FetchOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

/// Retrieves a URL and fingerprints its content
///
/// Implementations make exactly one attempt and never fail; anything that
/// prevents reading the full body is reported as
/// [`FetchOutcome::Unavailable`].
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchOutcome>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitewatch::checker::build_http_client;
/// use sitewatch::config::FetchConfig;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    digest: DigestAlgorithm,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig, digest: DigestAlgorithm) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            digest,
        })
    }
}

impl Fetcher for HttpFetcher {
    /// Fetches a URL and digests the body chunk by chunk
    ///
    /// # Request Flow
    ///
    /// 1. Send GET request (redirects followed up to the configured limit)
    /// 2. Any non-2xx final status → Unavailable
    /// 3. Feed each body chunk into the digest as it arrives
    /// 4. A read error mid-body → Unavailable
    ///
    /// The response is dropped on every return path, which releases the
    /// connection.
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        let mut response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::unavailable(describe_error(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::unavailable(format!("HTTP {}", status));
        }

        let mut hasher = ContentHasher::new(self.digest);
        let mut total = 0usize;

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    total += chunk.len();
                    hasher.update(&chunk);
                }
                Ok(None) => break,
                Err(e) => return FetchOutcome::unavailable(describe_error(&e)),
            }
        }

        tracing::trace!("Read {} bytes from {}", total, url);
        FetchOutcome::Fetched(hasher.finalize())
    }
}

/// Classifies a request error into a short description
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    }
}
