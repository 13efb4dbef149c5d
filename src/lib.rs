//! Sitewatch: a batch website change detector
//!
//! This crate checks a list of websites for content changes by hashing the
//! retrieved bodies and comparing them against fingerprints stored in a flat
//! properties file. Each run reports sites that were added, changed, went down
//! or came back up.

pub mod checker;
pub mod config;
pub mod output;
pub mod registry;
pub mod state;
pub mod store;

use thiserror::Error;

/// Main error type for Sitewatch operations
///
/// Every variant is fatal for the run it occurs in. Unreachable sites are not
/// errors; they are reported through [`checker::FetchOutcome::Unavailable`].
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State file error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Digest algorithm not available: {0}")]
    DigestUnavailable(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No sites specified!")]
    NoSites,

    #[error("Missing url for: {site}")]
    MissingUrl { site: String },

    #[error("Malformed url: {url}")]
    MalformedUrl {
        site: String,
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported url scheme for {site}: {url}")]
    UnsupportedScheme { site: String, url: String },

    #[error("No user home directory found.")]
    HomeNotFound,
}

/// Result type alias for Sitewatch operations
pub type WatchResult<T> = std::result::Result<T, WatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{run_check, Checker, FetchOutcome, Fingerprint};
pub use config::Config;
pub use output::CheckReport;
pub use registry::{Site, SiteRegistry};
pub use state::Transition;
pub use store::{FileStore, MemoryStore, Properties, StateStore};
