use serde::Deserialize;
use std::path::PathBuf;

/// Default `User-Agent` sent with every fetch
pub const DEFAULT_USER_AGENT: &str = concat!("sitewatch/", env!("CARGO_PKG_VERSION"));

/// Main configuration structure for Sitewatch
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Location of the persisted state file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    /// Path to the properties file; `None` means the per-user default
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// HTTP fetch and fingerprint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Total time allowed for one fetch, including the body (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed per fetch
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Name of the content digest (`sha256`, `sha512` or `md5`)
    #[serde(default = "default_digest")]
    pub digest: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            digest: default_digest(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_digest() -> String {
    "sha256".to_string()
}
