//! Key names used in the state file
//!
//! Per-site attributes are stored as separate entries named
//! `<prefix><site name>`.

/// Comma-separated list of site names
pub const SITES_KEY: &str = "sites";

/// Presence-only flag enabling the startup notice
pub const DEBUG_KEY: &str = "debug";

pub const URL_PREFIX: &str = "url_";
pub const HASH_PREFIX: &str = "hash_";
pub const DOWN_PREFIX: &str = "down_";

/// Stored in place of a hash when a new site could not be fetched
pub const UNAVAILABLE_SENTINEL: &str = "null";

pub fn url_key(name: &str) -> String {
    format!("{}{}", URL_PREFIX, name)
}

pub fn hash_key(name: &str) -> String {
    format!("{}{}", HASH_PREFIX, name)
}

pub fn down_key(name: &str) -> String {
    format!("{}{}", DOWN_PREFIX, name)
}
