//! Configuration module for Sitewatch
//!
//! This module handles loading, parsing, and validating the optional TOML
//! settings file and resolving where the state file lives.
//!
//! # Example
//!
//! ```no_run
//! use sitewatch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitewatch.toml")).unwrap();
//! println!("State file: {:?}", config.state_path());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, StateConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{default_state_path, load_config, parse_config, STATE_DIR, STATE_FILE};
pub use validation::validate;
