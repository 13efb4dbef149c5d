use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Directory below the user's home that holds the state file
pub const STATE_DIR: &str = ".websitechangetracker";

/// Name of the state file inside [`STATE_DIR`]
pub const STATE_FILE: &str = ".properties";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitewatch::config::load_config;
///
/// let config = load_config(Path::new("sitewatch.toml")).unwrap();
/// println!("Timeout: {}s", config.fetch.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Returns the per-user default state file path
///
/// This is `<home>/.websitechangetracker/.properties`. Fails with
/// [`ConfigError::HomeNotFound`] when no home directory can be determined
/// or it is not a directory.
pub fn default_state_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    if !home.is_dir() {
        return Err(ConfigError::HomeNotFound);
    }
    Ok(home.join(STATE_DIR).join(STATE_FILE))
}

impl Config {
    /// Resolves the state file path, falling back to the per-user default
    pub fn state_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.state.path {
            Some(path) => Ok(path.clone()),
            None => default_state_path(),
        }
    }
}
