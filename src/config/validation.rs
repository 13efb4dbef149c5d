use crate::config::types::{Config, FetchConfig};
use crate::ConfigError;

/// Upper bound for `max-redirects`
const MAX_REDIRECT_LIMIT: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_state_config(config)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates the state file location
fn validate_state_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(path) = &config.state.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "state path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates fetch configuration
///
/// The digest name is not checked here; an unknown digest is reported as
/// [`crate::WatchError::DigestUnavailable`] when the check starts.
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs ({}) cannot exceed timeout_secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECT_LIMIT, config.max_redirects
        )));
    }

    validate_user_agent(&config.user_agent)?;

    Ok(())
}

/// Validates the user agent string sent as an HTTP header
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent must not contain control characters, got '{}'",
            user_agent.escape_debug()
        )));
    }

    Ok(())
}
