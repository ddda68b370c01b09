//! Configuration validation.
//!
//! Checks a parsed configuration before the server starts.

use super::Config;
use super::limits::MAX_CHANNELS;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("limits.max_sessions must be at least 1")]
    NoSessions,
    #[error("limits.max_channels must be at most 16, got {0}")]
    TooManyChannels(usize),
    #[error("limits.max_params must be at least 1")]
    NoParams,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains(' ') {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    let limits = &config.limits;
    if limits.max_sessions == 0 {
        errors.push(ValidationError::NoSessions);
    }
    if limits.max_channels > MAX_CHANNELS {
        errors.push(ValidationError::TooManyChannels(limits.max_channels));
    }
    if limits.max_params == 0 {
        errors.push(ValidationError::NoParams);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
