//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use quill_proto::CaseMapping;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity and protocol behavior.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Capacity limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the prefix of numeric replies.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Case folding used for nicknames and channel names.
    #[serde(default)]
    pub casemapping: Casemapping,
    /// Reason sent with QUIT when the client gives none.
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            casemapping: Casemapping::default(),
            quit_message: default_quit_message(),
        }
    }
}

/// Casemapping setting as written in the config file.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Casemapping {
    /// Plain ASCII folding.
    #[default]
    Ascii,
    /// RFC 1459 folding, where `[]\~` are the uppercase of `{}|^`.
    Rfc1459,
}

impl From<Casemapping> for CaseMapping {
    fn from(value: Casemapping) -> Self {
        match value {
            Casemapping::Ascii => CaseMapping::Ascii,
            Casemapping::Rfc1459 => CaseMapping::Rfc1459,
        }
    }
}

fn default_server_name() -> String {
    "the.server".to_string()
}

fn default_quit_message() -> String {
    "Client disconnected".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.name, "the.server");
        assert_eq!(config.server.casemapping, Casemapping::Ascii);
        assert_eq!(config.server.quit_message, "Client disconnected");
        assert_eq!(config.listen.address.port(), 9998);
        assert_eq!(config.limits.max_sessions, 128);
    }

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
[server]
name = "irc.example.net"
casemapping = "rfc1459"
quit_message = "bye"

[listen]
address = "127.0.0.1:6667"

[limits]
max_sessions = 4
max_channels = 2
"#,
        )
        .unwrap();

        assert_eq!(config.server.name, "irc.example.net");
        assert_eq!(CaseMapping::from(config.server.casemapping), CaseMapping::Rfc1459);
        assert_eq!(config.server.quit_message, "bye");
        assert_eq!(config.listen.address.to_string(), "127.0.0.1:6667");
        assert_eq!(config.limits.max_sessions, 4);
        assert_eq!(config.limits.max_channels, 2);
        assert_eq!(config.limits.max_line_len, 2048);
    }

    #[test]
    fn rejects_unknown_casemapping() {
        let result = toml::from_str::<Config>("[server]\ncasemapping = \"strict\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nname = \"file.server\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.name, "file.server");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nname = ").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_rejects_channel_limit_above_ceiling() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[limits]\nmax_channels = 40").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Invalid(errors) if errors == &[ValidationError::TooManyChannels(40)]
        ));
        assert_eq!(
            err.to_string(),
            "invalid config: limits.max_channels must be at most 16, got 40"
        );
    }
}
