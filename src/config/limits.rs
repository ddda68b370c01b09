//! Capacity limits configuration.

use quill_proto::ParseLimits;
use serde::Deserialize;

/// Hard ceiling on channels per session; `max_channels` may not exceed it.
pub const MAX_CHANNELS: usize = 16;

/// Capacity limits.
///
/// Exceeding any of these drops the excess silently; none of them is fatal.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of live sessions (default: 128).
    /// Connections accepted beyond this are closed immediately.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Maximum channels a session may be in at once (default and ceiling: 16).
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,
    /// Maximum line length in bytes, terminator included (default: 2048).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Maximum message tags kept per line (default: 64).
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
    /// Maximum parameters kept per line (default: 16).
    #[serde(default = "default_max_params")]
    pub max_params: usize,
}

impl LimitsConfig {
    /// Parser limits derived from this configuration.
    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            max_len: self.max_line_len,
            max_tags: self.max_tags,
            max_params: self.max_params,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            max_channels: default_max_channels(),
            max_line_len: default_max_line_len(),
            max_tags: default_max_tags(),
            max_params: default_max_params(),
        }
    }
}

fn default_max_sessions() -> usize {
    128
}

fn default_max_channels() -> usize {
    MAX_CHANNELS
}

fn default_max_line_len() -> usize {
    quill_proto::MAX_LINE_LEN
}

fn default_max_tags() -> usize {
    quill_proto::MAX_TAGS
}

fn default_max_params() -> usize {
    quill_proto::MAX_PARAMS
}
