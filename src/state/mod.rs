//! State management module.
//!
//! Contains the session table (the only server state) and the server's
//! identity. Everything here is owned by the dispatcher task; nothing is
//! shared or locked.

mod session;
mod table;

pub use session::{Outbound, Session, SessionId, SessionState};
pub use table::SessionTable;

use quill_proto::CaseMapping;

use crate::config::Config;

/// This server's identity and protocol settings.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub casemap: CaseMapping,
    pub quit_message: String,
    pub max_channels: usize,
    pub max_line_len: usize,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            casemap: config.server.casemapping.into(),
            quit_message: config.server.quit_message.clone(),
            max_channels: config.limits.max_channels,
            max_line_len: config.limits.max_line_len,
        }
    }
}
