//! Per-connection session state.
//!
//! A `Session` holds one connection's identity, its place in the registration
//! state machine and the channels it has joined. There is no channel object:
//! membership lives only here and is reassembled by scanning sessions.

use std::fmt;

use bytes::Bytes;
use quill_proto::{CaseMapping, Prefix};
use tokio::sync::mpsc;
use tracing::trace;

/// Sender half of a connection's outbound byte queue.
pub type Outbound = mpsc::UnboundedSender<Bytes>;

/// Handle to a session table slot.
///
/// The generation changes every time a slot is freed, so a handle kept after
/// its session closed never reaches the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId {
    index: u32,
    generation: u32,
}

impl SessionId {
    pub(super) fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index as u32,
            generation,
        }
    }

    /// Slot index in the session table.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.index, self.generation)
    }
}

/// Registration state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, waiting for NICK.
    WaitNick,
    /// Nickname chosen, waiting for USER.
    WaitUser,
    /// Registered.
    Active,
    /// Quit; the slot is freed once the current command returns.
    Disconnected,
}

impl SessionState {
    /// Whether a session in this state owns its nickname.
    pub fn holds_nick(self) -> bool {
        matches!(self, Self::WaitUser | Self::Active)
    }
}

/// One client connection.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    outbound: Outbound,
    pub state: SessionState,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    channels: Vec<String>,
}

impl Session {
    pub(super) fn new(id: SessionId, outbound: Outbound) -> Self {
        Self {
            id,
            outbound,
            state: SessionState::WaitNick,
            nick: None,
            user: None,
            host: None,
            channels: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Nickname for use in replies, `*` before one is chosen.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    /// `nick!user@host` source for messages originated by this session.
    pub fn prefix(&self) -> Prefix {
        Prefix::user(
            self.nick_or_star(),
            self.user.as_deref().unwrap_or("*"),
            self.host.as_deref().unwrap_or("*"),
        )
    }

    /// Queue raw bytes for this connection.
    ///
    /// A closed queue means the writer is already gone; the bytes are dropped.
    pub fn send(&self, bytes: Bytes) {
        if self.outbound.send(bytes).is_err() {
            trace!(session = %self.id, "outbound queue closed, dropping bytes");
        }
    }

    /// Joined channels, in join order.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn is_member(&self, channel: &str, casemap: CaseMapping) -> bool {
        self.channels.iter().any(|c| casemap.eq(c, channel))
    }

    /// Add a channel. Returns false if already a member or `max` is reached.
    pub fn add_channel(&mut self, channel: &str, max: usize, casemap: CaseMapping) -> bool {
        if self.channels.len() >= max || self.is_member(channel, casemap) {
            return false;
        }
        self.channels.push(channel.to_owned());
        true
    }

    /// Remove a channel. Returns false if not a member.
    pub fn remove_channel(&mut self, channel: &str, casemap: CaseMapping) -> bool {
        match self.channels.iter().position(|c| casemap.eq(c, channel)) {
            Some(pos) => {
                self.channels.remove(pos);
                true
            }
            None => false,
        }
    }
}
