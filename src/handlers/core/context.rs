//! Command handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers. Handlers run
//! inside the dispatcher task and get exclusive access to the session table
//! for the duration of one command.

use bytes::Bytes;
use quill_proto::Message;

use super::super::helpers::encode_line;
use crate::error::HandlerResult;
use crate::router::Router;
use crate::state::{ServerInfo, Session, SessionId, SessionState, SessionTable};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that sent the command.
    pub id: SessionId,
    /// Every live session, the sender included.
    pub sessions: &'a mut SessionTable,
    /// This server's identity and settings.
    pub server: &'a ServerInfo,
    /// Channel fan-out.
    pub router: Router,
}

impl<'a> Context<'a> {
    pub fn new(
        id: SessionId,
        sessions: &'a mut SessionTable,
        server: &'a ServerInfo,
        router: Router,
    ) -> Self {
        Self {
            id,
            sessions,
            server,
            router,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.get(self.id)
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.sessions.get_mut(self.id)
    }

    /// The sender's state; a vanished session reads as disconnected.
    pub fn state(&self) -> SessionState {
        self.session()
            .map_or(SessionState::Disconnected, |s| s.state)
    }

    /// Encode a message as one CRLF-terminated line within the line limit.
    pub fn encode(&self, msg: &Message) -> Option<Bytes> {
        encode_line(msg, self.server.max_line_len)
    }

    /// Queue raw bytes for the sender only.
    pub fn send_raw(&self, bytes: Bytes) {
        if let Some(session) = self.session() {
            session.send(bytes);
        }
    }

    /// Queue a message for the sender only.
    pub fn send(&self, msg: &Message) {
        if let Some(line) = self.encode(msg) {
            self.send_raw(line);
        }
    }
}

/// Trait implemented by all command handlers.
///
/// Parameter counts are checked before a handler runs, so `msg.params` holds
/// at least the command's minimum.
pub trait Handler: Send + Sync {
    /// Handle an incoming message.
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
