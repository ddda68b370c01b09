//! Dispatcher - the single owner of all session state.
//!
//! Connection tasks never touch sessions directly. They talk to one
//! dispatcher task over a channel:
//!
//! ```text
//!   reader task ──Line──►┐
//!   reader task ──Line──►├──► Dispatcher ──► Registry ──► handlers
//!   gateway ────Accept──►┘        │
//!                                 └──► per-connection outbound queues ──► writer tasks
//! ```
//!
//! Every event is handled to completion before the next one, so handlers see
//! a consistent table without locks. A reader waits for the verdict on its
//! line before reading the next, which keeps one line per connection in
//! flight.

use bytes::BytesMut;
use quill_proto::{Message, ParseLimits};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::handlers::{Context, Registry};
use crate::router::Router;
use crate::state::{Outbound, ServerInfo, SessionId, SessionState, SessionTable};
use crate::telemetry::EscapedLine;

/// Capacity of the dispatcher's event channel.
const EVENT_QUEUE_CAPACITY: usize = 1024;

/// What a connection should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Keep reading.
    Continue,
    /// The session is gone; stop reading and let the writer drain.
    Close,
}

/// Requests from the network layer.
#[derive(Debug)]
pub enum Event {
    /// A connection was accepted and needs a session.
    Accept {
        outbound: Outbound,
        reply: oneshot::Sender<Option<SessionId>>,
    },
    /// A raw line arrived, terminator included.
    Line {
        id: SessionId,
        line: BytesMut,
        ack: oneshot::Sender<Verdict>,
    },
    /// The connection's read side ended.
    Closed { id: SessionId },
}

/// Owns the session table and runs every command.
pub struct Dispatcher {
    sessions: SessionTable,
    server: ServerInfo,
    router: Router,
    registry: Registry,
    limits: ParseLimits,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Self {
        let server = ServerInfo::from_config(config);
        Self {
            sessions: SessionTable::with_capacity(config.limits.max_sessions),
            router: Router::new(server.casemap),
            server,
            registry: Registry::new(),
            limits: config.limits.parse_limits(),
        }
    }

    #[cfg(test)]
    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    /// Create a session for a new connection.
    ///
    /// Returns `None` when the table is full; the caller drops the connection.
    pub fn accept(&mut self, outbound: Outbound) -> Option<SessionId> {
        match self.sessions.insert(outbound) {
            Some(id) => {
                debug!(session = %id, live = self.sessions.len(), "session created");
                Some(id)
            }
            None => {
                warn!(
                    capacity = self.sessions.capacity(),
                    "session table full, refusing connection"
                );
                None
            }
        }
    }

    /// Parse and run one line from `id`.
    ///
    /// Malformed lines are dropped and the connection stays open.
    pub fn handle_line(&mut self, id: SessionId, line: &[u8]) -> Verdict {
        if self.sessions.get(id).is_none() {
            return Verdict::Close;
        }

        trace!(session = %id, line = %EscapedLine(line), "inbound");

        match Message::parse_with(line, &self.limits) {
            Ok(msg) => {
                let mut ctx = Context::new(id, &mut self.sessions, &self.server, self.router);
                self.registry.dispatch(&mut ctx, &msg);
            }
            Err(e) => {
                debug!(session = %id, error = %e, "malformed line dropped");
            }
        }

        match self.sessions.get(id).map(|s| s.state) {
            Some(SessionState::Disconnected) | None => {
                self.close(id);
                Verdict::Close
            }
            Some(_) => Verdict::Continue,
        }
    }

    /// Free a session's slot. Dropping the session closes its outbound queue,
    /// which ends the writer once queued bytes are flushed.
    pub fn close(&mut self, id: SessionId) -> bool {
        match self.sessions.remove(id) {
            Some(session) => {
                info!(
                    session = %id,
                    nick = session.nick_or_star(),
                    live = self.sessions.len(),
                    "session closed"
                );
                true
            }
            None => false,
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Accept { outbound, reply } => {
                let id = self.accept(outbound);
                if reply.send(id).is_err()
                    && let Some(id) = id
                {
                    self.close(id);
                }
            }
            Event::Line { id, line, ack } => {
                let verdict = self.handle_line(id, &line);
                let _ = ack.send(verdict);
            }
            Event::Closed { id } => {
                self.close(id);
            }
        }
    }

    /// Process events until every handle is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        debug!("dispatcher stopped");
    }

    /// Start the dispatcher task.
    pub fn spawn(self) -> DispatcherHandle {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        tokio::spawn(self.run(rx));
        DispatcherHandle { tx }
    }
}

/// Cloneable sender side of the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherHandle {
    tx: mpsc::Sender<Event>,
}

impl DispatcherHandle {
    /// Request a session for a new connection.
    pub async fn accept(&self, outbound: Outbound) -> Option<SessionId> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(Event::Accept { outbound, reply }).await.ok()?;
        rx.await.ok().flatten()
    }

    /// Submit a line and wait for its verdict.
    pub async fn line(&self, id: SessionId, line: BytesMut) -> Verdict {
        let (ack, rx) = oneshot::channel();
        if self.tx.send(Event::Line { id, line, ack }).await.is_err() {
            return Verdict::Close;
        }
        rx.await.unwrap_or(Verdict::Close)
    }

    /// Report that a connection's read side ended.
    pub async fn closed(&self, id: SessionId) {
        let _ = self.tx.send(Event::Closed { id }).await;
    }
}
