//! Channel fan-out.
//!
//! Channels are not stored anywhere. A channel's members are whichever
//! active sessions list it in their own channel set, so every broadcast is a
//! scan of the session table. Delivery follows table order.

use bytes::Bytes;
use quill_proto::CaseMapping;
use tracing::trace;

use crate::state::{SessionId, SessionState, SessionTable};

/// Delivers pre-encoded lines to channel members.
#[derive(Debug, Clone, Copy)]
pub struct Router {
    casemap: CaseMapping,
}

impl Router {
    pub fn new(casemap: CaseMapping) -> Self {
        Self { casemap }
    }

    /// Send `line` unchanged to every active member of `channel` except
    /// `except`. Returns the number of recipients.
    pub fn broadcast(
        &self,
        sessions: &SessionTable,
        except: Option<SessionId>,
        channel: &str,
        line: &Bytes,
    ) -> usize {
        let mut delivered = 0;
        for session in sessions.iter() {
            if Some(session.id()) == except || session.state != SessionState::Active {
                continue;
            }
            if session.is_member(channel, self.casemap) {
                session.send(line.clone());
                delivered += 1;
            }
        }
        trace!(channel, delivered, "broadcast");
        delivered
    }

    /// Send `line` to each channel `source` is in, one broadcast per
    /// channel, excluding `source`. A peer sharing several channels gets one
    /// copy per shared channel.
    pub fn broadcast_channels(
        &self,
        sessions: &SessionTable,
        source: SessionId,
        line: &Bytes,
    ) -> usize {
        let Some(origin) = sessions.get(source) else {
            return 0;
        };

        origin
            .channels()
            .iter()
            .map(|channel| self.broadcast(sessions, Some(source), channel, line))
            .sum()
    }
}
