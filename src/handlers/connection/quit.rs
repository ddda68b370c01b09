//! QUIT command handler.

use quill_proto::Message;
use tracing::info;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};
use crate::state::SessionState;

/// Handler for QUIT command.
///
/// The QUIT goes to each of the client's channels in turn, so a peer gets
/// one copy per shared channel. The quitting client gets its own copy. The session is marked disconnected and torn down by the dispatcher
/// after this returns.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Some(session) = ctx.session() else {
            return Ok(());
        };
        if session.state == SessionState::Disconnected {
            return Ok(());
        }

        let reason = msg
            .param(0)
            .unwrap_or(ctx.server.quit_message.as_str())
            .to_owned();
        let quit = Message::new("QUIT")
            .with_prefix(session.prefix())
            .with_trailing(reason.as_str());

        if let Some(line) = ctx.encode(&quit) {
            ctx.router.broadcast_channels(ctx.sessions, ctx.id, &line);
            ctx.send_raw(line);
        }

        info!(session = %ctx.id, reason = %reason, "client quit");
        if let Some(session) = ctx.session_mut() {
            session.state = SessionState::Disconnected;
        }
        Ok(())
    }
}
