//! PRIVMSG command handler.

use quill_proto::Message;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};
use crate::state::SessionState;

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <channel> :<text>`. Relayed to every other member of the channel.
/// The sender does not need to be a member, and nothing comes back to it.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target = msg.params[0].as_str();
        let text = msg.params[1].as_str();

        let Some(session) = ctx.session() else {
            return Ok(());
        };
        if session.state != SessionState::Active {
            return Ok(());
        }

        let relay = Message::new("PRIVMSG")
            .with_prefix(session.prefix())
            .with_param(target)
            .with_trailing(text);
        if let Some(line) = ctx.encode(&relay) {
            ctx.router.broadcast(ctx.sessions, Some(ctx.id), target, &line);
        }
        Ok(())
    }
}
