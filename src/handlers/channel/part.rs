//! PART command handler.

use quill_proto::Message;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};
use crate::state::SessionState;

/// Handler for PART command.
///
/// `PART <channel>`. Members, the parting client included, see the PART
/// before the membership is dropped. Parting a channel not joined does
/// nothing.
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let channel = msg.params[0].as_str();

        let Some(session) = ctx.session() else {
            return Ok(());
        };
        if session.state != SessionState::Active || !session.is_member(channel, ctx.server.casemap)
        {
            return Ok(());
        }

        let part = Message::new("PART")
            .with_prefix(session.prefix())
            .with_param(channel);
        if let Some(line) = ctx.encode(&part) {
            ctx.router.broadcast(ctx.sessions, None, channel, &line);
        }

        let casemap = ctx.server.casemap;
        if let Some(session) = ctx.session_mut() {
            session.remove_channel(channel, casemap);
        }
        Ok(())
    }
}
