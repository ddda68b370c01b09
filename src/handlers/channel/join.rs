//! JOIN command handler.

use quill_proto::{ChannelExt, Message};
use tracing::debug;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use crate::state::SessionState;

/// Handler for JOIN command.
///
/// `JOIN <channel>`. Rejoining, or joining with a full channel set, does
/// nothing. A successful join is announced to every member, the joiner
/// included.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let channel = msg.params[0].as_str();

        if ctx.state() != SessionState::Active {
            return Ok(());
        }

        if !channel.is_channel_name() {
            return Err(HandlerError::InvalidChannel(channel.to_owned()));
        }

        let max = ctx.server.max_channels;
        let casemap = ctx.server.casemap;
        let Some(session) = ctx.session_mut() else {
            return Ok(());
        };
        if !session.add_channel(channel, max, casemap) {
            debug!(channel, joined = session.channels().len(), "join ignored");
            return Ok(());
        }

        let announce = Message::new("JOIN")
            .with_prefix(session.prefix())
            .with_param(channel);
        if let Some(line) = ctx.encode(&announce) {
            ctx.router.broadcast(ctx.sessions, None, channel, &line);
        }
        Ok(())
    }
}
