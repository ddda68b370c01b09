//! USER command handler.

use quill_proto::Message;
use tracing::info;

use super::welcome::send_welcome_burst;
use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};
use crate::state::SessionState;

/// Handler for USER command.
///
/// `USER <username> <hostname> <servername> :<realname>`. Only the first two
/// parameters are kept; the second becomes the session's host.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Some(session) = ctx.session_mut() else {
            return Ok(());
        };
        if session.state != SessionState::WaitUser {
            return Ok(());
        }

        session.user = Some(msg.params[0].clone());
        session.host = Some(msg.params[1].clone());
        session.state = SessionState::Active;
        let nick = session.nick_or_star().to_owned();

        info!(session = %ctx.id, nick = %nick, "client registered");
        send_welcome_burst(ctx, &nick);
        Ok(())
    }
}
