//! NICK command handler.

use quill_proto::{Message, NickExt, Prefix};
use tracing::info;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use crate::state::SessionState;

/// Handler for NICK command.
///
/// Picks the first nickname during registration, or changes it once active.
/// Ignored while waiting for USER.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // NICK <nickname>
        let nick = msg.params[0].as_str();

        let state = ctx.state();
        if !matches!(state, SessionState::WaitNick | SessionState::Active) {
            return Ok(());
        }

        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_owned()));
        }

        if ctx
            .sessions
            .nick_owner(nick, ctx.id, ctx.server.casemap)
            .is_some()
        {
            return Err(HandlerError::NicknameInUse(nick.to_owned()));
        }

        if state == SessionState::Active {
            let old = ctx.session().map(|s| s.nick_or_star().to_owned());
            if let Some(old) = old {
                let change = Message::new("NICK")
                    .with_prefix(Prefix::nick(&old))
                    .with_param(nick);
                if let Some(line) = ctx.encode(&change) {
                    ctx.router.broadcast_channels(ctx.sessions, ctx.id, &line);
                }
                info!(session = %ctx.id, old = %old, new = %nick, "nick changed");
            }
        }

        if let Some(session) = ctx.session_mut() {
            session.nick = Some(nick.to_owned());
            if session.state == SessionState::WaitNick {
                session.state = SessionState::WaitUser;
            }
        }

        Ok(())
    }
}
