//! Command table and dispatch.
//!
//! The command set is closed: each supported command is a [`CommandKind`]
//! with a fixed minimum parameter count. Unknown commands and commands with
//! too few parameters are dropped without a reply.

use bytes::Bytes;
use quill_proto::{Command, Message};
use tracing::{debug, span, Level};

use super::context::{Context, Handler};
use crate::handlers::{
    channel::{JoinHandler, PartHandler},
    connection::{NickHandler, QuitHandler, UserHandler},
    messaging::PrivmsgHandler,
};

/// A supported command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Nick,
    User,
    Join,
    Part,
    Privmsg,
    Quit,
}

impl CommandKind {
    /// Every supported command, in lookup order.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Nick,
        CommandKind::User,
        CommandKind::Join,
        CommandKind::Part,
        CommandKind::Privmsg,
        CommandKind::Quit,
    ];

    /// Canonical (uppercase) command name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nick => "NICK",
            Self::User => "USER",
            Self::Join => "JOIN",
            Self::Part => "PART",
            Self::Privmsg => "PRIVMSG",
            Self::Quit => "QUIT",
        }
    }

    /// Fewest parameters the command accepts.
    pub fn min_params(self) -> usize {
        match self {
            Self::Nick => 1,
            Self::User => 4,
            Self::Join => 1,
            Self::Part => 1,
            Self::Privmsg => 2,
            Self::Quit => 0,
        }
    }

    /// Look up a command by name, ignoring ASCII case. Numerics never match.
    pub fn lookup(command: &Command) -> Option<Self> {
        if command.is_numeric() {
            return None;
        }
        Self::ALL.into_iter().find(|kind| command.is(kind.name()))
    }

    fn handler(self) -> &'static dyn Handler {
        match self {
            Self::Nick => &NickHandler,
            Self::User => &UserHandler,
            Self::Join => &JoinHandler,
            Self::Part => &PartHandler,
            Self::Privmsg => &PrivmsgHandler,
            Self::Quit => &QuitHandler,
        }
    }
}

/// Routes parsed messages to their handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct Registry;

impl Registry {
    pub fn new() -> Self {
        Self
    }

    /// Run the handler for `msg`, if any.
    ///
    /// A handler error becomes a reply to the sender; the connection stays
    /// open.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) {
        let Some(kind) = CommandKind::lookup(&msg.command) else {
            debug!(session = %ctx.id, command = %msg.command, "unknown command dropped");
            return;
        };

        if msg.params.len() < kind.min_params() {
            debug!(
                session = %ctx.id,
                command = kind.name(),
                params = msg.params.len(),
                "too few parameters, command dropped"
            );
            return;
        }

        let span = span!(Level::DEBUG, "command", name = kind.name(), session = %ctx.id);
        let _enter = span.enter();

        if let Err(err) = kind.handler().handle(ctx, msg) {
            debug!(code = err.error_code(), error = %err, "command rejected");
            let nick = ctx.session().map_or("*", |s| s.nick_or_star()).to_owned();
            let reply = err.to_irc_reply(&ctx.server.name, &nick);
            ctx.send_raw(Bytes::from(reply));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(CommandKind::lookup(&Command::from("privmsg")), Some(CommandKind::Privmsg));
        assert_eq!(CommandKind::lookup(&Command::from("NiCk")), Some(CommandKind::Nick));
        assert_eq!(CommandKind::lookup(&Command::from("NOTICE")), None);
        assert_eq!(CommandKind::lookup(&Command::from("001")), None);
    }

    #[test]
    fn minimum_parameter_counts() {
        let mins: Vec<_> = CommandKind::ALL
            .iter()
            .map(|k| (k.name(), k.min_params()))
            .collect();
        assert_eq!(
            mins,
            [
                ("NICK", 1),
                ("USER", 4),
                ("JOIN", 1),
                ("PART", 1),
                ("PRIVMSG", 2),
                ("QUIT", 0)
            ]
        );
    }
}
