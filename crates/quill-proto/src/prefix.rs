//! IRC message prefix types.
//!
//! A prefix identifies the origin of a message: either a bare host (usually
//! a server name) or a `nick[!user][@host]` mask.

use std::fmt::{self, Display, Formatter};

/// IRC message prefix - identifies the origin of a message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Bare host with no `!` or `@` (e.g., `irc.example.com`).
    Host(String),
    /// User mask: nickname with optional username and hostname.
    User {
        /// Nickname.
        nick: String,
        /// Username (after `!`).
        user: Option<String>,
        /// Hostname (after `@`).
        host: Option<String>,
    },
}

impl Prefix {
    /// Create a full `nick!user@host` prefix.
    pub fn user(
        nick: impl Into<String>,
        user: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Prefix::User {
            nick: nick.into(),
            user: Some(user.into()),
            host: Some(host.into()),
        }
    }

    /// Create a nickname-only prefix.
    pub fn nick(nick: impl Into<String>) -> Self {
        Prefix::User {
            nick: nick.into(),
            user: None,
            host: None,
        }
    }

    /// Create a bare host prefix.
    pub fn host(host: impl Into<String>) -> Self {
        Prefix::Host(host.into())
    }

    /// The nickname, if this is a user prefix.
    pub fn nickname(&self) -> Option<&str> {
        match self {
            Prefix::User { nick, .. } => Some(nick),
            Prefix::Host(_) => None,
        }
    }

    /// Split a raw prefix body (without the leading `:`) into its parts.
    ///
    /// Returns `None` if a component is empty or a delimiter repeats.
    pub(crate) fn from_body(body: &str) -> Option<Self> {
        let Some(split) = body.find(['!', '@']) else {
            return Some(Prefix::Host(body.to_owned()));
        };

        let nick = &body[..split];
        let rest = &body[split..];
        let (user, host) = match rest.strip_prefix('!') {
            Some(after_bang) => match after_bang.split_once('@') {
                Some((user, host)) => (Some(user), Some(host)),
                None => (Some(after_bang), None),
            },
            None => (None, Some(&rest[1..])),
        };

        let bad = |part: &str| part.is_empty() || part.contains(['!', '@']);
        if nick.is_empty() || user.is_some_and(bad) || host.is_some_and(bad) {
            return None;
        }

        Some(Prefix::User {
            nick: nick.to_owned(),
            user: user.map(str::to_owned),
            host: host.map(str::to_owned),
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::Host(host) => f.write_str(host),
            Prefix::User { nick, user, host } => {
                f.write_str(nick)?;
                if let Some(user) = user {
                    write!(f, "!{}", user)?;
                }
                if let Some(host) = host {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}
