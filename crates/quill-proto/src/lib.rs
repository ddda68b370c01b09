//! # quill-proto
//!
//! Parsing and serialization for the IRC wire format, including IRCv3
//! message tags.
//!
//! ## Features
//!
//! - Strict, anchored grammar: a line is either fully valid or rejected
//! - Linear-time parsing with no backtracking, whatever the input
//! - Budgeted serialization that reports truncation instead of overflowing
//! - Nickname and channel name grammar checks
//! - ASCII and RFC 1459 case mapping
//! - Optional Tokio line codec with a hard line length limit
//!
//! ## Quick Start
//!
//! ```rust
//! use quill_proto::{Message, Prefix};
//!
//! let msg = Message::parse(b"@time=now :nick!user@host PRIVMSG #rust :Hello, world!\r\n")
//!     .expect("valid line");
//! assert_eq!(msg.command.as_str(), "PRIVMSG");
//! assert_eq!(msg.params, ["#rust", "Hello, world!"]);
//!
//! let reply = Message::new("PRIVMSG")
//!     .with_prefix(Prefix::user("bot", "bot", "example.com"))
//!     .with_param("#rust")
//!     .with_trailing("hi there");
//! assert_eq!(reply.to_string(), ":bot!bot@example.com PRIVMSG #rust :hi there");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod prefix;

pub use self::casemap::{ascii_eq, irc_eq, irc_lower_char, irc_to_lower, CaseMapping};
pub use self::chan::{ChannelExt, MAX_CHANNEL_NAME_LEN};
pub use self::command::Command;
pub use self::error::{EncodeError, MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::{
    Encoded, Message, ParseLimits, Tag, MAX_LINE_LEN, MAX_PARAMS, MAX_TAGS,
};
pub use self::nick::NickExt;
pub use self::prefix::Prefix;
