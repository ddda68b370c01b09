use crate::command::Command;
use crate::error::MessageParseError;
use crate::prefix::Prefix;

use super::parse::parse_line;
use super::tags::Tag;

/// Maximum line length in bytes, terminator included.
pub const MAX_LINE_LEN: usize = 2048;

/// Maximum number of tags kept per message; further tags are dropped.
pub const MAX_TAGS: usize = 64;

/// Maximum number of parameters kept per message: up to 15 middle
/// parameters plus the trailing one. Further middles are dropped.
pub const MAX_PARAMS: usize = 16;

/// Size limits applied while parsing.
///
/// Exceeding `max_len` rejects the line. Exceeding `max_tags` or
/// `max_params` only drops the excess: the rest of the line must still
/// match the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum line length in bytes, terminator included.
    pub max_len: usize,
    /// Maximum number of tags kept.
    pub max_tags: usize,
    /// Maximum number of parameters kept. One slot is held back for the
    /// trailing parameter.
    pub max_params: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_len: MAX_LINE_LEN,
            max_tags: MAX_TAGS,
            max_params: MAX_PARAMS,
        }
    }
}

/// An owned IRC message.
///
/// A parsed `Message` always matched the grammar end to end; there is no
/// partially-populated state.
///
/// # Example
///
/// ```
/// use quill_proto::Message;
///
/// let msg = Message::parse(b":nick!user@host PRIVMSG #channel :Hello!\r\n").unwrap();
/// assert_eq!(msg.param(0), Some("#channel"));
/// assert!(msg.trailing);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// IRCv3 message tags, in wire order.
    pub tags: Vec<Tag>,
    /// Message prefix/source.
    pub prefix: Option<Prefix>,
    /// The command name or numeric.
    pub command: Command,
    /// Parameters in wire order, trailing parameter included.
    pub params: Vec<String>,
    /// Whether the last parameter was (or must be) sent in `:trailing` form.
    pub trailing: bool,
}

impl Message {
    /// Create a message with no tags, prefix, or parameters.
    pub fn new(command: impl Into<Command>) -> Self {
        Message {
            tags: Vec::new(),
            prefix: None,
            command: command.into(),
            params: Vec::new(),
            trailing: false,
        }
    }

    /// Parse a raw line using the default limits.
    ///
    /// The line may end in `\r\n` or `\n`.
    pub fn parse(line: &[u8]) -> Result<Message, MessageParseError> {
        parse_line(line, &ParseLimits::default())
    }

    /// Parse a raw line using custom limits.
    pub fn parse_with(line: &[u8], limits: &ParseLimits) -> Result<Message, MessageParseError> {
        parse_line(line, limits)
    }

    /// Set the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Append a middle parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append the final parameter, always sent in `:trailing` form.
    #[must_use]
    pub fn with_trailing(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self.trailing = true;
        self
    }

    /// Get a parameter by index.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Get the value of a tag by key, ignoring vendor.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nickname)
    }
}
