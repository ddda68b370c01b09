//! Error types for the IRC protocol library.
//!
//! This module defines error types for transport-level failures,
//! message parsing failures, and serializer misuse.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Line exceeded the maximum allowed length.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Bytes seen so far for the offending line.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Failed to parse an IRC message.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The rejected line, lossily decoded.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Reasons a line fails the message grammar.
///
/// Every variant means the same thing to a server: the line is malformed and
/// is dropped whole. The variants exist for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty (or only a line terminator).
    #[error("empty message")]
    EmptyMessage,

    /// Line exceeded the maximum line length.
    #[error("line too long: {0} bytes")]
    TooLong(usize),

    /// Line is not valid UTF-8.
    #[error("invalid utf-8 at byte {0}")]
    InvalidUtf8(usize),

    /// Tags section does not match the tag grammar.
    #[error("invalid tags at position {0}")]
    InvalidTags(usize),

    /// Prefix does not match the prefix grammar.
    #[error("invalid prefix at position {0}")]
    InvalidPrefix(usize),

    /// Command is missing or is neither all letters nor all digits.
    #[error("invalid command at position {0}")]
    InvalidCommand(usize),

    /// A parameter is empty or contains a forbidden character.
    #[error("invalid parameter at position {0}")]
    InvalidParams(usize),
}

impl MessageParseError {
    /// Byte offset of the failure, when one is known.
    pub fn position(&self) -> Option<usize> {
        match *self {
            Self::EmptyMessage | Self::TooLong(_) => None,
            Self::InvalidUtf8(p)
            | Self::InvalidTags(p)
            | Self::InvalidPrefix(p)
            | Self::InvalidCommand(p)
            | Self::InvalidParams(p) => Some(p),
        }
    }
}

/// Errors from serializing a message that cannot be represented on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A parameter other than the last one would need a `:` prefix.
    #[error("parameter {index} must be last: it is empty, starts with ':' or contains a space")]
    MisplacedTrailing {
        /// Index of the offending parameter.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_reporting() {
        assert_eq!(MessageParseError::InvalidCommand(4).position(), Some(4));
        assert_eq!(MessageParseError::EmptyMessage.position(), None);
        assert_eq!(MessageParseError::TooLong(3000).position(), None);
    }

    #[test]
    fn test_invalid_message_display() {
        let err = ProtocolError::InvalidMessage {
            string: "12ab".to_string(),
            cause: MessageParseError::InvalidCommand(0),
        };
        assert_eq!(err.to_string(), "invalid message: 12ab");
    }
}
