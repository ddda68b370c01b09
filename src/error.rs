//! Unified error handling for quillircd.
//!
//! Handler errors are protocol rejections: they produce a reply to the
//! offending client and leave the connection open. Transport failures end the
//! session without a reply.

use quill_proto::ProtocolError;
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("invalid channel name: {0}")]
    InvalidChannel(String),
}

impl HandlerError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::InvalidChannel(_) => "invalid_channel",
        }
    }

    /// Render the client-visible reply line, CRLF included.
    ///
    /// The nickname errors carry the rejected nickname in the source position
    /// and no server prefix; clients of this server rely on that shape.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> String {
        match self {
            Self::ErroneousNickname(bad_nick) => {
                format!("{} 432 :Erroneous nickname\r\n", bad_nick)
            }
            Self::NicknameInUse(bad_nick) => {
                format!("{} 433 :Nickname already in use\r\n", bad_nick)
            }
            Self::InvalidChannel(_) => {
                format!(":{} 403 {} :Invalid channel name\r\n", server_name, nick)
            }
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Transport Errors (connection teardown)
// ============================================================================

/// Reasons a connection's read side ends. Every variant closes the session
/// without a reply.
#[derive(Debug, Error)]
pub enum TransportFailure {
    #[error("connection closed by peer")]
    Eof,

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong { actual: usize, limit: usize },
}

impl From<ProtocolError> for TransportFailure {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => Self::Io(e),
            ProtocolError::MessageTooLong { actual, limit } => Self::LineTooLong { actual, limit },
            other => Self::Io(std::io::Error::other(other)),
        }
    }
}
