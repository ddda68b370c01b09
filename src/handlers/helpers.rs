//! Helper functions for IRC command handlers.

use bytes::{Bytes, BytesMut};
use quill_proto::{Encoded, Message, Prefix};
use tracing::{debug, warn};

/// Helper to create a server reply message (numeric response).
///
/// Produces `:<server> <code> <nick> :<text>`.
pub fn server_reply(server_name: &str, code: &str, nick: &str, text: &str) -> Message {
    Message::new(code)
        .with_prefix(Prefix::host(server_name))
        .with_param(nick)
        .with_trailing(text)
}

/// Encode `msg` as a CRLF-terminated line no longer than `max_line_len`.
///
/// Lines that would be too long are cut short and still sent.
pub fn encode_line(msg: &Message, max_line_len: usize) -> Option<Bytes> {
    let mut buf = BytesMut::with_capacity(128);
    match msg.encode_into(&mut buf, max_line_len.saturating_sub(2)) {
        Ok(Encoded::Complete(_)) => {}
        Ok(Encoded::Truncated(written)) => {
            debug!(command = %msg.command, written, "outbound line truncated");
        }
        Err(e) => {
            warn!(command = %msg.command, error = %e, "unencodable message dropped");
            return None;
        }
    }
    buf.extend_from_slice(b"\r\n");
    Some(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_reply_shape() {
        let msg = server_reply("the.server", "001", "alice", "You");
        assert_eq!(msg.to_string(), ":the.server 001 alice :You");
    }

    #[test]
    fn encode_line_appends_crlf() {
        let msg = Message::new("PART").with_prefix(Prefix::user("a", "b", "c")).with_param("#x");
        assert_eq!(encode_line(&msg, 2048).unwrap(), Bytes::from_static(b":a!b@c PART #x\r\n"));
    }

    #[test]
    fn encode_line_truncates_to_limit() {
        let msg = Message::new("PRIVMSG").with_param("#x").with_trailing("a".repeat(100));
        let line = encode_line(&msg, 32).unwrap();
        assert_eq!(line.len(), 32);
        assert!(line.ends_with(b"\r\n"));
    }

    #[test]
    fn encode_line_drops_misplaced_trailing() {
        let msg = Message::new("PRIVMSG").with_param("a b").with_param("c");
        assert!(encode_line(&msg, 2048).is_none());
    }
}
