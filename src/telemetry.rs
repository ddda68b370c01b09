//! Telemetry utilities for line tracing and connection spans.

use std::fmt;

/// Displays a raw protocol line with CR and LF made visible.
///
/// Invalid UTF-8 is rendered lossily; the line itself is not modified.
pub struct EscapedLine<'a>(pub &'a [u8]);

impl fmt::Display for EscapedLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in String::from_utf8_lossy(self.0).chars() {
            match c {
                '\r' => f.write_str("\\r")?,
                '\n' => f.write_str("\\n")?,
                c => fmt::Write::write_char(f, c)?,
            }
        }
        Ok(())
    }
}

/// Standardized span constructors for IRC observability.
pub mod spans {
    use std::net::SocketAddr;

    use tracing::{info_span, Span};

    use crate::state::SessionId;

    /// Create a span for a client connection.
    pub fn connection(session: SessionId, addr: SocketAddr) -> Span {
        info_span!("connection", session = %session, addr = %addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_line_terminators() {
        assert_eq!(EscapedLine(b"NICK alice\r\n").to_string(), "NICK alice\\r\\n");
    }

    #[test]
    fn invalid_utf8_is_lossy() {
        assert_eq!(EscapedLine(b"A\xffB\n").to_string(), "A\u{fffd}B\\n");
    }
}
