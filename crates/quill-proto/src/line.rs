//! Line-based codec for tokio.
//!
//! Splits a byte stream on `\n` without interpreting the content. Each
//! decoded line keeps its terminator so the parser sees exactly what arrived.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::message::MAX_LINE_LEN;

/// Line-based codec that handles newline-terminated messages.
///
/// By default, lines are limited to [`MAX_LINE_LEN`] bytes, terminator
/// included. A line that grows past the limit is an error and ends the
/// stream; it is never split into pieces.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// The maximum line length in bytes.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn too_long(&self, actual: usize) -> error::ProtocolError {
        error::ProtocolError::MessageTooLong {
            actual,
            limit: self.max_len,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = BytesMut;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<BytesMut>> {
        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line_len = self.next_index + offset + 1;
            self.next_index = 0;

            if line_len > self.max_len {
                return Err(self.too_long(line_len));
            }

            Ok(Some(src.split_to(line_len)))
        } else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(self.too_long(src.len()));
            }

            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<BytesMut>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        // Unterminated fragment at end of stream is still a line.
        self.next_index = 0;
        if src.is_empty() {
            Ok(None)
        } else {
            Ok(Some(src.split()))
        }
    }
}

impl Encoder<Bytes> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, line: Bytes, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(&line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\nNICK");

        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(&line[..], b"PING :test\r\n");
        assert_eq!(&buf[..], b"NICK");
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"x\n");
        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(&line[..], b"PING :x\n");
    }

    #[test]
    fn test_decode_too_long() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\n");

        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(error::ProtocolError::MessageTooLong { actual: 21, limit: 10 })
        ));
    }

    #[test]
    fn test_decode_partial_too_long() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("no newline in sight");

        assert!(matches!(
            codec.decode(&mut buf),
            Err(error::ProtocolError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_limit_counts_terminator() {
        let mut codec = LineCodec::with_max_len(6);
        let mut buf = BytesMut::from("PING\r\n");
        assert!(codec.decode(&mut buf).unwrap().is_some());

        let mut buf = BytesMut::from("PINGS\r\n");
        assert!(codec.decode(&mut buf).is_err());
    }

    #[test]
    fn test_decode_eof_fragment() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("QUIT");

        let line = codec.decode_eof(&mut buf).unwrap().unwrap();
        assert_eq!(&line[..], b"QUIT");
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode(Bytes::from_static(b"PONG :test\r\n"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }
}
