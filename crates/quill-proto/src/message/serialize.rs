use std::fmt::{self, Display, Formatter, Write};

use bytes::BytesMut;

use crate::error::EncodeError;

use super::tags::escape_tag_value;
use super::types::Message;

/// Outcome of a budgeted [`Message::encode_into`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoded {
    /// The whole message fit; holds the number of bytes written.
    Complete(usize),
    /// The budget ran out; holds the number of bytes written, which equals
    /// the budget or falls short of it by less than one UTF-8 character.
    Truncated(usize),
}

impl Encoded {
    /// Number of bytes written to the destination.
    pub fn len(&self) -> usize {
        match *self {
            Encoded::Complete(n) | Encoded::Truncated(n) => n,
        }
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the output was cut short.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Encoded::Truncated(_))
    }
}

/// A parameter that can only be sent in `:trailing` form.
fn needs_colon(param: &str) -> bool {
    param.is_empty() || param.starts_with(':') || param.contains(' ')
}

/// Write sink that stops at a byte budget.
struct Bounded<'a> {
    dst: &'a mut BytesMut,
    remaining: usize,
    written: usize,
    truncated: bool,
}

impl Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.len() <= self.remaining {
            self.dst.extend_from_slice(s.as_bytes());
            self.remaining -= s.len();
            self.written += s.len();
            return Ok(());
        }

        let mut end = self.remaining;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.dst.extend_from_slice(&s.as_bytes()[..end]);
        self.written += end;
        self.remaining = 0;
        self.truncated = true;
        Err(fmt::Error)
    }
}

impl Message {
    /// Check that every parameter except the last can go out as a middle
    /// parameter.
    pub fn check_params(&self) -> Result<(), EncodeError> {
        let last = self.params.len().saturating_sub(1);
        match self.params[..last].iter().position(|p| needs_colon(p)) {
            Some(index) => Err(EncodeError::MisplacedTrailing { index }),
            None => Ok(()),
        }
    }

    /// Append the wire form of this message to `dst`, writing at most
    /// `budget` bytes.
    ///
    /// No line terminator is written. On truncation the bytes that fit stay
    /// in `dst`; a multi-byte character is never split.
    pub fn encode_into(&self, dst: &mut BytesMut, budget: usize) -> Result<Encoded, EncodeError> {
        self.check_params()?;

        let mut sink = Bounded {
            dst,
            remaining: budget,
            written: 0,
            truncated: false,
        };
        let _ = self.write_wire(&mut sink);

        Ok(if sink.truncated {
            Encoded::Truncated(sink.written)
        } else {
            Encoded::Complete(sink.written)
        })
    }

    fn write_wire(&self, f: &mut dyn Write) -> fmt::Result {
        if !self.tags.is_empty() {
            f.write_char('@')?;

            for (i, tag) in self.tags.iter().enumerate() {
                if i > 0 {
                    f.write_char(';')?;
                }
                if let Some(vendor) = &tag.vendor {
                    write!(f, "+{}/", vendor)?;
                }
                write!(f, "{}=", tag.key)?;
                escape_tag_value(f, &tag.value)?;
            }

            f.write_char(' ')?;
        }

        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        write!(f, "{}", self.command)?;

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            if i == last && (self.trailing || needs_colon(param)) {
                write!(f, " :{}", param)?;
            } else {
                write!(f, " {}", param)?;
            }
        }

        Ok(())
    }
}

/// Renders the wire form without a line terminator.
///
/// Unlike [`Message::encode_into`] this does not reject a middle parameter
/// that needs a colon; check with [`Message::check_params`] first when the
/// parameters are untrusted.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_wire(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::message::Tag;
    use crate::prefix::Prefix;

    use super::*;

    #[test]
    fn test_display_full_message() {
        let msg = Message::new("PRIVMSG")
            .with_tag(Tag::new("time", "12:00"))
            .with_tag(Tag::vendored("example.com", "label", "a b"))
            .with_prefix(Prefix::user("nick", "user", "host"))
            .with_param("#chan")
            .with_trailing("hello world");
        assert_eq!(
            msg.to_string(),
            "@time=12:00;+example.com/label=a\\sb :nick!user@host PRIVMSG #chan :hello world"
        );
    }

    #[test]
    fn test_colon_only_where_needed() {
        assert_eq!(Message::new("NICK").with_param("alice").to_string(), "NICK alice");
        assert_eq!(Message::new("QUIT").with_param("").to_string(), "QUIT :");
        assert_eq!(Message::new("X").with_param(":odd").to_string(), "X ::odd");
        assert_eq!(Message::new("X").with_trailing("word").to_string(), "X :word");
    }

    #[test]
    fn test_encode_complete() {
        let msg = Message::new("JOIN")
            .with_prefix(Prefix::nick("alice"))
            .with_param("#test");
        let mut buf = BytesMut::new();
        let out = msg.encode_into(&mut buf, 512).unwrap();
        assert_eq!(out, Encoded::Complete(17));
        assert_eq!(&buf[..], b":alice JOIN #test");
    }

    #[test]
    fn test_encode_truncates_at_budget() {
        let msg = Message::new("PRIVMSG")
            .with_param("#x")
            .with_trailing("0123456789");
        let mut buf = BytesMut::from(&b"keep"[..]);
        let out = msg.encode_into(&mut buf, 14).unwrap();
        assert_eq!(out, Encoded::Truncated(14));
        assert_eq!(&buf[..], b"keepPRIVMSG #x :01");
    }

    #[test]
    fn test_encode_does_not_split_characters() {
        let msg = Message::new("X").with_trailing("ééé");
        let mut buf = BytesMut::new();
        // "X :" is 3 bytes, each "é" is 2.
        let out = msg.encode_into(&mut buf, 6).unwrap();
        assert_eq!(out, Encoded::Truncated(5));
        assert_eq!(&buf[..], "X :é".as_bytes());
    }

    #[test]
    fn test_encode_zero_budget() {
        let mut buf = BytesMut::new();
        let out = Message::new("PING").encode_into(&mut buf, 0).unwrap();
        assert!(out.is_truncated());
        assert!(out.is_empty());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode_rejects_misplaced_trailing() {
        let msg = Message::new("PRIVMSG")
            .with_param("two words")
            .with_param("last");
        let mut buf = BytesMut::new();
        assert_eq!(
            msg.encode_into(&mut buf, 512),
            Err(EncodeError::MisplacedTrailing { index: 0 })
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_reparse_preserves_params() {
        let line = "@a=1 :n!u@h PRIVMSG #c :hi there";
        let msg = Message::parse(line.as_bytes()).unwrap();
        assert_eq!(msg.to_string(), line);
    }
}
