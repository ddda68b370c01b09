//! IRCv3 message tag types and value escaping.

use std::fmt::{Result as FmtResult, Write};

/// A single IRCv3 message tag: `[+vendor/]key=value`.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Tag {
    /// Vendor namespace (the host between `+` and `/`), if any.
    pub vendor: Option<String>,
    /// Tag key name.
    pub key: String,
    /// Unescaped value; empty when the wire value was empty.
    pub value: String,
}

impl Tag {
    /// Create a tag without a vendor namespace.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            vendor: None,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a vendor-namespaced tag.
    pub fn vendored(
        vendor: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Tag {
            vendor: Some(vendor.into()),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Escape a tag value for serialization.
///
/// Escapes special characters according to the IRCv3 message-tags spec.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    for c in value.chars() {
        match c {
            ';' => f.write_str("\\:")?,
            ' ' => f.write_str("\\s")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Unescape a tag value from wire format.
///
/// Reverses the escaping applied by [`escape_tag_value`]. Unknown escapes
/// keep the escaped character; a lone trailing backslash is dropped.
pub fn unescape_tag_value(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_owned();
    }

    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}
