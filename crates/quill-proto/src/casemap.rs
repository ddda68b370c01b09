//! IRC case-mapping functions.
//!
//! Nicknames and channel names compare case-insensitively. Two mappings are
//! supported: plain `ascii` (only `A-Z` fold) and `rfc1459`, where some
//! punctuation is also considered equivalent (e.g., `[` and `{`).

/// Case mapping used when comparing nicknames and channel names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMapping {
    /// Only ASCII letters fold.
    #[default]
    Ascii,
    /// ASCII letters fold, plus `[]\~` fold to `{}|^`.
    Rfc1459,
}

impl CaseMapping {
    /// Lowercase a single character under this mapping.
    #[inline]
    pub const fn lower_char(self, c: char) -> char {
        match self {
            Self::Ascii => c.to_ascii_lowercase(),
            Self::Rfc1459 => irc_lower_char(c),
        }
    }

    /// Lowercase a string under this mapping.
    pub fn to_lower(self, s: &str) -> String {
        s.chars().map(|c| self.lower_char(c)).collect()
    }

    /// Compare two strings case-insensitively under this mapping.
    pub fn eq(self, a: &str, b: &str) -> bool {
        match self {
            Self::Ascii => ascii_eq(a, b),
            Self::Rfc1459 => irc_eq(a, b),
        }
    }

    /// The ISUPPORT-style token for this mapping.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Rfc1459 => "rfc1459",
        }
    }
}

/// Convert a single character to IRC lowercase using RFC 1459 case mapping.
///
/// In addition to ASCII lowercase conversion, this maps:
/// - `[` → `{`
/// - `]` → `}`
/// - `\` → `|`
/// - `~` → `^`
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Convert a string to IRC lowercase using RFC 1459 case mapping.
pub fn irc_to_lower(s: &str) -> String {
    CaseMapping::Rfc1459.to_lower(s)
}

/// Compare two strings using RFC 1459 case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}

/// Compare two strings ignoring ASCII case only.
#[inline]
pub fn ascii_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irc_lower_char() {
        assert_eq!(irc_lower_char('A'), 'a');
        assert_eq!(irc_lower_char('Z'), 'z');
        assert_eq!(irc_lower_char('['), '{');
        assert_eq!(irc_lower_char(']'), '}');
        assert_eq!(irc_lower_char('\\'), '|');
        assert_eq!(irc_lower_char('~'), '^');
        assert_eq!(irc_lower_char('0'), '0');
        assert_eq!(irc_lower_char('#'), '#');
    }

    #[test]
    fn test_irc_to_lower() {
        assert_eq!(irc_to_lower("HELLO"), "hello");
        assert_eq!(irc_to_lower("#Channel[1]"), "#channel{1}");
        assert_eq!(irc_to_lower("Nick\\Away"), "nick|away");
    }

    #[test]
    fn test_ascii_mapping_keeps_punctuation_distinct() {
        let map = CaseMapping::Ascii;
        assert!(map.eq("Alice", "aLICE"));
        assert!(map.eq("#Chat", "#chat"));
        assert!(!map.eq("nick[", "nick{"));
        assert_eq!(map.to_lower("Nick[A]"), "nick[a]");
    }

    #[test]
    fn test_rfc1459_mapping_folds_punctuation() {
        let map = CaseMapping::Rfc1459;
        assert!(map.eq("nick[", "NICK{"));
        assert!(map.eq("a\\b", "A|B"));
        assert!(!map.eq("short", "longer"));
    }

    #[test]
    fn test_default_is_ascii() {
        assert_eq!(CaseMapping::default(), CaseMapping::Ascii);
        assert_eq!(CaseMapping::default().as_str(), "ascii");
    }
}
