//! Nickname validation utilities.
//!
//! The accepted grammar is deliberately narrow: a letter, followed by any
//! number of letters, digits, or one of `` - [ ] \ ` ^ { } ``.

/// Extension trait for checking if a string is a valid nickname.
pub trait NickExt {
    /// Check if this string is a valid nickname.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_proto::NickExt;
    ///
    /// assert!("alice".is_valid_nick());
    /// assert!("b0b[away]".is_valid_nick());
    ///
    /// assert!(!"1bad".is_valid_nick());   // Can't start with digit
    /// assert!(!"".is_valid_nick());       // Empty
    /// assert!(!"_under".is_valid_nick()); // Underscore is not accepted
    /// ```
    fn is_valid_nick(&self) -> bool;
}

/// Punctuation allowed after the first character.
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '-' | '[' | ']' | '\\' | '`' | '^' | '{' | '}')
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        let mut chars = self.chars();

        let Some(first) = chars.next() else {
            return false;
        };

        if !first.is_ascii_alphabetic() {
            return false;
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c))
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nicks() {
        assert!("nick".is_valid_nick());
        assert!("Nick".is_valid_nick());
        assert!("nick123".is_valid_nick());
        assert!("n".is_valid_nick());
        assert!("nick-name".is_valid_nick());
    }

    #[test]
    fn test_special_chars_after_first() {
        assert!("a[b]".is_valid_nick());
        assert!("a\\b".is_valid_nick());
        assert!("a`b".is_valid_nick());
        assert!("a^b".is_valid_nick());
        assert!("a{b}".is_valid_nick());
    }

    #[test]
    fn test_invalid_nicks() {
        assert!(!"".is_valid_nick());
        assert!(!"1bad".is_valid_nick());
        assert!(!"[nick]".is_valid_nick());
        assert!(!"-nick".is_valid_nick());
        assert!(!"nick name".is_valid_nick());
        assert!(!"nick@host".is_valid_nick());
        assert!(!"nick!user".is_valid_nick());
        assert!(!"nick_name".is_valid_nick());
        assert!(!"nick|away".is_valid_nick());
        assert!(!"nické".is_valid_nick());
    }

    #[test]
    fn test_string_impl() {
        assert!(String::from("alice").is_valid_nick());
        assert!(!String::from("9lives").is_valid_nick());
    }
}
