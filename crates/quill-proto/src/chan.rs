//! Channel name utilities.

/// Maximum number of characters after the `#`/`&` sigil.
pub const MAX_CHANNEL_NAME_LEN: usize = 200;

/// Extension trait for checking if a string is a valid channel name.
pub trait ChannelExt {
    /// Check if this string is a valid channel name.
    ///
    /// Valid channel names:
    /// - Start with `#` or `&`
    /// - Have 1 to 200 further characters
    /// - Do not contain space, comma, or BEL (0x07)
    ///
    /// ```
    /// use quill_proto::ChannelExt;
    ///
    /// assert!("#rust".is_channel_name());
    /// assert!("&local".is_channel_name());
    /// assert!(!"#".is_channel_name());
    /// assert!(!"rust".is_channel_name());
    /// ```
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();

        match chars.next() {
            Some('#' | '&') => {}
            _ => return false,
        }

        let mut len = 0;
        for c in chars {
            if matches!(c, ' ' | ',' | '\x07') {
                return false;
            }
            len += 1;
            if len > MAX_CHANNEL_NAME_LEN {
                return false;
            }
        }

        len > 0
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
