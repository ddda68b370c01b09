//! IRC message types, parsing and serialization.

mod parse;
mod serialize;
/// IRCv3 tag utilities.
pub mod tags;
mod types;

pub use self::serialize::Encoded;
pub use self::tags::Tag;
pub use self::types::{Message, ParseLimits, MAX_LINE_LEN, MAX_PARAMS, MAX_TAGS};
