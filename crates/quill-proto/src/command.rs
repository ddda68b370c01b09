//! IRC command names.

use std::fmt::{self, Display, Formatter};

/// A command token: either a word of letters or a numeric reply code.
///
/// The parser only produces commands that match the grammar. Commands built
/// by hand through [`Command::from`] are classified but not validated.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Command {
    /// One or more ASCII letters, case preserved (e.g., `PRIVMSG`).
    Word(String),
    /// One or more ASCII digits (e.g., `001`).
    Numeric(String),
}

impl Command {
    /// The command text as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Command::Word(s) | Command::Numeric(s) => s,
        }
    }

    /// Whether this is a numeric reply code.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Command::Numeric(_))
    }

    /// Compare against a command name ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        Command::from(s.to_owned())
    }
}

impl From<String> for Command {
    fn from(s: String) -> Self {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Command::Numeric(s)
        } else {
            Command::Word(s)
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
