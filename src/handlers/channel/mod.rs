//! Channel command handlers.
//!
//! Handles JOIN, PART commands.

mod join;
mod part;

pub use join::JoinHandler;
pub use part::PartHandler;
