//! Connection and registration handlers.
//!
//! Handles NICK, USER, QUIT commands.

mod nick;
mod quit;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use quit::QuitHandler;
pub use user::UserHandler;
