//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! parsed IRC messages to the session state machine.
//!
//! ## State Machine
//!
//! ```text
//!  ┌──────────┐  NICK   ┌──────────┐  USER   ┌──────────┐
//!  │ WaitNick ├────────►│ WaitUser ├────────►│  Active  │
//!  └────┬─────┘         └────┬─────┘         └────┬─────┘
//!       │                    │    QUIT            │
//!       └────────────────────┴────────────────────┴──────► Disconnected
//! ```
//!
//! Commands arriving in a state that does not accept them are ignored.

mod channel;
mod connection;
mod core;
pub mod helpers;
mod messaging;

pub use self::core::{CommandKind, Context, Handler, Registry};
