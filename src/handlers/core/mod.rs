//! Core handler infrastructure.
//!
//! This module contains the command table, the handler context and the
//! [`Handler`] trait every command implements.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::{CommandKind, Registry};
