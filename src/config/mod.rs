//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, Casemapping)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Capacity limits (LimitsConfig)
//! - [`validation`]: Startup checks run by `Config::load`

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Casemapping, Config, ConfigError, ServerConfig};
