//! quillircd - Quill IRC Daemon
//!
//! A small IRC server core: strict line parsing, a registration state
//! machine, and channel fan-out driven by a single state-owning task.

mod config;
mod dispatcher;
mod error;
mod handlers;
mod network;
mod router;
mod state;
mod telemetry;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::network::Gateway;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.server.name,
        casemapping = quill_proto::CaseMapping::from(config.server.casemapping).as_str(),
        max_sessions = config.limits.max_sessions,
        "Starting quillircd"
    );

    let dispatcher = Dispatcher::new(&config).spawn();
    let gateway = Gateway::bind(config.listen.address, dispatcher, config.limits.max_line_len)
        .await
        .map_err(|e| {
            error!(address = %config.listen.address, error = %e, "Failed to bind listener");
            e
        })?;

    gateway.run().await
}
