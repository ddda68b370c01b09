//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket, asks the dispatcher for a session
//! for every accepted stream, and spawns the connection's tasks.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::dispatcher::DispatcherHandle;
use crate::network::Connection;

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    dispatcher: DispatcherHandle,
    max_line_len: usize,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        dispatcher: DispatcherHandle,
        max_line_len: usize,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Plaintext listener bound");

        Ok(Self {
            listener,
            dispatcher,
            max_line_len,
        })
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                    continue;
                }
            };

            let (tx, rx) = mpsc::unbounded_channel();
            let Some(id) = self.dispatcher.accept(tx).await else {
                warn!(%addr, "Connection refused: no free session slot");
                drop(stream);
                continue;
            };

            info!(%addr, session = %id, "Connection accepted");
            Connection::new(id, stream, addr, rx, self.dispatcher.clone(), self.max_line_len)
                .spawn();
        }
    }
}
