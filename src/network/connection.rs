//! Connection - Handles an individual client connection.
//!
//! Each connection is split into two tasks:
//!
//! ```text
//!   socket ──► FramedRead<LineCodec> ──► reader ──Line──► Dispatcher
//!                                                              │
//!   socket ◄── FramedWrite<LineCodec> ◄── writer ◄── outbound queue
//! ```
//!
//! The reader owns the session's lifetime on the network side: it reports
//! EOF, read errors and oversized lines to the dispatcher. The writer ends by
//! itself once the dispatcher drops the session's queue.

use std::net::SocketAddr;

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use quill_proto::LineCodec;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info};

use crate::dispatcher::{DispatcherHandle, Verdict};
use crate::error::TransportFailure;
use crate::state::SessionId;
use crate::telemetry::spans;

/// A client connection handler.
pub struct Connection {
    id: SessionId,
    addr: SocketAddr,
    stream: TcpStream,
    outbound: mpsc::UnboundedReceiver<Bytes>,
    dispatcher: DispatcherHandle,
    max_line_len: usize,
}

impl Connection {
    /// Create a new connection handler.
    pub fn new(
        id: SessionId,
        stream: TcpStream,
        addr: SocketAddr,
        outbound: mpsc::UnboundedReceiver<Bytes>,
        dispatcher: DispatcherHandle,
        max_line_len: usize,
    ) -> Self {
        Self {
            id,
            addr,
            stream,
            outbound,
            dispatcher,
            max_line_len,
        }
    }

    /// Start the reader and writer tasks.
    pub fn spawn(self) {
        let span = spans::connection(self.id, self.addr);
        let (read_half, write_half) = self.stream.into_split();

        tokio::spawn(write_loop(write_half, self.outbound).instrument(span.clone()));
        tokio::spawn(
            read_loop(
                self.id,
                read_half,
                self.dispatcher,
                self.max_line_len,
            )
            .instrument(span),
        );
    }
}

/// Feed lines to the dispatcher until it closes the session or the transport
/// fails.
async fn read_loop(
    id: SessionId,
    read_half: OwnedReadHalf,
    dispatcher: DispatcherHandle,
    max_line_len: usize,
) {
    let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(max_line_len));

    let failure = loop {
        match reader.next().await {
            Some(Ok(line)) => {
                if dispatcher.line(id, line).await == Verdict::Close {
                    info!("client disconnected");
                    return;
                }
            }
            Some(Err(e)) => break TransportFailure::from(e),
            None => break TransportFailure::Eof,
        }
    };

    info!(reason = %failure, "connection closed");
    dispatcher.closed(id).await;
}

/// Drain the outbound queue onto the socket.
async fn write_loop(write_half: OwnedWriteHalf, mut outbound: mpsc::UnboundedReceiver<Bytes>) {
    let mut writer = FramedWrite::new(write_half, LineCodec::new());

    while let Some(bytes) = outbound.recv().await {
        if let Err(e) = writer.send(bytes).await {
            debug!(error = %e, "write failed, dropping outbound queue");
            break;
        }
    }

    let _ = writer.close().await;
}
