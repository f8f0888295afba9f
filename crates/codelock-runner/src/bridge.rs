//! TCP bridge for the engine's serial link.
//!
//! Exposes the virtual dongle's byte stream on a TCP port the way a USB
//! serial adapter exposes a UART: one peer at a time, raw bytes in both
//! directions. A tokio task shuttles bytes between the socket and a pair
//! of channels; the engine thread blocks on its end of those channels
//! through a [`ChannelTransport`].
//!
//! A peer hanging up is not a transport fault — the dongle keeps running
//! and the next peer inherits the session, like replugging a serial cable
//! without resetting the device. The transport only reports
//! [`TransportError::Closed`] once the bridge itself is gone.

use codelock_engine::{Transport, TransportError};
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Capacity of the response channel (engine → peer).
const RESPONSE_CHANNEL_CAPACITY: usize = 64;

/// Transport backed by the bridge's channel pair.
///
/// `receive_byte` blocks until the connected peer sends a byte;
/// `transmit` hands a fully encoded response to the writer side. Both
/// report [`TransportError::Closed`] once the bridge has shut down, which
/// is the engine's terminal condition.
pub struct ChannelTransport {
    rx: crossbeam_channel::Receiver<u8>,
    tx: mpsc::Sender<Vec<u8>>,
}

impl Transport for ChannelTransport {
    fn receive_byte(&mut self) -> Result<u8, TransportError> {
        self.rx.recv().map_err(|_| TransportError::Closed)
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.tx
            .blocking_send(bytes.to_vec())
            .map_err(|_| TransportError::Closed)
    }
}

/// The listening side of the bridge.
pub struct SerialBridge {
    listener: TcpListener,
    local_addr: SocketAddr,
    rx_bytes: crossbeam_channel::Sender<u8>,
    responses: mpsc::Receiver<Vec<u8>>,
}

/// Bind a listener on `addr` and create the transport for the engine
/// thread.
///
/// Binding port 0 picks a free port; [`SerialBridge::local_addr`] reports
/// the one actually bound.
pub async fn bind(addr: SocketAddr) -> io::Result<(SerialBridge, ChannelTransport)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let (rx_sender, rx_receiver) = crossbeam_channel::unbounded();
    let (tx_sender, tx_receiver) = mpsc::channel(RESPONSE_CHANNEL_CAPACITY);

    let bridge = SerialBridge {
        listener,
        local_addr,
        rx_bytes: rx_sender,
        responses: tx_receiver,
    };
    let transport = ChannelTransport {
        rx: rx_receiver,
        tx: tx_sender,
    };
    Ok((bridge, transport))
}

impl SerialBridge {
    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept peers one at a time and shuttle bytes for each until it
    /// hangs up.
    pub async fn run(mut self) -> io::Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            info!("peer connected: {}", peer);

            let result = handle_peer(stream, &self.rx_bytes, &mut self.responses).await;
            match result {
                Ok(()) => info!("peer disconnected: {}", peer),
                Err(e) => warn!("peer connection error: {}", e),
            }

            // Responses produced with no peer attached have nowhere to go.
            while self.responses.try_recv().is_ok() {}
        }
    }
}

/// Shuttle bytes for a single peer connection.
async fn handle_peer(
    mut stream: TcpStream,
    rx_bytes: &crossbeam_channel::Sender<u8>,
    responses: &mut mpsc::Receiver<Vec<u8>>,
) -> io::Result<()> {
    let (mut reader, mut writer) = stream.split();
    let mut read_buf = [0u8; 256];

    loop {
        tokio::select! {
            // Peer -> engine receive side, one byte at a time.
            result = reader.read(&mut read_buf) => {
                match result {
                    Ok(0) => return Ok(()),
                    Ok(n) => {
                        for &byte in &read_buf[..n] {
                            if rx_bytes.send(byte).is_err() {
                                // Engine side is gone.
                                return Ok(());
                            }
                        }
                    }
                    Err(e) => return Err(e),
                }
            }

            // Engine transmit side -> peer.
            Some(data) = responses.recv() => {
                writer.write_all(&data).await?;
                writer.flush().await?;
            }
        }
    }
}
