//! Datagram transport
//!
//! A room only needs to send and receive opaque buffers to and from
//! addressable endpoints, and to be told when its binding has been closed.
//! [`Transport`] captures exactly that; [`UdpBinding`] is the real
//! implementation over a Tokio UDP socket.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::watch;

use crate::error::TransportError;

/// Send/receive seam used by rooms
pub trait Transport: Send + Sync {
    /// Address the binding is actually bound to
    fn local_addr(&self) -> io::Result<SocketAddr>;

    /// Send one datagram
    fn send_to(
        &self,
        buf: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = Result<usize, TransportError>> + Send;

    /// Receive one datagram
    ///
    /// Resolves to [`TransportError::Closed`] once the binding is closed,
    /// including when the close happens while this call is pending.
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = Result<(usize, SocketAddr), TransportError>> + Send;

    /// Handle that closes this binding
    fn close_handle(&self) -> CloseHandle;

    /// Close the binding. Idempotent.
    fn close(&self) {
        self.close_handle().close();
    }

    fn is_closed(&self) -> bool {
        self.close_handle().is_closed()
    }
}

/// Handle that closes a binding from anywhere
#[derive(Debug, Clone)]
pub struct CloseHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CloseHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Close the binding
    pub fn close(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the binding is closed
    pub async fn closed(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this cannot fail
        let _ = rx.wait_for(|closed| *closed).await;
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for CloseHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// UDP socket binding with a close switch
#[derive(Debug)]
pub struct UdpBinding {
    socket: UdpSocket,
    closer: CloseHandle,
}

impl UdpBinding {
    /// Bind to `addr` (port 0 picks an ephemeral port)
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            socket,
            closer: CloseHandle::new(),
        })
    }
}

impl Transport for UdpBinding {
    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> Result<usize, TransportError> {
        if self.closer.is_closed() {
            return Err(TransportError::Closed);
        }
        Ok(self.socket.send_to(buf, target).await?)
    }

    async fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), TransportError> {
        let mut closed = self.closer.subscribe();
        if *closed.borrow_and_update() {
            return Err(TransportError::Closed);
        }

        tokio::select! {
            result = self.socket.recv_from(buf) => Ok(result?),
            _ = closed.wait_for(|closed| *closed) => Err(TransportError::Closed),
        }
    }

    fn close_handle(&self) -> CloseHandle {
        self.closer.clone()
    }
}
