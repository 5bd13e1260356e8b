//! Server configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::protocol::constants::{DEFAULT_PORT, MAX_FRAME_SIZE};

/// Smallest receive buffer that still detects oversized frames
pub const MIN_RECV_BUFFER_SIZE: usize = MAX_FRAME_SIZE + 1;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the base room binds to
    pub bind_addr: SocketAddr,

    /// Maximum concurrent rooms, base room included (0 = unlimited)
    pub max_rooms: usize,

    /// Per-room datagram receive buffer size
    pub recv_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            max_rooms: 0, // Unlimited
            recv_buffer_size: MIN_RECV_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Keep the bind host, change the port (0 = ephemeral)
    pub fn port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }

    /// Set maximum rooms
    pub fn max_rooms(mut self, max: usize) -> Self {
        self.max_rooms = max;
        self
    }

    /// Set the receive buffer size
    ///
    /// Never smaller than one byte past the largest valid frame, otherwise an
    /// oversized datagram would be truncated into something that decodes.
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size.max(MIN_RECV_BUFFER_SIZE);
        self
    }
}
