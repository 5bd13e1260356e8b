//! Room entry types

use std::net::SocketAddr;
use std::time::Instant;

use crate::transport::CloseHandle;

/// Identifier of a live room, unique for the registry's lifetime
pub type RoomId = u64;

/// Entry for a single live room
#[derive(Debug, Clone)]
pub struct RoomEntry {
    /// Room ID
    pub id: RoomId,
    /// Address the room's binding resolved to
    pub local_addr: SocketAddr,
    /// Closes the room's binding, which ends its loop
    pub(super) closer: CloseHandle,
    /// When the room registered
    pub created_at: Instant,
}

impl RoomEntry {
    pub(super) fn new(id: RoomId, local_addr: SocketAddr, closer: CloseHandle) -> Self {
        Self {
            id,
            local_addr,
            closer,
            created_at: Instant::now(),
        }
    }

    /// Bound port, as shown by LIST_ROOMS
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    pub fn is_closing(&self) -> bool {
        self.closer.is_closed()
    }
}
