//! Room registry implementation

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::{Notify, RwLock};

use super::entry::{RoomEntry, RoomId};
use super::error::RegistryError;
use crate::transport::CloseHandle;

/// Central registry of all live rooms
///
/// Rooms register and unregister from their own tasks, so every access
/// goes through the `RwLock`. Entries are kept in registration order.
pub struct RoomRegistry {
    /// Live rooms keyed by ID
    rooms: RwLock<BTreeMap<RoomId, RoomEntry>>,

    /// Maximum number of live rooms (0 = unlimited)
    max_rooms: usize,

    next_id: AtomicU64,

    /// Set by `close_all`; no room may register afterwards
    closing: AtomicBool,

    /// Signalled whenever a room unregisters
    removed: Notify,
}

impl RoomRegistry {
    /// Create a registry without a room limit
    pub fn new() -> Self {
        Self::with_max_rooms(0)
    }

    /// Create a registry holding at most `max_rooms` live rooms (0 = unlimited)
    pub fn with_max_rooms(max_rooms: usize) -> Self {
        Self {
            rooms: RwLock::new(BTreeMap::new()),
            max_rooms,
            next_id: AtomicU64::new(1),
            closing: AtomicBool::new(false),
            removed: Notify::new(),
        }
    }

    pub fn max_rooms(&self) -> usize {
        self.max_rooms
    }

    /// Whether `close_all` has run
    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }

    /// Register a room that just bound to `local_addr`
    ///
    /// Fails once the registry is closing or the room limit is reached.
    pub async fn register(
        &self,
        local_addr: SocketAddr,
        closer: CloseHandle,
    ) -> Result<RoomId, RegistryError> {
        let mut rooms = self.rooms.write().await;

        if self.is_closing() {
            return Err(RegistryError::Closing);
        }
        if self.max_rooms > 0 && rooms.len() >= self.max_rooms {
            return Err(RegistryError::RoomLimitReached(self.max_rooms));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        rooms.insert(id, RoomEntry::new(id, local_addr, closer));

        tracing::debug!(room = id, addr = %local_addr, rooms = rooms.len(), "Room registered");

        Ok(id)
    }

    /// Remove a room. Returns its entry if it was registered.
    pub async fn unregister(&self, id: RoomId) -> Option<RoomEntry> {
        let removed = self.rooms.write().await.remove(&id);

        if let Some(entry) = &removed {
            tracing::debug!(
                room = id,
                lifetime_ms = entry.created_at.elapsed().as_millis() as u64,
                "Room unregistered"
            );
            self.removed.notify_waiters();
        }

        removed
    }

    /// Whether a room with this ID is live
    pub async fn contains(&self, id: RoomId) -> bool {
        self.rooms.read().await.contains_key(&id)
    }

    /// Bound ports of all live rooms, in registration order
    pub async fn ports(&self) -> Vec<u16> {
        self.rooms.read().await.values().map(RoomEntry::port).collect()
    }

    /// Number of live rooms
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }

    /// Close one room's binding
    ///
    /// The room unregisters itself once its loop has wound down.
    pub async fn close(&self, id: RoomId) -> Result<(), RegistryError> {
        let rooms = self.rooms.read().await;
        let entry = rooms.get(&id).ok_or(RegistryError::RoomNotFound(id))?;
        entry.closer.close();
        Ok(())
    }

    /// Close every live room and refuse new registrations
    ///
    /// Returns how many rooms were newly signalled; rooms already closing
    /// are not counted.
    pub async fn close_all(&self) -> usize {
        // Set before taking the lock: a registration that wins the lock
        // first is visible below, one that loses it sees the flag.
        self.closing.store(true, Ordering::SeqCst);

        let rooms = self.rooms.read().await;
        let mut signalled = 0;
        for entry in rooms.values().filter(|entry| !entry.is_closing()) {
            entry.closer.close();
            signalled += 1;
        }

        tracing::info!(rooms = rooms.len(), signalled, "Closing all rooms");
        signalled
    }

    /// Wait until no room is registered
    pub async fn wait_until_empty(&self) {
        loop {
            let removed = self.removed.notified();
            tokio::pin!(removed);
            removed.as_mut().enable();

            if self.is_empty().await {
                return;
            }

            removed.await;
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
