//! Chat room
//!
//! A room owns one transport binding, its subscribers and its message
//! history. It runs a single sequential receive loop, so none of that
//! needs locking; the only state it shares is the registry.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::dispatch::{self, RoomContext};
use super::state::{RoomPhase, RoomState};
use super::store::MessageStore;
use super::subscribers::SubscriberSet;
use crate::error::{Result, TransportError};
use crate::protocol;
use crate::registry::{RoomId, RoomRegistry};
use crate::server::config::ServerConfig;
use crate::transport::{CloseHandle, Transport, UdpBinding};

/// A single relay instance
pub struct Room<T: Transport = UdpBinding> {
    id: RoomId,
    local_addr: SocketAddr,
    state: RoomState,
    transport: T,
    subscribers: SubscriberSet,
    store: MessageStore,
    registry: Arc<RoomRegistry>,
    config: ServerConfig,
}

impl Room<UdpBinding> {
    /// Bind `config.bind_addr` and register the room
    pub async fn bind(config: ServerConfig, registry: Arc<RoomRegistry>) -> Result<Self> {
        let transport = UdpBinding::bind(config.bind_addr).await?;
        Self::with_transport(transport, registry, config).await
    }
}

impl<T: Transport> Room<T> {
    /// Register a room over an already bound transport
    pub async fn with_transport(
        transport: T,
        registry: Arc<RoomRegistry>,
        config: ServerConfig,
    ) -> Result<Self> {
        let local_addr = transport.local_addr()?;
        let id = registry
            .register(local_addr, transport.close_handle())
            .await?;

        let mut state = RoomState::new();
        state.on_bound();

        tracing::info!(room = id, addr = %local_addr, "Room listening");

        Ok(Self {
            id,
            local_addr,
            state,
            transport,
            subscribers: SubscriberSet::new(),
            store: MessageStore::new(),
            registry,
            config,
        })
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Actual bound address (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn phase(&self) -> RoomPhase {
        self.state.phase
    }

    /// Handle that stops this room from outside its task
    pub fn close_handle(&self) -> CloseHandle {
        self.transport.close_handle()
    }

    /// Receive and dispatch until the binding is closed
    ///
    /// Returns the final state once the room has unregistered.
    pub async fn run(mut self) -> RoomState {
        let mut buf = vec![0u8; self.config.recv_buffer_size];

        while self.state.is_listening() {
            let (len, peer) = match self.transport.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(TransportError::Closed) => {
                    self.state.start_stopping();
                    continue;
                }
                Err(e) => {
                    tracing::warn!(room = self.id, error = %e, "Receive failed");
                    continue;
                }
            };
            self.state.record_frame();

            let message = match protocol::decode(&buf[..len]) {
                Ok(message) => message,
                Err(e) => {
                    self.state.record_dropped();
                    tracing::warn!(room = self.id, peer = %peer, bytes = len, error = %e, "Invalid frame");
                    continue;
                }
            };

            tracing::debug!(room = self.id, peer = %peer, message = %message, "Message received");

            let mut ctx = RoomContext {
                id: self.id,
                transport: &self.transport,
                subscribers: &mut self.subscribers,
                store: &mut self.store,
                registry: &self.registry,
                config: &self.config,
            };
            dispatch::dispatch(&mut ctx, message, peer).await;
        }

        self.teardown().await
    }

    async fn teardown(mut self) -> RoomState {
        self.state.start_stopping();
        self.transport.close();
        self.registry.unregister(self.id).await;
        self.state.close();

        tracing::info!(
            room = self.id,
            addr = %self.local_addr,
            frames = self.state.frames_received,
            dropped = self.state.frames_dropped,
            messages = self.store.len(),
            uptime_ms = self.state.uptime().as_millis() as u64,
            "Room closed"
        );

        self.state
    }
}

/// Bind, register and run a new room on its own task
///
/// Bind and registration failures (including the room limit) are logged;
/// the task then simply ends.
pub fn spawn_room(config: ServerConfig, registry: Arc<RoomRegistry>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = config.bind_addr;
        match Room::bind(config, registry).await {
            Ok(room) => {
                room.run().await;
            }
            Err(e) => {
                tracing::warn!(addr = %addr, error = %e, "Failed to start room");
            }
        }
    })
}
