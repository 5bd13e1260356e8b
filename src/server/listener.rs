//! Chat server
//!
//! Binds the base room and runs it. Rooms created through CREATE_ROOM run
//! on their own tasks; the server only reaches them through the registry.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::Result;
use crate::registry::RoomRegistry;
use crate::room::Room;
use crate::server::config::ServerConfig;

/// UDP chat server
pub struct ChatServer {
    config: ServerConfig,
    registry: Arc<RoomRegistry>,
    base: Room,
}

impl ChatServer {
    /// Bind the base room
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        let registry = Arc::new(RoomRegistry::with_max_rooms(config.max_rooms));
        let base = Room::bind(config.clone(), Arc::clone(&registry)).await?;

        Ok(Self {
            config,
            registry,
            base,
        })
    }

    /// Get a reference to the room registry
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Address the base room is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.base.local_addr()
    }

    /// Run the server until the base room stops
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the server with graceful shutdown
    ///
    /// Returns once `shutdown` resolves or the base room stops, after every
    /// live room has been closed and has unregistered.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let registry = self.registry;
        let mut base_task = tokio::spawn(self.base.run());

        let base_finished = tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                false
            }
            result = &mut base_task => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Base room task failed");
                }
                true
            }
        };

        registry.close_all().await;
        registry.wait_until_empty().await;

        if !base_finished {
            if let Err(e) = base_task.await {
                tracing::error!(error = %e, "Base room task failed");
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}
