//! Connectionless chat relay over UDP
//!
//! A server hosts one or more rooms. Each room owns a UDP binding, a set
//! of subscribed endpoints and the history of posted messages. Clients
//! send single-datagram requests; a POST is stored and relayed to every
//! subscriber of the room, GET replays the history, and CREATE_ROOM spins
//! up a new room on an ephemeral port that LIST_ROOMS reports.
//!
//! # Example
//! ```no_run
//! use udp_chat::{ChatServer, ServerConfig};
//!
//! # async fn example() -> udp_chat::Result<()> {
//! let config = ServerConfig::with_addr("127.0.0.1:6000".parse().unwrap()).max_rooms(10);
//! let server = ChatServer::bind(config).await?;
//!
//! server
//!     .run_until(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod room;
pub mod server;
pub mod transport;

pub use client::ChatClient;
pub use error::{Error, Result};
pub use protocol::{ChatMessage, Command, Kind};
pub use registry::RoomRegistry;
pub use room::Room;
pub use server::{ChatServer, ServerConfig};
pub use transport::{Transport, UdpBinding};
