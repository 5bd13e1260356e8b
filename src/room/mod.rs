//! Chat rooms
//!
//! ```text
//!   datagram ──► recv_from ──► decode ──► handler_for(command)
//!                                  │             │
//!                          invalid: log, drop    ▼
//!                                  POST / GET / SUBSCRIBE / UNSUBSCRIBE
//!                                  STOP / CREATE_ROOM / LIST_ROOMS
//! ```
//!
//! Every room runs on its own task. Rooms never talk to each other
//! directly; CREATE_ROOM and LIST_ROOMS go through the shared
//! [`RoomRegistry`](crate::registry::RoomRegistry).

pub mod dispatch;
pub mod instance;
pub mod state;
pub mod store;
pub mod subscribers;

pub use dispatch::{handler_for, Handler};
pub use instance::{spawn_room, Room};
pub use state::{RoomPhase, RoomState};
pub use store::MessageStore;
pub use subscribers::SubscriberSet;
