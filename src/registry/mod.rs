//! Registry of live rooms
//!
//! Every room registers itself once its binding is up and removes itself
//! on teardown. The registry is the only state shared between rooms; it
//! backs LIST_ROOMS and lets the server close every room at shutdown.
//!
//! ```text
//!                  Arc<RoomRegistry>
//!             ┌──────────────────────────┐
//!             │ rooms: BTreeMap<RoomId,  │
//!             │   RoomEntry {            │
//!             │     local_addr,          │
//!             │     closer,              │
//!             │   }                      │
//!             │ >                        │
//!             └────────────┬─────────────┘
//!                          │
//!        ┌─────────────────┼─────────────────┐
//!        ▼                 ▼                 ▼
//!   [base room]      [room :41231]      [room :52004]
//!   register() on bind, unregister() on teardown
//! ```

pub mod entry;
pub mod error;
pub mod store;

pub use entry::{RoomEntry, RoomId};
pub use error::RegistryError;
pub use store::RoomRegistry;
