//! Registry error types

use super::entry::RoomId;

/// Error type for room registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No live room with this ID
    RoomNotFound(RoomId),
    /// The configured room limit is reached
    RoomLimitReached(usize),
    /// The registry is shutting down
    Closing,
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::RoomNotFound(id) => write!(f, "Room not found: {}", id),
            RegistryError::RoomLimitReached(max) => {
                write!(f, "Room limit reached ({} rooms)", max)
            }
            RegistryError::Closing => write!(f, "Registry is closing"),
        }
    }
}

impl std::error::Error for RegistryError {}
