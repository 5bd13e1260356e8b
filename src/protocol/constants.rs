//! Protocol constants

/// Size of the fixed header (command + kind)
pub const HEADER_SIZE: usize = 2;

/// Maximum nickname length, terminator excluded
pub const MAX_NICKNAME_SIZE: usize = 30;

/// Maximum data length, terminator excluded
pub const MAX_DATA_SIZE: usize = 2000;

/// Smallest frame accepted by the decoder
pub const MIN_FRAME_SIZE: usize = 6;

/// Largest frame accepted by the decoder
pub const MAX_FRAME_SIZE: usize = 2036;

/// Field terminator
pub const TERMINATOR: u8 = 0x00;

/// Default server port
pub const DEFAULT_PORT: u16 = 6000;

/// Nickname used on messages the server builds itself
pub const SERVER_NICKNAME: &str = "Server";
