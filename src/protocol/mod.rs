//! Chat wire protocol
//!
//! A message travels as a single datagram:
//!
//! ```text
//! +---------+------+----------------+------+------------+------+
//! | command | kind | nickname (≤30) | 0x00 | data(≤2000)| 0x00 |
//! +---------+------+----------------+------+------------+------+
//!    1 byte  1 byte
//! ```
//!
//! Both text fields are ASCII and zero-terminated; either may be empty.

pub mod codec;
pub mod constants;
pub mod message;

pub use codec::{decode, encode, encode_into};
pub use message::{ChatMessage, Command, Kind};
