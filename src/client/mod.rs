//! Chat client
//!
//! Provides the client side of the protocol:
//! - Parsing `host[:port]` server endpoints
//! - Sending signed requests and decoding replies
//! - A line-oriented console for interactive use

pub mod chat;
pub mod console;
pub mod endpoint;

pub use chat::ChatClient;
pub use console::{command_list, prompt_nickname, run_console, ConsoleInput};
pub use endpoint::{parse_endpoint, EndpointError};
