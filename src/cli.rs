//! Command-line arguments of the server and client binaries

use std::net::SocketAddr;

use clap::Parser;

use crate::client::endpoint::parse_endpoint;
use crate::server::config::ServerConfig;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "udp_chat=info";

/// UDP chat relay server
#[derive(Parser, Debug, Clone)]
#[command(name = "udp-chat-server", version, about, long_about = None)]
pub struct ServerArgs {
    /// Socket address the base room binds to
    #[arg(long, default_value = "0.0.0.0:6000")]
    pub listen: SocketAddr,

    /// Maximum number of live rooms, base room included (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub max_rooms: usize,
}

impl ServerArgs {
    pub fn config(&self) -> ServerConfig {
        ServerConfig::with_addr(self.listen).max_rooms(self.max_rooms)
    }
}

/// UDP chat client
#[derive(Parser, Debug, Clone)]
#[command(name = "udp-chat-client", version, about, long_about = None)]
pub struct ClientArgs {
    /// Server to talk to, as SERVER[:PORT]
    #[arg(value_name = "SERVER[:PORT]", default_value = "127.0.0.1:6000", value_parser = parse_endpoint)]
    pub server: SocketAddr,

    /// Nickname signing every message (prompted for when absent)
    #[arg(long, short)]
    pub nickname: Option<String>,
}
