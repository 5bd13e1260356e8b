//! Chat server: configuration and the base room runner

pub mod config;
pub mod listener;

pub use config::ServerConfig;
pub use listener::ChatServer;
