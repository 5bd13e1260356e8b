//! Chat client
//!
//! Sends requests signed with the client's nickname to one room and
//! decodes whatever comes back.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::protocol::constants::MAX_FRAME_SIZE;
use crate::protocol::{self, ChatMessage, Command};
use crate::transport::{Transport, UdpBinding};

/// UDP chat client bound to an ephemeral local port
pub struct ChatClient {
    binding: UdpBinding,
    server: SocketAddr,
    nickname: String,
}

impl ChatClient {
    /// Bind an ephemeral port for talking to `server`
    ///
    /// Fails if the nickname could never be encoded.
    pub async fn connect(server: SocketAddr, nickname: impl Into<String>) -> Result<Self> {
        let nickname = nickname.into();
        protocol::encode(&ChatMessage::request(Command::Get, nickname.as_str(), ""))?;

        let local_ip = match server.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        let binding = UdpBinding::bind(SocketAddr::new(local_ip, 0)).await?;

        tracing::debug!(
            server = %server,
            local = %binding.local_addr()?,
            nickname = nickname.as_str(),
            "Client bound"
        );

        Ok(Self {
            binding,
            server,
            nickname,
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.binding.local_addr()?)
    }

    /// Build a request signed with this client's nickname
    pub fn request(&self, command: Command, data: impl Into<String>) -> ChatMessage {
        ChatMessage::request(command, self.nickname.as_str(), data)
    }

    /// Send a request to the server
    pub async fn send(&self, command: Command, data: impl Into<String>) -> Result<usize> {
        let message = self.request(command, data);
        self.send_message(&message).await
    }

    pub async fn send_message(&self, message: &ChatMessage) -> Result<usize> {
        let frame = protocol::encode(message)?;
        let sent = self.binding.send_to(&frame, self.server).await?;
        tracing::debug!(server = %self.server, bytes = sent, command = %message.command(), "Sent request");
        Ok(sent)
    }

    /// Wait for the next message from any room
    ///
    /// A datagram that does not decode is returned as [`Error::Codec`].
    pub async fn recv(&self) -> Result<ChatMessage> {
        let (message, _) = self.recv_from().await?;
        Ok(message)
    }

    /// Like [`recv`](Self::recv), also returning the sender
    pub async fn recv_from(&self) -> Result<(ChatMessage, SocketAddr)> {
        let mut buf = [0u8; MAX_FRAME_SIZE + 1];
        let (len, from) = self.binding.recv_from(&mut buf).await?;
        let message = protocol::decode(&buf[..len])?;
        Ok((message, from))
    }

    /// [`recv`](Self::recv) with a deadline
    pub async fn recv_timeout(&self, timeout: Duration) -> Result<ChatMessage> {
        tokio::time::timeout(timeout, self.recv())
            .await
            .map_err(|_| Error::Timeout)?
    }

    /// Close the local binding, waking any pending receive
    pub fn close(&self) {
        self.binding.close();
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::UdpSocket;

    use super::*;
    use crate::error::{CodecError, TransportError};
    use crate::protocol::Kind;

    async fn fake_server() -> (UdpSocket, SocketAddr) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr)
    }

    #[tokio::test]
    async fn test_send_signs_request() {
        let (server, addr) = fake_server().await;
        let client = ChatClient::connect(addr, "bob").await.unwrap();

        client.send(Command::Post, "hello").await.unwrap();

        let mut buf = [0u8; 64];
        let (len, _) = server.recv_from(&mut buf).await.unwrap();
        let message = protocol::decode(&buf[..len]).unwrap();
        assert_eq!(message.command(), Command::Post);
        assert_eq!(message.kind(), Kind::Request);
        assert_eq!(message.nickname(), "bob");
        assert_eq!(message.data(), "hello");
    }

    #[tokio::test]
    async fn test_recv_decodes_reply() {
        let (server, addr) = fake_server().await;
        let client = ChatClient::connect(addr, "bob").await.unwrap();
        let client_addr = SocketAddr::from(([127, 0, 0, 1], client.local_addr().unwrap().port()));

        let reply = protocol::encode(&ChatMessage::server_response(Command::ListRooms, "6000")).unwrap();
        server.send_to(&reply, client_addr).await.unwrap();

        let message = client.recv_timeout(Duration::from_secs(1)).await.unwrap();
        assert_eq!(message.nickname(), "Server");
        assert_eq!(message.data(), "6000");
    }

    #[tokio::test]
    async fn test_recv_invalid_frame_is_error() {
        let (server, addr) = fake_server().await;
        let client = ChatClient::connect(addr, "bob").await.unwrap();
        let client_addr = SocketAddr::from(([127, 0, 0, 1], client.local_addr().unwrap().port()));

        server.send_to(&[1, 2], client_addr).await.unwrap();

        let result = client.recv_timeout(Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::Codec(CodecError::FrameSize { .. }))));
    }

    #[tokio::test]
    async fn test_recv_timeout() {
        let (_server, addr) = fake_server().await;
        let client = ChatClient::connect(addr, "bob").await.unwrap();

        let result = client.recv_timeout(Duration::from_millis(20)).await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn test_invalid_nickname_rejected() {
        let (_server, addr) = fake_server().await;
        assert!(ChatClient::connect(addr, "x".repeat(31)).await.is_err());
        assert!(ChatClient::connect(addr, "zoé").await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_data_not_sent() {
        let (_server, addr) = fake_server().await;
        let client = ChatClient::connect(addr, "bob").await.unwrap();

        let result = client.send(Command::Post, "d".repeat(2001)).await;
        assert!(matches!(result, Err(Error::Codec(CodecError::FieldTooLong { .. }))));
    }

    #[tokio::test]
    async fn test_close_ends_recv() {
        let (_server, addr) = fake_server().await;
        let client = ChatClient::connect(addr, "bob").await.unwrap();
        client.close();

        let result = client.recv().await;
        assert!(matches!(result, Err(Error::Transport(TransportError::Closed))));
    }
}
