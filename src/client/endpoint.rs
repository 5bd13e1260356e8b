//! Server endpoint parsing

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::protocol::constants::DEFAULT_PORT;

/// Host used when none is given
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Endpoint parsing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    Empty,
    /// Host is not an IP literal (or `localhost`)
    InvalidHost(String),
    /// Port is not a number in `1..=65535`
    InvalidPort(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::Empty => write!(f, "Empty endpoint"),
            EndpointError::InvalidHost(host) => write!(f, "Invalid host: {}", host),
            EndpointError::InvalidPort(port) => write!(f, "Invalid port: {}", port),
        }
    }
}

impl std::error::Error for EndpointError {}

/// Parse `host[:port]` into a socket address
///
/// The host must be an IP literal or `localhost`; IPv6 hosts with a port
/// use the bracketed form (`[::1]:6000`). The port defaults to 6000.
pub fn parse_endpoint(input: &str) -> Result<SocketAddr, EndpointError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(EndpointError::Empty);
    }

    if let Ok(addr) = input.parse::<SocketAddr>() {
        return check_port(addr, input);
    }
    if let Some(ip) = parse_host(input) {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    let (host, port) = input
        .rsplit_once(':')
        .ok_or_else(|| EndpointError::InvalidHost(input.to_string()))?;
    let ip = parse_host(host).ok_or_else(|| EndpointError::InvalidHost(host.to_string()))?;
    let port = port
        .parse::<u16>()
        .map_err(|_| EndpointError::InvalidPort(port.to_string()))?;

    check_port(SocketAddr::new(ip, port), input)
}

fn parse_host(host: &str) -> Option<IpAddr> {
    if host.eq_ignore_ascii_case("localhost") {
        return Some(DEFAULT_HOST);
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .ok()
}

fn check_port(addr: SocketAddr, input: &str) -> Result<SocketAddr, EndpointError> {
    if addr.port() == 0 {
        return Err(EndpointError::InvalidPort(input.to_string()));
    }
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_and_port() {
        assert_eq!(
            parse_endpoint("10.0.0.2:7000"),
            Ok(SocketAddr::from(([10, 0, 0, 2], 7000)))
        );
    }

    #[test]
    fn test_default_port() {
        assert_eq!(
            parse_endpoint("192.168.1.10"),
            Ok(SocketAddr::from(([192, 168, 1, 10], 6000)))
        );
    }

    #[test]
    fn test_localhost() {
        assert_eq!(
            parse_endpoint("localhost"),
            Ok(SocketAddr::from(([127, 0, 0, 1], 6000)))
        );
        assert_eq!(
            parse_endpoint("LOCALHOST:6001"),
            Ok(SocketAddr::from(([127, 0, 0, 1], 6001)))
        );
    }

    #[test]
    fn test_ipv6() {
        let addr = parse_endpoint("::1").unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 6000);

        let addr = parse_endpoint("[::1]:7000").unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 7000);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse_endpoint("  "), Err(EndpointError::Empty));
        assert_eq!(
            parse_endpoint("chat.example.com"),
            Err(EndpointError::InvalidHost("chat.example.com".to_string()))
        );
        assert_eq!(
            parse_endpoint("127.0.0.1:http"),
            Err(EndpointError::InvalidPort("http".to_string()))
        );
        assert_eq!(
            parse_endpoint("127.0.0.1:70000"),
            Err(EndpointError::InvalidPort("70000".to_string()))
        );
        assert!(matches!(
            parse_endpoint("127.0.0.1:0"),
            Err(EndpointError::InvalidPort(_))
        ));
    }
}
