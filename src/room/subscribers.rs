//! Subscriber set
//!
//! Endpoints that want every POSTed message relayed to them. Membership
//! calls report whether they changed anything so callers can log only
//! real transitions.

use std::collections::HashSet;
use std::net::SocketAddr;

/// Set of distinct subscriber endpoints
#[derive(Debug, Default)]
pub struct SubscriberSet {
    endpoints: HashSet<SocketAddr>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint. Returns `false` if it was already subscribed.
    pub fn insert(&mut self, endpoint: SocketAddr) -> bool {
        self.endpoints.insert(endpoint)
    }

    /// Remove an endpoint. Returns `false` if it was not subscribed.
    pub fn remove(&mut self, endpoint: &SocketAddr) -> bool {
        self.endpoints.remove(endpoint)
    }

    pub fn contains(&self, endpoint: &SocketAddr) -> bool {
        self.endpoints.contains(endpoint)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SocketAddr> {
        self.endpoints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = SubscriberSet::new();

        assert!(set.insert(addr(5001)));
        assert!(!set.insert(addr(5001)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&addr(5001)));
    }

    #[test]
    fn test_remove_non_member() {
        let mut set = SubscriberSet::new();
        set.insert(addr(5001));

        assert!(!set.remove(&addr(5002)));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&addr(5001)));
        assert!(!set.remove(&addr(5001)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_same_host_different_port_are_distinct() {
        let mut set = SubscriberSet::new();
        set.insert(addr(5001));
        set.insert(addr(5002));

        let mut ports: Vec<u16> = set.iter().map(|a| a.port()).collect();
        ports.sort_unstable();
        assert_eq!(ports, vec![5001, 5002]);
    }
}
