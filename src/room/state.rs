//! Room state machine
//!
//! ```text
//! Binding ──► Listening ──► Stopping ──► Closed
//! ```
//!
//! A room starts in `Binding`, and `Closed` is the only terminal phase.
//! Transitions are one-way; calling one out of order is a no-op.

use std::time::{Duration, Instant};

/// Room lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Acquiring the transport binding
    Binding,
    /// Receiving and dispatching datagrams
    Listening,
    /// Loop exited, releasing the binding and registry slot
    Stopping,
    /// Terminal
    Closed,
}

/// Lifecycle and traffic counters of one room
#[derive(Debug, Clone)]
pub struct RoomState {
    /// Current phase
    pub phase: RoomPhase,

    /// When the room started listening
    pub listening_since: Option<Instant>,

    /// Datagrams received
    pub frames_received: u64,

    /// Datagrams that failed to decode
    pub frames_dropped: u64,
}

impl RoomState {
    pub fn new() -> Self {
        Self {
            phase: RoomPhase::Binding,
            listening_since: None,
            frames_received: 0,
            frames_dropped: 0,
        }
    }

    /// Binding resolved and registered
    pub fn on_bound(&mut self) {
        if self.phase == RoomPhase::Binding {
            self.phase = RoomPhase::Listening;
            self.listening_since = Some(Instant::now());
        }
    }

    /// Receive loop exited
    pub fn start_stopping(&mut self) {
        if matches!(self.phase, RoomPhase::Binding | RoomPhase::Listening) {
            self.phase = RoomPhase::Stopping;
        }
    }

    /// Teardown finished
    pub fn close(&mut self) {
        self.phase = RoomPhase::Closed;
    }

    pub fn record_frame(&mut self) {
        self.frames_received += 1;
    }

    pub fn record_dropped(&mut self) {
        self.frames_dropped += 1;
    }

    pub fn is_listening(&self) -> bool {
        self.phase == RoomPhase::Listening
    }

    /// How long the room has been listening
    pub fn uptime(&self) -> Duration {
        self.listening_since
            .map(|since| since.elapsed())
            .unwrap_or_default()
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_lifecycle() {
        let mut state = RoomState::new();
        assert_eq!(state.phase, RoomPhase::Binding);
        assert!(!state.is_listening());

        state.on_bound();
        assert!(state.is_listening());
        assert!(state.listening_since.is_some());

        state.start_stopping();
        assert_eq!(state.phase, RoomPhase::Stopping);

        state.close();
        assert_eq!(state.phase, RoomPhase::Closed);
    }

    #[test]
    fn test_out_of_order_transitions_ignored() {
        let mut state = RoomState::new();
        state.on_bound();
        state.start_stopping();
        state.close();

        state.on_bound();
        state.start_stopping();
        assert_eq!(state.phase, RoomPhase::Closed);
    }

    #[test]
    fn test_counters() {
        let mut state = RoomState::new();
        state.record_frame();
        state.record_frame();
        state.record_dropped();

        assert_eq!(state.frames_received, 2);
        assert_eq!(state.frames_dropped, 1);
        assert_eq!(state.uptime(), Duration::ZERO);
    }
}
