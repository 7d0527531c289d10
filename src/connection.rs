//! BLE connection lifecycle as observed by the control loop.
//!
//! The radio context is the only writer of the live connected flag; the
//! control loop reads it once per iteration and feeds it here. A shadow
//! copy of the previous value turns the flag into connect/disconnect
//! transition events - used for logging and to trigger the disconnect-time
//! state reset. That single-writer-per-field split is what keeps the design
//! lock-free: a transition may be observed up to one iteration late, which
//! is fine - there is no tight real-time deadline.

use crate::config::ADVERTISE_RETRY_MS;

/// A connected-flag transition observed this iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionEvent {
    Connected,
    Disconnected,
}

/// Disconnected (initial) ⇄ Connected, cyclic, no terminal state.
pub struct ConnectionLifecycle {
    connected: bool,
    was_connected: bool,
    last_advertise_ms: Option<u64>,
}

impl ConnectionLifecycle {
    pub fn new() -> Self {
        Self {
            connected: false,
            was_connected: false,
            last_advertise_ms: None,
        }
    }

    /// Feed the flag read this iteration; returns the transition, if any.
    pub fn update(&mut self, connected: bool) -> Option<ConnectionEvent> {
        let event = match (self.was_connected, connected) {
            (false, true) => Some(ConnectionEvent::Connected),
            (true, false) => Some(ConnectionEvent::Disconnected),
            _ => None,
        };
        if matches!(event, Some(ConnectionEvent::Connected)) {
            // A later disconnect should re-advertise immediately.
            self.last_advertise_ms = None;
        }
        self.was_connected = connected;
        self.connected = connected;
        event
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// While disconnected, rate-limit advertising-start requests to one per
    /// [`ADVERTISE_RETRY_MS`]. The request itself is idempotent, so issuing
    /// it while the radio is already advertising is harmless.
    pub fn should_advertise(&mut self, now_ms: u64) -> bool {
        if self.connected {
            return false;
        }
        match self.last_advertise_ms {
            Some(last) if now_ms.saturating_sub(last) < ADVERTISE_RETRY_MS => false,
            _ => {
                self.last_advertise_ms = Some(now_ms);
                true
            }
        }
    }
}

impl Default for ConnectionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
