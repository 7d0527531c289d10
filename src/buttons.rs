//! Push-button edge detection.
//!
//! Both physical buttons (mode and send) are active-low with an internal
//! pull-up. Unlike the encoder there is no time-based debounce window here:
//! the raw state comparison is the only filter, and the control loop applies
//! a coarse settle delay ([`crate::config::BUTTON_SETTLE_MS`]) after acting
//! on an edge to avoid rapid re-triggering.

/// A single observed button transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Line fell to the active (low) level.
    Pressed,
    /// Line rose back to idle.
    Released,
}

/// Tracks one button line and reports at most one edge per poll.
pub struct ButtonEdgeDetector {
    last_level: bool,
}

impl ButtonEdgeDetector {
    /// `level` is the line state at construction, `true` when high.
    pub fn new(level: bool) -> Self {
        Self { last_level: level }
    }

    /// Sample the line once. Fires only when the raw level actually changed
    /// since the previous poll.
    pub fn poll(&mut self, level: bool) -> Option<Edge> {
        if level == self.last_level {
            return None;
        }
        self.last_level = level;
        Some(if level { Edge::Released } else { Edge::Pressed })
    }
}
