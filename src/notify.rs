//! Outbound GATT notification payloads.
//!
//! The wire format is the literal ASCII text `"<position>,<flag>"` - no
//! length prefix, no checksum, flag 1 for a press and 0 for a release.
//! Signaling is fire-and-forget and at-most-once: a stale retransmission of
//! a live human interaction would be worse than a dropped one, so there is
//! no acknowledgment, retry, or delivery queue.

use core::fmt::Write;

use heapless::String;

use crate::buttons::Edge;
use crate::error::Error;

/// Wire message capacity in bytes. The longest in-range payload is `"7,1"`
/// but the original contract allows up to 16 bytes including terminator
/// headroom.
pub const MESSAGE_CAPACITY: usize = 16;

/// One (position, button-state) sample, created fresh per qualifying edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutboundMessage {
    pub position: u8,
    pub pressed: bool,
}

impl OutboundMessage {
    pub fn new(position: u8, edge: Edge) -> Self {
        Self {
            position,
            pressed: matches!(edge, Edge::Pressed),
        }
    }

    /// Serialize to the ASCII wire form. Any in-range position fits with
    /// room to spare, so the write cannot fail.
    pub fn encode(&self) -> String<MESSAGE_CAPACITY> {
        let mut out = String::new();
        let _ = write!(out, "{},{}", self.position, u8::from(self.pressed));
        out
    }
}

/// Builds one message per send-button edge while a central is connected.
///
/// Holds no delivery state by design: every edge is handled in isolation and
/// an edge arriving while disconnected is consumed and dropped.
pub struct NotificationEmitter;

impl NotificationEmitter {
    /// Both edges qualify - a press and its release each produce exactly one
    /// message, carrying the position current at the time of the edge.
    pub fn on_edge(
        &self,
        edge: Edge,
        position: u8,
        connected: bool,
    ) -> Result<OutboundMessage, Error> {
        if connected {
            Ok(OutboundMessage::new(position, edge))
        } else {
            Err(Error::NotConnected)
        }
    }
}
