//! Unified error type for otherhand.
//!
//! The taxonomy is deliberately tiny: every failure is absorbed where it is
//! detected and nothing propagates past a single loop iteration. The device
//! has no fatal error path - it self-heals connectivity by re-advertising.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A notification was requested while no central is connected.
    /// The triggering edge is consumed and the message dropped - never
    /// queued for later delivery.
    NotConnected,
}
