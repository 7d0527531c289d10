//! Host-testable library interface for otherhand.
//!
//! The pure control core - encoder decoding, button edge detection, the
//! LED display state machine, the connection lifecycle, and notification
//! building - lives here and runs on the host with `cargo test`.
//!
//! The embedded binary (main.rs, `#![no_std]` + `#![no_main]`) wires this
//! core to GPIO, a WS2812 strip, and the SoftDevice; it is built with
//! `--features embedded`.

#![cfg_attr(not(test), no_std)]

pub mod buttons;
pub mod config;
pub mod connection;
pub mod controller;
pub mod display;
pub mod encoder;
pub mod error;
pub mod notify;

#[cfg(feature = "embedded")]
pub mod ble;

pub use buttons::{ButtonEdgeDetector, Edge};
pub use connection::{ConnectionEvent, ConnectionLifecycle};
pub use controller::{Controller, Inputs, Step};
pub use display::{render, DisplayMode, DISCONNECTED_COLOR, POSITION_LEDS};
pub use encoder::{Direction, EncoderReader, LineState};
pub use error::Error;
pub use notify::{NotificationEmitter, OutboundMessage};

pub use smart_leds::RGB8;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
