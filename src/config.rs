//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// BLE

/// GAP device name, also carried in the scan response.
pub const DEVICE_NAME: &str = "Other Hand HTN25";

// The service/characteristic UUIDs have to appear as string literals inside
// the `#[nrf_softdevice::gatt_service]` attributes in `ble/mod.rs`:
//
//   service        4fafc201-1fb5-459e-8fcc-c5c9c331914b
//   characteristic beb5483e-36e1-4688-b7f5-ea07361b26a8

/// Interval between advertising-start requests while no central is
/// connected (ms). The request is idempotent; reissuing it while already
/// advertising is harmless.
pub const ADVERTISE_RETRY_MS: u64 = 5000;

/// Depth of the outbound notification queue between the control loop and
/// the BLE notify pump. Messages are dropped, not queued further, when full.
pub const OUTBOX_CAPACITY: usize = 4;

// Control loop

/// Control loop tick (ms). Also sets the rainbow sweep rate: the hue
/// advances one unit per iteration, so a full sweep takes 256 ticks.
pub const LOOP_TICK_MS: u64 = 4;

/// Encoder debounce window (ms). A clock-line edge within this window of
/// the last accepted edge is ignored.
pub const ENCODER_DEBOUNCE_MS: u64 = 2;

/// Settle delay after acting on a button edge (ms). Deliberately coarser
/// than the encoder's timestamp debounce: the buttons only need to suppress
/// contact bounce while a finger is still on them.
pub const BUTTON_SETTLE_MS: u64 = 50;

// Display

/// Number of LEDs on the strip.
pub const NUM_LEDS: usize = 3;

/// Number of discrete encoder positions; the position wraps 7 -> 0 and
/// 0 -> 7 rather than clamping.
pub const POSITION_STEPS: u8 = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` pins are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder CLK    → P0.11  (pull-up, active-low)
//   Encoder DT     → P0.12  (pull-up, active-low)
//   Mode button    → P0.24  (pull-up, active-low)
//   Send button    → P0.25  (pull-up, active-low)
//   WS2812 data    → P0.06  (SPIM3 MOSI)
