//! The coupled control core.
//!
//! One owned [`Controller`] holds every mutable field of the device state
//! machine - encoder position, display mode, rainbow hue, and the connection
//! lifecycle shadow - so the single-writer-per-field discipline is explicit
//! and the whole machine is testable on the host. Each loop iteration feeds
//! a raw [`Inputs`] sample plus the live connected flag into [`step`] and
//! gets back everything the iteration asks of the outside world.
//!
//! [`step`]: Controller::step

use smart_leds::RGB8;

use crate::buttons::{ButtonEdgeDetector, Edge};
use crate::config::{NUM_LEDS, POSITION_STEPS};
use crate::connection::{ConnectionEvent, ConnectionLifecycle};
use crate::display::{self, DisplayMode, DISCONNECTED_COLOR};
use crate::encoder::{Direction, EncoderReader, LineState};
use crate::notify::{NotificationEmitter, OutboundMessage};

/// Raw line levels sampled at the top of a loop iteration (`true` = high),
/// plus the sample timestamp for the encoder debounce.
#[derive(Clone, Copy, Debug)]
pub struct Inputs {
    pub clk: bool,
    pub dt: bool,
    pub mode_button: bool,
    pub send_button: bool,
    pub now_ms: u64,
}

/// The outcome of one loop iteration.
pub struct Step {
    /// Frame to commit to the strip. Always present - the commit happens
    /// every pass, changed or not.
    pub frame: [RGB8; NUM_LEDS],
    /// At most one outbound notification per iteration.
    pub notification: Option<OutboundMessage>,
    /// Connect/disconnect transition observed this iteration, for logging.
    pub connection_event: Option<ConnectionEvent>,
    /// Ask the radio to (re)start advertising. Idempotent; raised at most
    /// once per retry interval while disconnected.
    pub advertise: bool,
    /// A button edge was acted on; the loop should apply the settle delay
    /// before the next sample.
    pub button_edge: bool,
}

pub struct Controller {
    position: u8,
    mode: DisplayMode,
    hue: u8,
    encoder: EncoderReader,
    mode_button: ButtonEdgeDetector,
    send_button: ButtonEdgeDetector,
    lifecycle: ConnectionLifecycle,
    emitter: NotificationEmitter,
}

impl Controller {
    /// `initial` carries the line levels at boot so the first poll does not
    /// manufacture phantom edges.
    pub fn new(initial: &Inputs) -> Self {
        Self {
            position: 0,
            mode: DisplayMode::default(),
            hue: 0,
            encoder: EncoderReader::new(LineState {
                clk: initial.clk,
                dt: initial.dt,
            }),
            mode_button: ButtonEdgeDetector::new(initial.mode_button),
            send_button: ButtonEdgeDetector::new(initial.send_button),
            lifecycle: ConnectionLifecycle::new(),
            emitter: NotificationEmitter,
        }
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn hue(&self) -> u8 {
        self.hue
    }

    /// Run one loop iteration.
    ///
    /// While disconnected, all encoder/button/display logic is skipped: the
    /// iteration only renders the disconnected indicator and rate-limits
    /// advertising-start requests. The moment the link drops, position and
    /// mode return to their safe defaults.
    pub fn step(&mut self, inputs: &Inputs, connected: bool) -> Step {
        let connection_event = self.lifecycle.update(connected);
        if matches!(connection_event, Some(ConnectionEvent::Disconnected)) {
            self.position = 0;
            self.mode = DisplayMode::default();
            self.hue = 0;
        }

        if !self.lifecycle.is_connected() {
            return Step {
                frame: [DISCONNECTED_COLOR; NUM_LEDS],
                notification: None,
                connection_event,
                advertise: self.lifecycle.should_advertise(inputs.now_ms),
                button_edge: false,
            };
        }

        let mut button_edge = false;

        if let Some(direction) = self.encoder.poll(
            LineState {
                clk: inputs.clk,
                dt: inputs.dt,
            },
            inputs.now_ms,
        ) {
            // Wrap, not clamp: the position is never observable outside
            // [0, POSITION_STEPS).
            self.position = match direction {
                Direction::Clockwise => (self.position + 1) % POSITION_STEPS,
                Direction::CounterClockwise => self
                    .position
                    .checked_sub(1)
                    .unwrap_or(POSITION_STEPS - 1),
            };
        }

        if let Some(edge) = self.mode_button.poll(inputs.mode_button) {
            if edge == Edge::Pressed {
                self.mode = self.mode.next();
                button_edge = true;
            }
        }

        let mut notification = None;
        if let Some(edge) = self.send_button.poll(inputs.send_button) {
            button_edge = true;
            // The flag is re-checked through the lifecycle: if the link
            // raced away since it was sampled, the edge is still consumed
            // and the message dropped, per the at-most-once policy.
            notification = self
                .emitter
                .on_edge(edge, self.position, self.lifecycle.is_connected())
                .ok();
        }

        let frame = display::render(self.position, self.mode, self.hue);

        // Hue advances after the frame it rendered, only in rainbow mode.
        // u8 wraparound is the wrap-at-256 contract.
        self.hue = if self.mode == DisplayMode::Rainbow {
            self.hue.wrapping_add(1)
        } else {
            0
        };

        Step {
            frame,
            notification,
            connection_event,
            advertise: false,
            button_edge,
        }
    }
}
