//! Quadrature rotary encoder decoding with timestamp debouncing.
//!
//! The encoder lines are sampled once per control-loop iteration; this
//! module turns raw clk/dt level pairs into rotation direction events.
//! Position arithmetic - and the [0, 7] wraparound - belongs to the caller.

use crate::config::ENCODER_DEBOUNCE_MS;

/// Rotation direction of a single accepted encoder step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Raw levels of the two encoder lines, `true` when the line is high
/// (pulled up, idle).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    pub clk: bool,
    pub dt: bool,
}

/// Decodes direction events from the sampled line levels.
///
/// A step is reported on a falling clk edge, at most once per
/// [`ENCODER_DEBOUNCE_MS`]. The debounce timestamp advances only on
/// accepted edges; the remembered line state advances on every poll so a
/// rejected bounce does not re-trigger on the next sample.
pub struct EncoderReader {
    last: LineState,
    last_accepted_ms: u64,
}

impl EncoderReader {
    pub fn new(initial: LineState) -> Self {
        Self {
            last: initial,
            last_accepted_ms: 0,
        }
    }

    /// Process one sample of both lines.
    ///
    /// The dt level at the moment of the falling clk edge picks the
    /// direction: dt equal to clk (both low) is clockwise. This mapping is
    /// deliberately swapped from the textbook decode - the detents on this
    /// encoder land with dt already low on a clockwise step.
    ///
    /// A stuck line is not an error; it simply produces no further edges.
    pub fn poll(&mut self, state: LineState, now_ms: u64) -> Option<Direction> {
        let mut direction = None;
        if state.clk != self.last.clk && !state.clk {
            if now_ms.saturating_sub(self.last_accepted_ms) > ENCODER_DEBOUNCE_MS {
                direction = Some(if state.dt == state.clk {
                    Direction::Clockwise
                } else {
                    Direction::CounterClockwise
                });
                self.last_accepted_ms = now_ms;
            }
        }
        self.last = state;
        direction
    }
}
