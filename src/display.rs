//! LED display state machine: (position, mode, hue) -> 3-LED frame.
//!
//! [`render`] is a total, deterministic function over a small lookup space.
//! The encoder position selects *which* LEDs light via a hand-ordered subset
//! table; the mode selects *what color* the lit LEDs use. The caller commits
//! the returned frame to the strip every iteration - the hardware push is
//! what makes any assignment visible.

use smart_leds::hsv::{hsv2rgb, Hsv};
use smart_leds::RGB8;

use crate::config::NUM_LEDS;

const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Reserved "no central connected" indicator, shown on all three LEDs.
///
/// Connected operation only ever produces full-brightness palette colors or
/// full-value HSV, so a color whose brightest channel is 60 is never
/// reachable while a central is present.
pub const DISCONNECTED_COLOR: RGB8 = RGB8 { r: 60, g: 0, b: 60 };

/// Color palette selected by the mode button. Wraps Rainbow -> White on the
/// press after the last palette; there is no decrement path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    #[default]
    White,
    Red,
    Green,
    Blue,
    /// All lit LEDs share one hue that sweeps the color wheel, one hue unit
    /// per loop iteration.
    Rainbow,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            Self::White => Self::Red,
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::Rainbow,
            Self::Rainbow => Self::White,
        }
    }

    fn color(self, hue: u8) -> RGB8 {
        match self {
            Self::White => RGB8 { r: 255, g: 255, b: 255 },
            Self::Red => RGB8 { r: 255, g: 0, b: 0 },
            Self::Green => RGB8 { r: 0, g: 255, b: 0 },
            Self::Blue => RGB8 { r: 0, g: 0, b: 255 },
            Self::Rainbow => hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            }),
        }
    }
}

/// Which of the three LEDs light for each encoder position.
///
/// Hand-ordered, not binary counting: singles first, then pairs, then all
/// three. Position 0 lights nothing regardless of mode.
#[rustfmt::skip]
pub const POSITION_LEDS: [[bool; NUM_LEDS]; 8] = [
    [false, false, false],
    [true,  false, false],
    [false, true,  false],
    [false, false, true ],
    [true,  true,  false],
    [false, true,  true ],
    [true,  false, true ],
    [true,  true,  true ],
];

/// Compute the frame for one iteration. Total over position in [0, 7];
/// identical inputs always produce the identical triple.
pub fn render(position: u8, mode: DisplayMode, hue: u8) -> [RGB8; NUM_LEDS] {
    let lit = POSITION_LEDS[position as usize % POSITION_LEDS.len()];
    core::array::from_fn(|i| if lit[i] { mode.color(hue) } else { OFF })
}
