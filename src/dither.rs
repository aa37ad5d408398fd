//! First-order error-feedback quantizer.
//!
//! Turns a 12-bit target into one 8-bit duty value per PWM cycle. The
//! rounding residue is carried to the next cycle, so the time-average of
//! `duty * 16` tracks the target within one quantization step.
//!
//! The duty is a `u8` and the carried error an `i8`, both wrapping. For targets in
//! `0..=4080` the error stays within `[-16, 16)`, and the one case that needs
//! a duty of 256 (target 4080 with a non-negative error) wraps to a single
//! dark cycle after which the error pins the duty at 255. Targets
//! `4081..=4095` are outside the supported range and dim non-monotonically.

use crate::channel::{CHANNEL_COUNT, Channel};

/// Intensity units per duty step.
pub const QUANTUM: u16 = 16;

const QUANTUM_SHIFT: u32 = 4;

/// Per-channel dither state. Owned exclusively by the slow task.
#[derive(Debug, Clone, Default)]
pub struct DitherQuantizer {
    error: [i8; CHANNEL_COUNT],
}

impl DitherQuantizer {
    /// Create a quantizer with zero carried error.
    pub const fn new() -> Self {
        Self {
            error: [0; CHANNEL_COUNT],
        }
    }

    /// Produce the duty values for the next cycle.
    pub fn step(&mut self, targets: [u16; CHANNEL_COUNT]) -> [u8; CHANNEL_COUNT] {
        Channel::ALL.map(|channel| self.step_channel(channel, targets[channel.index()]))
    }

    /// Quantize a single channel.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn step_channel(&mut self, channel: Channel, target: u16) -> u8 {
        let error = &mut self.error[channel.index()];

        let floor = (target >> QUANTUM_SHIFT) as u8;
        let duty = if *error >= 0 { floor.wrapping_add(1) } else { floor };

        let residue = target.wrapping_sub(u16::from(duty) << QUANTUM_SHIFT) as u8 as i8;
        *error = error.wrapping_add(residue);

        duty
    }

    /// Carried error of one channel.
    pub fn error(&self, channel: Channel) -> i8 {
        self.error[channel.index()]
    }

    pub fn errors(&self) -> [i8; CHANNEL_COUNT] {
        self.error
    }
}
