//! Single-compare software PWM for three channels.
//!
//! A free-running 256-step counter advances once per fast tick. At the wrap
//! every channel is switched on in bulk and the double-buffered compare
//! values are swapped in; afterwards each channel needs a single compare per
//! tick to find its "off" edge. A compare value of `c` keeps the channel on
//! for `c` of the 256 ticks; `0` never turns it on because the off edge
//! coincides with the bulk on.

use crate::channel::{CHANNEL_COUNT, Channel, ChannelLevels, OutputDriver, PinLevels, Polarity};
use crate::counter::ModCounter;
use crate::shared::{DutyBuffer, UpdateSignal};

/// Ticks per duty cycle.
pub const CYCLE_TICKS: u16 = 256;

/// Fast-tick duty-cycle generator.
pub struct DutyCycleGenerator<'a, O: OutputDriver> {
    driver: O,
    polarity: Polarity,
    duty: &'a DutyBuffer,
    update: &'a UpdateSignal,

    counter: ModCounter,
    // Local copy of the active slot, refreshed only at the swap.
    compare: [u8; CHANNEL_COUNT],
    levels: ChannelLevels,
    latched: PinLevels,
}

impl<'a, O: OutputDriver> DutyCycleGenerator<'a, O> {
    /// Create a generator whose first tick is a cycle boundary.
    ///
    /// All channels start lit, matching the state the first boundary
    /// would produce anyway.
    pub fn new(driver: O, polarity: Polarity, duty: &'a DutyBuffer, update: &'a UpdateSignal) -> Self {
        Self {
            driver,
            polarity,
            duty,
            update,
            counter: ModCounter::at_wrap(CYCLE_TICKS),
            compare: duty.active(),
            levels: ChannelLevels::ALL_ON,
            latched: polarity.apply(ChannelLevels::ALL_ON),
        }
    }

    /// Run one fast tick.
    ///
    /// The pins computed on the previous tick are written first, so the
    /// output edge always lands at the same offset from the tick start
    /// regardless of how much work this tick does.
    pub fn tick(&mut self) -> PinLevels {
        let written = self.latched;
        self.driver.write(written);

        if self.counter.advance() {
            self.levels = ChannelLevels::ALL_ON;
            self.compare = self.duty.swap();
            self.update.raise();
        }

        let count = self.counter.value();
        for channel in Channel::ALL {
            if self.compare[channel.index()] == count {
                self.levels.set_off(channel);
            }
        }

        self.latched = self.polarity.apply(self.levels);
        written
    }

    /// Logical levels that the next tick will put on the pins.
    pub fn levels(&self) -> ChannelLevels {
        self.levels
    }

    /// Compare values of the cycle in progress.
    pub fn compare(&self) -> [u8; CHANNEL_COUNT] {
        self.compare
    }

    /// Current counter position, 0 at a cycle boundary.
    pub fn position(&self) -> u8 {
        self.counter.value()
    }

    pub fn driver(&self) -> &O {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut O {
        &mut self.driver
    }
}
