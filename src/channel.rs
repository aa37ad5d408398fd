//! Channel identities and output levels.
//!
//! Each of the three channels is bound to one physical output line for the
//! lifetime of the device. The generator works with logical on/off state
//! ([`ChannelLevels`]); the wiring of the LED decides which pin level that is
//! ([`Polarity`]), and the driver only ever sees physical [`PinLevels`].

/// Number of dimming channels.
pub const CHANNEL_COUNT: usize = 3;

/// One output channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    /// All channels, in message order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel in messages and per-channel arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Logical on/off state of the three channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelLevels(u8);

impl ChannelLevels {
    pub const ALL_ON: Self = Self(0b111);
    pub const ALL_OFF: Self = Self(0);

    pub const fn is_on(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    /// Turn one channel off, leaving the others untouched.
    pub const fn set_off(&mut self, channel: Channel) {
        self.0 &= !channel.mask();
    }
}

/// Physical pin levels, one bit per channel (set = driven high).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinLevels(u8);

impl PinLevels {
    pub const fn is_high(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    /// Raw bitmask, bit `n` is channel index `n`.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// How the LED is wired to the output pins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    /// Shared cathode, a high pin lights the channel.
    CommonCathode,
    /// Shared anode, a low pin lights the channel.
    #[default]
    CommonAnode,
}

impl Polarity {
    /// Translate logical levels to the pin levels that produce them.
    pub const fn apply(self, levels: ChannelLevels) -> PinLevels {
        match self {
            Polarity::CommonCathode => PinLevels(levels.0),
            Polarity::CommonAnode => PinLevels(!levels.0 & ChannelLevels::ALL_ON.0),
        }
    }
}

/// Physical output driver
///
/// Implement this trait to bind the generator to real pins. It is called
/// once per fast tick, so implementations should do nothing but write a port.
pub trait OutputDriver {
    /// Drive all three channel pins at once.
    fn write(&mut self, pins: PinLevels);
}
