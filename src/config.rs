//! Controller configuration.

use core::fmt;

use embassy_time::Duration;
use log::warn;

use crate::channel::Polarity;
use crate::gamma::MAX_INTENSITY;
use crate::pwm::CYCLE_TICKS;

/// Default fast tick: 100 CPU clocks at 16 MHz, on a microsecond timebase.
pub const DEFAULT_FAST_TICK: Duration = Duration::from_micros(6);

/// Default slow tick (2 per millisecond).
pub const DEFAULT_SLOW_TICK: Duration = Duration::from_micros(500);

/// Default partial-message timeout.
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_millis(5);

/// Bus address used when the persisted one is unusable.
pub const DEFAULT_BUS_ADDRESS: u8 = 0x32;

/// Configuration for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Period of the duty-cycle generator tick
    pub fast_tick: Duration,
    /// Period of the dither / timeout tick
    pub slow_tick: Duration,
    /// How long a partial message may sit before it is discarded
    pub message_timeout: Duration,
    /// LED wiring
    pub polarity: Polarity,
    /// Target for all channels until the first command arrives
    pub initial_intensity: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            fast_tick: DEFAULT_FAST_TICK,
            slow_tick: DEFAULT_SLOW_TICK,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
            polarity: Polarity::default(),
            initial_intensity: MAX_INTENSITY,
        }
    }
}

/// Reasons a [`ControllerConfig`] cannot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A tick period is zero.
    ZeroPeriod,
    /// One duty cycle of the fast tick does not fit the timebase.
    CycleOverflow { fast_tick: Duration },
    /// The slow tick is longer than one duty cycle, so cycle boundaries
    /// would be signalled faster than they can be consumed.
    SlowTickTooLong { slow_tick: Duration, cycle: Duration },
    /// The timeout does not map to 1..=255 slow ticks.
    TimeoutOutOfRange { ticks: u64 },
    /// The initial intensity is above the quantizer's ceiling.
    IntensityOutOfRange(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPeriod => write!(f, "tick period must be non-zero"),
            ConfigError::CycleOverflow { fast_tick } => write!(
                f,
                "fast tick of {} us overflows a {}-tick duty cycle",
                fast_tick.as_micros(),
                CYCLE_TICKS
            ),
            ConfigError::SlowTickTooLong { slow_tick, cycle } => write!(
                f,
                "slow tick of {} us exceeds the {} us duty cycle",
                slow_tick.as_micros(),
                cycle.as_micros()
            ),
            ConfigError::TimeoutOutOfRange { ticks } => {
                write!(f, "message timeout of {} slow ticks is not in 1..=255", ticks)
            }
            ConfigError::IntensityOutOfRange(value) => {
                write!(f, "initial intensity {} exceeds {}", value, MAX_INTENSITY)
            }
        }
    }
}

/// Validated timing derived from a [`ControllerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlan {
    pub fast_tick: Duration,
    pub slow_tick: Duration,
    /// Length of one full duty cycle
    pub cycle: Duration,
    /// Timeout expressed in slow ticks
    pub timeout_ticks: u8,
    pub polarity: Polarity,
    pub initial_intensity: u16,
}

impl ControllerConfig {
    /// Check the configuration and derive the tick plan from it.
    pub fn validate(&self) -> Result<TickPlan, ConfigError> {
        let fast = self.fast_tick.as_micros();
        let slow = self.slow_tick.as_micros();
        if fast == 0 || slow == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        let cycle = fast
            .checked_mul(u64::from(CYCLE_TICKS))
            .map(Duration::from_micros)
            .ok_or(ConfigError::CycleOverflow {
                fast_tick: self.fast_tick,
            })?;
        if slow > cycle.as_micros() {
            return Err(ConfigError::SlowTickTooLong {
                slow_tick: self.slow_tick,
                cycle,
            });
        }

        let ticks = self.message_timeout.as_micros() / slow;
        let timeout_ticks = match u8::try_from(ticks) {
            Ok(0) | Err(_) => return Err(ConfigError::TimeoutOutOfRange { ticks }),
            Ok(ticks) => ticks,
        };

        if self.initial_intensity > MAX_INTENSITY {
            return Err(ConfigError::IntensityOutOfRange(self.initial_intensity));
        }

        Ok(TickPlan {
            fast_tick: self.fast_tick,
            slow_tick: self.slow_tick,
            cycle,
            timeout_ticks,
            polarity: self.polarity,
            initial_intensity: self.initial_intensity,
        })
    }
}

/// 7-bit bus address the device answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusAddress(u8);

impl BusAddress {
    /// Lowest address accepted from persistent storage.
    pub const MIN: u8 = 2;
    /// Highest address accepted from persistent storage.
    pub const MAX: u8 = 125;

    /// Interpret a persisted address byte, falling back to
    /// [`DEFAULT_BUS_ADDRESS`] when it is out of range (e.g. erased storage).
    pub fn from_persisted(raw: u8) -> Self {
        Self::new(raw).unwrap_or_else(|| {
            warn!(
                "persisted bus address {:#04x} out of range, using {:#04x}",
                raw, DEFAULT_BUS_ADDRESS
            );
            Self(DEFAULT_BUS_ADDRESS)
        })
    }

    /// Accept `raw` only if it is a usable address.
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= Self::MIN && raw <= Self::MAX {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for BusAddress {
    fn default() -> Self {
        Self(DEFAULT_BUS_ADDRESS)
    }
}
