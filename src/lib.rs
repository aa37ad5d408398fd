#![no_std]

pub mod channel;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod counter;
pub mod dither;
pub mod gamma;
pub mod inbound;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod pwm;
pub mod shared;
pub mod supervisor;
pub mod tick_scheduler;
pub mod timeout;

pub use channel::{CHANNEL_COUNT, Channel, ChannelLevels, OutputDriver, PinLevels, Polarity};
pub use command::CommandPipeline;
pub use config::{BusAddress, ConfigError, ControllerConfig, TickPlan};
pub use controller::LightCore;
pub use counter::ModCounter;
pub use dither::DitherQuantizer;
pub use gamma::{GAMMA_8_TO_12, GammaTable, MAX_INTENSITY};
pub use inbound::{ByteQueue, ByteSender, InboundQueue, MESSAGE_LEN, Message, TrySendError};
pub use pwm::{CYCLE_TICKS, DutyCycleGenerator};
pub use shared::{DutyBuffer, TargetIntensities, UpdateSignal};
pub use supervisor::{SupervisorTask, TickEffects};
pub use tick_scheduler::{ScheduledTick, TickEvent, TickScheduler};
pub use timeout::{GuardAction, GuardPhase, TimeoutGuard};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
