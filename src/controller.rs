//! Wiring of the shared state and the three tasks.

use crate::channel::{CHANNEL_COUNT, OutputDriver, Polarity};
use crate::command::CommandPipeline;
use crate::config::TickPlan;
use crate::gamma::GammaTable;
use crate::inbound::ByteQueue;
use crate::pwm::DutyCycleGenerator;
use crate::shared::{DutyBuffer, TargetIntensities, UpdateSignal};
use crate::supervisor::SupervisorTask;
use crate::timeout::TimeoutGuard;

/// Shared state of one controller.
///
/// Lives in a `static` on hardware; each task borrows the parts it needs.
///
/// ```ignore
/// static CORE: LightCore = LightCore::new(4080, 10);
/// static QUEUE: InboundQueue<16> = InboundQueue::new();
///
/// let mut generator = CORE.generator(pins, Polarity::CommonAnode);
/// let mut supervisor = CORE.supervisor(&QUEUE);
/// let pipeline = CORE.pipeline(&QUEUE, &GAMMA_8_TO_12);
/// ```
pub struct LightCore {
    targets: TargetIntensities,
    duty: DutyBuffer,
    update: UpdateSignal,
    guard: TimeoutGuard,
}

impl LightCore {
    /// All channels target `initial_intensity`; duties start at zero until
    /// the first dither update. Partial messages are dropped after
    /// `timeout_ticks` slow ticks.
    pub const fn new(initial_intensity: u16, timeout_ticks: u8) -> Self {
        Self {
            targets: TargetIntensities::new([initial_intensity; CHANNEL_COUNT]),
            duty: DutyBuffer::new([0; CHANNEL_COUNT]),
            update: UpdateSignal::new(),
            guard: TimeoutGuard::new(timeout_ticks),
        }
    }

    pub const fn from_plan(plan: &TickPlan) -> Self {
        Self::new(plan.initial_intensity, plan.timeout_ticks)
    }

    /// Fast-tick task.
    pub fn generator<O: OutputDriver>(&self, driver: O, polarity: Polarity) -> DutyCycleGenerator<'_, O> {
        DutyCycleGenerator::new(driver, polarity, &self.duty, &self.update)
    }

    /// Slow-tick task.
    pub fn supervisor<'a, Q: ByteQueue>(&'a self, queue: &'a Q) -> SupervisorTask<'a, Q> {
        SupervisorTask::new(&self.targets, &self.duty, &self.update, &self.guard, queue)
    }

    /// Background task.
    pub fn pipeline<'a, Q: ByteQueue>(&'a self, queue: &'a Q, gamma: &'a GammaTable) -> CommandPipeline<'a, Q> {
        CommandPipeline::new(queue, gamma, &self.targets, &self.guard)
    }

    pub fn targets(&self) -> &TargetIntensities {
        &self.targets
    }

    pub fn duty(&self) -> &DutyBuffer {
        &self.duty
    }

    pub fn update_signal(&self) -> &UpdateSignal {
        &self.update
    }

    pub fn timeout_guard(&self) -> &TimeoutGuard {
        &self.guard
    }
}
