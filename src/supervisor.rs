//! Slow periodic task: dither updates and stalled-message recovery.

use log::debug;

use crate::channel::CHANNEL_COUNT;
use crate::dither::DitherQuantizer;
use crate::inbound::ByteQueue;
use crate::shared::{DutyBuffer, TargetIntensities, UpdateSignal};
use crate::timeout::{GuardAction, TimeoutGuard};

/// What one slow tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEffects {
    /// Duty values published for the next cycle
    pub duties: Option<[u8; CHANNEL_COUNT]>,
    /// Bytes discarded by the timeout guard
    pub flushed: Option<usize>,
}

impl TickEffects {
    /// Check if the tick did anything
    pub const fn has_effects(&self) -> bool {
        self.duties.is_some() || self.flushed.is_some()
    }
}

/// Slow-tick task.
///
/// Owns the quantizer state outright; everything else it touches is shared.
pub struct SupervisorTask<'a, Q: ByteQueue> {
    quantizer: DitherQuantizer,
    targets: &'a TargetIntensities,
    duty: &'a DutyBuffer,
    update: &'a UpdateSignal,
    guard: &'a TimeoutGuard,
    queue: &'a Q,
}

impl<'a, Q: ByteQueue> SupervisorTask<'a, Q> {
    pub const fn new(
        targets: &'a TargetIntensities,
        duty: &'a DutyBuffer,
        update: &'a UpdateSignal,
        guard: &'a TimeoutGuard,
        queue: &'a Q,
    ) -> Self {
        Self {
            quantizer: DitherQuantizer::new(),
            targets,
            duty,
            update,
            guard,
            queue,
        }
    }

    /// Run one slow tick.
    ///
    /// The quantizer only runs when the generator signalled a cycle boundary
    /// since the previous tick.
    pub fn tick(&mut self) -> TickEffects {
        let mut effects = TickEffects::default();

        if self.update.take() {
            let duties = self.quantizer.step(self.targets.load());
            self.duty.publish(duties);
            effects.duties = Some(duties);
        }

        let buffered = self.queue.buffered();
        if self.guard.tick(buffered) == GuardAction::Flush {
            // A byte that arrived after the count was read counts as activity;
            // the guard sees it as growth on the next tick.
            if let Some(dropped) = self.queue.flush_if_buffered(buffered) {
                debug!("flushed {} stalled byte(s) from inbound queue", dropped);
                effects.flushed = Some(dropped);
            }
        }

        effects
    }

    pub fn quantizer(&self) -> &DitherQuantizer {
        &self.quantizer
    }
}
