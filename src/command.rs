//! Background command decoding.
//!
//! Drains complete 3-byte messages from the inbound queue, expands them
//! through the gamma table and stores the result as the new brightness
//! targets. Runs at the lowest priority; it never blocks and never sees a
//! partial message.

use log::trace;

use crate::gamma::GammaTable;
use crate::inbound::{ByteQueue, Message};
use crate::shared::TargetIntensities;
use crate::timeout::TimeoutGuard;

/// Background-loop message decoder.
pub struct CommandPipeline<'a, Q: ByteQueue> {
    queue: &'a Q,
    gamma: &'a GammaTable,
    targets: &'a TargetIntensities,
    guard: &'a TimeoutGuard,
}

impl<'a, Q: ByteQueue> CommandPipeline<'a, Q> {
    pub const fn new(
        queue: &'a Q,
        gamma: &'a GammaTable,
        targets: &'a TargetIntensities,
        guard: &'a TimeoutGuard,
    ) -> Self {
        Self {
            queue,
            gamma,
            targets,
            guard,
        }
    }

    /// Apply at most one pending message.
    ///
    /// Returns the message that was applied, or `None` when fewer than three
    /// bytes are buffered.
    pub fn poll(&mut self) -> Option<Message> {
        let message = self.queue.take_message()?;
        self.guard.reset();

        let targets = self.gamma.expand(message);
        self.targets.store(targets);
        trace!(
            "applied message {} {} {} -> {:?}",
            message.r, message.g, message.b, targets
        );

        Some(message)
    }

    /// Apply every complete message currently buffered, returning how many.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while self.poll().is_some() {
            applied += 1;
        }
        applied
    }

    /// Background loop. Never returns.
    pub fn run(mut self) -> ! {
        loop {
            self.poll();
        }
    }
}
