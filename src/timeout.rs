//! Recovery from senders that stall mid-message.
//!
//! A sender that transmits one or two bytes and goes quiet would shift the
//! framing of every later message. The guard counts slow ticks while a partial
//! message sits in the queue and asks for a flush when the count reaches its
//! threshold. Any newly arrived byte, or a consumed message, restarts the count.

use core::cell::Cell;

use critical_section::Mutex;

use crate::counter::ModCounter;

/// What the guard is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    /// Queue empty, timer parked at zero.
    Idle,
    /// Bytes buffered, timer counting slow ticks.
    Accumulating,
}

/// Decision of one guard tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    Hold,
    /// Threshold reached with bytes still buffered; the queue must be flushed.
    Flush,
}

#[derive(Clone, Copy)]
struct GuardState {
    phase: GuardPhase,
    // Wraps at the threshold; the wrap is the flush trigger.
    idle: ModCounter,
    last_buffered: usize,
}

/// Idle timer for partial messages.
///
/// Ticked by the slow task, reset by the command pipeline after it consumes
/// a message.
pub struct TimeoutGuard {
    inner: Mutex<Cell<GuardState>>,
}

impl TimeoutGuard {
    /// Create a guard that flushes after `threshold` idle slow ticks.
    ///
    /// A threshold of zero is treated as one.
    #[allow(clippy::cast_lossless)]
    pub const fn new(threshold: u8) -> Self {
        Self {
            inner: Mutex::new(Cell::new(GuardState {
                phase: GuardPhase::Idle,
                idle: ModCounter::new(threshold as u16, 0),
                last_buffered: 0,
            })),
        }
    }

    /// Account for one slow tick given the current queue fill.
    pub fn tick(&self, buffered: usize) -> GuardAction {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();

            let action = if buffered == 0 {
                state.phase = GuardPhase::Idle;
                state.idle.reset();
                GuardAction::Hold
            } else {
                if buffered > state.last_buffered {
                    state.idle.reset();
                }
                state.phase = GuardPhase::Accumulating;
                if state.idle.advance() {
                    state.phase = GuardPhase::Idle;
                    GuardAction::Flush
                } else {
                    GuardAction::Hold
                }
            };

            state.last_buffered = match action {
                GuardAction::Flush => 0,
                GuardAction::Hold => buffered,
            };
            cell.set(state);
            action
        })
    }

    /// Restart the idle count. Called when a complete message was consumed.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            state.idle.reset();
            cell.set(state);
        });
    }

    pub fn phase(&self) -> GuardPhase {
        critical_section::with(|cs| self.inner.borrow(cs).get().phase)
    }

    /// Slow ticks counted since the last byte arrived.
    pub fn idle_ticks(&self) -> u8 {
        critical_section::with(|cs| self.inner.borrow(cs).get().idle.value())
    }

    pub fn threshold(&self) -> u16 {
        critical_section::with(|cs| self.inner.borrow(cs).get().idle.modulus())
    }
}
