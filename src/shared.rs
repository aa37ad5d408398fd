//! State shared between the fast tick, the slow tick and the background loop.
//!
//! Every field has exactly one writer. Access goes through `critical-section`
//! so a higher-priority task never observes a half-written value.
//!
//! | state                  | writer            | reader            |
//! |------------------------|-------------------|-------------------|
//! | [`TargetIntensities`]  | command pipeline  | slow task         |
//! | [`DutyBuffer`] pending | slow task         | fast task at swap |
//! | [`DutyBuffer`] active  | fast task at swap | fast task         |
//! | [`UpdateSignal`]       | fast task raises  | slow task takes   |

use core::cell::Cell;

use critical_section::Mutex;

use crate::channel::CHANNEL_COUNT;

/// Wide-resolution brightness targets, one per channel.
pub struct TargetIntensities {
    inner: Mutex<Cell<[u16; CHANNEL_COUNT]>>,
}

impl TargetIntensities {
    pub const fn new(initial: [u16; CHANNEL_COUNT]) -> Self {
        Self {
            inner: Mutex::new(Cell::new(initial)),
        }
    }

    /// Replace all three targets at once.
    pub fn store(&self, targets: [u16; CHANNEL_COUNT]) {
        critical_section::with(|cs| self.inner.borrow(cs).set(targets));
    }

    pub fn load(&self) -> [u16; CHANNEL_COUNT] {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

#[derive(Clone, Copy)]
struct DutySlots {
    slots: [[u8; CHANNEL_COUNT]; 2],
    active: usize,
    published: bool,
}

/// Double-buffered duty compare values.
///
/// The slow task publishes into the pending slot whenever it likes; the
/// generator flips the slots at its cycle boundary. Flipping only happens
/// when something was published since the last swap, so a missed publish
/// keeps the previous duty instead of reviving an older one.
pub struct DutyBuffer {
    inner: Mutex<Cell<DutySlots>>,
}

impl DutyBuffer {
    /// Both slots start with `initial`.
    pub const fn new(initial: [u8; CHANNEL_COUNT]) -> Self {
        Self {
            inner: Mutex::new(Cell::new(DutySlots {
                slots: [initial; 2],
                active: 0,
                published: false,
            })),
        }
    }

    /// Write the duty values for the next cycle.
    pub fn publish(&self, duties: [u8; CHANNEL_COUNT]) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            state.slots[state.active ^ 1] = duties;
            state.published = true;
            cell.set(state);
        });
    }

    /// Make the pending slot active if it was published, and return the
    /// active duty values. Only the generator calls this, at a cycle boundary.
    pub fn swap(&self) -> [u8; CHANNEL_COUNT] {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            if state.published {
                state.active ^= 1;
                state.published = false;
                cell.set(state);
            }
            state.slots[state.active]
        })
    }

    /// Duty values currently in effect.
    pub fn active(&self) -> [u8; CHANNEL_COUNT] {
        critical_section::with(|cs| {
            let state = self.inner.borrow(cs).get();
            state.slots[state.active]
        })
    }

    /// Whether a publish is waiting for the next swap.
    pub fn has_pending(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get().published)
    }
}

#[derive(Clone, Copy, Default)]
struct SignalState {
    raised: bool,
    overruns: u32,
}

/// Single-slot "update needed" rendezvous.
///
/// Raising twice without a take in between does not queue a second signal;
/// it is counted as an overrun instead. With valid tick rates the overrun
/// count stays at zero.
pub struct UpdateSignal {
    inner: Mutex<Cell<SignalState>>,
}

impl UpdateSignal {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(SignalState {
                raised: false,
                overruns: 0,
            })),
        }
    }

    /// Raise the signal. Returns `true` if the previous one was still unconsumed.
    pub fn raise(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            let overrun = state.raised;
            if overrun {
                state.overruns = state.overruns.saturating_add(1);
            }
            state.raised = true;
            cell.set(state);
            overrun
        })
    }

    /// Consume the signal, returning whether it was raised.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            let raised = state.raised;
            state.raised = false;
            cell.set(state);
            raised
        })
    }

    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get().raised)
    }

    /// Number of signals overwritten before they were consumed.
    pub fn overruns(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).get().overruns)
    }
}

impl Default for UpdateSignal {
    fn default() -> Self {
        Self::new()
    }
}
