//! Virtual timeline of the two periodic tasks.
//!
//! On hardware the fast and slow ticks are timer interrupts. On a host there
//! are no interrupts, so this scheduler walks the timeline instead: it hands
//! out tick events in deadline order and the caller runs the matching task.
//! When both ticks are due at the same instant the fast one goes first, as
//! its interrupt would preempt the slow one.

use embassy_time::{Duration, Instant};

use crate::config::TickPlan;

/// Which periodic task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Fast,
    Slow,
}

/// A due tick and the instant it fires.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTick {
    pub at: Instant,
    pub event: TickEvent,
}

/// Deterministic tick scheduler.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(&plan);
///
/// loop {
///     match scheduler.advance().event {
///         TickEvent::Fast => {
///             generator.tick();
///         }
///         TickEvent::Slow => {
///             supervisor.tick();
///         }
///     }
///     pipeline.poll();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickScheduler {
    fast_period: Duration,
    slow_period: Duration,
    next_fast: Instant,
    next_slow: Instant,
}

impl TickScheduler {
    /// Start both timers at time zero, first ticks one period in.
    pub fn new(plan: &TickPlan) -> Self {
        Self::with_periods(plan.fast_tick, plan.slow_tick)
    }

    /// Create a scheduler with explicit periods.
    pub fn with_periods(fast_period: Duration, slow_period: Duration) -> Self {
        let start = Instant::from_micros(0);
        Self {
            fast_period,
            slow_period,
            next_fast: start + fast_period,
            next_slow: start + slow_period,
        }
    }

    /// Pop the next due tick.
    pub fn advance(&mut self) -> ScheduledTick {
        if self.next_fast <= self.next_slow {
            let at = self.next_fast;
            self.next_fast += self.fast_period;
            ScheduledTick {
                at,
                event: TickEvent::Fast,
            }
        } else {
            let at = self.next_slow;
            self.next_slow += self.slow_period;
            ScheduledTick {
                at,
                event: TickEvent::Slow,
            }
        }
    }

    /// Deadline of the next tick without consuming it.
    pub fn peek(&self) -> Instant {
        if self.next_fast <= self.next_slow {
            self.next_fast
        } else {
            self.next_slow
        }
    }
}

impl Iterator for TickScheduler {
    type Item = ScheduledTick;

    fn next(&mut self) -> Option<ScheduledTick> {
        Some(self.advance())
    }
}
