//! Tick scheduling
//!
//! The frame driver never owns a timer. It asks a [`Scheduler`] to start or
//! stop the repeating tick and to fire a one-shot reset; whoever implements
//! the trait calls back into the game. [`ManualScheduler`] only records the
//! requests so the game can be driven by hand.

use std::time::Duration;

pub trait Scheduler {
    /// Begin invoking the tick every `period`
    fn start(&mut self, period: Duration);
    /// Stop the repeating tick. Must take effect before the next tick.
    fn stop(&mut self);
    /// Invoke the reset once after `delay`
    fn schedule_reset(&mut self, delay: Duration);
    /// Drop a pending reset that has not fired yet
    fn cancel_reset(&mut self);
}

/// Records scheduling requests for deterministic, hand-driven loops
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    pending_reset: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.period.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn pending_reset(&self) -> Option<Duration> {
        self.pending_reset
    }

    /// Consume the pending one-shot reset, if any
    pub fn take_reset(&mut self) -> Option<Duration> {
        self.pending_reset.take()
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
    }

    fn stop(&mut self) {
        self.period = None;
    }

    fn schedule_reset(&mut self, delay: Duration) {
        self.pending_reset = Some(delay);
    }

    fn cancel_reset(&mut self) {
        self.pending_reset = None;
    }
}
