// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-based timers polled by the host.

use core::time::Duration;

use crate::clock::Millis;

/// A single cancelable deadline.
///
/// Each call to [`OneShot::arm`] bumps a generation counter, so callers that
/// captured [`OneShot::generation`] before re-arming can tell that the timer
/// they were waiting on has been superseded.
#[derive(Clone, Debug, Default)]
pub struct OneShot {
    deadline: Option<Millis>,
    generation: u64,
}

impl OneShot {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadline: None,
            generation: 0,
        }
    }

    /// Arms the timer to fire `after` the given instant, replacing any pending deadline.
    pub fn arm(&mut self, now: Millis, after: Duration) {
        self.deadline = Some(now.saturating_add(after));
        self.generation = self.generation.wrapping_add(1);
    }

    /// Cancels the pending deadline, if any.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the pending deadline.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Returns the arm/cancel generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fires (and disarms) the timer if its deadline is at or before `now`.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the deadline, if armed.
    #[must_use]
    pub fn remaining(&self, now: Millis) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_since(now))
    }
}

/// A trailing debounce timer.
///
/// Every [`Debounce::poke`] pushes the deadline to `now + delay`. The timer
/// fires once, `delay` after the last poke.
#[derive(Clone, Debug)]
pub struct Debounce {
    delay: Duration,
    timer: OneShot,
}

impl Debounce {
    /// Creates an idle debounce timer with the given trailing delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: OneShot::new(),
        }
    }

    /// Returns the trailing delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records activity at `now`, pushing the deadline back.
    pub fn poke(&mut self, now: Millis) {
        self.timer.arm(now, self.delay);
    }

    /// Drops any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Returns `true` while activity is still waiting to settle.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// When the pending activity settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    /// Fires once if the quiet period has elapsed.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        self.timer.fire_if_due(now)
    }
}

/// A repeating deadline.
///
/// When polled late, the interval fires once and re-anchors to the poll time
/// instead of replaying every missed period.
#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    next: Option<Millis>,
}

impl Interval {
    /// Creates a stopped interval.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Returns the period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts (or restarts) the interval; the first tick is one period after `now`.
    pub fn start(&mut self, now: Millis) {
        self.next = Some(now.saturating_add(self.period));
    }

    /// Stops the interval.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Returns `true` while running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Next tick time while running.
    #[must_use]
    pub fn next_tick(&self) -> Option<Millis> {
        self.next
    }

    /// Returns `true` if a tick is due at `now`, scheduling the next one.
    pub fn tick_if_due(&mut self, now: Millis) -> bool {
        match self.next {
            Some(next) if next <= now => {
                self.next = Some(now.saturating_add(self.period));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{Debounce, Interval, OneShot};
    use crate::Millis;

    #[test]
    fn one_shot_fires_once_at_deadline() {
        let mut t = OneShot::new();
        assert!(!t.fire_if_due(Millis(1_000)));

        t.arm(Millis(100), Duration::from_millis(50));
        assert_eq!(t.deadline(), Some(Millis(150)));
        assert!(!t.fire_if_due(Millis(149)));
        assert!(t.fire_if_due(Millis(150)));
        assert!(!t.fire_if_due(Millis(151)));
        assert!(!t.is_armed());
    }

    #[test]
    fn rearm_replaces_deadline_and_bumps_generation() {
        let mut t = OneShot::new();
        t.arm(Millis(0), Duration::from_millis(100));
        let g = t.generation();
        t.arm(Millis(50), Duration::from_millis(100));
        assert_ne!(t.generation(), g);
        assert!(!t.fire_if_due(Millis(100)));
        assert!(t.fire_if_due(Millis(150)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut t = OneShot::new();
        t.cancel();
        assert_eq!(t.generation(), 0);

        t.arm(Millis(0), Duration::from_millis(10));
        t.cancel();
        let g = t.generation();
        t.cancel();
        assert_eq!(t.generation(), g);
        assert!(!t.fire_if_due(Millis(100)));
    }

    #[test]
    fn debounce_coalesces_pokes() {
        let mut d = Debounce::new(Duration::from_millis(450));
        for ms in (0..=1_000).step_by(16) {
            d.poke(Millis(ms));
            assert!(!d.fire_if_due(Millis(ms)));
        }
        assert!(d.is_pending());
        assert_eq!(d.deadline(), Some(Millis(1_450)));
        assert!(!d.fire_if_due(Millis(1_440)));
        assert!(d.fire_if_due(Millis(1_450)));
        assert!(!d.is_pending());
    }

    #[test]
    fn interval_does_not_burst_after_late_poll() {
        let mut i = Interval::new(Duration::from_secs(60));
        assert!(!i.tick_if_due(Millis(1_000_000)));

        i.start(Millis(0));
        assert!(!i.tick_if_due(Millis(59_999)));
        assert!(i.tick_if_due(Millis(300_000)));
        assert_eq!(i.next_tick(), Some(Millis(360_000)));
        // Re-anchored to the late poll, not to 120_000.
        assert!(!i.tick_if_due(Millis(300_001)));
        assert!(i.tick_if_due(Millis(360_000)));
    }
}
