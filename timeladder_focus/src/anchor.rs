// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use chrono::NaiveDateTime;
use timeladder_timing::{Interval, Millis};

/// Point A: the live "now" anchor.
///
/// The host supplies wall-clock readings; the anchor only decides when a new
/// reading should be taken so that elapsed time shows up in the layout at least
/// once per refresh period.
#[derive(Clone, Debug)]
pub struct LiveAnchor {
    now: NaiveDateTime,
    refresh: Interval,
}

impl LiveAnchor {
    /// Default refresh period: one minute.
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

    /// Creates an anchor at `now`, first refreshing one period after `at`.
    #[must_use]
    pub fn new(now: NaiveDateTime, at: Millis, period: Duration) -> Self {
        let mut refresh = Interval::new(period);
        refresh.start(at);
        Self { now, refresh }
    }

    /// The current anchor instant.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Host time of the next scheduled refresh.
    #[must_use]
    pub fn next_refresh(&self) -> Option<Millis> {
        self.refresh.next_tick()
    }

    /// Returns `true` if a new wall-clock reading is due at `at`.
    ///
    /// Consumes the due tick; call [`LiveAnchor::set_now`] with a fresh reading
    /// afterwards.
    pub fn refresh_due(&mut self, at: Millis) -> bool {
        self.refresh.tick_if_due(at)
    }

    /// Replaces the anchor instant, returning `true` if it moved.
    pub fn set_now(&mut self, now: NaiveDateTime) -> bool {
        if self.now == now {
            return false;
        }
        self.now = now;
        true
    }

    /// Applies a fresh reading if one is due; returns `true` if the anchor moved.
    pub fn tick(&mut self, at: Millis, wall_clock: NaiveDateTime) -> bool {
        self.refresh_due(at) && self.set_now(wall_clock)
    }
}
