// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// A monotonic host time in whole milliseconds.
///
/// The origin is whatever the host chooses (page load, process start); only
/// differences between two values are meaningful.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Millis(pub u64);

impl Millis {
    /// The zero instant.
    pub const ZERO: Self = Self(0);

    /// Returns `self + duration`, saturating at `u64::MAX`.
    #[must_use]
    pub fn saturating_add(self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }

    /// Returns the time elapsed since `earlier`, or zero if `earlier` is later.
    #[must_use]
    pub fn saturating_since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::Millis;

    #[test]
    fn saturating_arithmetic() {
        assert_eq!(Millis(10).saturating_add(Duration::from_millis(5)), Millis(15));
        assert_eq!(
            Millis(u64::MAX).saturating_add(Duration::from_secs(1)),
            Millis(u64::MAX)
        );
        assert_eq!(Millis(5).saturating_since(Millis(10)), Duration::ZERO);
        assert_eq!(
            Millis(1_500).saturating_since(Millis(500)),
            Duration::from_secs(1)
        );
    }
}
