// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use timeladder_position::ViewMode;

/// One value per [`ViewMode`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeTable<T> {
    /// Day view.
    pub day: T,
    /// Week view.
    pub week: T,
    /// Month view.
    pub month: T,
    /// Year view.
    pub year: T,
    /// Position view.
    pub position: T,
}

impl<T: Copy> ModeTable<T> {
    /// Returns the entry for `mode`.
    #[must_use]
    pub fn get(&self, mode: ViewMode) -> T {
        match mode {
            ViewMode::Day => self.day,
            ViewMode::Week => self.week,
            ViewMode::Month => self.month,
            ViewMode::Year => self.year,
            ViewMode::Position => self.position,
        }
    }
}

/// Tuning for [`declutter`](crate::declutter).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeclutterConfig {
    /// Neighbor window in device pixels, measured either side of a marker.
    pub window: ModeTable<f64>,
    /// Upper bound for the height multiplier.
    pub height_cap: ModeTable<f64>,
    /// Logarithm base of the height growth; larger grows slower.
    pub log_base: f64,
    /// Visible event count above which coarse modes switch to hashed buckets.
    pub bucket_threshold: usize,
    /// Number of hashed height tiers.
    pub bucket_count: u32,
    /// Height added per bucket tier.
    pub bucket_step: f64,
    /// Maximum horizontal jitter in device pixels, either direction.
    pub max_jitter: i32,
}

impl DeclutterConfig {
    /// Height multiplier for a marker with `neighbors` close neighbors.
    #[must_use]
    pub fn height_for(&self, mode: ViewMode, neighbors: usize) -> f64 {
        let base = if self.log_base > 1.0 { self.log_base } else { 2.0 };
        let growth = (neighbors as f64 + 1.0).ln() / base.ln();
        clamp_height(1.0 + growth, self.height_cap.get(mode))
    }

    /// Height multiplier for a hashed bucket tier.
    #[must_use]
    pub fn height_for_bucket(&self, mode: ViewMode, bucket: u32) -> f64 {
        clamp_height(
            1.0 + f64::from(bucket) * self.bucket_step,
            self.height_cap.get(mode),
        )
    }
}

impl Default for DeclutterConfig {
    fn default() -> Self {
        Self {
            window: ModeTable {
                day: 6.0,
                week: 8.0,
                month: 14.0,
                year: 18.0,
                position: 6.0,
            },
            height_cap: ModeTable {
                day: 2.0,
                week: 2.2,
                month: 2.6,
                year: 3.0,
                position: 2.0,
            },
            log_base: 4.0,
            bucket_threshold: 50,
            bucket_count: 4,
            bucket_step: 0.25,
            max_jitter: 2,
        }
    }
}

fn clamp_height(h: f64, cap: f64) -> f64 {
    let cap = if cap.is_finite() { cap.max(1.0) } else { 1.0 };
    if h.is_finite() { h.clamp(1.0, cap) } else { cap }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use timeladder_position::ViewMode;

    use super::DeclutterConfig;

    #[test]
    fn isolated_marker_has_unit_height() {
        let cfg = DeclutterConfig::default();
        for mode in ViewMode::ALL {
            assert_eq!(cfg.height_for(mode, 0), 1.0, "{mode}");
        }
    }

    #[test]
    fn growth_is_logarithmic_and_capped() {
        let cfg = DeclutterConfig::default();
        // ln(4)/ln(4) = 1.
        assert!((cfg.height_for(ViewMode::Year, 3) - 2.0).abs() < 1e-12);
        let a = cfg.height_for(ViewMode::Year, 10);
        let b = cfg.height_for(ViewMode::Year, 20);
        assert!(b > a);
        assert!(b - a < a - 1.0);
        assert_eq!(cfg.height_for(ViewMode::Day, 10_000), 2.0);
    }

    #[test]
    fn buckets_respect_cap() {
        let mut cfg = DeclutterConfig::default();
        cfg.bucket_step = 10.0;
        assert_eq!(cfg.height_for_bucket(ViewMode::Month, 0), 1.0);
        assert_eq!(cfg.height_for_bucket(ViewMode::Month, 3), 2.6);
    }
}
