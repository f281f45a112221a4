// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vote-intensity dots.
//!
//! Dot geometry depends only on the vote dataset, so it is computed once per
//! snapshot ([`VoteDotTable::from_tallies`]) and looked up every frame.
//!
//! Vertical offsets follow a median-anchored two-segment curve:
//! - totals at or below the median rise from `min_offset` to the half-range
//!   point along `(t / median)^(1 / low_gamma)`;
//! - totals above the median rise from the half-range point to `max_offset`
//!   along `((t - median) / (max - median))^(1 / high_gamma)`.
//!
//! When the largest total exceeds `outlier_ratio` times the median, every dot
//! is lifted by a boost of up to `boost_fraction` of the range so that one
//! outlier does not flatten everything else against the floor.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Promote/demote counts for one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoteTally {
    /// Up votes.
    pub promote: u32,
    /// Down votes.
    pub demote: u32,
}

impl VoteTally {
    /// Creates a tally.
    #[must_use]
    pub const fn new(promote: u32, demote: u32) -> Self {
        Self { promote, demote }
    }

    /// `promote + demote`.
    #[must_use]
    pub fn total(self) -> u64 {
        u64::from(self.promote) + u64::from(self.demote)
    }

    /// `promote - demote`.
    #[must_use]
    pub fn net(self) -> i64 {
        i64::from(self.promote) - i64::from(self.demote)
    }
}

/// Tuning for vote dot geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoteDotConfig {
    /// Offset above the rung top for the smallest non-zero total, in pixels.
    pub min_offset: f64,
    /// Offset for the largest total, in pixels.
    pub max_offset: f64,
    /// Exponent denominator for totals at or below the median.
    pub low_gamma: f64,
    /// Exponent denominator for totals above the median.
    pub high_gamma: f64,
    /// `max / median` beyond which the outlier boost applies.
    pub outlier_ratio: f64,
    /// Largest boost, as a fraction of `max_offset - min_offset`.
    pub boost_fraction: f64,
    /// Diameter of a neutral dot.
    pub min_size: f64,
    /// Diameter of the dot with the largest absolute net.
    pub max_size: f64,
}

impl Default for VoteDotConfig {
    fn default() -> Self {
        Self {
            min_offset: 4.0,
            max_offset: 36.0,
            low_gamma: 1.35,
            high_gamma: 1.85,
            outlier_ratio: 4.0,
            boost_fraction: 0.15,
            min_size: 3.0,
            max_size: 8.0,
        }
    }
}

/// Derived overlay glyph for one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoteDot {
    /// Diameter in pixels.
    pub size: f64,
    /// Height above the rung top in pixels.
    pub offset: f64,
    /// `promote - demote`.
    pub net: i64,
    /// `promote + demote`.
    pub total: u64,
    /// `net == 0`.
    pub neutral: bool,
    /// `total > 0`.
    pub visible: bool,
}

impl VoteDot {
    /// A dot that is never drawn, used for events without (or with failed) vote data.
    pub const HIDDEN: Self = Self {
        size: 0.0,
        offset: 0.0,
        net: 0,
        total: 0,
        neutral: true,
        visible: false,
    };
}

/// Statistics of one vote dataset that shape the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoteCurve {
    /// Median of the non-zero totals.
    pub median: f64,
    /// Largest total.
    pub max_total: f64,
    /// Largest absolute net.
    pub max_abs_net: f64,
    /// Boost added to every offset, in pixels.
    pub boost: f64,
}

impl VoteCurve {
    /// Derives the curve for a set of tallies, or `None` if every total is zero.
    #[must_use]
    pub fn fit(tallies: impl IntoIterator<Item = VoteTally>, config: &VoteDotConfig) -> Option<Self> {
        let mut totals = Vec::new();
        let mut max_abs_net = 0_u64;
        for t in tallies {
            if t.total() > 0 {
                totals.push(t.total());
            }
            max_abs_net = max_abs_net.max(t.net().unsigned_abs());
        }
        if totals.is_empty() {
            return None;
        }
        totals.sort_unstable();
        let mid = totals.len() / 2;
        let median = if totals.len() % 2 == 0 {
            (totals[mid - 1] as f64 + totals[mid] as f64) * 0.5
        } else {
            totals[mid] as f64
        };
        let max_total = totals[totals.len() - 1] as f64;

        let ratio = max_total / median;
        let boost = if ratio > config.outlier_ratio {
            let strength = (ratio / config.outlier_ratio).ln().min(1.0);
            strength * config.boost_fraction * range(config)
        } else {
            0.0
        };
        Some(Self {
            median,
            max_total,
            max_abs_net: max_abs_net as f64,
            boost,
        })
    }

    /// Vertical offset for `tally` on this curve.
    #[must_use]
    pub fn offset(&self, total: u64, config: &VoteDotConfig) -> f64 {
        let total = total as f64;
        let half = config.min_offset + range(config) * 0.5;
        let raw = if total <= self.median {
            let t = (total / self.median).clamp(0.0, 1.0);
            config.min_offset + (half - config.min_offset) * t.powf(1.0 / config.low_gamma)
        } else {
            let span = self.max_total - self.median;
            let t = if span > 0.0 {
                ((total - self.median) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            half + (config.max_offset - half) * t.powf(1.0 / config.high_gamma)
        };
        (raw + self.boost).min(config.max_offset)
    }

    /// Dot diameter for a given net.
    #[must_use]
    pub fn size(&self, net: i64, config: &VoteDotConfig) -> f64 {
        if net == 0 || self.max_abs_net <= 0.0 {
            return config.min_size;
        }
        let t = (net.unsigned_abs() as f64 / self.max_abs_net).clamp(0.0, 1.0);
        config.min_size + (config.max_size - config.min_size) * t.sqrt()
    }

    /// Builds the dot for `tally`.
    #[must_use]
    pub fn dot(&self, tally: VoteTally, config: &VoteDotConfig) -> VoteDot {
        let total = tally.total();
        if total == 0 {
            return VoteDot {
                net: 0,
                ..VoteDot::HIDDEN
            };
        }
        let net = tally.net();
        VoteDot {
            size: self.size(net, config),
            offset: self.offset(total, config),
            net,
            total,
            neutral: net == 0,
            visible: true,
        }
    }
}

fn range(config: &VoteDotConfig) -> f64 {
    (config.max_offset - config.min_offset).max(0.0)
}

/// Computes dots for a slice of tallies, index-aligned with the input.
///
/// `None` entries (no data, or a failed lookup) produce [`VoteDot::HIDDEN`] and
/// do not influence the curve.
#[must_use]
pub fn compute_vote_dots(tallies: &[Option<VoteTally>], config: &VoteDotConfig) -> Vec<VoteDot> {
    let Some(curve) = VoteCurve::fit(tallies.iter().flatten().copied(), config) else {
        return tallies.iter().map(|_| VoteDot::HIDDEN).collect();
    };
    tallies
        .iter()
        .map(|t| t.map_or(VoteDot::HIDDEN, |t| curve.dot(t, config)))
        .collect()
}

/// Vote dots for one dataset snapshot, keyed by event id.
#[derive(Clone, Debug)]
pub struct VoteDotTable<K> {
    dots: HashMap<K, VoteDot>,
    curve: Option<VoteCurve>,
}

impl<K> Default for VoteDotTable<K> {
    fn default() -> Self {
        Self {
            dots: HashMap::new(),
            curve: None,
        }
    }
}

impl<K: Copy + Hash + Eq> VoteDotTable<K> {
    /// Builds the table from `(id, tally)` pairs.
    #[must_use]
    pub fn from_tallies(tallies: impl IntoIterator<Item = (K, VoteTally)>, config: &VoteDotConfig) -> Self {
        let tallies: Vec<(K, VoteTally)> = tallies.into_iter().collect();
        let curve = VoteCurve::fit(tallies.iter().map(|(_, t)| *t), config);
        let dots = tallies
            .into_iter()
            .map(|(id, t)| {
                let dot = curve.map_or(VoteDot::HIDDEN, |c| c.dot(t, config));
                (id, dot)
            })
            .collect();
        Self { dots, curve }
    }

    /// Returns `true` once any tally has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.dots.is_empty()
    }

    /// Dot for `id`; [`VoteDot::HIDDEN`] when unknown.
    #[must_use]
    pub fn get(&self, id: &K) -> VoteDot {
        self.dots.get(id).copied().unwrap_or(VoteDot::HIDDEN)
    }

    /// Curve statistics, if any total was non-zero.
    #[must_use]
    pub fn curve(&self) -> Option<VoteCurve> {
        self.curve
    }

    /// Number of events in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    /// Returns `true` if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{VoteCurve, VoteDot, VoteDotConfig, VoteTally, compute_vote_dots};

    fn tally(promote: u32, demote: u32) -> Option<VoteTally> {
        Some(VoteTally::new(promote, demote))
    }

    #[test]
    fn outlier_gets_max_offset_and_boost() {
        let cfg = VoteDotConfig::default();
        let tallies = [tally(0, 0), tally(0, 0), tally(4, 1), tally(2, 3), tally(90, 10)];
        let dots = compute_vote_dots(&tallies, &cfg);

        assert!(!dots[0].visible && !dots[1].visible);
        assert_eq!(dots[4].offset, cfg.max_offset);

        let curve = VoteCurve::fit(tallies.iter().flatten().copied(), &cfg).unwrap();
        assert_eq!(curve.median, 5.0);
        assert!(curve.boost > 0.0);

        // Median totals land at half range plus the boost.
        let half = cfg.min_offset + (cfg.max_offset - cfg.min_offset) * 0.5;
        assert!((dots[2].offset - (half + curve.boost)).abs() < 1e-9);
        assert_eq!(dots[2].offset, dots[3].offset);
    }

    #[test]
    fn no_boost_without_outlier() {
        let cfg = VoteDotConfig::default();
        let curve = VoteCurve::fit([VoteTally::new(2, 0), VoteTally::new(3, 1), VoteTally::new(6, 0)], &cfg).unwrap();
        assert_eq!(curve.boost, 0.0);
        assert_eq!(curve.offset(6, &cfg), cfg.max_offset);
        assert!(curve.offset(1, &cfg) > cfg.min_offset);
        assert!(curve.offset(1, &cfg) < curve.offset(3, &cfg));
    }

    #[test]
    fn offsets_are_monotonic_in_total() {
        let cfg = VoteDotConfig::default();
        let curve = VoteCurve::fit((1..=200).map(|t| VoteTally::new(t, 0)), &cfg).unwrap();
        let mut prev = 0.0;
        for t in 1..=200 {
            let o = curve.offset(t, &cfg);
            assert!(o >= prev, "{t}: {o} < {prev}");
            assert!(o <= cfg.max_offset);
            prev = o;
        }
    }

    #[test]
    fn neutral_and_missing() {
        let cfg = VoteDotConfig::default();
        let dots = compute_vote_dots(&[tally(3, 3), None, tally(5, 0)], &cfg);
        assert!(dots[0].visible && dots[0].neutral);
        assert_eq!(dots[0].size, cfg.min_size);
        assert_eq!(dots[1], VoteDot::HIDDEN);
        assert_eq!(dots[2].size, cfg.max_size);
        assert_eq!(dots[2].net, 5);
    }

    #[test]
    fn all_zero_is_all_hidden() {
        let cfg = VoteDotConfig::default();
        let dots = compute_vote_dots(&[tally(0, 0), tally(0, 0)], &cfg);
        assert!(dots.iter().all(|d| !d.visible));
    }
}
