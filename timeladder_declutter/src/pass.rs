// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use timeladder_position::ViewMode;

use crate::config::DeclutterConfig;
use crate::hash::{bucket_from_hash, jitter_from_hash, stable_hash};

/// One visible marker fed to [`declutter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeclutterInput<K> {
    /// Event id.
    pub id: K,
    /// True marker value. Carried through untouched.
    pub marker_value: f64,
    /// Device-space X the marker would be drawn at.
    pub screen_x: f64,
}

impl<K> DeclutterInput<K> {
    /// Creates an input.
    #[must_use]
    pub fn new(id: K, marker_value: f64, screen_x: f64) -> Self {
        Self {
            id,
            marker_value,
            screen_x,
        }
    }
}

/// Presentation adjustments for one marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stacking {
    /// Rung height multiplier, `>= 1`.
    pub height: f64,
    /// Horizontal offset in device pixels.
    pub jitter: f64,
    /// Close neighbors found, or `None` when the bucketed strategy skipped scanning.
    pub neighbors: Option<usize>,
}

impl Stacking {
    /// No adjustment.
    pub const IDENTITY: Self = Self {
        height: 1.0,
        jitter: 0.0,
        neighbors: Some(0),
    };
}

/// Which strategy produced a [`DeclutterPass`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Neighbor counting within a pixel window.
    Pairwise,
    /// Hash-keyed tiers for crowded markers, found by a coarse grid count
    /// instead of a neighbor scan.
    Bucketed,
}

/// Result of one declutter pass: a registry of [`Stacking`]s keyed by event id.
///
/// A pass is built fresh for each render and owns everything it knows about
/// overlaps.
#[derive(Clone, Debug)]
pub struct DeclutterPass<K> {
    mode: ViewMode,
    strategy: Strategy,
    entries: HashMap<K, Stacking>,
}

impl<K: Hash + Eq> DeclutterPass<K> {
    /// View mode the pass was computed for.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Strategy used.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Adjustments for `id`, if it was part of the pass.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<Stacking> {
        self.entries.get(id).copied()
    }

    /// Adjustments for `id`, or [`Stacking::IDENTITY`] if unknown.
    #[must_use]
    pub fn get_or_identity(&self, id: &K) -> Stacking {
        self.get(id).unwrap_or(Stacking::IDENTITY)
    }

    /// Screen X after jitter.
    #[must_use]
    pub fn adjusted_x(&self, id: &K, screen_x: f64) -> f64 {
        screen_x + self.get_or_identity(id).jitter
    }

    /// Number of markers in the pass.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pass saw no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest height multiplier in the pass, `1.0` when empty.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.entries
            .values()
            .map(|s| s.height)
            .fold(1.0, f64::max)
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Stacking)> + '_ {
        self.entries.iter()
    }
}

/// Computes stacking heights and jitter for the visible markers.
///
/// Markers with a non-finite screen X get [`Stacking::IDENTITY`] and do not
/// count as anyone's neighbor. Duplicate ids keep the last entry.
pub fn declutter<K: Copy + Hash + Eq>(
    items: &[DeclutterInput<K>],
    mode: ViewMode,
    config: &DeclutterConfig,
) -> DeclutterPass<K> {
    let bucketed = mode.is_coarse() && items.len() > config.bucket_threshold;
    let mut entries = HashMap::with_capacity(items.len());
    let strategy = if bucketed {
        tracing::debug!(count = items.len(), mode = %mode, "declutter using hashed buckets");
        bucketed_pass(items, mode, config, &mut entries);
        Strategy::Bucketed
    } else {
        pairwise(items, mode, config, &mut entries);
        Strategy::Pairwise
    };
    tracing::trace!(count = entries.len(), ?strategy, "declutter pass");
    DeclutterPass {
        mode,
        strategy,
        entries,
    }
}

/// Grid cell of width `cell` holding `x`.
fn cell_of(x: f64, cell: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Saturating float-to-int cast; screen cells stay far from i64 limits"
    )]
    {
        (x / cell).floor() as i64
    }
}

fn bucketed_pass<K: Copy + Hash + Eq>(
    items: &[DeclutterInput<K>],
    mode: ViewMode,
    config: &DeclutterConfig,
    out: &mut HashMap<K, Stacking>,
) {
    // Anything within one window of a marker lies in its cell or an adjacent one.
    let cell = config.window.get(mode).max(1.0);
    let mut occupancy: HashMap<i64, usize> = HashMap::new();
    for item in items.iter().filter(|i| i.screen_x.is_finite()) {
        *occupancy.entry(cell_of(item.screen_x, cell)).or_default() += 1;
    }
    let count = |c: i64| occupancy.get(&c).copied().unwrap_or(0);
    for item in items {
        if !item.screen_x.is_finite() {
            out.insert(item.id, Stacking::IDENTITY);
            continue;
        }
        let c = cell_of(item.screen_x, cell);
        let nearby = count(c.saturating_sub(1)) + count(c) + count(c.saturating_add(1));
        if nearby <= 1 {
            out.insert(item.id, Stacking::IDENTITY);
            continue;
        }
        let h = stable_hash(&item.id);
        out.insert(
            item.id,
            Stacking {
                height: config.height_for_bucket(mode, bucket_from_hash(h, config.bucket_count)),
                jitter: jitter_from_hash(h, config.max_jitter),
                neighbors: None,
            },
        );
    }
}

fn pairwise<K: Copy + Hash + Eq>(
    items: &[DeclutterInput<K>],
    mode: ViewMode,
    config: &DeclutterConfig,
    out: &mut HashMap<K, Stacking>,
) {
    let window = config.window.get(mode).max(0.0);
    let mut order: Vec<usize> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if item.screen_x.is_finite() {
            order.push(i);
        } else {
            out.insert(item.id, Stacking::IDENTITY);
        }
    }
    order.sort_by(|&a, &b| items[a].screen_x.total_cmp(&items[b].screen_x));

    // Sliding window over the sorted positions: [lo, hi) holds everything
    // within `window` of the current marker.
    let mut lo = 0;
    let mut hi = 0;
    for (pos, &idx) in order.iter().enumerate() {
        let x = items[idx].screen_x;
        while items[order[lo]].screen_x < x - window {
            lo += 1;
        }
        if hi < pos + 1 {
            hi = pos + 1;
        }
        while hi < order.len() && items[order[hi]].screen_x <= x + window {
            hi += 1;
        }
        let neighbors = hi - lo - 1;
        let jitter = if neighbors > 0 {
            jitter_from_hash(stable_hash(&items[idx].id), config.max_jitter)
        } else {
            0.0
        };
        out.insert(
            items[idx].id,
            Stacking {
                height: config.height_for(mode, neighbors),
                jitter,
                neighbors: Some(neighbors),
            },
        );
    }
}
