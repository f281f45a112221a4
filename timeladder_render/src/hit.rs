// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point};

/// Hit-testing parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitConfig {
    /// Largest pointer distance from a rung that still counts as a hit, in pixels.
    pub radius: f64,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self { radius: 12.0 }
    }
}

/// A rung as seen by the hit tester.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitCandidate<K> {
    /// Event id.
    pub id: K,
    /// Rung centerline, baseline to top.
    pub line: Line,
}

/// What a pointer position resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitTarget<K> {
    /// A rung was within the hit radius.
    Marker {
        /// Event id.
        id: K,
        /// Index into the candidate slice.
        index: usize,
        /// Distance from the pointer to the rung centerline.
        distance: f64,
    },
    /// Nothing within the radius.
    Background,
}

impl<K: Copy> HitTarget<K> {
    /// The hit event id, if any.
    #[must_use]
    pub fn id(&self) -> Option<K> {
        match self {
            Self::Marker { id, .. } => Some(*id),
            Self::Background => None,
        }
    }
}

/// Resolves `pt` to the nearest rung within [`HitConfig::radius`].
///
/// Ties go to the earlier candidate.
#[must_use]
pub fn hit_test<K: Copy>(candidates: &[HitCandidate<K>], pt: Point, config: &HitConfig) -> HitTarget<K> {
    let limit_sq = config.radius * config.radius;
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let d_sq = c.line.nearest(pt, 0.0).distance_sq;
        if d_sq.is_nan() || d_sq > limit_sq {
            continue;
        }
        if best.is_none_or(|(_, b)| d_sq < b) {
            best = Some((i, d_sq));
        }
    }
    match best {
        Some((index, d_sq)) => HitTarget::Marker {
            id: candidates[index].id,
            index,
            distance: d_sq.sqrt(),
        },
        None => HitTarget::Background,
    }
}
