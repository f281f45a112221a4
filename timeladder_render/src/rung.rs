// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Geometry of rungs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RungStyle {
    /// Width of an isolated rung, in pixels.
    pub max_width: f64,
    /// Narrowest width a crowded rung shrinks to.
    pub min_width: f64,
    /// Selected rung width as a fraction of `min_width`. Must be below `1` so the
    /// selection is always thinner than the densest unselected rung.
    pub selected_factor: f64,
    /// Distance in pixels within which other rungs count toward local density.
    pub density_window: f64,
    /// Rung height before declutter stacking, in pixels.
    pub base_height: f64,
    /// Distance of the shared baseline from the bottom of the surface.
    pub baseline_inset: f64,
}

impl Default for RungStyle {
    fn default() -> Self {
        Self {
            max_width: 3.0,
            min_width: 1.25,
            selected_factor: 0.8,
            density_window: 10.0,
            base_height: 28.0,
            baseline_inset: 18.0,
        }
    }
}

impl RungStyle {
    /// Width of the selected rung.
    #[must_use]
    pub fn selected_width(&self) -> f64 {
        self.min_width * self.selected_factor.clamp(0.0, 1.0)
    }

    /// Width of an unselected rung with `neighbors` rungs inside the density window.
    #[must_use]
    pub fn width_for(&self, neighbors: usize) -> f64 {
        let w = self.max_width / (1.0 + 0.5 * neighbors as f64);
        w.clamp(self.min_width, self.max_width.max(self.min_width))
    }

    /// Widths for rungs at the given X positions, index-aligned with the input.
    #[must_use]
    pub fn widths(&self, xs: &[f64]) -> Vec<f64> {
        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
        let mut out = alloc::vec![self.max_width; xs.len()];
        let window = self.density_window.max(0.0);
        let mut lo = 0;
        let mut hi = 0;
        for (pos, &idx) in order.iter().enumerate() {
            let x = xs[idx];
            while xs[order[lo]] < x - window {
                lo += 1;
            }
            hi = hi.max(pos + 1);
            while hi < order.len() && xs[order[hi]] <= x + window {
                hi += 1;
            }
            out[idx] = self.width_for(hi - lo - 1);
        }
        out
    }
}
