// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use timeladder_position::ViewMode;

/// How far past the visible range events stay loaded while a focus is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginRule {
    /// A multiple of the viewport width (in marker units).
    ViewportMultiple(f64),
    /// A fixed band in marker units, independent of the viewport.
    Band(f64),
}

impl MarginRule {
    /// Resolves the margin for a viewport spanning `span_units` markers.
    #[must_use]
    pub fn resolve(self, span_units: f64) -> f64 {
        let margin = match self {
            Self::ViewportMultiple(m) => m * span_units,
            Self::Band(units) => units,
        };
        if margin.is_finite() { margin.max(0.0) } else { 0.0 }
    }
}

/// Per-mode visibility margins used while a focus reference is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusMargins {
    /// Day view.
    pub day: MarginRule,
    /// Week view.
    pub week: MarginRule,
    /// Month view.
    pub month: MarginRule,
    /// Year view.
    pub year: MarginRule,
}

impl FocusMargins {
    /// Returns the rule for `mode`. Position mode never carries a focus and gets no margin.
    #[must_use]
    pub fn rule(&self, mode: ViewMode) -> MarginRule {
        match mode {
            ViewMode::Day => self.day,
            ViewMode::Week => self.week,
            ViewMode::Month => self.month,
            ViewMode::Year => self.year,
            ViewMode::Position => MarginRule::Band(0.0),
        }
    }

    /// Margin in marker units for `mode` at the given viewport span.
    #[must_use]
    pub fn margin_units(&self, mode: ViewMode, span_units: f64) -> f64 {
        self.rule(mode).resolve(span_units)
    }
}

impl Default for FocusMargins {
    fn default() -> Self {
        Self {
            day: MarginRule::ViewportMultiple(1.5),
            week: MarginRule::ViewportMultiple(1.5),
            month: MarginRule::ViewportMultiple(0.75),
            // A year is already a wide unit; keep the band under one of them.
            year: MarginRule::Band(0.75),
        }
    }
}
