// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::{Range, RangeInclusive};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};
use timeladder_position::marker_index;

/// Horizontal viewport over a marker axis.
///
/// `ViewportTracker` tracks the measured surface size in device pixels and a
/// pan offset in marker units. The pan offset is the marker value drawn at the
/// horizontal center of the surface.
#[derive(Clone, Debug)]
pub struct ViewportTracker {
    size: Size,
    unit_width: f64,
    pan: f64,
    pan_limits: Option<Range<f64>>,
}

impl ViewportTracker {
    /// Creates an unmeasured viewport with the given pixel width per marker unit.
    ///
    /// Non-positive or non-finite widths fall back to one pixel per unit.
    #[must_use]
    pub fn new(unit_width: f64) -> Self {
        Self {
            size: Size::ZERO,
            unit_width: sanitize_unit_width(unit_width),
            pan: 0.0,
            pan_limits: None,
        }
    }

    /// Records the measured surface size, returning `true` if it changed.
    ///
    /// Negative or non-finite extents are treated as zero.
    pub fn measure(&mut self, size: Size) -> bool {
        let size = Size::new(sanitize_extent(size.width), sanitize_extent(size.height));
        if size == self.size {
            return false;
        }
        self.size = size;
        true
    }

    /// Returns the last measured surface size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns `true` once the surface has a non-zero area.
    ///
    /// Nothing should be drawn or hit-tested against an unmeasured surface.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.size.width > 0.0 && self.size.height > 0.0
    }

    /// Returns the pixel width of one marker unit.
    #[must_use]
    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    /// Sets the pixel width of one marker unit.
    pub fn set_unit_width(&mut self, unit_width: f64) {
        self.unit_width = sanitize_unit_width(unit_width);
    }

    /// Returns the pan offset (the marker value at the horizontal center).
    #[must_use]
    pub fn pan(&self) -> f64 {
        self.pan
    }

    /// Sets the pan offset, applying pan limits if configured.
    pub fn set_pan(&mut self, pan: f64) {
        if !pan.is_finite() {
            return;
        }
        self.pan = pan;
        self.clamp_to_limits();
    }

    /// Pans by a pointer delta in device pixels.
    ///
    /// Dragging content to the right reveals earlier markers, so a positive
    /// delta decreases the pan offset.
    pub fn pan_by_pixels(&mut self, delta_x: f64) {
        if delta_x == 0.0 || !delta_x.is_finite() {
            return;
        }
        self.pan -= delta_x / self.unit_width;
        self.clamp_to_limits();
    }

    /// Places `marker` at `pixel_offset` pixels right of the horizontal center.
    ///
    /// An offset of `0.0` centers the marker.
    pub fn align_marker(&mut self, marker: f64, pixel_offset: f64) {
        let offset = if pixel_offset.is_finite() {
            pixel_offset
        } else {
            0.0
        };
        self.set_pan(marker - offset / self.unit_width);
    }

    /// Restricts the pan offset to `limits`; `None` removes the restriction.
    pub fn set_pan_limits(&mut self, limits: Option<Range<f64>>) {
        if pan_limits_eq(&self.pan_limits, &limits) {
            return;
        }
        self.pan_limits = limits;
        self.clamp_to_limits();
    }

    /// Returns the current pan limits.
    #[must_use]
    pub fn pan_limits(&self) -> Option<Range<f64>> {
        self.pan_limits.clone()
    }

    /// Number of marker units spanned by the surface width.
    #[must_use]
    pub fn span_units(&self) -> f64 {
        self.size.width / self.unit_width
    }

    /// Continuous marker range currently on screen.
    #[must_use]
    pub fn visible_marker_range(&self) -> Range<f64> {
        let half = self.span_units() * 0.5;
        (self.pan - half)..(self.pan + half)
    }

    /// Integer marker indices on screen, as an odd-sized window centered on the
    /// index nearest the pan offset.
    ///
    /// An unmeasured surface yields just the centered index.
    #[must_use]
    pub fn visible_index_range(&self) -> RangeInclusive<i64> {
        let center = self.center_index();
        let half = self.half_window();
        center.saturating_sub(half)..=center.saturating_add(half)
    }

    /// Index nearest the pan offset.
    #[must_use]
    pub fn center_index(&self) -> i64 {
        marker_index(self.pan + 0.5)
    }

    /// Converts a marker value into a device-space X coordinate.
    #[must_use]
    pub fn marker_to_screen_x(&self, marker: f64) -> f64 {
        self.size.width * 0.5 + (marker - self.pan) * self.unit_width
    }

    /// Converts a device-space X coordinate into a marker value.
    #[must_use]
    pub fn screen_x_to_marker(&self, x: f64) -> f64 {
        self.pan + (x - self.size.width * 0.5) / self.unit_width
    }

    /// Convenience conversion from a `Point`, using its X coordinate.
    #[must_use]
    pub fn point_to_marker(&self, pt: Point) -> f64 {
        self.screen_x_to_marker(pt.x)
    }

    /// Pixel offset of `x` from the horizontal center.
    #[must_use]
    pub fn offset_from_center(&self, x: f64) -> f64 {
        x - self.size.width * 0.5
    }

    /// Normalized horizontal phase of `x` in `[0, 1]`, or `0` when unmeasured.
    ///
    /// Used to offset time-based effects by screen position.
    #[must_use]
    pub fn phase_of(&self, x: f64) -> f64 {
        if self.size.width <= 0.0 {
            return 0.0;
        }
        (x / self.size.width).clamp(0.0, 1.0)
    }

    /// Snapshot of the current viewport state for hosts and debugging.
    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            size: self.size,
            unit_width: self.unit_width,
            pan: self.pan,
            pan_limits: self.pan_limits.clone(),
            visible_index_range: self.visible_index_range(),
        }
    }

    fn half_window(&self) -> i64 {
        if !self.is_measured() {
            return 0;
        }
        // Half a unit of slack so partially visible edge ticks stay inside.
        let half = (self.span_units() * 0.5 + 0.5).ceil();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Surface widths are bounded; the window is a small positive count"
        )]
        {
            half.max(0.0) as i64
        }
    }

    fn clamp_to_limits(&mut self) {
        let Some(limits) = &self.pan_limits else {
            return;
        };
        if limits.end < limits.start {
            return;
        }
        self.pan = self.pan.clamp(limits.start, limits.end);
    }
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(48.0)
    }
}

/// Snapshot of a [`ViewportTracker`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportSnapshot {
    /// Measured surface size in device pixels.
    pub size: Size,
    /// Pixel width of one marker unit.
    pub unit_width: f64,
    /// Marker value at the horizontal center.
    pub pan: f64,
    /// Optional pan restriction.
    pub pan_limits: Option<Range<f64>>,
    /// Visible odd-sized index window.
    pub visible_index_range: RangeInclusive<i64>,
}

fn sanitize_unit_width(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 1.0 }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn pan_limits_eq(a: &Option<Range<f64>>, b: &Option<Range<f64>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.start == b.start && a.end == b.end,
        _ => false,
    }
}
