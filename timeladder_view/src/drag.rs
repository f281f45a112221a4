// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan drag helper: horizontal move deltas plus click-vs-drag classification.
//!
//! ## Usage
//!
//! 1) Call [`PanDrag::start`] on pointer down.
//! 2) On each move, call [`PanDrag::update`] and feed the returned X delta into
//!    [`ViewportTracker::pan_by_pixels`](crate::ViewportTracker::pan_by_pixels).
//! 3) On pointer up, [`PanDrag::end`] reports whether the gesture was a click
//!    (never left the slop radius) or a drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use timeladder_view::{DragOutcome, PanDrag};
//!
//! let mut drag = PanDrag::new(3.0);
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(40.0, 22.0)), Some(30.0));
//! assert_eq!(drag.end(), Some(DragOutcome::Drag { total_dx: 30.0 }));
//! ```

use kurbo::{Point, Vec2};

/// How a finished pointer gesture should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// The pointer never moved further than the slop radius from where it went down.
    Click {
        /// Where the pointer went down.
        at: Point,
    },
    /// The pointer moved beyond the slop radius; the gesture panned the axis.
    Drag {
        /// Total horizontal travel in device pixels.
        total_dx: f64,
    },
}

/// Tracks a horizontal pan drag.
#[derive(Clone, Copy, Debug)]
pub struct PanDrag {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    slop: f64,
    exceeded_slop: bool,
}

impl PanDrag {
    /// Creates an idle drag tracker with the given click slop radius in pixels.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self {
            start_pos: None,
            last_pos: None,
            slop: if slop.is_finite() { slop.max(0.0) } else { 0.0 },
            exceeded_slop: false,
        }
    }

    /// Starts tracking a new gesture, discarding any previous one.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.exceeded_slop = false;
    }

    /// Records a pointer move, returning the horizontal delta since the last move.
    ///
    /// Returns `None` when no gesture is active. Moves inside the slop radius
    /// report a zero delta so a slightly shaky click does not pan.
    pub fn update(&mut self, pos: Point) -> Option<f64> {
        let start = self.start_pos?;
        let last = self.last_pos.replace(pos).unwrap_or(pos);
        if !self.exceeded_slop {
            if (pos - start).hypot() <= self.slop {
                return Some(0.0);
            }
            self.exceeded_slop = true;
            // Release the travel accumulated inside the slop radius at once.
            return Some(pos.x - start.x);
        }
        Some(pos.x - last.x)
    }

    /// Total offset from where the gesture started.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Returns `true` once the gesture has left the slop radius.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.start_pos.is_some() && self.exceeded_slop
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Ends the gesture and classifies it. Returns `None` if none was active.
    pub fn end(&mut self) -> Option<DragOutcome> {
        let start = self.start_pos.take()?;
        let last = self.last_pos.take().unwrap_or(start);
        let outcome = if self.exceeded_slop {
            DragOutcome::Drag {
                total_dx: last.x - start.x,
            }
        } else {
            DragOutcome::Click { at: start }
        };
        self.exceeded_slop = false;
        Some(outcome)
    }

    /// Abandons the gesture without classifying it.
    pub fn cancel(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.exceeded_slop = false;
    }
}

impl Default for PanDrag {
    fn default() -> Self {
        Self::new(3.0)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{DragOutcome, PanDrag};

    #[test]
    fn idle_drag_reports_nothing() {
        let mut drag = PanDrag::default();
        assert!(!drag.is_active());
        assert_eq!(drag.update(Point::new(5.0, 5.0)), None);
        assert_eq!(drag.total_offset(Point::new(5.0, 5.0)), None);
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn moves_inside_slop_do_not_pan() {
        let mut drag = PanDrag::new(4.0);
        drag.start(Point::new(100.0, 50.0));
        assert_eq!(drag.update(Point::new(102.0, 51.0)), Some(0.0));
        assert_eq!(drag.update(Point::new(97.0, 50.0)), Some(0.0));
        assert!(!drag.is_panning());
        assert_eq!(
            drag.end(),
            Some(DragOutcome::Click {
                at: Point::new(100.0, 50.0)
            })
        );
    }

    #[test]
    fn leaving_slop_releases_accumulated_travel() {
        let mut drag = PanDrag::new(4.0);
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(3.0, 0.0)), Some(0.0));
        assert_eq!(drag.update(Point::new(10.0, 0.0)), Some(10.0));
        assert_eq!(drag.update(Point::new(15.0, 3.0)), Some(5.0));
        assert_eq!(drag.update(Point::new(12.0, 3.0)), Some(-3.0));
        assert!(drag.is_panning());
        assert_eq!(
            drag.total_offset(Point::new(12.0, 3.0)),
            Some(Vec2::new(12.0, 3.0))
        );
        assert_eq!(drag.end(), Some(DragOutcome::Drag { total_dx: 12.0 }));
        assert!(!drag.is_active());
    }

    #[test]
    fn vertical_travel_counts_toward_slop_but_not_pan() {
        let mut drag = PanDrag::new(2.0);
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(0.0, 10.0)), Some(0.0));
        assert!(drag.is_panning());
        assert_eq!(drag.end(), Some(DragOutcome::Drag { total_dx: 0.0 }));
    }

    #[test]
    fn start_overwrites_previous_gesture() {
        let mut drag = PanDrag::new(1.0);
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(50.0, 0.0));

        drag.start(Point::new(200.0, 0.0));
        assert!(!drag.is_panning());
        assert_eq!(drag.update(Point::new(205.0, 0.0)), Some(5.0));
    }

    #[test]
    fn cancel_resets() {
        let mut drag = PanDrag::default();
        drag.start(Point::new(1.0, 1.0));
        drag.cancel();
        assert!(!drag.is_active());
        assert_eq!(drag.end(), None);
    }
}
