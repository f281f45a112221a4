// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder View: the axis viewport and pan gestures.
//!
//! [`ViewportTracker`] is a small, headless model of the horizontal axis:
//! - The measured surface size in device pixels.
//! - A pan offset expressed as the marker value at the horizontal center.
//! - A fixed pixel width per marker unit.
//!
//! From those it derives screen ↔ marker conversion and the visible integer
//! marker-index range, always an odd-sized window so the centered index is
//! exactly in the middle.
//!
//! [`PanDrag`] tracks a pointer drag along the axis, reporting per-move deltas
//! and whether the gesture stayed within click slop.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use timeladder_view::ViewportTracker;
//!
//! let mut view = ViewportTracker::new(40.0);
//! view.measure(Size::new(400.0, 120.0));
//!
//! // 400px / 40px = 10 units, widened to an odd count with edge slack.
//! let range = view.visible_index_range();
//! assert_eq!(range.clone().count() % 2, 1);
//! assert_eq!(*range.start() + *range.end(), 0);
//!
//! // Marker 0 sits at the horizontal center.
//! assert_eq!(view.marker_to_screen_x(0.0), 200.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod drag;
mod viewport;

pub use drag::{DragOutcome, PanDrag};
pub use viewport::{ViewportSnapshot, ViewportTracker};
