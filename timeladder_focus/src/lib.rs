// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder Focus: which instant the axis is anchored to.
//!
//! Every marker value is relative to a reference timestamp. Normally that is
//! **Point A**, the live "now", which keeps advancing ([`LiveAnchor`]). When a
//! user clicks a marker or tick, the axis can instead freeze on **Point B**, a
//! [`FocusReference`] holding that instant, so the layout stops drifting under
//! the user while they explore around it.
//!
//! - [`FocusReference::activate`] replaces any earlier Point B; there is only
//!   ever one.
//! - [`FocusReference::deactivate`] returns to Point A and is a no-op when
//!   nothing is active.
//! - A Point B recorded for one [`ViewMode`](timeladder_position::ViewMode) is
//!   stale in any other; [`FocusReference::discard_if_stale`] drops it.
//! - While active, the visibility window is widened by a per-mode margin
//!   ([`FocusMargins`]) so panning near the frozen point stays smooth without
//!   loading unbounded history.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeladder_focus::{FocusReference, FocusRequest};
//! use timeladder_position::ViewMode;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 10)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//!
//! let mut focus = FocusReference::<u32>::new();
//! focus
//!     .activate(FocusRequest::new(2.7, ViewMode::Day).with_event(7), now)
//!     .unwrap();
//! assert_eq!(focus.reference_value(), Some(2));
//!
//! // The frozen timestamp is the start of tick 2: 14:00.
//! let frozen = focus.reference_timestamp(ViewMode::Day, now);
//! assert_eq!(frozen, now + chrono::TimeDelta::hours(2));
//!
//! focus.deactivate();
//! assert_eq!(focus.reference_timestamp(ViewMode::Day, now), now);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod anchor;
mod error;
mod margin;
mod reference;

pub use anchor::LiveAnchor;
pub use error::FocusError;
pub use margin::{FocusMargins, MarginRule};
pub use reference::{FocusActivated, FocusReference, FocusRequest, FocusSnapshot};
