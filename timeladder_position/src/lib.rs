// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder Position: the date → marker coordinate transform.
//!
//! A temporal axis is laid out in *marker units*: one unit per tick of the
//! active [`ViewMode`] (an hour in day view, a day in week view, a month in
//! month view, a year in year view). This crate turns an event timestamp into a
//! continuous marker value relative to a reference timestamp, which is `0`.
//!
//! - [`marker_value`] is pure: same inputs, same output, no hidden state, and
//!   monotonic in the event time for a fixed scale/reference pair.
//! - A missing timestamp is "not positionable" and yields `None`; callers drop
//!   the event from layout instead of failing.
//! - [`ViewMode::Position`] ignores time entirely; use [`ordinal_value`].
//! - [`tick_timestamp`] maps an integer marker index back to the instant at
//!   which that tick starts (axis labels, activating focus on a tick).
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeladder_position::{TimeScale, marker_value};
//!
//! let reference = NaiveDate::from_ymd_opt(2024, 1, 10)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! let event = NaiveDate::from_ymd_opt(2024, 1, 10)
//!     .unwrap()
//!     .and_hms_opt(15, 0, 0)
//!     .unwrap();
//!
//! assert_eq!(marker_value(Some(event), TimeScale::Day, reference), Some(3.0));
//! assert_eq!(marker_value(None, TimeScale::Day, reference), None);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod mapper;
mod mode;

pub use mapper::{
    days_in_month, marker_index, marker_value, minute_of_day, ordinal_value, tick_timestamp,
};
pub use mode::{TimeScale, ViewMode};
