// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker value computation and its integer-tick inverse.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::mode::TimeScale;

/// Computes the continuous marker value of `timestamp` relative to `reference`.
///
/// Per scale:
/// - **Day**: `dayOffset * 24 + (eventHour - referenceHour) + eventMinute / 60`.
/// - **Week**: whole-day offset plus the event's minute-of-day fraction. With a
///   zero day offset only the fraction remains.
/// - **Month**: month offset plus `(eventDay - 1) / daysInEventMonth`.
/// - **Year**: year offset plus `(eventMonth - referenceMonth) / 12` plus the
///   day-of-month fraction scaled by `1 / 12`.
///
/// Seconds and the reference's own minutes are ignored. Returns `None` when the
/// timestamp is missing.
#[must_use]
pub fn marker_value(
    timestamp: Option<NaiveDateTime>,
    scale: TimeScale,
    reference: NaiveDateTime,
) -> Option<f64> {
    let event = timestamp?;
    let value = match scale {
        TimeScale::Day => {
            let days = day_offset(event, reference) as f64;
            let hours = f64::from(event.hour()) - f64::from(reference.hour());
            days * 24.0 + hours + f64::from(event.minute()) / 60.0
        }
        TimeScale::Week => {
            let days = day_offset(event, reference);
            let fraction = minute_of_day(event) / 1440.0;
            if days == 0 {
                fraction
            } else {
                days as f64 + fraction
            }
        }
        TimeScale::Month => {
            let months = month_offset(event, reference) as f64;
            months + day_fraction(event.date())
        }
        TimeScale::Year => {
            let years = f64::from(event.year()) - f64::from(reference.year());
            let months = f64::from(event.month()) - f64::from(reference.month());
            years + months / 12.0 + day_fraction(event.date()) / 12.0
        }
    };
    value.is_finite().then_some(value)
}

/// Marker value of the item at `index` when `centered` sits at marker `0`.
#[must_use]
pub fn ordinal_value(index: usize, centered: usize) -> f64 {
    index as f64 - centered as f64
}

/// Returns the integer marker index containing `value` (`floor(value)`).
///
/// Non-finite values map to `0`.
#[must_use]
pub fn marker_index(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Saturating float-to-int cast; marker indices never approach i64 limits"
    )]
    {
        value.floor() as i64
    }
}

/// Returns the instant at which tick `index` starts, relative to `reference`.
///
/// This is the integer inverse of [`marker_value`]: for every representable
/// tick, `marker_value(tick_timestamp(i, ..), ..) == i`.
///
/// - **Day**: the top of the hour `index` hours from the reference hour.
/// - **Week**: midnight `index` days from the reference date.
/// - **Month**: the first of the month `index` months from the reference month.
/// - **Year**: the first day of the reference month, `index` years away.
///
/// Returns `None` if the result would fall outside chrono's supported range.
#[must_use]
pub fn tick_timestamp(index: i64, scale: TimeScale, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    match scale {
        TimeScale::Day => {
            let hour_start = reference.date().and_hms_opt(reference.hour(), 0, 0)?;
            hour_start.checked_add_signed(TimeDelta::try_hours(index)?)
        }
        TimeScale::Week => {
            let midnight = reference.date().and_hms_opt(0, 0, 0)?;
            midnight.checked_add_signed(TimeDelta::try_days(index)?)
        }
        TimeScale::Month => {
            let first = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?;
            let shifted = shift_months(first, index)?;
            shifted.and_hms_opt(0, 0, 0)
        }
        TimeScale::Year => {
            let year = i32::try_from(i64::from(reference.year()).checked_add(index)?).ok()?;
            NaiveDate::from_ymd_opt(year, reference.month(), 1)?.and_hms_opt(0, 0, 0)
        }
    }
}

/// Number of days in the given month, `31` for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Minutes since midnight, ignoring seconds.
#[must_use]
pub fn minute_of_day(timestamp: NaiveDateTime) -> f64 {
    f64::from(timestamp.hour() * 60 + timestamp.minute())
}

fn day_offset(event: NaiveDateTime, reference: NaiveDateTime) -> i64 {
    event
        .date()
        .signed_duration_since(reference.date())
        .num_days()
}

fn month_offset(event: NaiveDateTime, reference: NaiveDateTime) -> i64 {
    let years = i64::from(event.year()) - i64::from(reference.year());
    let months = i64::from(event.month()) - i64::from(reference.month());
    years * 12 + months
}

fn day_fraction(date: NaiveDate) -> f64 {
    let days = days_in_month(date.year(), date.month());
    f64::from(date.day() - 1) / f64::from(days)
}

fn shift_months(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let magnitude = u32::try_from(delta.unsigned_abs()).ok()?;
    if delta >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
}
