// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Calendar granularity of a temporal view.
///
/// One marker unit equals one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeScale {
    /// One unit per hour.
    Day,
    /// One unit per day.
    Week,
    /// One unit per month.
    Month,
    /// One unit per year.
    Year,
}

/// Active zoom granularity of the axis.
///
/// Temporal modes wrap a [`TimeScale`]; [`ViewMode::Position`] lays events out
/// by their ordinal index around a centered item and ignores timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewMode {
    /// Hours around the reference.
    #[default]
    Day,
    /// Days around the reference.
    Week,
    /// Months around the reference.
    Month,
    /// Years around the reference.
    Year,
    /// Plain index order.
    Position,
}

impl ViewMode {
    /// All modes, finest first.
    pub const ALL: [Self; 5] = [
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
        Self::Position,
    ];

    /// Returns the calendar scale of a temporal mode, or `None` for [`ViewMode::Position`].
    #[must_use]
    pub const fn time_scale(self) -> Option<TimeScale> {
        match self {
            Self::Day => Some(TimeScale::Day),
            Self::Week => Some(TimeScale::Week),
            Self::Month => Some(TimeScale::Month),
            Self::Year => Some(TimeScale::Year),
            Self::Position => None,
        }
    }

    /// Returns `true` for the calendar-backed modes.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        self.time_scale().is_some()
    }

    /// Returns `true` for the coarse modes (month and year).
    ///
    /// Coarse modes pack more events per marker unit and get wider declutter
    /// windows.
    #[must_use]
    pub const fn is_coarse(self) -> bool {
        matches!(self, Self::Month | Self::Year)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Position => "position",
        }
    }
}

impl From<TimeScale> for ViewMode {
    fn from(scale: TimeScale) -> Self {
        match scale {
            TimeScale::Day => Self::Day,
            TimeScale::Week => Self::Week,
            TimeScale::Month => Self::Month,
            TimeScale::Year => Self::Year,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
