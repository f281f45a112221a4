// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use timeladder_position::ViewMode;

/// Error returned when a focus activation is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusError {
    /// The arrow value was NaN or infinite.
    NonFiniteArrow,
    /// The view mode has no timeline to freeze (e.g. [`ViewMode::Position`]).
    UnsupportedMode(ViewMode),
    /// No timestamp was given and none could be derived for the tick.
    UnrepresentableTick,
}

impl fmt::Display for FocusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteArrow => f.write_str("focus arrow value is not finite"),
            Self::UnsupportedMode(mode) => {
                write!(f, "view mode `{mode}` does not support a focus reference")
            }
            Self::UnrepresentableTick => {
                f.write_str("focus tick lies outside the representable calendar range")
            }
        }
    }
}

impl core::error::Error for FocusError {}
