// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Why a transition request was ignored.
///
/// Both cases are harmless; callers may drop the error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionRejected {
    /// The requested mode is already active.
    SameMode,
    /// Another transition is still running.
    InFlight,
}

impl fmt::Display for TransitionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameMode => f.write_str("requested view mode is already active"),
            Self::InFlight => f.write_str("a view transition is already in flight"),
        }
    }
}

impl core::error::Error for TransitionRejected {}
