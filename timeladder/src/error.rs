// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use timeladder_focus::FocusError;
use timeladder_position::ViewMode;
use timeladder_transition::TransitionRejected;

use crate::event::EventId;

/// Why an [`Intent`](crate::Intent) was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentError {
    /// A view transition is running; the axis is not interactive.
    Busy,
    /// The event is not in the current event list.
    UnknownEvent(EventId),
    /// A focus request was made for a mode other than the active one.
    ModeMismatch {
        /// The active mode.
        active: ViewMode,
        /// The mode named by the request.
        requested: ViewMode,
    },
    /// The focus reference rejected the activation.
    Focus(FocusError),
    /// The transition was not started.
    Transition(TransitionRejected),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("axis is busy with a view transition"),
            Self::UnknownEvent(id) => write!(f, "event {id} is not in the current event list"),
            Self::ModeMismatch { active, requested } => {
                write!(f, "focus requested for `{requested}` while `{active}` is active")
            }
            Self::Focus(_) => f.write_str("focus activation rejected"),
            Self::Transition(_) => f.write_str("view transition not started"),
        }
    }
}

impl core::error::Error for IntentError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Focus(e) => Some(e),
            Self::Transition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FocusError> for IntentError {
    fn from(e: FocusError) -> Self {
        Self::Focus(e)
    }
}

impl From<TransitionRejected> for IntentError {
    fn from(e: TransitionRejected) -> Self {
        Self::Transition(e)
    }
}
