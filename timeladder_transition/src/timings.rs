// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// Wall-clock length of each transition phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Axis content fades out.
    pub fade_out: Duration,
    /// The view mode is swapped and layout recomputed.
    pub structure_swap: Duration,
    /// The visible event set is recomputed.
    pub data_processing: Duration,
    /// Content fades back in.
    pub fade_in: Duration,
    /// Extra time after the fade before the axis is interactive again.
    pub settle: Duration,
}

impl TransitionTimings {
    /// Sum of all phases.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.fade_out + self.structure_swap + self.data_processing + self.fade_in + self.settle
    }
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            fade_out: Duration::from_millis(650),
            structure_swap: Duration::from_millis(200),
            data_processing: Duration::from_millis(200),
            fade_in: Duration::from_millis(300),
            settle: Duration::from_millis(300),
        }
    }
}
