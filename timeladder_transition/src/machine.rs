// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use smallvec::SmallVec;
use timeladder_position::ViewMode;
use timeladder_timing::{Millis, OneShot};

use crate::error::TransitionRejected;
use crate::timings::TransitionTimings;

/// Current transition phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No transition running.
    #[default]
    Idle,
    /// Axis content fading out.
    FadeOut,
    /// View mode swapped; layout being rebuilt.
    StructureSwap,
    /// Visible event set being recomputed.
    DataProcessing,
    /// Content fading in, then settling.
    FadeIn,
}

/// Work the host must do in response to the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEffect<K> {
    /// Clear any active focus reference.
    ClearFocus,
    /// Make this the active view mode and recompute layout.
    SwapViewMode(ViewMode),
    /// Recompute the visible/filtered event set.
    RefreshEvents,
    /// Content is visible again.
    RevealContent,
    /// The transition is over; interaction resumes.
    Finished {
        /// The mode now active.
        mode: ViewMode,
        /// Selection at the time of the request, to be kept only if it is
        /// still inside the new visible window.
        retained_selection: Option<K>,
    },
}

/// Effects produced by one call.
pub type TransitionEffects<K> = SmallVec<[TransitionEffect<K>; 4]>;

/// The view-mode transition state machine.
#[derive(Clone, Debug)]
pub struct ViewTransition<K> {
    timings: TransitionTimings,
    phase: Phase,
    phase_started: Millis,
    timer: OneShot,
    from: ViewMode,
    target: ViewMode,
    retained_selection: Option<K>,
}

impl<K> Default for ViewTransition<K> {
    fn default() -> Self {
        Self::new(TransitionTimings::default())
    }
}

impl<K> ViewTransition<K> {
    /// Creates an idle state machine.
    #[must_use]
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            timings,
            phase: Phase::Idle,
            phase_started: Millis::ZERO,
            timer: OneShot::new(),
            from: ViewMode::default(),
            target: ViewMode::default(),
            retained_selection: None,
        }
    }

    /// Phase durations.
    #[must_use]
    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Returns `true` if the axis should accept pointer interaction.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Mode being switched to, while in flight.
    #[must_use]
    pub fn pending_mode(&self) -> Option<ViewMode> {
        self.is_active().then_some(self.target)
    }

    /// Next deadline the host should poll at.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    /// Opacity to multiply into axis content at `now`.
    #[must_use]
    pub fn content_opacity(&self, now: Millis) -> f64 {
        let elapsed = now.saturating_since(self.phase_started);
        match self.phase {
            Phase::Idle => 1.0,
            Phase::FadeOut => 1.0 - ratio(elapsed, self.timings.fade_out),
            Phase::StructureSwap | Phase::DataProcessing => 0.0,
            Phase::FadeIn => ratio(elapsed, self.timings.fade_in),
        }
    }

    /// Abandons any running transition without emitting effects.
    ///
    /// Returns `true` if one was running.
    pub fn reset(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        tracing::debug!(from = %self.from, to = %self.target, phase = ?self.phase, "view transition reset");
        self.timer.cancel();
        self.phase = Phase::Idle;
        self.retained_selection = None;
        true
    }

    fn enter(&mut self, phase: Phase, at: Millis, length: Duration) {
        tracing::debug!(from = ?self.phase, to = ?phase, at = at.0, "view transition phase");
        self.phase = phase;
        self.phase_started = at;
        self.timer.arm(at, length);
    }
}

impl<K: Copy> ViewTransition<K> {
    /// Starts a transition from `current` to `target`.
    ///
    /// `selection` is retained and handed back in [`TransitionEffect::Finished`].
    pub fn request(
        &mut self,
        target: ViewMode,
        current: ViewMode,
        selection: Option<K>,
        now: Millis,
    ) -> Result<TransitionEffects<K>, TransitionRejected> {
        if self.is_active() {
            tracing::debug!(requested = %target, "view transition already in flight");
            return Err(TransitionRejected::InFlight);
        }
        if target == current {
            return Err(TransitionRejected::SameMode);
        }
        self.from = current;
        self.target = target;
        self.retained_selection = selection;
        self.enter(Phase::FadeOut, now, self.timings.fade_out);

        let mut effects = TransitionEffects::new();
        effects.push(TransitionEffect::ClearFocus);
        Ok(effects)
    }

    /// Advances through every phase whose deadline is at or before `now`.
    ///
    /// Late polls catch up phase by phase, each measured from the previous
    /// deadline rather than from `now`.
    pub fn poll(&mut self, now: Millis) -> TransitionEffects<K> {
        let mut effects = TransitionEffects::new();
        while let Some(deadline) = self.timer.deadline() {
            if !self.timer.fire_if_due(now) {
                break;
            }
            match self.phase {
                Phase::Idle => break,
                Phase::FadeOut => {
                    self.enter(Phase::StructureSwap, deadline, self.timings.structure_swap);
                    effects.push(TransitionEffect::SwapViewMode(self.target));
                }
                Phase::StructureSwap => {
                    self.enter(Phase::DataProcessing, deadline, self.timings.data_processing);
                    effects.push(TransitionEffect::RefreshEvents);
                }
                Phase::DataProcessing => {
                    let length = self.timings.fade_in + self.timings.settle;
                    self.enter(Phase::FadeIn, deadline, length);
                    effects.push(TransitionEffect::RevealContent);
                }
                Phase::FadeIn => {
                    tracing::debug!(from = %self.from, to = %self.target, "view transition finished");
                    self.phase = Phase::Idle;
                    self.phase_started = deadline;
                    effects.push(TransitionEffect::Finished {
                        mode: self.target,
                        retained_selection: self.retained_selection.take(),
                    });
                }
            }
        }
        effects
    }
}

fn ratio(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use timeladder_position::ViewMode;
    use timeladder_timing::Millis;

    use super::{Phase, TransitionEffect, ViewTransition};
    use crate::TransitionRejected;

    #[test]
    fn same_mode_is_rejected() {
        let mut t = ViewTransition::<u32>::default();
        assert_eq!(
            t.request(ViewMode::Week, ViewMode::Week, None, Millis(0)),
            Err(TransitionRejected::SameMode)
        );
        assert_eq!(t.phase(), Phase::Idle);
        assert!(t.deadline().is_none());
    }

    #[test]
    fn opacity_ramps() {
        let mut t = ViewTransition::<u32>::default();
        assert_eq!(t.content_opacity(Millis(0)), 1.0);
        t.request(ViewMode::Year, ViewMode::Day, None, Millis(1_000))
            .unwrap();
        assert_eq!(t.content_opacity(Millis(1_000)), 1.0);
        assert!((t.content_opacity(Millis(1_325)) - 0.5).abs() < 1e-9);

        t.poll(Millis(1_650));
        assert_eq!(t.content_opacity(Millis(1_700)), 0.0);
        t.poll(Millis(2_050));
        assert_eq!(t.phase(), Phase::FadeIn);
        assert!((t.content_opacity(Millis(2_200)) - 0.5).abs() < 1e-9);
        // Settle keeps content fully visible but non-interactive.
        assert_eq!(t.content_opacity(Millis(2_400)), 1.0);
        assert!(!t.is_interactive());
    }

    #[test]
    fn reset_cancels_quietly() {
        let mut t = ViewTransition::<u32>::default();
        t.request(ViewMode::Month, ViewMode::Day, Some(1), Millis(0))
            .unwrap();
        assert!(t.reset());
        assert!(!t.reset());
        assert!(t.poll(Millis(10_000)).is_empty());
        assert!(t.is_interactive());
        assert_eq!(t.pending_mode(), None);
    }

    #[test]
    fn late_poll_catches_up_in_order() {
        let mut t = ViewTransition::default();
        t.request(ViewMode::Week, ViewMode::Day, Some(9_u32), Millis(0))
            .unwrap();
        let fx = t.poll(Millis(60_000));
        assert_eq!(
            fx.as_slice(),
            &[
                TransitionEffect::SwapViewMode(ViewMode::Week),
                TransitionEffect::RefreshEvents,
                TransitionEffect::RevealContent,
                TransitionEffect::Finished {
                    mode: ViewMode::Week,
                    retained_selection: Some(9),
                },
            ]
        );
        assert!(t.is_interactive());
    }
}
