// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Start/stop control of the per-frame callback.
//!
//! Whether frames are needed is a pure function of state
//! ([`needs_animation`]). [`AnimationDriver`] is the single owner of the host's
//! frame callback; it starts or stops it when that answer changes and never
//! starts a second one.

/// Inputs to [`needs_animation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationInputs {
    /// A hover enter/leave is still easing.
    pub hover_transition: bool,
    /// An event is selected, so its pulse is running.
    pub has_selection: bool,
    /// Content opacity is ramping (a view transition is fading).
    pub content_fading: bool,
    /// Vote glow cycling is enabled.
    pub glow_enabled: bool,
    /// Vote data has been loaded.
    pub votes_loaded: bool,
}

/// Returns `true` if the axis needs per-frame redraws.
#[must_use]
pub fn needs_animation(inputs: &AnimationInputs) -> bool {
    inputs.hover_transition
        || inputs.has_selection
        || inputs.content_fading
        || (inputs.glow_enabled && inputs.votes_loaded)
}

/// Host hook that runs (or stops running) a per-frame callback.
pub trait FrameScheduler {
    /// Begins requesting frames.
    fn start(&mut self);
    /// Stops requesting frames.
    fn stop(&mut self);
}

/// Owns a [`FrameScheduler`] and keeps it in step with [`needs_animation`].
#[derive(Debug)]
pub struct AnimationDriver<S> {
    scheduler: S,
    running: bool,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    /// Wraps an idle scheduler.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: false,
        }
    }

    /// Returns `true` while the scheduler is producing frames.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or stops the scheduler to match `inputs`. Returns the new running state.
    ///
    /// Safe to call after every state change; redundant calls do nothing.
    pub fn sync(&mut self, inputs: &AnimationInputs) -> bool {
        let wanted = needs_animation(inputs);
        if wanted != self.running {
            if wanted {
                self.scheduler.start();
            } else {
                self.scheduler.stop();
            }
            self.running = wanted;
            tracing::debug!(running = wanted, ?inputs, "animation loop toggled");
        }
        self.running
    }

    /// Stops the scheduler if running, e.g. on teardown.
    pub fn halt(&mut self) {
        if self.running {
            self.scheduler.stop();
            self.running = false;
        }
    }

    /// Shared access to the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// A scheduler that only records requests. Useful for headless hosts and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingScheduler {
    /// Number of `start` calls.
    pub starts: u32,
    /// Number of `stop` calls.
    pub stops: u32,
}

impl CountingScheduler {
    /// Returns `true` if more starts than stops have been seen.
    #[must_use]
    pub fn active(&self) -> bool {
        self.starts > self.stops
    }
}

impl FrameScheduler for CountingScheduler {
    fn start(&mut self) {
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}
