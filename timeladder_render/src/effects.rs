// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven effects: vote glow, selection pulse, hover easing.

use core::f64::consts::TAU;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use timeladder_timing::Millis;

/// Vote glow cycling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    /// Whether glow cycling runs at all.
    pub enabled: bool,
    /// Length of one brightness cycle.
    pub period: Duration,
    /// Cycles of phase difference between the left and right surface edges.
    pub sweep: f64,
    /// Dimmest brightness.
    pub min: f64,
    /// Brightest brightness.
    pub max: f64,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: Duration::from_millis(2_400),
            sweep: 1.0,
            min: 0.45,
            max: 1.0,
        }
    }
}

impl GlowConfig {
    /// Brightness at `time` for a marker at horizontal `phase` (`0` left edge, `1` right).
    ///
    /// All markers share one time base; the phase delays the cycle so the
    /// brightest point travels from left to right. Returns `max` when disabled.
    #[must_use]
    pub fn brightness(&self, time: Millis, phase: f64) -> f64 {
        if !self.enabled {
            return self.max;
        }
        let period = self.period.as_millis().max(1) as f64;
        let cycles = time.0 as f64 / period - phase * self.sweep;
        let wave = 0.5 + 0.5 * (TAU * cycles).sin();
        self.min + (self.max - self.min) * wave
    }
}

/// Pulsing highlight above the selected rung.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseConfig {
    /// Length of one pulse.
    pub period: Duration,
    /// Radius of the highlight at rest, in pixels.
    pub radius: f64,
    /// Extra radius at the peak of a pulse.
    pub swell: f64,
    /// Number of trail dots above the highlight.
    pub trail_len: u8,
    /// Vertical spacing between trail dots.
    pub trail_spacing: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(1_600),
            radius: 4.0,
            swell: 3.0,
            trail_len: 4,
            trail_spacing: 7.0,
        }
    }
}

/// One frame of the selection pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseFrame {
    /// Highlight radius in pixels.
    pub radius: f64,
    /// Highlight alpha in `[0, 1]`.
    pub alpha: f64,
    /// Position of the pulse within its period, in `[0, 1)`.
    pub phase: f64,
}

impl PulseConfig {
    /// Pulse state `elapsed` after the selection was made.
    #[must_use]
    pub fn frame(&self, elapsed: Duration) -> PulseFrame {
        let period = self.period.as_millis().max(1);
        let phase = (elapsed.as_millis() % period) as f64 / period as f64;
        let wave = 0.5 - 0.5 * (TAU * phase).cos();
        PulseFrame {
            radius: self.radius + self.swell * wave,
            alpha: 1.0 - 0.5 * wave,
            phase,
        }
    }

    /// Alpha of trail dot `i` (0 nearest the rung) for a pulse frame.
    ///
    /// Dots fade with distance and a brightness band runs up the trail once per
    /// period.
    #[must_use]
    pub fn trail_alpha(&self, i: u8, frame: &PulseFrame) -> f64 {
        let len = f64::from(self.trail_len.max(1));
        let pos = f64::from(i) / len;
        let fade = 1.0 - pos;
        let band = 0.5 + 0.5 * (TAU * (frame.phase - pos)).cos();
        (fade * (0.35 + 0.65 * band)).clamp(0.0, 1.0)
    }
}

/// Hover target with eased enter/leave transitions.
#[derive(Clone, Debug)]
pub struct HoverState<K> {
    current: Option<K>,
    previous: Option<K>,
    changed_at: Millis,
    duration: Duration,
}

impl<K: Copy + PartialEq> HoverState<K> {
    /// Default easing duration.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

    /// Creates an idle hover state.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            previous: None,
            changed_at: Millis::ZERO,
            duration,
        }
    }

    /// Currently hovered id.
    #[must_use]
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Sets the hovered id at `now`. Returns `true` if it changed.
    pub fn set(&mut self, target: Option<K>, now: Millis) -> bool {
        if self.current == target {
            return false;
        }
        self.previous = self.current;
        self.current = target;
        self.changed_at = now;
        true
    }

    /// Easing progress of the latest change in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Millis) -> f64 {
        let total = self.duration.as_millis();
        if total == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_since(self.changed_at).as_millis();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Returns `true` while an enter or leave is still easing.
    #[must_use]
    pub fn is_transitioning(&self, now: Millis) -> bool {
        (self.current.is_some() || self.previous.is_some()) && self.progress(now) < 1.0
    }

    /// Hover emphasis of `id` in `[0, 1]`.
    #[must_use]
    pub fn emphasis(&self, id: K, now: Millis) -> f64 {
        let eased = smoothstep(self.progress(now));
        if self.current == Some(id) {
            eased
        } else if self.previous == Some(id) {
            1.0 - eased
        } else {
            0.0
        }
    }
}

impl<K: Copy + PartialEq> Default for HoverState<K> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION)
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
