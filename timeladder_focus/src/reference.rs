// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::ops::Range;

use chrono::NaiveDateTime;
use timeladder_position::{ViewMode, marker_index, marker_value, tick_timestamp};

use crate::error::FocusError;
use crate::margin::FocusMargins;

/// Parameters of a focus activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusRequest<K> {
    /// Continuous marker value the user pointed at.
    pub arrow_value: f64,
    /// Instant to freeze on. When `None`, the start of the tick containing
    /// `arrow_value` is used.
    pub timestamp: Option<NaiveDateTime>,
    /// View mode the arrow value was measured in.
    pub view_mode: ViewMode,
    /// Event the activation came from, if it was a marker rather than a tick.
    pub event_id: Option<K>,
    /// Pan so the arrow value ends up horizontally centered.
    pub recenter: bool,
    /// Pixel offset of the pointer from the horizontal center at activation.
    pub pixel_offset: Option<f64>,
}

impl<K> FocusRequest<K> {
    /// Creates a request for `arrow_value` in `view_mode` with no event, timestamp, or recentering.
    #[must_use]
    pub fn new(arrow_value: f64, view_mode: ViewMode) -> Self {
        Self {
            arrow_value,
            timestamp: None,
            view_mode,
            event_id: None,
            recenter: false,
            pixel_offset: None,
        }
    }

    /// Builds a request pointing at an event's own position relative to `now`.
    ///
    /// Returns `None` if the mode is not temporal.
    #[must_use]
    pub fn at_event(
        event_id: K,
        timestamp: NaiveDateTime,
        view_mode: ViewMode,
        now: NaiveDateTime,
    ) -> Option<Self> {
        let arrow_value = marker_value(Some(timestamp), view_mode.time_scale()?, now)?;
        Some(Self {
            arrow_value,
            timestamp: Some(timestamp),
            view_mode,
            event_id: Some(event_id),
            recenter: false,
            pixel_offset: None,
        })
    }

    /// Sets the originating event.
    #[must_use]
    pub fn with_event(mut self, event_id: K) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Sets the instant to freeze on.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Requests recentering on the arrow value.
    #[must_use]
    pub fn recentered(mut self) -> Self {
        self.recenter = true;
        self
    }

    /// Records the pointer's pixel offset from center.
    #[must_use]
    pub fn with_pixel_offset(mut self, pixel_offset: f64) -> Self {
        self.pixel_offset = Some(pixel_offset);
        self
    }
}

/// Result of a successful activation.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusActivated<K> {
    /// The focus that was replaced, if one was active.
    pub replaced: Option<FocusSnapshot<K>>,
    /// New pan offset the caller should apply when recentering was requested.
    ///
    /// This is [`FocusSnapshot::anchored_value`]: the arrow position measured
    /// from the newly frozen instant.
    pub recenter_pan: Option<f64>,
}

/// Plain, observable copy of a [`FocusReference`].
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSnapshot<K> {
    /// Continuous marker value of the frozen point.
    pub arrow_value: f64,
    /// `floor(arrow_value)`.
    pub reference_value: i64,
    /// The arrow position re-measured from `reference_timestamp`.
    ///
    /// Marker values shift by `arrow_value - anchored_value` when the focus is
    /// activated; hosts pan by the same amount to keep the axis still.
    pub anchored_value: f64,
    /// Frozen instant substituted for "now".
    pub reference_timestamp: NaiveDateTime,
    /// View mode the focus belongs to.
    pub view_mode: ViewMode,
    /// Originating event, if any.
    pub event_id: Option<K>,
    /// Pointer offset from center at activation, if known.
    pub pixel_offset: Option<f64>,
}

/// Point B: an optional, user-frozen alternative to the live "now" anchor.
///
/// At most one focus is active. All fields are set together on activation and
/// cleared together on deactivation, so while active the reference value is
/// always `floor(arrow_value)`.
#[derive(Clone, Debug)]
pub struct FocusReference<K> {
    active: Option<FocusSnapshot<K>>,
    margins: FocusMargins,
    revision: u64,
}

impl<K> Default for FocusReference<K> {
    fn default() -> Self {
        Self {
            active: None,
            margins: FocusMargins::default(),
            revision: 0,
        }
    }
}

impl<K: Copy + PartialEq + Debug> FocusReference<K> {
    /// Creates an inactive focus reference with default margins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inactive focus reference with the given margins.
    #[must_use]
    pub fn with_margins(margins: FocusMargins) -> Self {
        Self {
            margins,
            ..Self::default()
        }
    }

    /// Returns the configured margins.
    #[must_use]
    pub fn margins(&self) -> &FocusMargins {
        &self.margins
    }

    /// Returns `true` while a Point B is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Monotonic counter bumped on every activation and deactivation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the active focus, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&FocusSnapshot<K>> {
        self.active.as_ref()
    }

    /// `floor(arrow_value)` of the active focus.
    #[must_use]
    pub fn reference_value(&self) -> Option<i64> {
        self.active.as_ref().map(|f| f.reference_value)
    }

    /// Event the active focus came from.
    #[must_use]
    pub fn event_id(&self) -> Option<K> {
        self.active.as_ref().and_then(|f| f.event_id)
    }

    /// Activates Point B, replacing any previous one.
    ///
    /// `now` is the current Point A; it is used to derive the frozen instant
    /// when the request carries no timestamp.
    pub fn activate(
        &mut self,
        request: FocusRequest<K>,
        now: NaiveDateTime,
    ) -> Result<FocusActivated<K>, FocusError> {
        if !request.arrow_value.is_finite() {
            return Err(FocusError::NonFiniteArrow);
        }
        let Some(scale) = request.view_mode.time_scale() else {
            return Err(FocusError::UnsupportedMode(request.view_mode));
        };
        let reference_value = marker_index(request.arrow_value);
        let reference_timestamp = match request.timestamp {
            Some(ts) => ts,
            None => tick_timestamp(reference_value, scale, now)
                .ok_or(FocusError::UnrepresentableTick)?,
        };

        let anchored_value = match request.timestamp {
            Some(ts) => marker_value(Some(ts), scale, reference_timestamp).unwrap_or(0.0),
            None => request.arrow_value - reference_value as f64,
        };
        let snapshot = FocusSnapshot {
            arrow_value: request.arrow_value,
            reference_value,
            anchored_value,
            reference_timestamp,
            view_mode: request.view_mode,
            event_id: request.event_id,
            pixel_offset: request.pixel_offset,
        };
        tracing::debug!(
            arrow = snapshot.arrow_value,
            reference = snapshot.reference_value,
            mode = %snapshot.view_mode,
            event = ?snapshot.event_id,
            "focus reference activated"
        );
        let replaced = self.active.replace(snapshot);
        self.revision = self.revision.wrapping_add(1);
        Ok(FocusActivated {
            replaced,
            recenter_pan: request.recenter.then_some(anchored_value),
        })
    }

    /// Clears Point B. Returns `false` (and changes nothing) if none was active.
    pub fn deactivate(&mut self) -> bool {
        match self.active.take() {
            Some(previous) => {
                tracing::debug!(
                    reference = previous.reference_value,
                    mode = %previous.view_mode,
                    "focus reference cleared"
                );
                self.revision = self.revision.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    /// Drops the active focus if it belongs to a different view mode.
    ///
    /// Returns `true` if a stale focus was discarded.
    pub fn discard_if_stale(&mut self, current_mode: ViewMode) -> bool {
        let stale = self
            .active
            .as_ref()
            .is_some_and(|f| f.view_mode != current_mode);
        if stale {
            tracing::warn!(mode = %current_mode, "discarding focus reference from another view mode");
            self.deactivate();
        }
        stale
    }

    /// The instant marker values are measured from in `mode`.
    ///
    /// This is the frozen Point B instant when a focus for `mode` is active,
    /// otherwise `now` (Point A). A focus for another mode is ignored.
    #[must_use]
    pub fn reference_timestamp(&self, mode: ViewMode, now: NaiveDateTime) -> NaiveDateTime {
        match &self.active {
            Some(f) if f.view_mode == mode => f.reference_timestamp,
            _ => now,
        }
    }

    /// Visibility margin in marker units; zero when no focus for `mode` is active.
    #[must_use]
    pub fn margin_units(&self, mode: ViewMode, span_units: f64) -> f64 {
        match &self.active {
            Some(f) if f.view_mode == mode => self.margins.margin_units(mode, span_units),
            _ => 0.0,
        }
    }

    /// Widens the on-screen marker range by the active margin.
    #[must_use]
    pub fn visibility_window(&self, mode: ViewMode, visible: Range<f64>) -> Range<f64> {
        let span = visible.end - visible.start;
        let margin = self.margin_units(mode, span);
        (visible.start - margin)..(visible.end + margin)
    }
}
