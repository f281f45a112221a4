// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use kurbo::{Point, Size};
use timeladder_declutter::{DeclutterInput, declutter};
use timeladder_focus::{FocusReference, FocusRequest, FocusSnapshot, LiveAnchor};
use timeladder_position::{ViewMode, marker_value, ordinal_value};
use timeladder_render::{
    AnimationDriver, AnimationInputs, CountingScheduler, FrameInput, FrameScheduler, HitTarget,
    HoverState, RenderMarker, Scene, VoteDot, VoteDotTable, VoteTally, draw_frame,
};
use timeladder_timing::{Debounce, Millis};
use timeladder_transition::{Phase, TransitionEffect, ViewTransition};
use timeladder_view::{DragOutcome, PanDrag, ViewportTracker};

use crate::config::TimelineConfig;
use crate::error::IntentError;
use crate::event::{Event, EventId};
use crate::votes::{VoteBatchTicket, VoteBatcher, VoteFetchError};

/// Where one event lands on the axis in the current state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPosition {
    /// Event id.
    pub id: EventId,
    /// Index in the event list.
    pub index: usize,
    /// Continuous marker value.
    pub marker_value: f64,
    /// Device-space X of the marker value.
    pub screen_x: f64,
    /// Inside the (possibly focus-widened) visibility window.
    pub visible: bool,
}

/// Discrete requests from the surrounding UI.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Freeze the axis on Point B.
    ActivateFocus(FocusRequest<EventId>),
    /// Return to Point A, keeping the view where it is.
    ClearFocus,
    /// Start a transition to another view mode.
    ChangeViewMode(ViewMode),
    /// Select an event, or clear the selection.
    SelectEvent(Option<EventId>),
    /// Pan by a pixel delta (positive reveals earlier markers).
    PanBy(f64),
    /// Center on the focus, else the selection, else the present.
    Recenter,
    /// Clear the focus and center on the present.
    ReturnToPresent,
    /// The host's filter changed; this is the new event list.
    FilterChanged(Vec<Event>),
}

/// Native pointer details passed through to activation handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInfo {
    /// Position in device pixels.
    pub position: Point,
    /// Host time of the pointer event.
    pub time: Millis,
}

/// Payload for a click on a marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Activation {
    /// Clicked event.
    pub event: EventId,
    /// Its index in the event list.
    pub index: usize,
    /// The pointer event.
    pub pointer: PointerInfo,
    /// Continuous marker value of the event before the click.
    pub marker_value: f64,
    /// Pointer offset from the horizontal center, in pixels.
    pub pixel_offset: f64,
}

/// Result of a completed click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    /// A marker was clicked; it is now selected and, in temporal modes, the focus.
    Activated(Activation),
    /// Empty axis was clicked; focus and selection were cleared.
    Background {
        /// Marker value under the pointer.
        marker_value: f64,
    },
}

/// What a pointer move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMove {
    /// Ignored: transition running or surface unmeasured.
    Ignored,
    /// A drag panned the axis (or is still inside the click slop).
    Dragging,
    /// Hover moved to this event, or off all events.
    Hover(Option<EventId>),
}

/// Result of [`Timeline::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// The axis became settled during this tick.
    pub settled: bool,
    /// Point A moved.
    pub now_refreshed: bool,
    /// A view transition finished during this tick.
    pub transition_finished: bool,
    /// Vote tallies the host should fetch and hand to [`Timeline::complete_votes`].
    pub vote_request: Option<VoteBatchTicket>,
}

/// Plain observable state.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSnapshot {
    /// Active view mode.
    pub view_mode: ViewMode,
    /// Target mode while a transition runs.
    pub pending_view_mode: Option<ViewMode>,
    /// Transition phase.
    pub phase: Phase,
    /// Pan offset in marker units.
    pub pan: f64,
    /// Selected event.
    pub selection: Option<EventId>,
    /// Point B, if active.
    pub focus: Option<FocusSnapshot<EventId>>,
    /// Point A.
    pub now: NaiveDateTime,
    /// Instant marker values are currently measured from.
    pub reference: NaiveDateTime,
    /// No pan activity within the settle delay.
    pub settled: bool,
    /// A vote batch is outstanding.
    pub votes_pending: bool,
    /// The frame callback is running.
    pub animating: bool,
    /// Number of events inside the visibility window.
    pub visible_count: usize,
}

#[derive(Clone, Copy, Debug)]
struct Selection {
    id: EventId,
    since: Millis,
}

/// The temporal axis engine.
///
/// Owns every piece of axis state and wires the layers together: events are
/// positioned against Point A or Point B, filtered by the viewport, spread by
/// the declutter pass and drawn into a [`Scene`]. All time comes from the host
/// through `now: Millis` arguments; nothing here blocks or spawns.
#[derive(Debug)]
pub struct Timeline<S: FrameScheduler = CountingScheduler> {
    config: TimelineConfig,
    events: Vec<Event>,
    index_of: HashMap<EventId, usize>,
    mode: ViewMode,
    position_center: usize,
    viewport: ViewportTracker,
    drag: PanDrag,
    settle: Debounce,
    settled: bool,
    anchor: LiveAnchor,
    focus: FocusReference<EventId>,
    transition: ViewTransition<EventId>,
    selection: Option<Selection>,
    hover: HoverState<EventId>,
    votes: VoteBatcher,
    votes_stale: bool,
    dots: VoteDotTable<EventId>,
    animation: AnimationDriver<S>,
    scene: Scene<EventId>,
    layout: Vec<MarkerPosition>,
    layout_dirty: bool,
}

impl<S: FrameScheduler> Timeline<S> {
    /// Creates an empty axis in day view, centered on `now`.
    pub fn new(config: TimelineConfig, now: NaiveDateTime, at: Millis, scheduler: S) -> Self {
        Self {
            viewport: ViewportTracker::new(config.unit_width),
            drag: PanDrag::new(config.drag_slop),
            settle: Debounce::new(config.settle_delay),
            anchor: LiveAnchor::new(now, at, config.now_refresh),
            focus: FocusReference::with_margins(config.focus_margins),
            transition: ViewTransition::new(config.transition),
            hover: HoverState::new(config.hover_duration),
            config,
            events: Vec::new(),
            index_of: HashMap::new(),
            mode: ViewMode::default(),
            position_center: 0,
            settled: true,
            selection: None,
            votes: VoteBatcher::default(),
            votes_stale: false,
            dots: VoteDotTable::default(),
            animation: AnimationDriver::new(scheduler),
            scene: Scene::new(),
            layout: Vec::new(),
            layout_dirty: true,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Active view mode.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    /// The event list.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Viewport state.
    #[must_use]
    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    /// Point B, if active.
    #[must_use]
    pub fn focus(&self) -> Option<&FocusSnapshot<EventId>> {
        self.focus.snapshot()
    }

    /// Selected event.
    #[must_use]
    pub fn selection(&self) -> Option<EventId> {
        self.selection.map(|s| s.id)
    }

    /// Returns `true` unless a view transition is running.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.transition.is_interactive()
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        self.animation.scheduler()
    }

    /// Instant marker values are measured from right now: Point B if active, else Point A.
    #[must_use]
    pub fn reference_timestamp(&self) -> NaiveDateTime {
        self.focus.reference_timestamp(self.mode, self.anchor.now())
    }

    /// Marker value under a device-space X.
    #[must_use]
    pub fn marker_at(&self, x: f64) -> f64 {
        self.viewport.screen_x_to_marker(x)
    }

    /// Replaces the event list.
    ///
    /// The selection survives if its event is still present. Fetched vote
    /// tallies are dropped and re-requested once settled; tallies carried by
    /// the events show as dots right away.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.index_of = events
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();
        self.events = events;
        if self
            .selection
            .is_some_and(|s| !self.index_of.contains_key(&s.id))
        {
            self.selection = None;
        }
        self.votes.clear();
        self.votes.seed(
            self.events
                .iter()
                .filter_map(|e| e.votes.map(|tally| (e.id, tally))),
        );
        self.rebuild_dots();
        self.position_center = self.centered_index();
        self.update_pan_limits();
        self.votes_stale = true;
        self.layout_dirty = true;
        tracing::debug!(count = self.events.len(), "event list replaced");
    }

    /// Records the measured surface size.
    pub fn resize(&mut self, size: Size) {
        if self.viewport.measure(size) {
            self.layout_dirty = true;
            self.votes_stale = true;
        }
    }

    /// Applies a UI intent.
    pub fn apply(&mut self, intent: Intent, now: Millis) -> Result<(), IntentError> {
        if let Intent::ChangeViewMode(target) = intent {
            let selection = self.selection();
            let effects = self.transition.request(target, self.mode, selection, now)?;
            self.drag.cancel();
            self.hover.set(None, now);
            for fx in effects {
                self.handle_effect(fx, now);
            }
            self.sync_animation(now);
            return Ok(());
        }
        if !self.transition.is_interactive() {
            return Err(IntentError::Busy);
        }
        match intent {
            Intent::ActivateFocus(request) => self.activate_focus(request, now)?,
            Intent::ClearFocus => {
                self.clear_focus(true, now);
            }
            Intent::SelectEvent(Some(id)) => {
                if !self.index_of.contains_key(&id) {
                    return Err(IntentError::UnknownEvent(id));
                }
                self.select(Some(id), now);
            }
            Intent::SelectEvent(None) => self.select(None, now),
            Intent::PanBy(dx) => {
                self.viewport.pan_by_pixels(dx);
                self.panned(now);
            }
            Intent::Recenter => {
                let focused = self.focus.snapshot().map(|f| f.anchored_value);
                let target = match focused {
                    Some(value) => value,
                    None => self.selected_position().map_or(0.0, |p| p.marker_value),
                };
                self.viewport.set_pan(target);
                self.panned(now);
            }
            Intent::ReturnToPresent => {
                self.clear_focus(false, now);
                self.viewport.set_pan(0.0);
                self.panned(now);
            }
            Intent::FilterChanged(events) => {
                self.clear_focus(true, now);
                self.set_events(events);
            }
            Intent::ChangeViewMode(_) => {}
        }
        self.sync_animation(now);
        Ok(())
    }

    /// Pointer pressed on the axis. Returns `false` if ignored.
    pub fn pointer_down(&mut self, pt: Point, _now: Millis) -> bool {
        if !self.transition.is_interactive() || !self.viewport.is_measured() {
            return false;
        }
        self.drag.start(pt);
        true
    }

    /// Pointer moved.
    ///
    /// While a drag is active the pan offset follows every move immediately;
    /// the settle timer only defers the expensive follow-up work.
    pub fn pointer_move(&mut self, pt: Point, now: Millis) -> PointerMove {
        if !self.transition.is_interactive() || !self.viewport.is_measured() {
            return PointerMove::Ignored;
        }
        if self.drag.is_active() {
            if let Some(dx) = self.drag.update(pt).filter(|dx| *dx != 0.0) {
                self.viewport.pan_by_pixels(dx);
                self.panned(now);
            }
            return PointerMove::Dragging;
        }
        let target = self.scene.hit_test(pt, &self.config.render.hit).id();
        if self.hover.set(target, now) {
            self.sync_animation(now);
        }
        PointerMove::Hover(target)
    }

    /// Pointer released. Returns the interaction if the gesture was a click.
    pub fn pointer_up(&mut self, _pt: Point, now: Millis) -> Option<Interaction> {
        match self.drag.end()? {
            DragOutcome::Drag { .. } => None,
            DragOutcome::Click { at } => {
                if !self.transition.is_interactive() {
                    return None;
                }
                let interaction = self.click(at, now);
                self.sync_animation(now);
                Some(interaction)
            }
        }
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self, now: Millis) {
        self.drag.cancel();
        if self.hover.set(None, now) {
            self.sync_animation(now);
        }
    }

    /// Advances timers. Call on every frame and whenever [`Timeline::next_deadline`] passes.
    ///
    /// `wall_clock` is only read when Point A is due for a refresh.
    pub fn tick(&mut self, now: Millis, wall_clock: NaiveDateTime) -> TickOutcome {
        let mut out = TickOutcome::default();
        if self.anchor.tick(now, wall_clock) {
            out.now_refreshed = true;
            if !self.focus.is_active() {
                self.layout_dirty = true;
            }
        }
        for fx in self.transition.poll(now) {
            if matches!(fx, TransitionEffect::Finished { .. }) {
                out.transition_finished = true;
            }
            self.handle_effect(fx, now);
        }
        if self.settle.fire_if_due(now) {
            self.settled = true;
            out.settled = true;
            tracing::debug!(at = now.0, "axis settled");
        }
        if self.settled
            && self.votes_stale
            && self.transition.is_interactive()
            && self.viewport.is_measured()
        {
            self.ensure_layout();
            let ids = self.visible_ids();
            self.votes_stale = false;
            out.vote_request = self.votes.issue(ids, false);
        }
        self.sync_animation(now);
        out
    }

    /// Earliest host time at which [`Timeline::tick`] has work to do.
    ///
    /// Hosts that do not tick every frame should schedule a wakeup for this.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        [
            self.transition.deadline(),
            self.settle.deadline(),
            self.anchor.next_refresh(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Hands back the results of a vote batch.
    ///
    /// Results for a superseded ticket are dropped and `false` is returned. A
    /// failure for one event only hides that event's dot.
    pub fn complete_votes(
        &mut self,
        generation: u64,
        results: impl IntoIterator<Item = (EventId, Result<VoteTally, VoteFetchError>)>,
        now: Millis,
    ) -> bool {
        if !self.votes.complete(generation, results) {
            return false;
        }
        self.rebuild_dots();
        self.sync_animation(now);
        true
    }

    /// Dot state for one event.
    #[must_use]
    pub fn vote_dot(&self, id: EventId) -> VoteDot {
        self.dots.get(&id)
    }

    /// Current layout of every positionable event.
    pub fn layout(&mut self) -> &[MarkerPosition] {
        self.ensure_layout();
        &self.layout
    }

    /// Builds the frame for `now`. Returns `None` (drawing nothing) if the
    /// surface is unmeasured.
    pub fn frame(&mut self, now: Millis) -> Option<&Scene<EventId>> {
        self.ensure_layout();
        let visible: Vec<&MarkerPosition> = self.layout.iter().filter(|p| p.visible).collect();
        let inputs: Vec<DeclutterInput<EventId>> = visible
            .iter()
            .map(|p| DeclutterInput::new(p.id, p.marker_value, p.screen_x))
            .collect();
        let pass = declutter(&inputs, self.mode, &self.config.declutter);
        let markers: Vec<RenderMarker<EventId>> = visible
            .iter()
            .map(|p| {
                let stacking = pass.get_or_identity(&p.id);
                RenderMarker {
                    id: p.id,
                    screen_x: p.screen_x,
                    height: stacking.height,
                    jitter: stacking.jitter,
                    phase: self.viewport.phase_of(p.screen_x),
                    color: self.config.palette.color(self.events[p.index].category),
                }
            })
            .collect();
        let input = FrameInput {
            size: self.viewport.size(),
            markers: &markers,
            votes: &self.dots,
            selection: self.selection.map(|s| (s.id, s.since)),
            hover: &self.hover,
            time: now,
            opacity: self.transition.content_opacity(now),
        };
        draw_frame(&input, &self.config.render, &mut self.scene)?;
        Some(&self.scene)
    }

    /// Plain observable state.
    pub fn snapshot(&mut self) -> TimelineSnapshot {
        self.ensure_layout();
        TimelineSnapshot {
            view_mode: self.mode,
            pending_view_mode: self.transition.pending_mode(),
            phase: self.transition.phase(),
            pan: self.viewport.pan(),
            selection: self.selection(),
            focus: self.focus.snapshot().cloned(),
            now: self.anchor.now(),
            reference: self.reference_timestamp(),
            settled: self.settled,
            votes_pending: self.votes.is_pending(),
            animating: self.animation.is_running(),
            visible_count: self.layout.iter().filter(|p| p.visible).count(),
        }
    }

    /// Inputs to the animation predicate at `now`.
    #[must_use]
    pub fn animation_inputs(&self, now: Millis) -> AnimationInputs {
        AnimationInputs {
            hover_transition: self.hover.is_transitioning(now),
            has_selection: self.selection.is_some(),
            content_fading: self.transition.is_active(),
            glow_enabled: self.config.render.glow.enabled,
            votes_loaded: self.dots.is_loaded(),
        }
    }

    /// Stops the frame callback, e.g. before the host tears the surface down.
    pub fn shutdown(&mut self) {
        self.animation.halt();
        self.drag.cancel();
        self.settle.cancel();
        self.transition.reset();
    }

    fn rebuild_dots(&mut self) {
        self.dots = VoteDotTable::from_tallies(self.votes.tallies(), &self.config.vote_dots);
    }

    fn sync_animation(&mut self, now: Millis) {
        let inputs = self.animation_inputs(now);
        self.animation.sync(&inputs);
    }

    fn panned(&mut self, now: Millis) {
        self.settle.poke(now);
        self.settled = false;
        self.votes_stale = true;
        self.layout_dirty = true;
    }

    fn select(&mut self, id: Option<EventId>, now: Millis) {
        self.selection = id.map(|id| Selection { id, since: now });
        tracing::debug!(selection = ?id, "selection changed");
    }

    fn activate_focus(
        &mut self,
        request: FocusRequest<EventId>,
        now: Millis,
    ) -> Result<(), IntentError> {
        if request.view_mode != self.mode {
            return Err(IntentError::ModeMismatch {
                active: self.mode,
                requested: request.view_mode,
            });
        }
        if let Some(id) = request
            .event_id
            .filter(|id| !self.index_of.contains_key(id))
        {
            return Err(IntentError::UnknownEvent(id));
        }
        let recenter = request.recenter;
        let pixel_offset = request.pixel_offset;
        // Arrow values are measured from whatever anchor is current.
        let current = self.reference_timestamp();
        self.focus.activate(request, current)?;
        let Some(focus) = self.focus.snapshot() else {
            return Ok(());
        };
        let anchored = focus.anchored_value;
        let shift = focus.arrow_value - anchored;
        if recenter {
            self.viewport.set_pan(anchored);
        } else if let Some(px) = pixel_offset {
            self.viewport.align_marker(anchored, px);
        } else {
            self.viewport.set_pan(self.viewport.pan() - shift);
        }
        self.panned(now);
        Ok(())
    }

    /// Clears Point B. With `keep_view`, pans so the same instants stay on screen.
    fn clear_focus(&mut self, keep_view: bool, now: Millis) -> bool {
        let Some(frozen) = self.focus.snapshot().map(|f| f.reference_timestamp) else {
            return false;
        };
        self.focus.deactivate();
        if keep_view {
            if let Some(scale) = self.mode.time_scale() {
                let live = marker_value(Some(frozen), scale, self.anchor.now());
                let local = marker_value(Some(frozen), scale, frozen);
                if let (Some(live), Some(local)) = (live, local) {
                    self.viewport.set_pan(self.viewport.pan() + live - local);
                }
            }
        }
        self.panned(now);
        true
    }

    fn click(&mut self, at: Point, now: Millis) -> Interaction {
        self.ensure_layout();
        let pointer = PointerInfo { position: at, time: now };
        let hit = self.scene.hit_test(at, &self.config.render.hit);
        let HitTarget::Marker { id, .. } = hit else {
            self.clear_focus(true, now);
            self.select(None, now);
            return Interaction::Background {
                marker_value: self.viewport.screen_x_to_marker(at.x),
            };
        };
        let Some(position) = self.layout.iter().find(|p| p.id == id).copied() else {
            return Interaction::Background {
                marker_value: self.viewport.screen_x_to_marker(at.x),
            };
        };
        let pixel_offset = self.viewport.offset_from_center(at.x);
        self.select(Some(id), now);
        if self.mode.is_temporal() {
            let mut request = FocusRequest::new(position.marker_value, self.mode)
                .with_event(id)
                .with_pixel_offset(pixel_offset);
            if let Some(ts) = self.events[position.index].timestamp {
                request = request.with_timestamp(ts);
            }
            if let Err(err) = self.activate_focus(request, now) {
                tracing::warn!(event = %id, ?err, "could not focus clicked event");
            }
        }
        Interaction::Activated(Activation {
            event: id,
            index: position.index,
            pointer,
            marker_value: position.marker_value,
            pixel_offset,
        })
    }

    fn handle_effect(&mut self, effect: TransitionEffect<EventId>, now: Millis) {
        match effect {
            TransitionEffect::ClearFocus => {
                if self.focus.deactivate() {
                    self.layout_dirty = true;
                }
            }
            TransitionEffect::SwapViewMode(mode) => {
                self.mode = mode;
                self.focus.discard_if_stale(mode);
                self.position_center = self.centered_index();
                self.update_pan_limits();
                self.viewport.set_pan(0.0);
                self.votes.invalidate();
                self.layout_dirty = true;
            }
            TransitionEffect::RefreshEvents => {
                self.layout_dirty = true;
                self.ensure_layout();
                self.votes_stale = true;
            }
            TransitionEffect::RevealContent => {}
            TransitionEffect::Finished {
                retained_selection, ..
            } => {
                self.ensure_layout();
                let keep = retained_selection.filter(|id| {
                    self.layout.iter().any(|p| p.id == *id && p.visible)
                });
                if keep.is_none() && retained_selection.is_some() {
                    tracing::debug!(?retained_selection, "selection left the visible window");
                }
                self.selection = keep.map(|id| Selection { id, since: now });
                self.settled = true;
                self.settle.cancel();
            }
        }
    }

    /// Marker values whose index falls in the odd-sized visible window,
    /// widened by the Point B margin. Half-open: index `n` covers `[n, n + 1)`.
    fn visibility_window(&self) -> Range<f64> {
        let indices = self.viewport.visible_index_range();
        let margin = self
            .focus
            .margin_units(self.mode, self.viewport.span_units());
        (*indices.start() as f64 - margin)..(*indices.end() as f64 + 1.0 + margin)
    }

    fn ensure_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }
        self.layout_dirty = false;
        self.layout.clear();
        let window = self.visibility_window();
        let reference = self.reference_timestamp();
        let scale = self.mode.time_scale();
        for (index, event) in self.events.iter().enumerate() {
            let value = match scale {
                Some(scale) => marker_value(event.timestamp, scale, reference),
                None => Some(ordinal_value(index, self.position_center)),
            };
            let Some(marker_value) = value else {
                continue;
            };
            self.layout.push(MarkerPosition {
                id: event.id,
                index,
                marker_value,
                screen_x: self.viewport.marker_to_screen_x(marker_value),
                visible: window.contains(&marker_value),
            });
        }
    }

    fn visible_ids(&self) -> Vec<EventId> {
        self.layout
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id)
            .collect()
    }

    fn selected_position(&mut self) -> Option<MarkerPosition> {
        let id = self.selection()?;
        self.ensure_layout();
        self.layout.iter().find(|p| p.id == id).copied()
    }

    /// Index of the selected event, else the latest at or before Point A.
    fn centered_index(&self) -> usize {
        self.selection
            .and_then(|s| self.index_of.get(&s.id).copied())
            .unwrap_or_else(|| self.present_index())
    }

    /// Index of the latest event at or before Point A, else the first event.
    fn present_index(&self) -> usize {
        let now = self.anchor.now();
        self.events
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.timestamp.filter(|ts| *ts <= now).map(|ts| (ts, i)))
            .max()
            .map_or(0, |(_, i)| i)
    }

    fn update_pan_limits(&mut self) {
        let limits = if self.mode == ViewMode::Position && !self.events.is_empty() {
            let first = ordinal_value(0, self.position_center);
            let last = ordinal_value(self.events.len() - 1, self.position_center);
            Some(first..last)
        } else {
            None
        };
        self.viewport.set_pan_limits(limits);
    }
}
