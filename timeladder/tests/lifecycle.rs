// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View transitions, settling and vote batches over time.

use chrono::{NaiveDate, NaiveDateTime};
use kurbo::{Point, Size};
use timeladder::{
    Category, CountingScheduler, Event, EventId, FocusError, FocusRequest, Intent, IntentError,
    Millis, Phase, PointerMove, TickOutcome, Timeline, TimelineConfig, TransitionRejected,
    ViewMode, VoteFetchError, VoteTally,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn now() -> NaiveDateTime {
    at(2024, 4, 2, 12, 0)
}

fn timeline() -> Timeline {
    let mut tl = Timeline::new(
        TimelineConfig::default(),
        now(),
        Millis(0),
        CountingScheduler::default(),
    );
    tl.set_events(vec![
        Event::new(EventId(4), Some(at(2021, 4, 2, 8, 0)), Category::Remark),
        Event::new(EventId(3), Some(at(2024, 4, 1, 23, 0)), Category::Remark),
        Event::new(EventId(1), Some(at(2024, 4, 2, 9, 0)), Category::Remark),
        Event::new(EventId(2), Some(at(2024, 4, 2, 12, 30)), Category::News),
    ]);
    tl.resize(Size::new(480.0, 100.0));
    tl
}

/// Ticks at 16 ms frames from `start` until the axis is interactive again.
fn run_until_idle(tl: &mut Timeline, start: u64) -> Vec<(u64, TickOutcome)> {
    let mut out = Vec::new();
    let mut t = start;
    while !tl.is_interactive() {
        t += 16;
        assert!(t < start + 5_000, "transition never finished");
        out.push((t, tl.tick(Millis(t), now())));
    }
    out
}

#[test]
fn retained_selection_survives_when_still_visible() {
    let mut tl = timeline();
    tl.apply(Intent::SelectEvent(Some(EventId(2))), Millis(0))
        .unwrap();
    tl.apply(Intent::ChangeViewMode(ViewMode::Month), Millis(0))
        .unwrap();

    let snap = tl.snapshot();
    assert_eq!(snap.view_mode, ViewMode::Day);
    assert_eq!(snap.pending_view_mode, Some(ViewMode::Month));
    assert_eq!(snap.phase, Phase::FadeOut);

    let ticks = run_until_idle(&mut tl, 0);
    let finished: Vec<u64> = ticks
        .iter()
        .filter(|(_, o)| o.transition_finished)
        .map(|(t, _)| *t)
        .collect();
    assert_eq!(finished.len(), 1);
    assert!(finished[0] >= 1_650);

    assert_eq!(tl.view_mode(), ViewMode::Month);
    assert_eq!(tl.selection(), Some(EventId(2)));
    assert_eq!(tl.viewport().pan(), 0.0);
}

#[test]
fn retained_selection_is_cleared_when_it_falls_outside_the_new_view() {
    let mut tl = timeline();
    tl.apply(Intent::SelectEvent(Some(EventId(4))), Millis(0))
        .unwrap();
    tl.apply(Intent::ChangeViewMode(ViewMode::Month), Millis(0))
        .unwrap();
    run_until_idle(&mut tl, 0);

    assert_eq!(tl.view_mode(), ViewMode::Month);
    assert_eq!(tl.selection(), None);
    let far = tl.layout().iter().find(|p| p.id == EventId(4)).copied().unwrap();
    assert_eq!(far.marker_value, -36.0 + 1.0 / 30.0);
    assert!(!far.visible);
}

#[test]
fn axis_is_busy_for_the_whole_transition() {
    let mut tl = timeline();
    tl.frame(Millis(0));
    tl.tick(Millis(0), now());
    let request = FocusRequest::new(-3.0, ViewMode::Day);
    tl.apply(Intent::ActivateFocus(request), Millis(0)).unwrap();
    assert!(tl.focus().is_some());

    tl.apply(Intent::ChangeViewMode(ViewMode::Week), Millis(100))
        .unwrap();
    // Focus is dropped as soon as the transition starts.
    assert!(tl.focus().is_none());
    assert!(tl.snapshot().animating);

    for t in [116_u64, 700, 900, 1_200, 1_700] {
        tl.tick(Millis(t), now());
        assert!(!tl.is_interactive(), "interactive at {t}");
        assert_eq!(
            tl.apply(Intent::PanBy(10.0), Millis(t)),
            Err(IntentError::Busy)
        );
        assert_eq!(
            tl.apply(Intent::ChangeViewMode(ViewMode::Year), Millis(t)),
            Err(IntentError::Transition(TransitionRejected::InFlight))
        );
        assert!(!tl.pointer_down(Point::new(240.0, 70.0), Millis(t)));
        assert_eq!(
            tl.pointer_move(Point::new(240.0, 70.0), Millis(t)),
            PointerMove::Ignored
        );
    }
    tl.tick(Millis(1_750), now());
    assert!(tl.is_interactive());
    assert_eq!(tl.view_mode(), ViewMode::Week);
    assert!(!tl.snapshot().animating);

    assert_eq!(
        tl.apply(Intent::ChangeViewMode(ViewMode::Week), Millis(1_800)),
        Err(IntentError::Transition(TransitionRejected::SameMode))
    );
}

#[test]
fn content_fades_out_and_back_in() {
    let mut tl = timeline();
    tl.apply(Intent::ChangeViewMode(ViewMode::Year), Millis(0))
        .unwrap();
    let alpha = |tl: &mut Timeline, t: u64| {
        tl.tick(Millis(t), now());
        let scene = tl.frame(Millis(t)).unwrap();
        match scene.ops().first() {
            Some(timeladder::SceneOp::StrokeLine { color, .. }) => color.components[3],
            other => panic!("expected the baseline first, got {other:?}"),
        }
    };
    let start = alpha(&mut tl, 0);
    let mid = alpha(&mut tl, 325);
    let hidden = alpha(&mut tl, 900);
    let back = alpha(&mut tl, 1_700);
    assert!(start > mid && mid > hidden, "{start} {mid} {hidden}");
    assert_eq!(hidden, 0.0);
    assert_eq!(back, start);
}

#[test]
fn position_mode_centers_on_the_present_and_clamps_pan() {
    let mut tl = timeline();
    tl.apply(Intent::ChangeViewMode(ViewMode::Position), Millis(0))
        .unwrap();
    run_until_idle(&mut tl, 0);

    // Event 1 is the latest at or before now, so it sits at marker 0.
    let values: Vec<(EventId, f64)> = tl.layout().iter().map(|p| (p.id, p.marker_value)).collect();
    assert_eq!(
        values,
        [
            (EventId(4), -2.0),
            (EventId(3), -1.0),
            (EventId(1), 0.0),
            (EventId(2), 1.0)
        ]
    );

    tl.apply(Intent::PanBy(-10_000.0), Millis(2_000)).unwrap();
    assert_eq!(tl.viewport().pan(), 1.0);
    tl.apply(Intent::PanBy(10_000.0), Millis(2_010)).unwrap();
    assert_eq!(tl.viewport().pan(), -2.0);

    assert_eq!(
        tl.apply(
            Intent::ActivateFocus(FocusRequest::new(0.0, ViewMode::Position)),
            Millis(2_020)
        ),
        Err(IntentError::Focus(FocusError::UnsupportedMode(
            ViewMode::Position
        )))
    );
}

#[test]
fn position_mode_centers_on_the_selection() {
    let mut tl = timeline();
    tl.apply(Intent::SelectEvent(Some(EventId(3))), Millis(0))
        .unwrap();
    tl.apply(Intent::ChangeViewMode(ViewMode::Position), Millis(0))
        .unwrap();
    run_until_idle(&mut tl, 0);
    assert_eq!(tl.selection(), Some(EventId(3)));
    let centered = tl.layout().iter().find(|p| p.id == EventId(3)).copied().unwrap();
    assert_eq!(centered.marker_value, 0.0);
    assert_eq!(centered.screen_x, 240.0);
}

#[test]
fn votes_are_batched_after_settling_and_stale_batches_dropped() {
    let mut tl = timeline();

    let first = tl.tick(Millis(0), now()).vote_request.unwrap();
    assert_eq!(first.ids, [EventId(1), EventId(2)]);
    assert!(tl.snapshot().votes_pending);

    // Pan ten hours back: only event 3 is on screen afterwards.
    tl.apply(Intent::PanBy(480.0), Millis(10)).unwrap();
    assert_eq!(tl.tick(Millis(100), now()).vote_request, None);
    assert_eq!(tl.next_deadline(), Some(Millis(460)));

    let outcome = tl.tick(Millis(460), now());
    assert!(outcome.settled);
    let second = outcome.vote_request.unwrap();
    assert_eq!(second.ids, [EventId(3)]);
    assert!(second.generation > first.generation);

    assert!(!tl.complete_votes(
        first.generation,
        [(EventId(1), Ok(VoteTally::new(5, 0)))],
        Millis(470)
    ));
    assert!(!tl.snapshot().animating);

    assert!(tl.complete_votes(
        second.generation,
        [(EventId(3), Ok(VoteTally::new(3, 1)))],
        Millis(480)
    ));
    let snap = tl.snapshot();
    assert!(!snap.votes_pending);
    // Glow cycling needs frames once votes are in.
    assert!(snap.animating);

    // Nothing changed, nothing refetched.
    assert_eq!(tl.tick(Millis(2_000), now()).vote_request, None);
}

#[test]
fn failed_lookup_is_retried_on_the_next_settle() {
    let mut tl = timeline();
    let ticket = tl.tick(Millis(0), now()).vote_request.unwrap();
    assert!(tl.complete_votes(
        ticket.generation,
        [
            (EventId(1), Ok(VoteTally::new(2, 0))),
            (EventId(2), Err(VoteFetchError::Unavailable)),
        ],
        Millis(10)
    ));

    tl.apply(Intent::PanBy(1.0), Millis(20)).unwrap();
    let retry = tl.tick(Millis(470), now()).vote_request.unwrap();
    assert_eq!(retry.ids, [EventId(1), EventId(2)]);
}

#[test]
fn live_now_refreshes_on_its_period() {
    let mut tl = timeline();
    let later = at(2024, 4, 2, 13, 0);
    assert!(!tl.tick(Millis(59_999), later).now_refreshed);
    assert_eq!(tl.next_deadline(), Some(Millis(60_000)));
    assert!(tl.tick(Millis(60_000), later).now_refreshed);
    assert_eq!(tl.snapshot().now, later);
    let first = tl.layout().iter().find(|p| p.id == EventId(1)).copied().unwrap();
    assert_eq!(first.marker_value, -4.0);
}

#[test]
fn tallies_carried_by_events_show_before_any_batch() {
    let mut tl = timeline();
    let mut events = tl.events().to_vec();
    events[2] = events[2].clone().with_votes(VoteTally::new(4, 1));
    tl.set_events(events);

    let dot = tl.vote_dot(EventId(1));
    assert!(dot.visible);
    assert_eq!(dot.net, 3);
    assert!(!tl.vote_dot(EventId(2)).visible);

    // Dots need glow frames as soon as the first tick syncs the driver.
    let ticket = tl.tick(Millis(0), now()).vote_request.unwrap();
    assert!(tl.snapshot().animating);

    // A fetched tally replaces the one the event came with.
    assert!(tl.complete_votes(
        ticket.generation,
        [
            (EventId(1), Ok(VoteTally::new(1, 6))),
            (EventId(2), Ok(VoteTally::new(2, 0))),
        ],
        Millis(10)
    ));
    assert_eq!(tl.vote_dot(EventId(1)).net, -5);
    assert_eq!(tl.vote_dot(EventId(2)).net, 2);
}
