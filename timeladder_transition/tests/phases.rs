// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full transition runs driven by a simulated frame clock.

use timeladder_position::ViewMode;
use timeladder_timing::Millis;
use timeladder_transition::{
    Phase, TransitionEffect, TransitionRejected, TransitionTimings, ViewTransition,
};

/// Polls every 16 ms until the transition is idle, recording when each effect appeared.
fn run_to_idle(t: &mut ViewTransition<u64>, start: u64) -> Vec<(u64, TransitionEffect<u64>)> {
    let mut log = Vec::new();
    let mut now = start;
    while t.is_active() {
        now += 16;
        for fx in t.poll(Millis(now)) {
            log.push((now, fx));
        }
        assert!(now < start + 10_000, "transition never finished");
    }
    log
}

#[test]
fn phases_follow_fixed_schedule() {
    let mut t = ViewTransition::<u64>::default();
    let start = 10_000;
    let fx = t
        .request(ViewMode::Year, ViewMode::Week, Some(3), Millis(start))
        .unwrap();
    assert_eq!(fx.as_slice(), &[TransitionEffect::ClearFocus]);
    assert_eq!(t.phase(), Phase::FadeOut);
    assert_eq!(t.pending_mode(), Some(ViewMode::Year));

    let log = run_to_idle(&mut t, start);
    let effects: Vec<_> = log.iter().map(|(_, fx)| *fx).collect();
    assert_eq!(
        effects,
        [
            TransitionEffect::SwapViewMode(ViewMode::Year),
            TransitionEffect::RefreshEvents,
            TransitionEffect::RevealContent,
            TransitionEffect::Finished {
                mode: ViewMode::Year,
                retained_selection: Some(3),
            },
        ]
    );

    // Each effect shows up on the first frame at or after its deadline.
    let deadlines = [650, 850, 1_050, 1_650];
    for ((at, _), offset) in log.iter().zip(deadlines) {
        assert!(*at >= start + offset && *at < start + offset + 16, "{at} vs {offset}");
    }
    assert_eq!(TransitionTimings::default().total().as_millis(), 1_650);
}

#[test]
fn interaction_disabled_for_whole_run() {
    let mut t = ViewTransition::<u64>::default();
    t.request(ViewMode::Day, ViewMode::Month, None, Millis(0))
        .unwrap();
    for now in (0..1_650).step_by(50) {
        t.poll(Millis(now));
        assert!(!t.is_interactive(), "interactive at {now}");
    }
    t.poll(Millis(1_650));
    assert!(t.is_interactive());
}

#[test]
fn overlapping_requests_are_no_ops() {
    let mut t = ViewTransition::<u64>::default();
    t.request(ViewMode::Month, ViewMode::Day, Some(1), Millis(0))
        .unwrap();
    for (i, mode) in ViewMode::ALL.into_iter().enumerate() {
        let at = Millis(100 * i as u64);
        t.poll(at);
        assert_eq!(
            t.request(mode, ViewMode::Day, Some(2), at),
            Err(TransitionRejected::InFlight)
        );
    }
    assert_eq!(t.pending_mode(), Some(ViewMode::Month));

    let fx = t.poll(Millis(5_000));
    assert_eq!(
        fx.last(),
        Some(&TransitionEffect::Finished {
            mode: ViewMode::Month,
            retained_selection: Some(1),
        })
    );

    // Once idle, a new request is accepted.
    assert!(
        t.request(ViewMode::Year, ViewMode::Month, None, Millis(5_001))
            .is_ok()
    );
}
