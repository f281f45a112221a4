// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declutter never stacks past the configured ceiling and never moves markers.

use timeladder_declutter::{DeclutterConfig, DeclutterInput, Strategy, declutter};
use timeladder_position::ViewMode;

fn colocated(n: u64) -> Vec<DeclutterInput<u64>> {
    (0..n).map(|id| DeclutterInput::new(id, 3.25, 250.0)).collect()
}

#[test]
fn five_hundred_colocated_events_stay_under_cap() {
    let cfg = DeclutterConfig::default();
    let items = colocated(500);
    for mode in ViewMode::ALL {
        let pass = declutter(&items, mode, &cfg);
        let cap = cfg.height_cap.get(mode);
        assert_eq!(pass.len(), 500, "{mode}");
        for (id, s) in pass.iter() {
            assert!(s.height >= 1.0, "{mode} {id}: {}", s.height);
            assert!(s.height <= cap, "{mode} {id}: {} > {cap}", s.height);
            assert!(s.jitter.abs() <= 2.0, "{mode} {id}: {}", s.jitter);
        }
        assert!(pass.max_height() <= cap, "{mode}");
    }
}

#[test]
fn pairwise_pileup_hits_cap_exactly() {
    let cfg = DeclutterConfig::default();
    let pass = declutter(&colocated(500), ViewMode::Day, &cfg);
    assert_eq!(pass.strategy(), Strategy::Pairwise);
    assert_eq!(pass.max_height(), cfg.height_cap.day);
    assert_eq!(pass.get(&0).unwrap().neighbors, Some(499));
}

#[test]
fn marker_values_are_untouched() {
    let cfg = DeclutterConfig::default();
    let items = colocated(80);
    let before = items.clone();
    for mode in ViewMode::ALL {
        let _ = declutter(&items, mode, &cfg);
    }
    assert_eq!(items, before);
}

#[test]
fn jitter_spreads_a_cluster() {
    let cfg = DeclutterConfig::default();
    let pass = declutter(&colocated(40), ViewMode::Week, &cfg);
    let distinct: std::collections::BTreeSet<i64> = pass
        .iter()
        .map(|(_, s)| s.jitter as i64)
        .collect();
    assert!(distinct.len() > 1, "{distinct:?}");
}
