// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder Render: drawing and hit-testing for a temporal axis.
//!
//! Each visible event is drawn as a vertical rung standing on a shared
//! baseline. Around that:
//! - [`RungStyle`] derives rung width from local density; the selected rung is
//!   always a fixed width thinner than the densest unselected one.
//! - [`VoteDotTable`] holds vote-intensity dots, computed once per vote dataset
//!   on a median-anchored curve ([`VoteCurve`]).
//! - [`GlowConfig`], [`PulseConfig`] and [`HoverState`] animate glow, the
//!   selection pulse and hover emphasis against host-supplied time.
//! - [`draw_frame`] assembles a [`Scene`] of plain draw ops and remembers the
//!   rung geometry so [`Scene::hit_test`] resolves the pointer to the nearest
//!   rung or to [`HitTarget::Background`].
//! - [`needs_animation`] says whether frames are needed at all, and
//!   [`AnimationDriver`] owns the host's frame callback accordingly.
//!
//! Nothing here reads a clock or owns a window; hosts supply sizes and
//! [`Millis`](timeladder_timing::Millis) and paint the resulting [`SceneOp`]s
//! with whatever backend they use.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use peniko::Color;
//! use timeladder_render::{
//!     FrameInput, HitTarget, HoverState, RenderConfig, RenderMarker, Scene, VoteDotTable,
//!     draw_frame,
//! };
//! use timeladder_timing::Millis;
//!
//! let markers = [RenderMarker {
//!     id: 1_u32,
//!     screen_x: 120.0,
//!     height: 1.0,
//!     jitter: 0.0,
//!     phase: 0.3,
//!     color: Color::from_rgba8(90, 140, 255, 255),
//! }];
//! let votes = VoteDotTable::default();
//! let hover = HoverState::default();
//! let config = RenderConfig::default();
//!
//! let mut scene = Scene::new();
//! let input = FrameInput {
//!     size: Size::new(400.0, 100.0),
//!     markers: &markers,
//!     votes: &votes,
//!     selection: None,
//!     hover: &hover,
//!     time: Millis(0),
//!     opacity: 1.0,
//! };
//! draw_frame(&input, &config, &mut scene).unwrap();
//!
//! assert_eq!(scene.hit_test(Point::new(125.0, 70.0), &config.hit).id(), Some(1));
//! assert_eq!(
//!     scene.hit_test(Point::new(300.0, 70.0), &config.hit),
//!     HitTarget::Background
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod effects;
mod hit;
mod rung;
mod scene;
mod schedule;
mod votes;

pub use effects::{GlowConfig, HoverState, PulseConfig, PulseFrame};
pub use hit::{HitCandidate, HitConfig, HitTarget, hit_test};
pub use rung::RungStyle;
pub use scene::{
    FrameInput, FrameStats, RenderConfig, RenderMarker, Scene, SceneOp, ScenePalette, draw_frame,
};
pub use schedule::{
    AnimationDriver, AnimationInputs, CountingScheduler, FrameScheduler, needs_animation,
};
pub use votes::{VoteCurve, VoteDot, VoteDotConfig, VoteDotTable, VoteTally, compute_vote_dots};
