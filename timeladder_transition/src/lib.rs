// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder Transition: the phased switch between view modes.
//!
//! A view-mode change runs through fixed phases:
//!
//! ```text
//! Idle → FadeOut → StructureSwap → DataProcessing → FadeIn → Idle
//! ```
//!
//! [`ViewTransition`] is the only authority on whether a transition is in
//! flight. It owns exactly one [`OneShot`](timeladder_timing::OneShot) timer for
//! the current phase and reports what the host must do as
//! [`TransitionEffect`]s:
//!
//! - On [`ViewTransition::request`]: [`TransitionEffect::ClearFocus`].
//! - Entering `StructureSwap`: [`TransitionEffect::SwapViewMode`].
//! - Entering `DataProcessing`: [`TransitionEffect::RefreshEvents`].
//! - Entering `FadeIn`: [`TransitionEffect::RevealContent`].
//! - Back to `Idle`: [`TransitionEffect::Finished`] carrying the selection that
//!   was current when the transition began, for the host to keep or clear.
//!
//! Requests for the current mode, or while a transition runs, are rejected and
//! change nothing. Pointer interaction should be disabled until
//! [`ViewTransition::is_interactive`] is `true` again.
//!
//! ## Minimal example
//!
//! ```rust
//! use timeladder_position::ViewMode;
//! use timeladder_timing::Millis;
//! use timeladder_transition::{Phase, TransitionEffect, TransitionRejected, ViewTransition};
//!
//! let mut t = ViewTransition::<u32>::default();
//! let fx = t
//!     .request(ViewMode::Month, ViewMode::Day, Some(7), Millis(0))
//!     .unwrap();
//! assert_eq!(fx.as_slice(), &[TransitionEffect::ClearFocus]);
//!
//! // A second request while in flight is ignored.
//! assert_eq!(
//!     t.request(ViewMode::Year, ViewMode::Day, None, Millis(10)),
//!     Err(TransitionRejected::InFlight)
//! );
//!
//! assert!(t.poll(Millis(649)).is_empty());
//! assert_eq!(
//!     t.poll(Millis(650)).as_slice(),
//!     &[TransitionEffect::SwapViewMode(ViewMode::Month)]
//! );
//! assert_eq!(t.phase(), Phase::StructureSwap);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod error;
mod machine;
mod timings;

pub use error::TransitionRejected;
pub use machine::{Phase, TransitionEffect, TransitionEffects, ViewTransition};
pub use timings::TransitionTimings;
