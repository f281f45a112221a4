// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder Declutter: cosmetic spreading of overlapping markers.
//!
//! Dense clusters of events land on nearly the same screen X. The declutter
//! pass gives each visible event a height multiplier and a tiny horizontal
//! jitter so clusters read as clusters rather than one thick line. It never
//! touches marker values; only presentation changes.
//!
//! Two strategies:
//! - **Pairwise**: count neighbors within a per-mode pixel window and grow the
//!   height logarithmically (`1 + ln(n + 1) / ln(base)`), clamped to a per-mode
//!   ceiling.
//! - **Bucketed**: in month and year views with more than
//!   [`DeclutterConfig::bucket_threshold`] visible events, neighbor scanning is
//!   skipped and a stable hash of the event id picks one of a few fixed height
//!   tiers.
//!
//! The result of one pass is a [`DeclutterPass`], a self-contained registry
//! for that render. A new pass starts from nothing, so nothing leaks between
//! view modes or frames.
//!
//! ## Minimal example
//!
//! ```rust
//! use timeladder_declutter::{DeclutterConfig, DeclutterInput, declutter};
//! use timeladder_position::ViewMode;
//!
//! let items = [
//!     DeclutterInput::new(1_u32, 0.0, 100.0),
//!     DeclutterInput::new(2, 0.01, 101.0),
//!     DeclutterInput::new(3, 5.0, 400.0),
//! ];
//! let pass = declutter(&items, ViewMode::Day, &DeclutterConfig::default());
//!
//! // The two close markers are raised, the isolated one is not.
//! assert!(pass.get(&1).unwrap().height > 1.0);
//! assert_eq!(pass.get(&3).unwrap().height, 1.0);
//! assert_eq!(pass.get(&3).unwrap().jitter, 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod hash;
mod pass;

pub use config::{DeclutterConfig, ModeTable};
pub use hash::stable_hash;
pub use pass::{DeclutterInput, DeclutterPass, Stacking, Strategy, declutter};
