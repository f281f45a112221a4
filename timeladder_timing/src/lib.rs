// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder Timing: host-driven timer primitives.
//!
//! Nothing in this crate reads a clock or spawns a thread. The host owns the
//! frame loop and passes the current time in as a [`Millis`] value; timers only
//! answer "is my deadline due at this instant?".
//!
//! - [`OneShot`]: a single cancelable deadline. Re-arming replaces the old one.
//! - [`Debounce`]: a trailing timer that is pushed back on every poke and fires
//!   once after the pokes stop.
//! - [`Interval`]: a repeating deadline that tolerates late polling without
//!   firing a burst of catch-up ticks.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use timeladder_timing::{Debounce, Millis};
//!
//! let mut settle = Debounce::new(Duration::from_millis(450));
//!
//! // A drag produces a burst of moves.
//! settle.poke(Millis(0));
//! settle.poke(Millis(100));
//! settle.poke(Millis(200));
//!
//! // Nothing fires until 450ms after the last move.
//! assert!(!settle.fire_if_due(Millis(600)));
//! assert!(settle.fire_if_due(Millis(650)));
//! // And it only fires once.
//! assert!(!settle.fire_if_due(Millis(2_000)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod clock;
mod timer;

pub use clock::Millis;
pub use timer::{Debounce, Interval, OneShot};
