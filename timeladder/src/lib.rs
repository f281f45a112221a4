// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeladder: an interactive temporal axis.
//!
//! Dated events are placed along a horizontal axis as vertical rungs. The
//! [`Timeline`] engine owns all axis state and composes the layer crates:
//!
//! - `timeladder_position`: continuous marker values per [`ViewMode`].
//! - `timeladder_view`: pan offset, visible range and drag gestures.
//! - `timeladder_focus`: Point A (live now) and Point B (frozen focus).
//! - `timeladder_declutter`: stacking heights and jitter for crowded spans.
//! - `timeladder_render`: rungs, vote dots, glow, pulse, hit-testing and the
//!   animation predicate.
//! - `timeladder_transition`: the phased switch between view modes.
//!
//! The host feeds it pointer input, surface sizes, [`Intent`]s and time
//! ([`Millis`] plus an occasional wall-clock reading), and paints the
//! [`Scene`] it returns. Vote tallies are fetched by the host in batches
//! described by [`VoteBatchTicket`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kurbo::{Point, Size};
//! use timeladder::{
//!     Category, CountingScheduler, Event, EventId, Interaction, Millis, Timeline,
//!     TimelineConfig,
//! };
//!
//! let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
//! let now = day.and_hms_opt(12, 0, 0).unwrap();
//!
//! let mut timeline = Timeline::new(
//!     TimelineConfig::default(),
//!     now,
//!     Millis(0),
//!     CountingScheduler::default(),
//! );
//! timeline.set_events(vec![
//!     Event::new(EventId(1), day.and_hms_opt(9, 0, 0), Category::Remark),
//!     Event::new(EventId(2), day.and_hms_opt(12, 30, 0), Category::News),
//! ]);
//! timeline.resize(Size::new(480.0, 100.0));
//!
//! // Three hours before now, 48 px per hour, from the center at 240 px.
//! let first = timeline.layout()[0];
//! assert_eq!(first.marker_value, -3.0);
//! assert_eq!(first.screen_x, 96.0);
//!
//! timeline.frame(Millis(16)).unwrap();
//! timeline.pointer_down(Point::new(96.0, 70.0), Millis(20));
//! let Some(Interaction::Activated(hit)) = timeline.pointer_up(Point::new(96.0, 70.0), Millis(40))
//! else {
//!     panic!("expected a marker click");
//! };
//! assert_eq!(hit.event, EventId(1));
//!
//! // The clicked event is now Point B and stays under the pointer.
//! assert_eq!(timeline.focus().unwrap().reference_timestamp, day.and_hms_opt(9, 0, 0).unwrap());
//! assert_eq!(timeline.layout()[0].screen_x, 96.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod error;
mod event;
mod votes;

pub use config::{CategoryPalette, TimelineConfig, TimelineTuning};
pub use engine::{
    Activation, Intent, Interaction, MarkerPosition, PointerInfo, PointerMove, TickOutcome,
    Timeline, TimelineSnapshot,
};
pub use error::IntentError;
pub use event::{
    Category, Event, EventId, IngestError, MediaKind, RawEvent, RawTimestamp, parse_timestamp,
    timestamp_from_millis,
};
pub use votes::{VoteBatchTicket, VoteFetchError};

pub use timeladder_focus::{FocusError, FocusRequest, FocusSnapshot};
pub use timeladder_position::{TimeScale, ViewMode};
pub use timeladder_render::{
    AnimationInputs, CountingScheduler, FrameScheduler, Scene, SceneOp, VoteDot, VoteTally,
};
pub use timeladder_timing::Millis;
pub use timeladder_transition::{Phase, TransitionRejected};
