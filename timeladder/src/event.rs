// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events as the engine sees them, and ingestion from loosely typed host data.
//!
//! Category strings and media hints are sniffed exactly once, here, into the
//! closed [`Category`] variant. Timestamps that cannot be read become `None`
//! and the event is left out of layout rather than rejected.

use alloc::string::String;
use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use timeladder_render::VoteTally;

/// Stable event identifier supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of attached media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Audio clip.
    Audio,
    /// Video clip.
    Video,
    /// Anything else.
    Other,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg", "heic", "avif"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "aac", "flac", "opus"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "mkv", "avi", "m4v"];

impl MediaKind {
    /// Classifies a MIME type (`image/png`) or a file name / URL (`clip.MP4?x=1`).
    #[must_use]
    pub fn sniff(hint: &str) -> Self {
        let hint = hint.trim();
        // MIME types have exactly one slash and a bare top-level type.
        if let Some((top, sub)) = hint.split_once('/') {
            if !sub.contains('/') && !top.contains(['.', ':']) {
                match top.to_ascii_lowercase().as_str() {
                    "image" => return Self::Image,
                    "audio" => return Self::Audio,
                    "video" => return Self::Video,
                    _ => {}
                }
            }
        }
        let path = hint.split(['?', '#']).next().unwrap_or(hint);
        let Some((_, ext)) = path.rsplit_once('.') else {
            return Self::Other;
        };
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Audio
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Video
        } else {
            Self::Other
        }
    }
}

/// Presentation category of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// A user remark.
    Remark,
    /// A news item.
    News,
    /// An uploaded media item.
    Media(MediaKind),
}

impl Category {
    /// Resolves a host category string plus an optional media hint.
    ///
    /// Kinds are matched case-insensitively. A media event without a usable
    /// hint is [`MediaKind::Other`].
    pub fn resolve(kind: &str, media_hint: Option<&str>) -> Result<Self, IngestError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "remark" | "comment" => Ok(Self::Remark),
            "news" => Ok(Self::News),
            "media" => Ok(Self::Media(media_hint.map_or(MediaKind::Other, MediaKind::sniff))),
            "image" => Ok(Self::Media(MediaKind::Image)),
            "audio" => Ok(Self::Media(MediaKind::Audio)),
            "video" => Ok(Self::Media(MediaKind::Video)),
            _ => Err(IngestError::UnknownCategory(String::from(kind))),
        }
    }
}

/// Error raised while ingesting host data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestError {
    /// The category string is not one the engine knows.
    UnknownCategory(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(kind) => write!(f, "unknown event category `{kind}`"),
        }
    }
}

impl core::error::Error for IngestError {}

/// A dated event, read-only to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Identifier.
    pub id: EventId,
    /// When it happened. `None` means the event cannot be positioned on a
    /// temporal axis.
    pub timestamp: Option<NaiveDateTime>,
    /// Presentation category.
    pub category: Category,
    /// Vote aggregate delivered with the event, if the host has one.
    ///
    /// Seeds the vote dot before any batch lookup. A later batch result for
    /// the same event replaces it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub votes: Option<VoteTally>,
}

impl Event {
    /// Creates an event.
    #[must_use]
    pub fn new(id: EventId, timestamp: Option<NaiveDateTime>, category: Category) -> Self {
        Self {
            id,
            timestamp,
            category,
            votes: None,
        }
    }

    /// Attaches a known vote aggregate.
    #[must_use]
    pub fn with_votes(mut self, votes: VoteTally) -> Self {
        self.votes = Some(votes);
        self
    }

    /// Builds an event from loosely typed host data.
    pub fn ingest(raw: &RawEvent<'_>) -> Result<Self, IngestError> {
        let category = Category::resolve(raw.kind, raw.media)?;
        let timestamp = raw.timestamp.resolve();
        if timestamp.is_none() {
            tracing::debug!(id = raw.id, "event has no usable timestamp");
        }
        Ok(Self::new(EventId(raw.id), timestamp, category))
    }
}

/// Host-side timestamp in whatever shape it arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTimestamp<'a> {
    /// Milliseconds since the Unix epoch, UTC.
    EpochMillis(i64),
    /// RFC 3339 or a naive ISO-8601 date / date-time.
    Text(&'a str),
    /// No timestamp at all.
    Missing,
}

impl RawTimestamp<'_> {
    /// Converts to a naive UTC date-time, `None` if unreadable.
    #[must_use]
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match *self {
            Self::EpochMillis(ms) => timestamp_from_millis(ms),
            Self::Text(s) => parse_timestamp(s),
            Self::Missing => None,
        }
    }
}

/// Loosely typed event as received from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawEvent<'a> {
    /// Identifier.
    pub id: u64,
    /// Category string, e.g. `"news"` or `"media"`.
    pub kind: &'a str,
    /// MIME type, file name or URL of attached media.
    pub media: Option<&'a str>,
    /// Timestamp.
    pub timestamp: RawTimestamp<'a>,
}

/// Converts epoch milliseconds to a naive UTC date-time.
#[must_use]
pub fn timestamp_from_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

/// Parses RFC 3339 (converted to UTC), then naive `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// with `T` or a space, then a bare `YYYY-MM-DD` (midnight).
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
