// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use peniko::Color;
use timeladder_declutter::DeclutterConfig;
use timeladder_focus::{FocusMargins, LiveAnchor};
use timeladder_render::{RenderConfig, VoteDotConfig};
use timeladder_transition::TransitionTimings;

use crate::event::{Category, MediaKind};

/// Rung color per category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryPalette {
    /// Remarks.
    pub remark: Color,
    /// News.
    pub news: Color,
    /// Images.
    pub image: Color,
    /// Audio.
    pub audio: Color,
    /// Video.
    pub video: Color,
    /// Other media.
    pub other_media: Color,
}

impl CategoryPalette {
    /// Color for `category`.
    #[must_use]
    pub fn color(&self, category: Category) -> Color {
        match category {
            Category::Remark => self.remark,
            Category::News => self.news,
            Category::Media(MediaKind::Image) => self.image,
            Category::Media(MediaKind::Audio) => self.audio,
            Category::Media(MediaKind::Video) => self.video,
            Category::Media(MediaKind::Other) => self.other_media,
        }
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self {
            remark: Color::from_rgba8(99, 140, 255, 255),
            news: Color::from_rgba8(240, 160, 60, 255),
            image: Color::from_rgba8(170, 110, 230, 255),
            audio: Color::from_rgba8(60, 190, 200, 255),
            video: Color::from_rgba8(230, 90, 150, 255),
            other_media: Color::from_rgba8(150, 150, 160, 255),
        }
    }
}

/// Everything tunable about a [`Timeline`](crate::Timeline).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    /// Pixel width of one marker unit.
    pub unit_width: f64,
    /// Click slop radius for pan drags, in pixels.
    pub drag_slop: f64,
    /// Quiet time after the last pan before the axis counts as settled.
    pub settle_delay: Duration,
    /// Longest interval between refreshes of the live "now".
    pub now_refresh: Duration,
    /// Declutter windows and caps.
    pub declutter: DeclutterConfig,
    /// Rungs, glow, pulse, hit radius and fixed colors.
    pub render: RenderConfig,
    /// Vote dot curve.
    pub vote_dots: VoteDotConfig,
    /// Transition phase lengths.
    pub transition: TransitionTimings,
    /// Visibility margins while a focus is active.
    pub focus_margins: FocusMargins,
    /// Hover easing duration.
    pub hover_duration: Duration,
    /// Rung colors.
    pub palette: CategoryPalette,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            unit_width: 48.0,
            drag_slop: 3.0,
            settle_delay: Duration::from_millis(450),
            now_refresh: LiveAnchor::DEFAULT_PERIOD,
            declutter: DeclutterConfig::default(),
            render: RenderConfig::default(),
            vote_dots: VoteDotConfig::default(),
            transition: TransitionTimings::default(),
            focus_margins: FocusMargins::default(),
            hover_duration: Duration::from_millis(200),
            palette: CategoryPalette::default(),
        }
    }
}

impl TimelineConfig {
    /// Overrides the scalar settings in `tuning`.
    #[must_use]
    pub fn with_tuning(mut self, tuning: &TimelineTuning) -> Self {
        self.unit_width = tuning.unit_width;
        self.drag_slop = tuning.drag_slop;
        self.settle_delay = Duration::from_millis(tuning.settle_delay_ms);
        self.now_refresh = Duration::from_millis(tuning.now_refresh_ms);
        self.render.hit.radius = tuning.hit_radius;
        self.render.glow.enabled = tuning.glow;
        self.declutter.bucket_threshold = tuning.bucket_threshold;
        self
    }

    /// The scalar settings, e.g. for persisting.
    #[must_use]
    pub fn tuning(&self) -> TimelineTuning {
        TimelineTuning {
            unit_width: self.unit_width,
            drag_slop: self.drag_slop,
            settle_delay_ms: duration_ms(self.settle_delay),
            now_refresh_ms: duration_ms(self.now_refresh),
            hit_radius: self.render.hit.radius,
            glow: self.render.glow.enabled,
            bucket_threshold: self.declutter.bucket_threshold,
        }
    }
}

/// Scalar settings hosts commonly expose or persist.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineTuning {
    /// Pixel width of one marker unit.
    pub unit_width: f64,
    /// Click slop radius in pixels.
    pub drag_slop: f64,
    /// Settle delay in milliseconds.
    pub settle_delay_ms: u64,
    /// Live "now" refresh interval in milliseconds.
    pub now_refresh_ms: u64,
    /// Hit radius in pixels.
    pub hit_radius: f64,
    /// Vote glow cycling on or off.
    pub glow: bool,
    /// Visible count above which coarse views bucket instead of scanning.
    pub bucket_threshold: usize,
}

impl Default for TimelineTuning {
    fn default() -> Self {
        TimelineConfig::default().tuning()
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{TimelineConfig, TimelineTuning};

    #[test]
    fn tuning_roundtrips_through_config() {
        let tuning = TimelineTuning {
            unit_width: 30.0,
            settle_delay_ms: 600,
            glow: false,
            ..TimelineTuning::default()
        };
        let cfg = TimelineConfig::default().with_tuning(&tuning);
        assert_eq!(cfg.settle_delay.as_millis(), 600);
        assert!(!cfg.render.glow.enabled);
        assert_eq!(cfg.tuning(), tuning);
    }

    #[test]
    fn defaults() {
        let t = TimelineTuning::default();
        assert_eq!(t.settle_delay_ms, 450);
        assert_eq!(t.now_refresh_ms, 60_000);
        assert_eq!(t.bucket_threshold, 50);
    }
}
