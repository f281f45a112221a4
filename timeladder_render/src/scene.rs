// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame assembly.
//!
//! [`draw_frame`] turns the per-frame inputs into a flat list of [`SceneOp`]s
//! and records the rung geometry it drew so pointer positions can be resolved
//! against exactly what is on screen.

use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::{Circle, Line, Point, Size};
use peniko::Color;
use timeladder_timing::Millis;

use crate::effects::{GlowConfig, HoverState, PulseConfig};
use crate::hit::{HitCandidate, HitConfig, HitTarget, hit_test};
use crate::rung::RungStyle;
use crate::votes::VoteDotTable;

/// Colors that do not depend on the event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePalette {
    /// Shared baseline.
    pub baseline: Color,
    /// Dot for a positive net.
    pub promote: Color,
    /// Dot for a negative net.
    pub demote: Color,
    /// Dot for a zero net.
    pub neutral: Color,
    /// Selection highlight and trail.
    pub highlight: Color,
}

impl Default for ScenePalette {
    fn default() -> Self {
        Self {
            baseline: Color::from_rgba8(120, 120, 130, 255),
            promote: Color::from_rgba8(72, 187, 120, 255),
            demote: Color::from_rgba8(229, 83, 75, 255),
            neutral: Color::from_rgba8(160, 160, 170, 255),
            highlight: Color::from_rgba8(255, 214, 102, 255),
        }
    }
}

/// Everything the frame assembler needs besides per-frame inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderConfig {
    /// Rung geometry.
    pub rung: RungStyle,
    /// Vote glow cycling.
    pub glow: GlowConfig,
    /// Selection pulse.
    pub pulse: PulseConfig,
    /// Hit radius.
    pub hit: HitConfig,
    /// Fixed colors.
    pub palette: ScenePalette,
}

/// One visible event, already positioned and decluttered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderMarker<K> {
    /// Event id.
    pub id: K,
    /// Device-space X of the true marker value.
    pub screen_x: f64,
    /// Declutter height multiplier.
    pub height: f64,
    /// Declutter jitter in pixels.
    pub jitter: f64,
    /// Glow sweep phase in `[0, 1]`, from the marker's place on screen.
    pub phase: f64,
    /// Rung color, usually by category.
    pub color: Color,
}

/// A single drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneOp {
    /// Stroke a straight segment.
    StrokeLine {
        /// Segment.
        line: Line,
        /// Stroke width in pixels.
        width: f64,
        /// Stroke color, with content opacity applied.
        color: Color,
    },
    /// Fill a circle.
    FillCircle {
        /// Circle.
        circle: Circle,
        /// Fill color, with content opacity applied.
        color: Color,
    },
}

/// Per-frame inputs to [`draw_frame`].
#[derive(Debug)]
pub struct FrameInput<'a, K> {
    /// Measured surface size.
    pub size: Size,
    /// Visible markers.
    pub markers: &'a [RenderMarker<K>],
    /// Vote dots for the current dataset.
    pub votes: &'a VoteDotTable<K>,
    /// Selected event and when it was selected.
    pub selection: Option<(K, Millis)>,
    /// Hover state.
    pub hover: &'a HoverState<K>,
    /// Frame time.
    pub time: Millis,
    /// Content opacity in `[0, 1]`, multiplied into every op.
    pub opacity: f64,
}

/// Counts reported for a drawn frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Rungs drawn.
    pub rungs: usize,
    /// Vote dots drawn.
    pub dots: usize,
}

/// Output of [`draw_frame`]: draw ops plus the rung geometry for hit-testing.
#[derive(Clone, Debug)]
pub struct Scene<K> {
    ops: Vec<SceneOp>,
    hits: Vec<HitCandidate<K>>,
}

impl<K> Default for Scene<K> {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            hits: Vec::new(),
        }
    }
}

impl<K: Copy> Scene<K> {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing commands in paint order.
    #[must_use]
    pub fn ops(&self) -> &[SceneOp] {
        &self.ops
    }

    /// Rungs from the last frame, for hit-testing.
    #[must_use]
    pub fn hit_candidates(&self) -> &[HitCandidate<K>] {
        &self.hits
    }

    /// Returns `true` if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Clears ops and hit geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.hits.clear();
    }

    /// Resolves `pt` against the rungs of the last frame.
    #[must_use]
    pub fn hit_test(&self, pt: Point, config: &HitConfig) -> HitTarget<K> {
        hit_test(&self.hits, pt, config)
    }
}

/// Assembles one frame into `scene`.
///
/// Returns `None` and leaves `scene` empty when the surface has no area; the
/// frame is simply skipped.
pub fn draw_frame<K: Copy + Hash + Eq>(
    input: &FrameInput<'_, K>,
    config: &RenderConfig,
    scene: &mut Scene<K>,
) -> Option<FrameStats> {
    scene.clear();
    let Size { width, height } = input.size;
    if !(width > 0.0 && height > 0.0) {
        tracing::trace!(width, height, "skipping frame on unmeasured surface");
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Opacity is clamped to [0, 1]; f32 precision is plenty for alpha"
    )]
    let opacity = input.opacity.clamp(0.0, 1.0) as f32;
    let baseline_y = (height - config.rung.baseline_inset).max(0.0);
    let palette = &config.palette;

    scene.ops.push(SceneOp::StrokeLine {
        line: Line::new((0.0, baseline_y), (width, baseline_y)),
        width: 1.0,
        color: palette.baseline.multiply_alpha(opacity),
    });

    let xs: Vec<f64> = input.markers.iter().map(|m| m.screen_x + m.jitter).collect();
    let widths = config.rung.widths(&xs);
    let cull = config.hit.radius.max(config.rung.max_width);
    let selected = input.selection.map(|(id, _)| id);
    let mut stats = FrameStats::default();

    for (i, m) in input.markers.iter().enumerate() {
        let x = xs[i];
        if !x.is_finite() || x < -cull || x > width + cull {
            continue;
        }
        let top = baseline_y - config.rung.base_height * m.height.max(1.0);
        let line = Line::new((x, baseline_y), (x, top));
        let is_selected = selected == Some(m.id);
        let emphasis = input.hover.emphasis(m.id, input.time);
        let (rung_width, alpha) = if is_selected {
            (config.rung.selected_width(), 1.0)
        } else {
            (widths[i] + emphasis, 0.7 + 0.3 * emphasis)
        };
        scene.ops.push(SceneOp::StrokeLine {
            line,
            width: rung_width,
            color: m.color.multiply_alpha(alpha_f32(alpha) * opacity),
        });
        scene.hits.push(HitCandidate { id: m.id, line });
        stats.rungs += 1;

        let dot = input.votes.get(&m.id);
        if dot.visible {
            let glow = config.glow.brightness(input.time, m.phase);
            let color = if dot.neutral {
                palette.neutral
            } else if dot.net > 0 {
                palette.promote
            } else {
                palette.demote
            };
            scene.ops.push(SceneOp::FillCircle {
                circle: Circle::new((x, top - dot.offset), dot.size * 0.5),
                color: color.multiply_alpha(alpha_f32(glow) * opacity),
            });
            stats.dots += 1;
        }

        if let Some((_, selected_at)) = input.selection.filter(|(id, _)| *id == m.id) {
            push_selection(scene, config, Point::new(x, top), input.time.saturating_since(selected_at), opacity);
        }
    }
    Some(stats)
}

fn push_selection<K>(
    scene: &mut Scene<K>,
    config: &RenderConfig,
    top: Point,
    elapsed: core::time::Duration,
    opacity: f32,
) {
    let pulse = &config.pulse;
    let frame = pulse.frame(elapsed);
    let highlight = config.palette.highlight;
    let center = Point::new(top.x, top.y - pulse.radius - pulse.swell);
    scene.ops.push(SceneOp::FillCircle {
        circle: Circle::new(center, frame.radius),
        color: highlight.multiply_alpha(alpha_f32(frame.alpha) * opacity),
    });
    for i in 0..pulse.trail_len {
        let y = center.y - (f64::from(i) + 1.0) * pulse.trail_spacing;
        scene.ops.push(SceneOp::FillCircle {
            circle: Circle::new((center.x, y), 1.5),
            color: highlight.multiply_alpha(alpha_f32(pulse.trail_alpha(i, &frame)) * opacity),
        });
    }
}

fn alpha_f32(a: f64) -> f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Alpha is clamped to [0, 1]"
    )]
    {
        a.clamp(0.0, 1.0) as f32
    }
}
