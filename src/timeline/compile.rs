use std::io::Read;
use std::path::Path;

use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    animation::keyframes::Lerp,
    eval::anchor::Projection,
    eval::frame::FrameCtx,
    eval::state::VisualState,
    foundation::core::{LayoutMode, Progress, Viewport},
    foundation::error::ScrollweaveResult,
    foundation::math::{arch, finite_or, fraction},
    timeline::model::{GapPolicy, ResponsiveDef, RuleDef, TargetDef, TimelineDef},
    timeline::value::{Value, ValueKind},
};

/// Validated, immutable phase table ready for per-frame evaluation.
///
/// Built once at setup from a [`TimelineDef`]; every configuration error is reported there.
/// Evaluation is a pure function of the [`FrameCtx`] and never fails.
#[derive(Clone, Debug)]
pub struct Timeline {
    def: TimelineDef,
    tracks: Vec<CompiledTrack>,
}

#[derive(Clone, Debug)]
struct CompiledTrack {
    name: String,
    kind: ValueKind,
    // Ordered by phase start.
    segments: Vec<Segment>,
}

#[derive(Clone, Debug)]
struct Segment {
    start: f64,
    end: f64,
    crossfade: Ease,
    rule: RuleDef,
}

impl Timeline {
    /// Validate and compile `def`.
    #[tracing::instrument(skip(def), fields(tracks = def.tracks.len(), phases = def.phases.len()))]
    pub fn new(def: TimelineDef) -> ScrollweaveResult<Self> {
        def.validate()?;

        let tracks = def
            .tracks
            .iter()
            .map(|(name, &kind)| CompiledTrack {
                name: name.clone(),
                kind,
                segments: def
                    .phases
                    .iter()
                    .filter_map(|phase| {
                        phase.rules.get(name).map(|rule| Segment {
                            start: phase.start,
                            end: phase.end,
                            crossfade: phase.crossfade.unwrap_or_default(),
                            rule: rule.clone(),
                        })
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        for t in &tracks {
            tracing::debug!(track = %t.name, kind = %t.kind, segments = t.segments.len(), "compiled track");
        }
        Ok(Self { def, tracks })
    }

    /// Parse, validate and compile a JSON definition.
    pub fn from_reader(reader: impl Read) -> ScrollweaveResult<Self> {
        Self::new(TimelineDef::from_reader(reader)?)
    }

    /// Parse, validate and compile a JSON definition file.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollweaveResult<Self> {
        Self::new(TimelineDef::from_path(path)?)
    }

    /// Definition this timeline was compiled from.
    pub fn def(&self) -> &TimelineDef {
        &self.def
    }

    /// Declared tracks in name order.
    pub fn tracks(&self) -> impl Iterator<Item = (&str, ValueKind)> {
        self.tracks.iter().map(|t| (t.name.as_str(), t.kind))
    }

    /// Kind of `track`, if declared.
    pub fn track_kind(&self, track: &str) -> Option<ValueKind> {
        self.find(track).map(|t| t.kind)
    }

    /// Evaluate every track at `progress` with no clock and no anchors.
    pub fn evaluate(&self, progress: impl Into<Progress>) -> VisualState {
        self.evaluate_frame(&FrameCtx::at(progress))
    }

    /// Evaluate every track for one frame.
    pub fn evaluate_frame(&self, ctx: &FrameCtx<'_>) -> VisualState {
        let mut state = VisualState::default();
        for track in &self.tracks {
            state.insert(track.name.clone(), self.eval_track(track, ctx));
        }
        state
    }

    /// Evaluate a single track; `None` when `track` is not declared.
    pub fn evaluate_track(&self, track: &str, ctx: &FrameCtx<'_>) -> Option<Value> {
        self.find(track).map(|t| self.eval_track(t, ctx))
    }

    fn find(&self, track: &str) -> Option<&CompiledTrack> {
        self.tracks
            .binary_search_by(|t| t.name.as_str().cmp(track))
            .ok()
            .map(|i| &self.tracks[i])
    }

    fn eval_track(&self, track: &CompiledTrack, ctx: &FrameCtx<'_>) -> Value {
        let p = ctx.progress.get();
        let time = finite_or(ctx.time_secs, 0.0);
        let sample = Sampler {
            ctx,
            time,
            projection: &self.def.projection,
            kind: track.kind,
        };

        // Closed intervals; validation leaves at most two overlapping, so the last two hits
        // are the ones that matter when a touching phase also contains `p`.
        let mut hits: SmallVec<[&Segment; 2]> = SmallVec::new();
        for seg in &track.segments {
            if seg.start > p {
                break;
            }
            if p <= seg.end {
                if hits.len() == 2 {
                    hits.remove(0);
                }
                hits.push(seg);
            }
        }

        let v = match hits.as_slice() {
            [] => self.eval_gap(track, p, &sample),
            [only] => sample.segment(only, p),
            [a, b] if b.start < a.end => {
                let w = b.crossfade.apply(fraction(p, b.start, a.end.min(b.end)));
                Value::lerp(&sample.segment(a, p), &sample.segment(b, p), w)
            }
            [.., b] => sample.segment(b, p),
        };

        if v.is_finite() {
            v
        } else {
            tracing::trace!(track = %track.name, progress = p, "non-finite value replaced");
            Value::zero(track.kind)
        }
    }

    fn eval_gap(&self, track: &CompiledTrack, p: f64, sample: &Sampler<'_, '_>) -> Value {
        let prev = track
            .segments
            .iter()
            .filter(|s| s.end < p)
            .max_by(|a, b| a.end.total_cmp(&b.end));
        let next = track.segments.iter().find(|s| s.start > p);

        let end_of = |s: &Segment| sample.rule(&s.rule, 1.0);
        let start_of = |s: &Segment| sample.rule(&s.rule, 0.0);

        let v = match self.def.gap {
            Some(GapPolicy::HoldPrevious) => prev.map(end_of).or_else(|| next.map(start_of)),
            Some(GapPolicy::HoldNext) => next.map(start_of).or_else(|| prev.map(end_of)),
            None => None,
        };
        v.unwrap_or_else(|| Value::zero(track.kind))
    }
}

struct Sampler<'c, 'a> {
    ctx: &'c FrameCtx<'a>,
    time: f64,
    projection: &'c Projection,
    kind: ValueKind,
}

impl Sampler<'_, '_> {
    fn segment(&self, seg: &Segment, p: f64) -> Value {
        self.rule(&seg.rule, fraction(p, seg.start, seg.end))
    }

    fn rule(&self, rule: &RuleDef, t: f64) -> Value {
        match rule {
            RuleDef::Hold(v) => v.clone(),
            RuleDef::Tween { from, to, ease } => {
                let target = self.target(to);
                Value::lerp(from, &target, ease.apply(t))
            }
            RuleDef::Keys(keys) => keys.sample(t).unwrap_or_else(|| Value::zero(self.kind)),
            RuleDef::Arch { base, peak } => Value::Scalar(base + (peak - base) * arch(t)),
            RuleDef::Orbit(spec) => Value::Orbit(spec.sample(t, self.time)),
            RuleDef::Switch {
                anchor,
                edge,
                viewport_fraction,
                before,
                after,
            } => {
                let Some(r) = self.ctx.anchors.bounds(anchor) else {
                    return before.clone();
                };
                let extent = axis_extent(self.ctx.viewport, edge.is_horizontal());
                if edge.pixels(r) < viewport_fraction * extent {
                    after.clone()
                } else {
                    before.clone()
                }
            }
        }
    }

    fn target(&self, to: &TargetDef) -> Value {
        match to {
            TargetDef::Static(v) => v.clone(),
            TargetDef::Anchor {
                anchor,
                field,
                fallback,
            } => match self.ctx.anchors.bounds(anchor) {
                Some(r) => {
                    let v = field.resolve(r, self.projection, self.ctx.viewport);
                    if v.is_finite() {
                        v
                    } else {
                        tracing::trace!(anchor = %anchor, "anchor projected to a non-finite value");
                        fallback.clone()
                    }
                }
                None => fallback.clone(),
            },
        }
    }
}

fn axis_extent(viewport: Viewport, horizontal: bool) -> f64 {
    if horizontal {
        viewport.width
    } else {
        viewport.height
    }
}

/// Evaluate `timeline` at `progress` with no clock and no anchors.
pub fn evaluate(progress: impl Into<Progress>, timeline: &Timeline) -> VisualState {
    timeline.evaluate(progress)
}

/// Expanded and compact timelines for one scene, picked by layout mode.
#[derive(Clone, Debug)]
pub struct ResponsiveTimeline {
    expanded: Timeline,
    compact: Option<Timeline>,
}

impl ResponsiveTimeline {
    /// Validate and compile both tables.
    pub fn new(def: ResponsiveDef) -> ScrollweaveResult<Self> {
        let expanded = Timeline::new(def.expanded)?;
        let compact = def.compact.map(Timeline::new).transpose()?;
        Ok(Self { expanded, compact })
    }

    /// Parse, validate and compile a JSON definition file.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollweaveResult<Self> {
        Self::new(ResponsiveDef::from_path(path)?)
    }

    /// Timeline for `mode`.
    pub fn select(&self, mode: LayoutMode) -> &Timeline {
        match (mode, &self.compact) {
            (LayoutMode::Compact, Some(compact)) => compact,
            _ => &self.expanded,
        }
    }

    /// Timeline for a viewport, using the compact breakpoint.
    pub fn for_viewport(&self, viewport: Viewport) -> &Timeline {
        self.select(LayoutMode::from_viewport_width(viewport.width))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/compile.rs"]
mod tests;
