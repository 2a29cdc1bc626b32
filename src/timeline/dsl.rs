use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::keyframes::{InterpMode, Keyframe, Keyframes},
    animation::orbit::OrbitSpec,
    eval::anchor::{AnchorField, Projection},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::compile::Timeline,
    timeline::model::{GapPolicy, PhaseDef, RuleDef, TargetDef, TimelineDef},
    timeline::value::{Value, ValueKind},
};

/// Fluent construction of a [`TimelineDef`] / [`Timeline`].
///
/// Builder misuse (duplicate tracks or rules) is collected and reported by [`Self::build_def`]
/// together with the regular validation.
pub struct TimelineBuilder {
    def: TimelineDef,
    errors: Vec<String>,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineBuilder {
    /// Empty builder using viewport-pixel projection.
    pub fn new() -> Self {
        Self {
            def: TimelineDef::new(Projection::Viewport),
            errors: Vec::new(),
        }
    }

    /// Declare a track.
    pub fn track(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        let name = name.into();
        if self.def.tracks.insert(name.clone(), kind).is_some() {
            self.errors.push(format!("duplicate track '{name}'"));
        }
        self
    }

    /// Append a phase. Phases must be added in start order.
    pub fn phase(mut self, phase: PhaseBuilder) -> Self {
        let index = self.def.phases.len();
        for e in phase.errors {
            self.errors.push(format!("{}: {e}", phase.def.label(index)));
        }
        self.def.phases.push(phase.def);
        self
    }

    /// Gap policy for uncovered progress ranges.
    pub fn gap(mut self, policy: GapPolicy) -> Self {
        self.def.gap = Some(policy);
        self
    }

    /// Projection used by anchor targets.
    pub fn projection(mut self, projection: Projection) -> Self {
        self.def.projection = projection;
        self
    }

    /// Finish and validate without compiling.
    pub fn build_def(self) -> ScrollweaveResult<TimelineDef> {
        if let Some(first) = self.errors.first() {
            return Err(ScrollweaveError::validation(first.clone()));
        }
        self.def.validate()?;
        Ok(self.def)
    }

    /// Finish, validate and compile.
    pub fn build(self) -> ScrollweaveResult<Timeline> {
        Timeline::new(self.build_def()?)
    }
}

/// Fluent construction of one [`PhaseDef`].
pub struct PhaseBuilder {
    def: PhaseDef,
    errors: Vec<String>,
}

impl PhaseBuilder {
    /// Phase over `[start, end]`.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            def: PhaseDef::new(start, end),
            errors: Vec::new(),
        }
    }

    /// Named phase over `[start, end]`.
    pub fn named(name: impl Into<String>, start: f64, end: f64) -> Self {
        let mut b = Self::new(start, end);
        b.def.name = Some(name.into());
        b
    }

    /// Blend curve used where this phase overlaps the previous one.
    pub fn crossfade(mut self, ease: Ease) -> Self {
        self.def.crossfade = Some(ease);
        self
    }

    /// Add an arbitrary rule.
    pub fn rule(mut self, track: impl Into<String>, rule: RuleDef) -> Self {
        let track = track.into();
        if self.def.rules.contains_key(&track) {
            self.errors.push(format!("duplicate rule for track '{track}'"));
        } else {
            self.def.rules.insert(track, rule);
        }
        self
    }

    /// Constant value.
    pub fn hold(self, track: impl Into<String>, value: impl Into<Value>) -> Self {
        self.rule(track, RuleDef::Hold(value.into()))
    }

    /// Ease from `from` to `to`.
    pub fn tween(
        self,
        track: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<TargetDef>,
        ease: Ease,
    ) -> Self {
        self.rule(
            track,
            RuleDef::Tween {
                from: from.into(),
                to: to.into(),
                ease,
            },
        )
    }

    /// Ease from `from` toward a live anchor field, with `fallback` when it is missing.
    pub fn seek(
        self,
        track: impl Into<String>,
        from: impl Into<Value>,
        anchor: impl Into<String>,
        field: AnchorField,
        fallback: impl Into<Value>,
        ease: Ease,
    ) -> Self {
        self.tween(track, from, TargetDef::anchor(anchor, field, fallback), ease)
    }

    /// Linear keyframes.
    pub fn keys(self, track: impl Into<String>, keys: Vec<Keyframe<Value>>) -> Self {
        self.rule(track, RuleDef::Keys(Keyframes::linear(keys)))
    }

    /// Stepped keyframes.
    pub fn steps(self, track: impl Into<String>, keys: Vec<Keyframe<Value>>) -> Self {
        self.rule(
            track,
            RuleDef::Keys(Keyframes {
                keys,
                mode: InterpMode::Hold,
            }),
        )
    }

    /// Scalar swell `base → peak → base`.
    pub fn arch(self, track: impl Into<String>, base: f64, peak: f64) -> Self {
        self.rule(track, RuleDef::Arch { base, peak })
    }

    /// Orbital motion.
    pub fn orbit(self, track: impl Into<String>, spec: OrbitSpec) -> Self {
        self.rule(track, RuleDef::Orbit(spec))
    }

    /// Anchor threshold switch between two values.
    pub fn switch(
        self,
        track: impl Into<String>,
        anchor: impl Into<String>,
        edge: AnchorField,
        viewport_fraction: f64,
        before: impl Into<Value>,
        after: impl Into<Value>,
    ) -> Self {
        self.rule(
            track,
            RuleDef::Switch {
                anchor: anchor.into(),
                edge,
                viewport_fraction,
                before: before.into(),
                after: after.into(),
            },
        )
    }

    /// Finish without validation.
    pub fn build(self) -> ScrollweaveResult<PhaseDef> {
        if let Some(first) = self.errors.first() {
            return Err(ScrollweaveError::validation(first.clone()));
        }
        Ok(self.def)
    }
}

/// Linear keyframe at `at`.
pub fn key(at: f64, value: impl Into<Value>) -> Keyframe<Value> {
    Keyframe::new(at, value.into(), Ease::Linear)
}

/// Keyframe at `at` easing toward the next key with `ease`.
pub fn key_eased(at: f64, value: impl Into<Value>, ease: Ease) -> Keyframe<Value> {
    Keyframe::new(at, value.into(), ease)
}

/// Linear scalar keyframes from `(at, value)` pairs.
pub fn scalar_keys(pairs: &[(f64, f64)]) -> Vec<Keyframe<Value>> {
    pairs.iter().map(|&(at, v)| key(at, v)).collect()
}

/// Rules per track collected from `phases`, for introspection in tests and tooling.
pub fn rules_by_track(def: &TimelineDef) -> BTreeMap<&str, Vec<&RuleDef>> {
    let mut out: BTreeMap<&str, Vec<&RuleDef>> = BTreeMap::new();
    for phase in &def.phases {
        for (track, rule) in &phase.rules {
            out.entry(track.as_str()).or_default().push(rule);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
