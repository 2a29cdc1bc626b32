//! Exponential smoothing across frames.
//!
//! This is the only cross-frame state in the engine. The timeline stays a pure function of
//! progress; consumers that want eased-in motion own a [`DampingState`] (or a [`Damped`]
//! value) and feed each frame's target through it.

use std::collections::BTreeMap;

use crate::{
    animation::keyframes::Lerp,
    eval::state::VisualState,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::value::Value,
};

/// Per-frame smoothing factor `k ∈ (0, 1]`: `rendered = lerp(previous, target, k)`.
///
/// `k = 1` snaps to the target every frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Damping(f64);

impl Damping {
    /// No smoothing.
    pub const SNAP: Self = Self(1.0);

    /// Validate `k`.
    pub fn new(k: f64) -> ScrollweaveResult<Self> {
        if !k.is_finite() || k <= 0.0 || k > 1.0 {
            return Err(ScrollweaveError::animation(format!(
                "damping factor {k} must be within (0, 1]"
            )));
        }
        Ok(Self(k))
    }

    /// Raw factor.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Rescale a factor tuned at `reference_fps` to a frame that took `dt_secs`.
    ///
    /// `1 - (1 - k)^(dt * fps)`, so two half-length frames smooth as much as one full frame.
    /// Degenerate frame times leave the factor unchanged.
    pub fn per_frame_at(self, dt_secs: f64, reference_fps: f64) -> Self {
        let frames = dt_secs * reference_fps;
        if !frames.is_finite() || frames <= 0.0 {
            return self;
        }
        let k = 1.0 - (1.0 - self.0).powf(frames);
        Self(k.clamp(f64::MIN_POSITIVE, 1.0))
    }

    /// One smoothing step from `previous` toward `target`.
    pub fn step<T: Lerp>(self, previous: &T, target: &T) -> T {
        T::lerp(previous, target, self.0)
    }
}

impl TryFrom<f64> for Damping {
    type Error = ScrollweaveError;

    fn try_from(k: f64) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl From<Damping> for f64 {
    fn from(d: Damping) -> Self {
        d.0
    }
}

/// A single smoothed value. The first update snaps.
#[derive(Clone, Debug)]
pub struct Damped<T> {
    damping: Damping,
    current: Option<T>,
}

impl<T: Lerp + Clone> Damped<T> {
    /// Empty smoother.
    pub fn new(damping: Damping) -> Self {
        Self {
            damping,
            current: None,
        }
    }

    /// Move toward `target` and return the rendered value.
    pub fn update(&mut self, target: &T) -> &T {
        let next = match &self.current {
            Some(prev) => self.damping.step(prev, target),
            None => target.clone(),
        };
        self.current.insert(next)
    }

    /// Like [`Self::update`] with the factor rescaled to the frame time.
    pub fn update_dt(&mut self, target: &T, dt_secs: f64, reference_fps: f64) -> &T {
        let k = self.damping.per_frame_at(dt_secs, reference_fps);
        let next = match &self.current {
            Some(prev) => k.step(prev, target),
            None => target.clone(),
        };
        self.current.insert(next)
    }

    /// Last rendered value.
    pub fn value(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Forget the last value so the next update snaps.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Per-track smoothing of whole visual states.
///
/// Tracks without an override use the default factor. A track seen for the first time, or
/// whose kind changed, snaps to its target.
#[derive(Clone, Debug)]
pub struct DampingState {
    default: Damping,
    overrides: BTreeMap<String, Damping>,
    previous: BTreeMap<String, Value>,
}

impl Default for DampingState {
    fn default() -> Self {
        Self::new(Damping::SNAP)
    }
}

impl DampingState {
    /// State smoothing every track with `default`.
    pub fn new(default: Damping) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
            previous: BTreeMap::new(),
        }
    }

    /// Use `damping` for `track` instead of the default.
    pub fn with_override(mut self, track: impl Into<String>, damping: Damping) -> Self {
        self.set_override(track, damping);
        self
    }

    /// Use `damping` for `track` instead of the default.
    pub fn set_override(&mut self, track: impl Into<String>, damping: Damping) {
        self.overrides.insert(track.into(), damping);
    }

    /// Factor used for `track`.
    pub fn damping_for(&self, track: &str) -> Damping {
        self.overrides.get(track).copied().unwrap_or(self.default)
    }

    /// Smooth `target` against the previous frame and remember the result.
    pub fn apply(&mut self, target: &VisualState) -> VisualState {
        self.apply_with(target, |d| d)
    }

    /// Like [`Self::apply`] with each factor rescaled to a frame that took `dt_secs`.
    pub fn apply_dt(
        &mut self,
        target: &VisualState,
        dt_secs: f64,
        reference_fps: f64,
    ) -> VisualState {
        self.apply_with(target, |d| d.per_frame_at(dt_secs, reference_fps))
    }

    fn apply_with(
        &mut self,
        target: &VisualState,
        rescale: impl Fn(Damping) -> Damping,
    ) -> VisualState {
        let mut out = VisualState::default();
        for (track, value) in target.iter() {
            let k = rescale(self.damping_for(track));
            let next = match self.previous.get(track) {
                Some(prev) if prev.kind() == value.kind() => k.step(prev, value),
                _ => value.clone(),
            };
            self.previous.insert(track.to_owned(), next.clone());
            out.insert(track, next);
        }
        out
    }

    /// Last rendered value of `track`.
    pub fn previous(&self, track: &str) -> Option<&Value> {
        self.previous.get(track)
    }

    /// Forget every track so the next frame snaps.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    /// Forget one track.
    pub fn reset_track(&mut self, track: &str) {
        self.previous.remove(track);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/damping.rs"]
mod tests;
