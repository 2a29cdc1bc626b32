use std::collections::BTreeMap;

use crate::{
    animation::orbit::Orbit,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::value::Value,
};

/// Every track value at one progress.
///
/// Serializes as a plain `{ track: value }` map, ordered by track name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VisualState {
    values: BTreeMap<String, Value>,
}

impl VisualState {
    pub(crate) fn insert(&mut self, track: impl Into<String>, value: Value) {
        self.values.insert(track.into(), value);
    }

    /// Value of `track`.
    pub fn get(&self, track: &str) -> Option<&Value> {
        self.values.get(track)
    }

    /// Scalar value of `track`, if it is a scalar track.
    pub fn scalar(&self, track: &str) -> Option<f64> {
        self.get(track).and_then(Value::as_scalar)
    }

    /// Vec2 value of `track`.
    pub fn vec2(&self, track: &str) -> Option<Vec2> {
        self.get(track).and_then(Value::as_vec2)
    }

    /// Color value of `track`.
    pub fn color(&self, track: &str) -> Option<Rgba8> {
        self.get(track).and_then(Value::as_color)
    }

    /// Orbit value of `track`.
    pub fn orbit(&self, track: &str) -> Option<Orbit> {
        self.get(track).and_then(Value::as_orbit)
    }

    /// Scalar value of `track`, or an evaluation error naming what is missing.
    pub fn require_scalar(&self, track: &str) -> ScrollweaveResult<f64> {
        self.scalar(track).ok_or_else(|| missing(track, "scalar"))
    }

    /// Vec2 value of `track`, or an evaluation error naming what is missing.
    pub fn require_vec2(&self, track: &str) -> ScrollweaveResult<Vec2> {
        self.vec2(track).ok_or_else(|| missing(track, "vec2"))
    }

    /// Color value of `track`, or an evaluation error naming what is missing.
    pub fn require_color(&self, track: &str) -> ScrollweaveResult<Rgba8> {
        self.color(track).ok_or_else(|| missing(track, "color"))
    }

    /// Orbit value of `track`, or an evaluation error naming what is missing.
    pub fn require_orbit(&self, track: &str) -> ScrollweaveResult<Orbit> {
        self.orbit(track).ok_or_else(|| missing(track, "orbit"))
    }

    /// Tracks and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when no track was evaluated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` when no value carries NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.values.values().all(Value::is_finite)
    }
}

fn missing(track: &str, kind: &str) -> ScrollweaveError {
    ScrollweaveError::evaluation(format!("track '{track}' has no {kind} value"))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/state.rs"]
mod tests;
