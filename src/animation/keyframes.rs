use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2, Vec3},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::math,
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        math::lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(math::lerp(a.x, b.x, t), math::lerp(a.y, b.y, t))
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            math::lerp(a.x, b.x, t),
            math::lerp(a.y, b.y, t),
            math::lerp(a.z, b.z, t),
        )
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Any positive step moves at least one unit so repeated damping reaches `b`.
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let v = math::lerp(f64::from(a), f64::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8;
            if v == a && a != b && t > 0.0 {
                if b > a { a + 1 } else { a - 1 }
            } else {
                v
            }
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// One keyframe of a track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Position of the key in local progress, `[0, 1]`.
    pub at: f64,
    /// Value at `at`.
    pub value: T,
    /// Easing applied toward the next key.
    #[serde(default)]
    pub ease: Ease,
}

impl<T> Keyframe<T> {
    /// Create a keyframe.
    pub fn new(at: f64, value: T, ease: Ease) -> Self {
        Self { at, value, ease }
    }
}

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    /// Hold the previous key value until the next key.
    Hold,
    /// Interpolate between keys using the key's [`Ease`].
    #[default]
    Linear,
}

/// Keyframed track over local progress.
///
/// Before the first key the first value holds; after the last key the last value holds.
/// Two keys at the same position form an instantaneous step to the later key.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keys sorted by `at`.
    pub keys: Vec<Keyframe<T>>,
    /// Interpolation mode between adjacent keys.
    #[serde(default)]
    pub mode: InterpMode,
}

impl<T> Keyframes<T> {
    /// Linear keyframes from `keys`.
    pub fn linear(keys: Vec<Keyframe<T>>) -> Self {
        Self {
            keys,
            mode: InterpMode::Linear,
        }
    }

    /// Validate key ordering, positions and eases.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        if self.keys.is_empty() {
            return Err(ScrollweaveError::animation(
                "keyframes must have at least one key",
            ));
        }
        for (i, k) in self.keys.iter().enumerate() {
            if !k.at.is_finite() || !(0.0..=1.0).contains(&k.at) {
                return Err(ScrollweaveError::animation(format!(
                    "key[{i}] position {} must be within [0, 1]",
                    k.at
                )));
            }
            k.ease
                .validate()
                .map_err(|e| ScrollweaveError::animation(format!("key[{i}]: {e}")))?;
        }
        if !self.keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(ScrollweaveError::animation(
                "keyframes must be sorted by position",
            ));
        }
        Ok(())
    }
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Sample at local progress `t`; `None` only when there are no keys.
    pub fn sample(&self, t: f64) -> Option<T> {
        let first = self.keys.first()?;
        let idx = self.keys.partition_point(|k| k.at <= t);

        if idx == 0 {
            return Some(first.value.clone());
        }
        if idx >= self.keys.len() {
            return self.keys.last().map(|k| k.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return Some(b.value.clone());
        }

        match self.mode {
            InterpMode::Hold => Some(a.value.clone()),
            InterpMode::Linear => {
                let te = a.ease.apply((t - a.at) / span);
                Some(T::lerp(&a.value, &b.value, te))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
