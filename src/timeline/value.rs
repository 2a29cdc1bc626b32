use std::fmt;

use crate::{
    animation::keyframes::Lerp,
    animation::orbit::Orbit,
    foundation::core::{Rgba8, Vec2},
};

/// Kind of value a track carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `f64`: opacity, scale, rotation, a single coordinate.
    Scalar,
    /// 2D position or offset.
    Vec2,
    /// Straight-alpha RGBA8 color.
    Color,
    /// Orbital placement (angle, radius, scale).
    Orbit,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scalar => "scalar",
            Self::Vec2 => "vec2",
            Self::Color => "color",
            Self::Orbit => "orbit",
        };
        f.pad(s)
    }
}

/// One track value.
///
/// Serialized untagged: a number, a `#rrggbbaa` string, `{x, y}`, or `{angle, radius, scale}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Scalar value.
    Scalar(f64),
    /// Color value.
    Color(Rgba8),
    /// 2D vector value.
    Vec2(Vec2),
    /// Orbital value.
    Orbit(Orbit),
}

impl Value {
    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Color(_) => ValueKind::Color,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Orbit(_) => ValueKind::Orbit,
        }
    }

    /// Neutral value of `kind`.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Scalar => Self::Scalar(0.0),
            ValueKind::Vec2 => Self::Vec2(Vec2::ZERO),
            ValueKind::Color => Self::Color(Rgba8::rgba(0, 0, 0, 0)),
            ValueKind::Orbit => Self::Orbit(Orbit {
                angle: 0.0,
                radius: 0.0,
                scale: 1.0,
            }),
        }
    }

    /// `true` when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Color(_) => true,
            Self::Vec2(v) => v.x.is_finite() && v.y.is_finite(),
            Self::Orbit(o) => o.is_finite(),
        }
    }

    /// Scalar payload.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Vec2 payload.
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// Color payload.
    pub fn as_color(&self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Orbit payload.
    pub fn as_orbit(&self) -> Option<Orbit> {
        match self {
            Self::Orbit(o) => Some(*o),
            _ => None,
        }
    }
}

impl Lerp for Value {
    /// Kinds never mix in a validated timeline; a mismatch steps at the midpoint.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Vec2(x), Self::Vec2(y)) => Self::Vec2(<Vec2 as Lerp>::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(Rgba8::lerp(x, y, t)),
            (Self::Orbit(x), Self::Orbit(y)) => Self::Orbit(Orbit::lerp(x, y, t)),
            _ if t < 0.5 => a.clone(),
            _ => b.clone(),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<(f64, f64)> for Value {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Vec2(Vec2::new(x, y))
    }
}

impl From<Rgba8> for Value {
    fn from(c: Rgba8) -> Self {
        Self::Color(c)
    }
}

impl From<Orbit> for Value {
    fn from(o: Orbit) -> Self {
        Self::Orbit(o)
    }
}
