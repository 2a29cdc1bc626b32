use std::fmt;
use std::ops::{Add, Mul, Sub};

pub use kurbo::{Point, Rect, Vec2};

/// Normalized scroll progress, always inside `[0, 1]`.
///
/// Construction clamps; `NaN` maps to `0`. Progress is never stored across frames, it is
/// derived fresh from the scroll observer every time.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Progress at the top of the scrollable region.
    pub const START: Self = Self(0.0);
    /// Progress at the bottom of the scrollable region.
    pub const END: Self = Self(1.0);

    /// Clamp `value` into `[0, 1]`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Derive progress from a raw scroll offset and the scrollable extent.
    ///
    /// A non-positive or non-finite extent yields [`Progress::START`].
    pub fn from_scroll(offset: f64, scrollable: f64) -> Self {
        if !scrollable.is_finite() || scrollable <= 0.0 {
            return Self::START;
        }
        Self::new(offset / scrollable)
    }

    /// Raw value in `[0, 1]`.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport; degenerate sizes are raised to one pixel.
    pub fn new(width: f64, height: f64) -> Self {
        fn sane(v: f64) -> f64 {
            if v.is_finite() && v >= 1.0 { v } else { 1.0 }
        }
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Viewport widths below this many pixels select [`LayoutMode::Compact`].
pub const COMPACT_BREAKPOINT_PX: f64 = 768.0;

/// Which of two static phase tables a consumer runs with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Narrow (mobile) layout.
    Compact,
    /// Wide (desktop) layout.
    #[default]
    Expanded,
}

impl LayoutMode {
    /// Pick a layout for a viewport width.
    pub fn from_viewport_width(width: f64) -> Self {
        if width < COMPACT_BREAKPOINT_PX {
            Self::Compact
        } else {
            Self::Expanded
        }
    }
}

/// Plain 3D vector used by particle formations.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate around the Y axis by `angle` radians.
    pub fn rotate_y(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.z * s, self.y, self.x * s + self.z * c)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Straight-alpha RGBA8 color.
///
/// Serialized as `#rrggbbaa`; parsed from `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` / `#rrggbbaa` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        // from_str_radix alone would take a sign ("+1").
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex color \"{s}\""));
        }

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
