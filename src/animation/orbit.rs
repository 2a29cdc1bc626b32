use std::f64::consts::{PI, TAU};

use crate::{
    animation::keyframes::Lerp,
    animation::proc::Oscillator,
    foundation::core::Vec2,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::math::{arch, wrap_angle},
};

/// Orbital motion driven by progress with optional time-based idle motion.
///
/// - `angle = rotations * 2π * t + phase_offset + drift * time + wobble(time)`
/// - `radius = radius_base + radius_swell * sin(π t)`
/// - `scale = 1 + breathe(time)`
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitSpec {
    /// Full turns accumulated over the phase.
    pub rotations: f64,
    /// Radius at both ends of the phase.
    pub radius_base: f64,
    /// Extra radius reached mid-phase.
    #[serde(default)]
    pub radius_swell: f64,
    /// Constant angle offset in radians.
    #[serde(default)]
    pub phase_offset: f64,
    /// Idle angular drift in radians per second.
    #[serde(default)]
    pub drift: f64,
    /// Time-based angle oscillation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wobble: Option<Oscillator>,
    /// Time-based scale oscillation around 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breathe: Option<Oscillator>,
}

impl OrbitSpec {
    /// Orbit with `rotations` turns and a swelling radius, no idle motion.
    pub fn new(rotations: f64, radius_base: f64, radius_swell: f64) -> Self {
        Self {
            rotations,
            radius_base,
            radius_swell,
            phase_offset: 0.0,
            drift: 0.0,
            wobble: None,
            breathe: None,
        }
    }

    /// Check parameters.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        let nums = [
            self.rotations,
            self.radius_base,
            self.radius_swell,
            self.phase_offset,
            self.drift,
        ];
        if nums.iter().any(|v| !v.is_finite()) {
            return Err(ScrollweaveError::animation(
                "orbit parameters must be finite",
            ));
        }
        if self.radius_base < 0.0 || self.radius_base + self.radius_swell < 0.0 {
            return Err(ScrollweaveError::animation(
                "orbit radius must stay non-negative",
            ));
        }
        for osc in self.wobble.iter().chain(self.breathe.iter()) {
            osc.validate()?;
        }
        Ok(())
    }

    /// Sample at local progress `t` and wall-clock `time_secs`.
    pub fn sample(&self, t: f64, time_secs: f64) -> Orbit {
        let t = t.clamp(0.0, 1.0);
        let idle = self.drift * time_secs + self.wobble.map_or(0.0, |o| o.sample(time_secs));
        Orbit {
            angle: self.rotations * TAU * t + self.phase_offset + idle,
            radius: self.radius_base + self.radius_swell * arch(t),
            scale: 1.0 + self.breathe.map_or(0.0, |o| o.sample(time_secs)),
        }
    }
}

/// Sampled orbital state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Orbit {
    /// Accumulated (unwrapped) angle in radians.
    pub angle: f64,
    /// Orbit radius.
    pub radius: f64,
    /// Scale factor for satellites.
    pub scale: f64,
}

impl Orbit {
    /// Angle wrapped into `[0, 2π)`.
    pub fn normalized_angle(&self) -> f64 {
        wrap_angle(self.angle)
    }

    /// Position of satellite `index` of `count`, spread evenly around the orbit.
    pub fn satellite(&self, index: usize, count: usize) -> Vec2 {
        let a = self.satellite_angle(index, count);
        Vec2::new(a.cos() * self.radius, a.sin() * self.radius)
    }

    /// Rotation of satellite `index` so that it points away from the direction of travel.
    pub fn satellite_heading(&self, index: usize, count: usize) -> f64 {
        self.satellite_angle(index, count) + PI
    }

    fn satellite_angle(&self, index: usize, count: usize) -> f64 {
        let count = count.max(1);
        self.angle + TAU * (index % count) as f64 / count as f64
    }

    /// `true` when every field is finite.
    pub fn is_finite(&self) -> bool {
        self.angle.is_finite() && self.radius.is_finite() && self.scale.is_finite()
    }
}

impl Lerp for Orbit {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            angle: a.angle + (b.angle - a.angle) * t,
            radius: a.radius + (b.radius - a.radius) * t,
            scale: a.scale + (b.scale - a.scale) * t,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/orbit.rs"]
mod tests;
