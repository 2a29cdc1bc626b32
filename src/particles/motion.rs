//! Time-driven motion layered on top of formation targets.
//!
//! Formations are static point sets. [`IdleMotion`] keeps a formation alive while it is on
//! screen (spin about Y, radial pulse, vertical sway) and [`Dispersal`] releases the cloud and
//! sinks it as a `settle` offset grows.

use crate::{
    animation::keyframes::Lerp,
    foundation::core::Vec3,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
};

/// Per-particle phase inputs shared by every motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Jitter {
    pub(crate) ox: f64,
    pub(crate) oy: f64,
    pub(crate) speed: f64,
}

/// Idle motion of one formation. All rates are in radians per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IdleMotion {
    /// Spin about the Y axis.
    pub spin: f64,
    /// Scale `spin` by each particle's speed factor.
    pub per_particle: bool,
    /// Relative pulse of the XZ radius (0 disables).
    pub pulse: f64,
    /// Pulse rate; particle `i` is offset by `0.1 * i` radians.
    pub pulse_rate: f64,
    /// Vertical sway amplitude (0 disables).
    pub sway: f64,
    /// Sway rate.
    pub sway_rate: f64,
}

impl IdleMotion {
    /// No motion.
    pub const STILL: Self = Self {
        spin: 0.0,
        per_particle: false,
        pulse: 0.0,
        pulse_rate: 0.0,
        sway: 0.0,
        sway_rate: 0.0,
    };

    /// Rigid spin about Y at `rate`.
    pub fn spin(rate: f64) -> Self {
        Self {
            spin: rate,
            ..Self::STILL
        }
    }

    /// Scale the spin by each particle's speed factor.
    pub fn per_particle(mut self) -> Self {
        self.per_particle = true;
        self
    }

    /// Add a radial pulse.
    pub fn with_pulse(mut self, amp: f64, rate: f64) -> Self {
        self.pulse = amp;
        self.pulse_rate = rate;
        self
    }

    /// Add a vertical sway.
    pub fn with_sway(mut self, amp: f64, rate: f64) -> Self {
        self.sway = amp;
        self.sway_rate = rate;
        self
    }

    /// `true` when the motion leaves targets untouched.
    pub fn is_still(&self) -> bool {
        self.spin == 0.0 && self.pulse == 0.0 && self.sway == 0.0
    }

    /// Reject non-finite parameters.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        let params = [
            self.spin,
            self.pulse,
            self.pulse_rate,
            self.sway,
            self.sway_rate,
        ];
        if params.iter().any(|v| !v.is_finite()) {
            return Err(ScrollweaveError::validation(
                "idle motion parameters must be finite",
            ));
        }
        Ok(())
    }

    pub(crate) fn apply(&self, target: Vec3, index: usize, jitter: &Jitter, time: f64) -> Vec3 {
        if self.is_still() {
            return target;
        }
        let mut p = target;
        if self.pulse != 0.0 {
            let k = 1.0 + (time * self.pulse_rate + index as f64 * 0.1).sin() * self.pulse;
            p.x *= k;
            p.z *= k;
        }
        if self.sway != 0.0 {
            p.y += (time * self.sway_rate + jitter.ox).sin() * self.sway;
        }
        let rate = if self.per_particle {
            self.spin * jitter.speed
        } else {
            self.spin
        };
        p.rotate_y(time * rate)
    }
}

/// Release of the cloud driven by a downward `settle` offset.
///
/// With `t = clamp(-settle / depth, 0, 1)`, particles leave their formation over the first
/// `release` of `t`, drift around a band `±spread_x` by `±spread_z` that narrows to half
/// width at full depth, and sink to `y = -t * depth`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dispersal {
    /// Settle distance at which the cloud is fully sunk. Must be > 0.
    pub depth: f64,
    /// Horizontal spread on X.
    pub spread_x: f64,
    /// Horizontal spread on Z.
    pub spread_z: f64,
    /// Horizontal drift rate.
    pub drift_rate: f64,
    /// Vertical sway amplitude.
    pub sway: f64,
    /// Vertical sway rate.
    pub sway_rate: f64,
    /// Fraction of `depth` over which particles leave the formation, in `[0, 1]`.
    pub release: f64,
}

impl Dispersal {
    /// Reject non-finite values, a non-positive depth and a release outside `[0, 1]`.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        let params = [
            self.depth,
            self.spread_x,
            self.spread_z,
            self.drift_rate,
            self.sway,
            self.sway_rate,
            self.release,
        ];
        if params.iter().any(|v| !v.is_finite()) {
            return Err(ScrollweaveError::validation(
                "dispersal parameters must be finite",
            ));
        }
        if self.depth <= 0.0 {
            return Err(ScrollweaveError::validation("dispersal depth must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.release) {
            return Err(ScrollweaveError::validation(
                "dispersal release must be within [0, 1]",
            ));
        }
        Ok(())
    }

    /// Sink amount in `[0, 1]` for a `settle` offset.
    pub fn amount(&self, settle: f64) -> f64 {
        (-settle / self.depth).clamp(0.0, 1.0)
    }

    pub(crate) fn apply(&self, formed: Vec3, settle: f64, jitter: &Jitter, time: f64) -> Vec3 {
        let t = self.amount(settle);
        if t == 0.0 {
            return formed;
        }
        let weight = if self.release == 0.0 {
            1.0
        } else {
            (t / self.release).min(1.0)
        };
        let drift = time * self.drift_rate;
        let loose = Vec3::new(
            (drift + jitter.ox).sin() * self.spread_x * (1.0 - t * 0.5),
            -t * self.depth + (time * self.sway_rate + jitter.oy).sin() * self.sway,
            (drift + jitter.oy).cos() * self.spread_z,
        );
        Vec3::lerp(&formed, &loose, weight)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/motion.rs"]
mod tests;
