use std::f64::consts::TAU;

use crate::{
    animation::proc::Rng64,
    foundation::core::Vec3,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
};

/// Shape a particle cloud settles into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formation {
    /// Uniform box `extent × extent × depth` centered on the origin.
    Scatter {
        /// Width and height.
        extent: f64,
        /// Depth.
        depth: f64,
    },
    /// Uniform over a sphere surface.
    Sphere {
        /// Sphere radius.
        radius: f64,
    },
    /// Uniform angles over a torus lying in the XZ plane.
    Torus {
        /// Distance from the center to the tube center.
        major: f64,
        /// Tube radius.
        minor: f64,
    },
    /// Double helix along Y; even particles on one strand, odd on the other.
    Helix {
        /// Strand radius.
        radius: f64,
        /// Total height.
        height: f64,
        /// Full turns over the height.
        turns: f64,
    },
    /// Everything at the origin.
    Point,
}

impl Formation {
    /// Reject negative or non-finite dimensions.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        let dims = match *self {
            Self::Scatter { extent, depth } => [extent, depth, 0.0],
            Self::Sphere { radius } => [radius, 0.0, 0.0],
            Self::Torus { major, minor } => [major, minor, 0.0],
            Self::Helix {
                radius,
                height,
                turns,
            } => [radius, height, turns],
            Self::Point => [0.0; 3],
        };
        if dims.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ScrollweaveError::validation(format!(
                "{} formation dimensions must be finite and non-negative",
                self.name()
            )));
        }
        Ok(())
    }

    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scatter { .. } => "scatter",
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
            Self::Helix { .. } => "helix",
            Self::Point => "point",
        }
    }

    /// Target positions for `count` particles.
    ///
    /// Random formations draw from `rng`; the helix is laid out by index.
    pub fn targets(&self, count: usize, rng: &mut Rng64) -> Vec<Vec3> {
        (0..count).map(|i| self.place(i, count, rng)).collect()
    }

    fn place(&self, index: usize, count: usize, rng: &mut Rng64) -> Vec3 {
        match *self {
            Self::Scatter { extent, depth } => Vec3::new(
                (rng.next_f64_01() - 0.5) * extent,
                (rng.next_f64_01() - 0.5) * extent,
                (rng.next_f64_01() - 0.5) * depth,
            ),
            Self::Sphere { radius } => {
                let phi = (2.0 * rng.next_f64_01() - 1.0).acos();
                let theta = rng.next_f64_01() * TAU;
                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            }
            Self::Torus { major, minor } => {
                let theta = rng.next_f64_01() * TAU;
                let phi = rng.next_f64_01() * TAU;
                let ring = major + minor * phi.cos();
                Vec3::new(ring * theta.cos(), minor * phi.sin(), ring * theta.sin())
            }
            Self::Helix {
                radius,
                height,
                turns,
            } => {
                let u = index as f64 / count.max(1) as f64;
                let t = u * TAU * turns;
                let strand = if index % 2 == 0 { 1.0 } else { -1.0 };
                Vec3::new(
                    t.cos() * radius * strand,
                    (u - 0.5) * height,
                    t.sin() * radius * strand,
                )
            }
            Self::Point => Vec3::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/formation.rs"]
mod tests;
