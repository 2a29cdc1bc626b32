use std::f64::consts::TAU;

use crate::{
    animation::keyframes::Lerp,
    animation::proc::Rng64,
    eval::damping::Damping,
    foundation::core::Vec3,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::math::finite_or,
    particles::formation::Formation,
    particles::motion::{Dispersal, IdleMotion, Jitter},
};

/// Default amplitude of the per-particle micro-float.
pub const DEFAULT_FLOAT_AMP: f64 = 0.05;

/// Per-particle smoothing used by the story canvas.
pub const SWARM_DAMPING: f64 = 0.04;

/// Precomputed particle targets for a sequence of formations.
///
/// A scalar formation cursor in `[0, n - 1]` selects and blends formations: the integer part
/// picks the source formation, the fractional part blends toward the next one. Each
/// formation may carry an [`IdleMotion`], and an optional [`Dispersal`] reacts to a `settle`
/// offset.
#[derive(Clone, Debug)]
pub struct ParticleField {
    formations: Vec<Formation>,
    // targets[formation][particle]
    targets: Vec<Vec<Vec3>>,
    jitter: Vec<Jitter>,
    motions: Vec<IdleMotion>,
    dispersal: Option<Dispersal>,
    float_amp: f64,
}

impl ParticleField {
    /// Lay out `count` particles for every formation, deterministically from `seed`.
    #[tracing::instrument(skip(formations), fields(formations = formations.len()))]
    pub fn generate(count: usize, seed: u64, formations: &[Formation]) -> ScrollweaveResult<Self> {
        if count == 0 {
            return Err(ScrollweaveError::validation(
                "particle count must be > 0",
            ));
        }
        if formations.is_empty() {
            return Err(ScrollweaveError::validation(
                "particle field needs at least one formation",
            ));
        }
        for f in formations {
            f.validate()?;
        }

        let mut rng = Rng64::new(seed);
        let jitter = (0..count)
            .map(|_| Jitter {
                ox: rng.next_f64_01() * TAU,
                oy: rng.next_f64_01() * TAU,
                speed: rng.next_f64_01() * 0.5 + 0.5,
            })
            .collect();
        let targets = formations
            .iter()
            .map(|f| f.targets(count, &mut rng))
            .collect();

        Ok(Self {
            formations: formations.to_vec(),
            targets,
            jitter,
            motions: vec![IdleMotion::STILL; formations.len()],
            dispersal: None,
            float_amp: DEFAULT_FLOAT_AMP,
        })
    }

    /// Replace the micro-float amplitude (0 disables it).
    pub fn with_float_amp(mut self, amp: f64) -> Self {
        self.float_amp = finite_or(amp, 0.0);
        self
    }

    /// Attach idle motion to formation `index`.
    pub fn with_motion(mut self, index: usize, motion: IdleMotion) -> ScrollweaveResult<Self> {
        motion.validate()?;
        let Some(slot) = self.motions.get_mut(index) else {
            return Err(ScrollweaveError::validation(format!(
                "idle motion for formation {index}, but the field has {}",
                self.formations.len()
            )));
        };
        *slot = motion;
        Ok(self)
    }

    /// Release and sink the cloud as `settle` goes negative.
    pub fn with_dispersal(mut self, dispersal: Dispersal) -> ScrollweaveResult<Self> {
        dispersal.validate()?;
        self.dispersal = Some(dispersal);
        Ok(self)
    }

    /// Idle motion of formation `index`.
    pub fn motion(&self, index: usize) -> Option<&IdleMotion> {
        self.motions.get(index)
    }

    /// Configured dispersal, if any.
    pub fn dispersal(&self) -> Option<&Dispersal> {
        self.dispersal.as_ref()
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.jitter.len()
    }

    /// Always `false`; a field holds at least one particle.
    pub fn is_empty(&self) -> bool {
        self.jitter.is_empty()
    }

    /// Formations in cursor order.
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    /// Highest meaningful cursor value.
    pub fn max_cursor(&self) -> f64 {
        (self.formations.len() - 1) as f64
    }

    /// Targets of formation `index`.
    pub fn targets(&self, index: usize) -> Option<&[Vec3]> {
        self.targets.get(index).map(Vec::as_slice)
    }

    /// Speed factor of particle `index` in `[0.5, 1)`.
    pub fn speed(&self, index: usize) -> Option<f64> {
        self.jitter.get(index).map(|j| j.speed)
    }

    /// Write every particle's target at `cursor` and `time_secs` into `out`.
    pub fn sample(&self, cursor: f64, time_secs: f64, out: &mut Vec<Vec3>) {
        self.sample_settled(cursor, 0.0, time_secs, out);
    }

    /// Like [`ParticleField::sample`], with the cloud lowered by `settle` (0 or negative).
    ///
    /// With a [`Dispersal`] the cloud also loosens out of its formation; without one `settle`
    /// is a plain downward shift.
    pub fn sample_settled(&self, cursor: f64, settle: f64, time_secs: f64, out: &mut Vec<Vec3>) {
        let cursor = finite_or(cursor, 0.0).clamp(0.0, self.max_cursor());
        let settle = finite_or(settle, 0.0);
        let time = finite_or(time_secs, 0.0);
        let from = (cursor.floor() as usize).min(self.targets.len() - 1);
        let to = (from + 1).min(self.targets.len() - 1);
        let blend = if from == to { 0.0 } else { cursor - from as f64 };
        let (m_from, m_to) = (&self.motions[from], &self.motions[to]);

        out.clear();
        out.extend(
            self.targets[from]
                .iter()
                .zip(&self.targets[to])
                .zip(&self.jitter)
                .enumerate()
                .map(|(i, ((a, b), j))| {
                    let a = m_from.apply(*a, i, j, time);
                    let b = m_to.apply(*b, i, j, time);
                    let p = Vec3::lerp(&a, &b, blend);
                    let p = match &self.dispersal {
                        Some(d) => d.apply(p, settle, j, time),
                        None => Vec3::new(p.x, p.y + settle, p.z),
                    };
                    p + Vec3::new(
                        (time * 0.5 + j.ox).sin() * self.float_amp,
                        (time * 0.4 + j.oy).cos() * self.float_amp,
                        0.0,
                    )
                }),
        );
    }
}

/// A particle field plus per-particle damping toward the sampled targets.
///
/// Positions start at the first formation and ease toward each frame's targets.
#[derive(Clone, Debug)]
pub struct ParticleSwarm {
    field: ParticleField,
    damping: Damping,
    positions: Vec<Vec3>,
    scratch: Vec<Vec3>,
}

impl ParticleSwarm {
    /// Swarm over `field` smoothed with `damping`.
    pub fn new(field: ParticleField, damping: Damping) -> Self {
        let positions = field.targets.first().cloned().unwrap_or_default();
        Self {
            field,
            damping,
            positions,
            scratch: Vec::new(),
        }
    }

    /// The underlying field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Current positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Advance one frame toward the targets at `cursor` and return the new positions.
    pub fn update(&mut self, cursor: f64, time_secs: f64) -> &[Vec3] {
        self.update_settled(cursor, 0.0, time_secs)
    }

    /// Advance one frame toward the targets at `cursor` lowered by `settle`.
    pub fn update_settled(&mut self, cursor: f64, settle: f64, time_secs: f64) -> &[Vec3] {
        self.field
            .sample_settled(cursor, settle, time_secs, &mut self.scratch);
        for (p, t) in self.positions.iter_mut().zip(&self.scratch) {
            *p = self.damping.step(&*p, t);
        }
        &self.positions
    }

    /// Put every particle back on the first formation.
    pub fn reset(&mut self) {
        self.positions = self.field.targets.first().cloned().unwrap_or_default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
