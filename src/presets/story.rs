//! Full-page particle story: a cloud morphs through formations as the page scrolls.
//!
//! - `formation` (scalar): cursor into [`story_formations`], eased between sections.
//! - `settle` (scalar): downward drift of the cloud in the footer.
//! - `lines.opacity` (scalar): energy beams flare around the call to action.
//! - `orb.scale`, `orb.opacity` (scalar): central orb grows toward the end.
//!
//! Particles follow `formation` and `settle` through [`step_story_swarm`]. The sphere spins
//! at per-particle speed, the torus turns, the helix pulses while turning, and the footer
//! rains the cloud down.

use crate::{
    animation::ease::Ease,
    eval::damping::Damping,
    eval::state::VisualState,
    foundation::core::Vec3,
    foundation::error::ScrollweaveResult,
    particles::field::{ParticleField, ParticleSwarm, SWARM_DAMPING},
    particles::formation::Formation,
    particles::motion::{Dispersal, IdleMotion},
    timeline::compile::Timeline,
    timeline::dsl::{PhaseBuilder, TimelineBuilder, scalar_keys},
    timeline::model::GapPolicy,
    timeline::value::ValueKind,
};

/// Particle count of the story canvas.
pub const STORY_PARTICLE_COUNT: usize = 350;

/// Scalar track carrying the formation cursor.
pub const FORMATION_TRACK: &str = "formation";
/// Scalar track carrying the footer settle offset.
pub const SETTLE_TRACK: &str = "settle";

/// Footer rain: a ±3 × ±2 band that sinks 5 units as `settle` reaches -5.
pub const STORY_DISPERSAL: Dispersal = Dispersal {
    depth: 5.0,
    spread_x: 3.0,
    spread_z: 2.0,
    drift_rate: 0.2,
    sway: 0.5,
    sway_rate: 0.3,
    release: 0.2,
};

/// Idle motion per formation, in [`story_formations`] order.
pub fn story_motions() -> Vec<IdleMotion> {
    vec![
        IdleMotion::STILL,
        IdleMotion::spin(0.15).per_particle().with_sway(0.3, 0.5),
        IdleMotion::spin(0.2),
        IdleMotion::spin(0.3)
            .with_pulse(0.15, 2.0)
            .with_sway(0.3, 0.8),
        IdleMotion::STILL,
    ]
}

/// Formations in cursor order: scatter, sphere, torus, helix, point.
pub fn story_formations() -> Vec<Formation> {
    vec![
        Formation::Scatter {
            extent: 20.0,
            depth: 10.0,
        },
        Formation::Sphere { radius: 2.5 },
        Formation::Torus {
            major: 3.5,
            minor: 0.8,
        },
        Formation::Helix {
            radius: 2.0,
            height: 8.0,
            turns: 3.0,
        },
        Formation::Point,
    ]
}

/// Builder for the story timeline.
pub fn story_canvas_builder() -> TimelineBuilder {
    TimelineBuilder::new()
        .gap(GapPolicy::HoldNext)
        .track(FORMATION_TRACK, ValueKind::Scalar)
        .track(SETTLE_TRACK, ValueKind::Scalar)
        .track("lines.opacity", ValueKind::Scalar)
        .track("orb.scale", ValueKind::Scalar)
        .track("orb.opacity", ValueKind::Scalar)
        .phase(
            PhaseBuilder::named("orb", 0.0, 1.0)
                .keys(
                    "orb.scale",
                    scalar_keys(&[(0.78, 0.1), (0.90, 1.6), (0.95, 1.6), (1.0, 1.1)]),
                )
                .keys(
                    "orb.opacity",
                    scalar_keys(&[(0.78, 0.2), (0.90, 0.8), (0.95, 0.8), (1.0, 0.55)]),
                ),
        )
        .phase(PhaseBuilder::named("hero", 0.0, 0.15).tween("formation", 0.0, 1.0, Ease::Smoothstep))
        .phase(PhaseBuilder::named("proof", 0.15, 0.30).hold("formation", 1.0))
        .phase(
            PhaseBuilder::named("services", 0.30, 0.50).tween("formation", 1.0, 2.0, Ease::Smoothstep),
        )
        .phase(
            PhaseBuilder::named("process", 0.50, 0.65).tween("formation", 2.0, 3.0, Ease::Smoothstep),
        )
        .phase(PhaseBuilder::named("results", 0.65, 0.80).hold("formation", 3.0))
        .phase(PhaseBuilder::named("lines", 0.78, 0.92).arch("lines.opacity", 0.0, 0.4))
        .phase(PhaseBuilder::named("cta", 0.80, 0.90).tween("formation", 3.0, 4.0, Ease::InCubic))
        .phase(
            PhaseBuilder::named("footer", 0.90, 1.0)
                .hold("formation", 4.0)
                .tween("settle", 0.0, -5.0, Ease::Linear),
        )
}

/// The story timeline.
pub fn story_canvas() -> ScrollweaveResult<Timeline> {
    story_canvas_builder().build()
}

/// Particle field for the story formations, with their idle motion and the footer rain.
pub fn story_particles(seed: u64) -> ScrollweaveResult<ParticleField> {
    let mut field = ParticleField::generate(STORY_PARTICLE_COUNT, seed, &story_formations())?
        .with_dispersal(STORY_DISPERSAL)?;
    for (i, motion) in story_motions().into_iter().enumerate() {
        field = field.with_motion(i, motion)?;
    }
    Ok(field)
}

/// Damped particle swarm for the story formations.
pub fn story_swarm(seed: u64) -> ScrollweaveResult<ParticleSwarm> {
    Ok(ParticleSwarm::new(
        story_particles(seed)?,
        Damping::new(SWARM_DAMPING)?,
    ))
}

/// Advance `swarm` one frame from an evaluated story state.
pub fn step_story_swarm<'a>(
    swarm: &'a mut ParticleSwarm,
    state: &VisualState,
    time_secs: f64,
) -> ScrollweaveResult<&'a [Vec3]> {
    let cursor = state.require_scalar(FORMATION_TRACK)?;
    let settle = state.require_scalar(SETTLE_TRACK)?;
    Ok(swarm.update_settled(cursor, settle, time_secs))
}

#[cfg(test)]
#[path = "../../tests/unit/presets/story.rs"]
mod tests;
