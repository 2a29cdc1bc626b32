mod drops;
mod parallax;
mod story;

pub use drops::{
    CONTACT_ANCHOR, DROPS_CAMERA, DROPS_COLOR_DAMPING, PARALLAX_ANCHOR, intertwining_drops,
    intertwining_drops_builder, intertwining_drops_responsive,
};
pub use parallax::{CARD_STAGGER, MAX_CARDS, parallax_showcase, parallax_showcase_builder};
pub use story::{
    FORMATION_TRACK, SETTLE_TRACK, STORY_DISPERSAL, STORY_PARTICLE_COUNT, step_story_swarm,
    story_canvas, story_canvas_builder, story_formations, story_motions, story_particles,
    story_swarm,
};
