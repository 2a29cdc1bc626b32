//! Scrollweave maps scroll progress to visual parameters.
//!
//! A scene is a static table of phases over progress `[0, 1]`, each driving a set of named
//! tracks (scalars, 2D positions, colors, orbits). The table is validated once and then
//! evaluated every frame as a pure function of progress, with optional wall-clock time and
//! live anchor geometry:
//!
//! - Describe a scene as a [`TimelineDef`] (JSON) or with [`TimelineBuilder`]
//! - Compile it into a [`Timeline`]
//! - Evaluate a [`FrameCtx`] into a [`VisualState`]
//! - Optionally smooth states across frames with a consumer-owned [`DampingState`]
//!
//! Painting is left to the host renderer.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod eval;
pub(crate) mod particles;
/// Ready-made scenes.
pub mod presets;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    COMPACT_BREAKPOINT_PX, LayoutMode, Point, Progress, Rect, Rgba8, Vec2, Vec3, Viewport,
};
pub use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::keyframes::{InterpMode, Keyframe, Keyframes, Lerp};
pub use crate::animation::orbit::{Orbit, OrbitSpec};
pub use crate::animation::proc::{Oscillator, Rng64};

pub use crate::eval::anchor::{AnchorBox, AnchorField, AnchorSource, NoAnchors, Projection};
pub use crate::eval::damping::{Damped, Damping, DampingState};
pub use crate::eval::frame::FrameCtx;
pub use crate::eval::state::VisualState;

pub use crate::particles::field::{DEFAULT_FLOAT_AMP, ParticleField, ParticleSwarm, SWARM_DAMPING};
pub use crate::particles::formation::Formation;
pub use crate::particles::motion::{Dispersal, IdleMotion};

pub use crate::timeline::compile::{ResponsiveTimeline, Timeline, evaluate};
pub use crate::timeline::dsl::{
    PhaseBuilder, TimelineBuilder, key, key_eased, rules_by_track, scalar_keys,
};
pub use crate::timeline::model::{
    GapPolicy, PhaseDef, ResponsiveDef, RuleDef, TargetDef, TimelineDef,
};
pub use crate::timeline::value::{Value, ValueKind};
