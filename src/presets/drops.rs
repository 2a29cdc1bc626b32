//! Two intertwining drops that follow the page from the navbar to the contact button.
//!
//! Tracks:
//!
//! - `opacity` (scalar): fades in over 0.02..0.08 and out over 0.85..0.92, peaking at 0.9.
//! - `position` (vec2): group center, scene units. Navbar → left → center → contact button.
//! - `orbit` (orbit): the drops are satellites 0 and 1 of 2 around `position`.
//! - `scale` (scalar): swells 0.8 → 1.0 → 0.8.
//! - `color` (color): second drop turns orange once the parallax section has scrolled past
//!   the middle of the viewport. Consumers smooth it with [`DROPS_COLOR_DAMPING`].

use crate::{
    animation::ease::Ease,
    animation::orbit::OrbitSpec,
    eval::anchor::{AnchorField, Projection},
    foundation::core::{LayoutMode, Rgba8, Vec2},
    foundation::error::ScrollweaveResult,
    timeline::compile::{ResponsiveTimeline, Timeline},
    timeline::dsl::{PhaseBuilder, TimelineBuilder, scalar_keys},
    timeline::model::ResponsiveDef,
    timeline::value::ValueKind,
};

/// Anchor the drops converge on.
pub const CONTACT_ANCHOR: &str = "contact-button";
/// Section whose bottom edge flips the drop color.
pub const PARALLAX_ANCHOR: &str = "parallax-showcase";
/// Per-frame damping applied to the `color` track by consumers.
pub const DROPS_COLOR_DAMPING: f64 = 0.08;

const DROP_DARK: Rgba8 = Rgba8::rgb(0x1a, 0x1a, 0x1a);
const DROP_ACCENT: Rgba8 = Rgba8::rgb(0xf9, 0x45, 0x2d);

/// Camera of the drops scene.
pub const DROPS_CAMERA: Projection = Projection::Perspective {
    camera_z: 10.0,
    fov_y_deg: 45.0,
    plane_z: 0.0,
};

struct Waypoints {
    start: Vec2,
    left: Vec2,
    center: Vec2,
    swell: f64,
}

fn waypoints(mode: LayoutMode) -> Waypoints {
    match mode {
        LayoutMode::Expanded => Waypoints {
            start: Vec2::new(3.5, 2.5),
            left: Vec2::new(-4.5, 0.0),
            center: Vec2::new(0.0, -1.0),
            swell: 1.0,
        },
        LayoutMode::Compact => Waypoints {
            start: Vec2::new(1.5, 2.5),
            left: Vec2::new(-1.5, 0.5),
            center: Vec2::new(0.0, -0.5),
            swell: 0.7,
        },
    }
}

/// Builder for the drops scene in `mode`.
pub fn intertwining_drops_builder(mode: LayoutMode) -> TimelineBuilder {
    let w = waypoints(mode);
    let contact_fallback = Vec2::new(w.center.x, -2.5);

    TimelineBuilder::new()
        .projection(DROPS_CAMERA)
        .track("opacity", ValueKind::Scalar)
        .track("position", ValueKind::Vec2)
        .track("orbit", ValueKind::Orbit)
        .track("scale", ValueKind::Scalar)
        .track("color", ValueKind::Color)
        .phase(
            PhaseBuilder::named("drift", 0.0, 1.0)
                .keys(
                    "opacity",
                    scalar_keys(&[
                        (0.0, 0.0),
                        (0.02, 0.0),
                        (0.08, 0.9),
                        (0.85, 0.9),
                        (0.92, 0.0),
                    ]),
                )
                .orbit("orbit", OrbitSpec::new(3.0, 0.2, w.swell))
                .arch("scale", 0.8, 1.0)
                .switch(
                    "color",
                    PARALLAX_ANCHOR,
                    AnchorField::Bottom,
                    0.5,
                    DROP_DARK,
                    DROP_ACCENT,
                ),
        )
        .phase(PhaseBuilder::named("to-left", 0.0, 0.6).tween(
            "position",
            w.start,
            w.left,
            Ease::InOutCubic,
        ))
        .phase(PhaseBuilder::named("to-center", 0.6, 0.85).tween(
            "position",
            w.left,
            w.center,
            Ease::InOutCubic,
        ))
        .phase(PhaseBuilder::named("to-contact", 0.85, 1.0).seek(
            "position",
            w.center,
            CONTACT_ANCHOR,
            AnchorField::Center,
            contact_fallback,
            Ease::InOutCubic,
        ))
}

/// The drops scene in `mode`.
pub fn intertwining_drops(mode: LayoutMode) -> ScrollweaveResult<Timeline> {
    intertwining_drops_builder(mode).build()
}

/// Both layouts of the drops scene.
pub fn intertwining_drops_responsive() -> ScrollweaveResult<ResponsiveTimeline> {
    ResponsiveTimeline::new(ResponsiveDef {
        expanded: intertwining_drops_builder(LayoutMode::Expanded).build_def()?,
        compact: Some(intertwining_drops_builder(LayoutMode::Compact).build_def()?),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/presets/drops.rs"]
mod tests;
