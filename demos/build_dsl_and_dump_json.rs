use scrollweave::{
    AnchorField, Ease, GapPolicy, PhaseBuilder, Rgba8, TimelineBuilder, ValueKind, Vec2,
    scalar_keys,
};

fn main() -> anyhow::Result<()> {
    let def = TimelineBuilder::new()
        .gap(GapPolicy::HoldPrevious)
        .track("opacity", ValueKind::Scalar)
        .track("position", ValueKind::Vec2)
        .track("tint", ValueKind::Color)
        .phase(
            PhaseBuilder::named("intro", 0.0, 0.5)
                .keys("opacity", scalar_keys(&[(0.0, 0.0), (0.3, 1.0)]))
                .tween("position", (0.0, 0.0), (200.0, 120.0), Ease::OutCubic)
                .hold("tint", Rgba8::rgb(0x1a, 0x1a, 0x1a)),
        )
        .phase(
            PhaseBuilder::named("land", 0.4, 0.9)
                .crossfade(Ease::Smoothstep)
                .hold("opacity", 1.0)
                .seek(
                    "position",
                    Vec2::new(200.0, 120.0),
                    "signup",
                    AnchorField::Center,
                    Vec2::new(640.0, 700.0),
                    Ease::InOutCubic,
                )
                .switch(
                    "tint",
                    "signup",
                    AnchorField::Top,
                    0.5,
                    Rgba8::rgb(0x1a, 0x1a, 0x1a),
                    Rgba8::rgb(0xf9, 0x45, 0x2d),
                ),
        )
        .build_def()?;

    println!("{}", serde_json::to_string_pretty(&def)?);
    Ok(())
}
