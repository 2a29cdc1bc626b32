use scrollweave::{FrameCtx, Timeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/hero_fade.json");
    let timeline = Timeline::from_reader(s.as_bytes())?;

    for p in [0.0, 0.25, 0.45, 0.5, 0.75, 1.0] {
        let state = timeline.evaluate_frame(&FrameCtx::at(p).with_time(p * 10.0));
        println!(
            "progress {p:.2}: opacity {:.3}, position {:?}",
            state.require_scalar("opacity")?,
            state.require_vec2("position")?
        );
    }

    Ok(())
}
