use std::{
    collections::BTreeMap,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "scrollweave", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a timeline definition and print its tracks and phases.
    Check(SourceArgs),
    /// Evaluate one frame and print the visual state as JSON.
    Sample(SampleArgs),
    /// Evaluate evenly spaced progress values and print one JSON line per step.
    Sweep(SweepArgs),
    /// Plot one track over progress as a PNG.
    Plot(PlotArgs),
    /// Print a built-in scene as a JSON timeline definition.
    Preset(PresetArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetName {
    Drops,
    Parallax,
    Story,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Expanded,
    Compact,
}

impl From<ModeChoice> for scrollweave::LayoutMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Expanded => Self::Expanded,
            ModeChoice::Compact => Self::Compact,
        }
    }
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input timeline JSON (a bare definition or `{expanded, compact}`).
    #[arg(long = "in", conflicts_with = "preset", required_unless_present = "preset")]
    in_path: Option<PathBuf>,

    /// Built-in scene instead of a file.
    #[arg(long, value_enum)]
    preset: Option<PresetName>,

    /// Layout mode.
    #[arg(long, value_enum, default_value_t = ModeChoice::Expanded)]
    mode: ModeChoice,

    /// Card count for the parallax scene.
    #[arg(long, default_value_t = 3)]
    cards: usize,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Wall-clock seconds fed to idle motion.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Viewport as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_viewport, default_value = "1280x800")]
    viewport: scrollweave::Viewport,

    /// Anchor bounding box as ID=X,Y,W,H in viewport pixels (repeatable).
    #[arg(long = "anchor", value_parser = parse_anchor)]
    anchors: Vec<(String, scrollweave::Rect)>,
}

impl FrameArgs {
    fn anchor_map(&self) -> BTreeMap<String, scrollweave::Rect> {
        self.anchors.iter().cloned().collect()
    }
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    frame: FrameArgs,

    /// Progress to evaluate.
    #[arg(long)]
    at: f64,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    frame: FrameArgs,

    /// Number of intervals; `steps + 1` samples are printed.
    #[arg(long, default_value_t = 20)]
    steps: u32,

    /// Only print these tracks (repeatable).
    #[arg(long = "track")]
    tracks: Vec<String>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    frame: FrameArgs,

    /// Track to plot.
    #[arg(long)]
    track: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Image width in pixels (one sample per column).
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 240)]
    height: u32,
}

#[derive(Args, Debug)]
struct PresetArgs {
    /// Scene to print.
    #[arg(value_enum)]
    name: PresetName,

    /// Layout mode.
    #[arg(long, value_enum, default_value_t = ModeChoice::Expanded)]
    mode: ModeChoice,

    /// Card count for the parallax scene.
    #[arg(long, default_value_t = 3)]
    cards: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Plot(args) => cmd_plot(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn parse_viewport(s: &str) -> Result<scrollweave::Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok(scrollweave::Viewport::new(w, h))
}

fn parse_anchor(s: &str) -> Result<(String, scrollweave::Rect), String> {
    let (id, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=X,Y,W,H, got '{s}'"))?;
    let nums = rest
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("anchor '{id}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let &[x, y, w, h] = nums.as_slice() else {
        return Err(format!("anchor '{id}': expected 4 numbers, got {}", nums.len()));
    };
    let bbox = scrollweave::AnchorBox {
        x,
        y,
        width: w,
        height: h,
    };
    Ok((id.to_owned(), bbox.to_rect()))
}

fn preset_def(
    name: PresetName,
    mode: scrollweave::LayoutMode,
    cards: usize,
) -> anyhow::Result<scrollweave::TimelineDef> {
    use scrollweave::presets;
    let builder = match name {
        PresetName::Drops => presets::intertwining_drops_builder(mode),
        PresetName::Parallax => presets::parallax_showcase_builder(cards, mode)?,
        PresetName::Story => presets::story_canvas_builder(),
    };
    Ok(builder.build_def()?)
}

fn read_def(path: &Path, mode: scrollweave::LayoutMode) -> anyhow::Result<scrollweave::TimelineDef> {
    let def = scrollweave::ResponsiveDef::from_path(path)
        .with_context(|| format!("read timeline '{}'", path.display()))?;
    Ok(def.select(mode).clone())
}

fn load(source: &SourceArgs) -> anyhow::Result<scrollweave::Timeline> {
    let mode = source.mode.into();
    let def = match (&source.in_path, source.preset) {
        (Some(path), _) => read_def(path, mode)?,
        (None, Some(name)) => preset_def(name, mode, source.cards)?,
        (None, None) => anyhow::bail!("either --in or --preset is required"),
    };
    scrollweave::Timeline::new(def).context("compile timeline")
}

fn cmd_check(args: SourceArgs) -> anyhow::Result<()> {
    let timeline = load(&args)?;
    let def = timeline.def();
    let rules = scrollweave::rules_by_track(def);

    println!("ok: {} tracks, {} phases", def.tracks.len(), def.phases.len());
    println!("tracks:");
    for (name, kind) in timeline.tracks() {
        let n = rules.get(name).map_or(0, Vec::len);
        println!("  {name:<24} {kind:<7} {n} rule(s)");
    }
    println!("phases:");
    for (i, phase) in def.phases.iter().enumerate() {
        let name = phase.name.as_deref().unwrap_or("-");
        let tracks: Vec<&str> = phase.rules.keys().map(String::as_str).collect();
        println!(
            "  [{i}] {name:<12} {:.3}..{:.3}  {}",
            phase.start,
            phase.end,
            tracks.join(", ")
        );
    }
    if let Some(gap) = def.gap {
        println!("gap policy: {gap:?}");
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let timeline = load(&args.source)?;
    let anchors = args.frame.anchor_map();
    let ctx = scrollweave::FrameCtx::at(args.at)
        .with_time(args.frame.time)
        .with_viewport(args.frame.viewport)
        .with_anchors(&anchors);

    let state = timeline.evaluate_frame(&ctx);
    let json = serde_json::to_string_pretty(&state).context("serialize visual state")?;
    println!("{json}");
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let timeline = load(&args.source)?;
    for t in &args.tracks {
        if timeline.track_kind(t).is_none() {
            anyhow::bail!("unknown track '{t}'");
        }
    }

    let anchors = args.frame.anchor_map();
    let steps = args.steps.max(1);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for i in 0..=steps {
        let p = f64::from(i) / f64::from(steps);
        let ctx = scrollweave::FrameCtx::at(p)
            .with_time(args.frame.time)
            .with_viewport(args.frame.viewport)
            .with_anchors(&anchors);
        let state = timeline.evaluate_frame(&ctx);

        let values: BTreeMap<&str, &scrollweave::Value> = state
            .iter()
            .filter(|(name, _)| args.tracks.is_empty() || args.tracks.iter().any(|t| t == name))
            .collect();
        let line = serde_json::json!({ "progress": p, "state": values });
        writeln!(out, "{line}").context("write sweep line")?;
    }
    Ok(())
}

fn cmd_plot(args: PlotArgs) -> anyhow::Result<()> {
    let timeline = load(&args.source)?;
    let kind = timeline
        .track_kind(&args.track)
        .with_context(|| format!("unknown track '{}'", args.track))?;

    let width = args.width.max(2);
    let height = args.height.max(2);
    let anchors = args.frame.anchor_map();

    let samples: Vec<scrollweave::Value> = (0..width)
        .map(|x| {
            let p = f64::from(x) / f64::from(width - 1);
            let ctx = scrollweave::FrameCtx::at(p)
                .with_time(args.frame.time)
                .with_viewport(args.frame.viewport)
                .with_anchors(&anchors);
            timeline
                .evaluate_track(&args.track, &ctx)
                .unwrap_or_else(|| scrollweave::Value::zero(kind))
        })
        .collect();

    let img = plot::render(&samples, width, height);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let def = preset_def(args.name, args.mode.into(), args.cards)?;
    let json = serde_json::to_string_pretty(&def).context("serialize preset")?;
    println!("{json}");
    Ok(())
}

mod plot {
    use image::{Rgba, RgbaImage};
    use scrollweave::Value;

    const BG: Rgba<u8> = Rgba([18, 20, 28, 255]);
    const AXIS: Rgba<u8> = Rgba([60, 64, 76, 255]);
    const SERIES: [Rgba<u8>; 3] = [
        Rgba([249, 69, 45, 255]),
        Rgba([255, 140, 66, 255]),
        Rgba([235, 235, 235, 255]),
    ];

    /// Curves for numeric tracks, a color strip for color tracks.
    pub(super) fn render(samples: &[Value], width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, BG);

        let colors: Option<Vec<_>> = samples.iter().map(Value::as_color).collect();
        if let Some(colors) = colors {
            for (x, c) in colors.iter().enumerate() {
                for y in 0..height {
                    img.put_pixel(x as u32, y, Rgba([c.r, c.g, c.b, 255]));
                }
            }
            return img;
        }

        let series: Vec<Vec<f64>> = match samples.first() {
            Some(Value::Vec2(_)) => vec![
                samples.iter().map(|v| v.as_vec2().map_or(0.0, |p| p.x)).collect(),
                samples.iter().map(|v| v.as_vec2().map_or(0.0, |p| p.y)).collect(),
            ],
            Some(Value::Orbit(_)) => vec![
                samples
                    .iter()
                    .map(|v| v.as_orbit().map_or(0.0, |o| o.normalized_angle()))
                    .collect(),
                samples.iter().map(|v| v.as_orbit().map_or(0.0, |o| o.radius)).collect(),
                samples.iter().map(|v| v.as_orbit().map_or(0.0, |o| o.scale)).collect(),
            ],
            _ => vec![samples.iter().map(|v| v.as_scalar().unwrap_or(0.0)).collect()],
        };

        let (lo, hi) = series
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let (lo, hi) = if hi - lo < 1e-9 { (lo - 1.0, hi + 1.0) } else { (lo, hi) };
        let to_y = |v: f64| {
            let t = (v - lo) / (hi - lo);
            let y = (1.0 - t) * f64::from(height - 1);
            y.round().clamp(0.0, f64::from(height - 1)) as u32
        };

        if lo < 0.0 && hi > 0.0 {
            let zero = to_y(0.0);
            for x in 0..width {
                img.put_pixel(x, zero, AXIS);
            }
        }

        for (s, values) in series.iter().enumerate() {
            let color = SERIES[s % SERIES.len()];
            let mut prev: Option<u32> = None;
            for (x, &v) in values.iter().enumerate() {
                let y = to_y(v);
                let (a, b) = match prev {
                    Some(py) => (py.min(y), py.max(y)),
                    None => (y, y),
                };
                for yy in a..=b {
                    img.put_pixel(x as u32, yy, color);
                }
                prev = Some(y);
            }
        }
        img
    }
}
