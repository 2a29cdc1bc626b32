use std::time::{Duration, Instant};

use anyhow::Context as _;
use scrollweave::{Damping, DampingState, FrameCtx, LayoutMode, Timeline, Viewport, presets};
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    fps: u32,
    seconds: u32,
    warmup: u32,
    repeats: u32,
    cards: usize,
    seed: u64,
    mode: LayoutMode,
    damping: bool,
    particles: bool,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    eval_total: Duration,
    damping_total: Duration,
    particles_total: Duration,
    wall_total: Duration,
    digest: String,
}

struct Scene {
    name: &'static str,
    timeline: Timeline,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.fps == 0 || args.seconds == 0 {
        anyhow::bail!("--fps and --seconds must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }

    let scenes = vec![
        Scene {
            name: "drops",
            timeline: presets::intertwining_drops(args.mode).context("build drops preset")?,
        },
        Scene {
            name: "parallax",
            timeline: presets::parallax_showcase(args.cards, args.mode)
                .context("build parallax preset")?,
        },
        Scene {
            name: "story",
            timeline: presets::story_canvas().context("build story preset")?,
        },
    ];

    let frames = u64::from(args.fps) * u64::from(args.seconds);
    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {frames} frames/run ({seconds}s @ {fps} fps), scenes={scenes}, mode={mode:?}, damping={damping}, particles={particles}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        seconds = args.seconds,
        fps = args.fps,
        scenes = scenes.len(),
        mode = args.mode,
        damping = if args.damping { "on" } else { "off" },
        particles = if args.particles { "on" } else { "off" },
    );

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for i in 0..args.warmup {
            let _ = run_once(&args, &scenes, frames, i, /*is_warmup=*/ true)?;
        }
    }

    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    for i in 0..args.repeats {
        runs.push(run_once(&args, &scenes, frames, i, /*is_warmup=*/ false)?);
    }

    // Evaluation is a pure function of its inputs; every run must hash identically.
    if let Some(first) = runs.first()
        && let Some(bad) = runs.iter().position(|r| r.digest != first.digest)
    {
        anyhow::bail!(
            "run {bad:03} produced digest {} but run 000 produced {}",
            runs[bad].digest,
            first.digest
        );
    }

    report_percentiles(&runs);
    if let Some(first) = runs.first() {
        eprintln!("\nstate digest: {}", first.digest);
    }
    Ok(())
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        fps: 60,
        seconds: 10,
        warmup: 1,
        repeats: 100,
        cards: 3,
        seed: 1,
        mode: LayoutMode::Expanded,
        damping: true,
        particles: true,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--fps" => out.fps = parse_u32(args.next(), "--fps")?,
            "--seconds" => out.seconds = parse_u32(args.next(), "--seconds")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--cards" => out.cards = parse_usize(args.next(), "--cards")?,
            "--seed" => out.seed = parse_u64(args.next(), "--seed")?,
            "--mode" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --mode (expanded|compact)")
                })?;
                out.mode = match v.as_str() {
                    "expanded" => LayoutMode::Expanded,
                    "compact" => LayoutMode::Compact,
                    _ => anyhow::bail!("unknown --mode '{v}' (expected expanded|compact)"),
                };
            }
            "--no-damping" => out.damping = false,
            "--no-particles" => out.particles = false,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"scrollweave-bench

Sweeps every preset scene through a simulated scroll repeatedly and reports p50/p90/p99
for each stage.

Usage:
  cargo run -q --release
  cargo run -q --release -- --repeats 100 --seconds 10 --fps 60
  cargo run -q --release -- --mode compact --cards 8 --no-particles

Options:
  --fps <n>          Frames per simulated second (default 60)
  --seconds <n>      Length of one top-to-bottom scroll (default 10)
  --warmup <n>       Untimed runs before measuring (default 1)
  --repeats <n>      Measured runs (default 100)
  --cards <n>        Parallax card count (default 3)
  --seed <n>         Particle seed (default 1)
  --mode <m>         expanded|compact (default expanded)
  --no-damping       Skip per-track damping
  --no-particles     Skip the particle swarm
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("invalid {flag} value '{v}' (expected u32)"))
}

fn parse_u64(v: Option<String>, flag: &str) -> anyhow::Result<u64> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u64>()
        .with_context(|| format!("invalid {flag} value '{v}' (expected u64)"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("invalid {flag} value '{v}' (expected usize)"))
}

fn run_once(
    args: &BenchArgs,
    scenes: &[Scene],
    frames: u64,
    run_idx: u32,
    is_warmup: bool,
) -> anyhow::Result<RunMetrics> {
    let wall = Instant::now();
    let mut m = RunMetrics::default();
    let mut hasher = sha2::Sha256::new();

    let viewport = match args.mode {
        LayoutMode::Expanded => Viewport::new(1440.0, 900.0),
        LayoutMode::Compact => Viewport::new(390.0, 844.0),
    };
    let dt = 1.0 / f64::from(args.fps);
    let last = (frames - 1).max(1) as f64;

    for scene in scenes {
        let mut damping = DampingState::default()
            .with_override("color", Damping::new(presets::DROPS_COLOR_DAMPING)?);
        let mut swarm = if args.particles && scene.name == "story" {
            Some(presets::story_swarm(args.seed)?)
        } else {
            None
        };

        for f in 0..frames {
            let progress = f as f64 / last;
            let ctx = FrameCtx::at(progress)
                .with_time(f as f64 * dt)
                .with_viewport(viewport);

            let t0 = Instant::now();
            let target = scene.timeline.evaluate_frame(&ctx);
            m.eval_total += t0.elapsed();

            let state = if args.damping {
                let t1 = Instant::now();
                let s = damping.apply_dt(&target, dt, 60.0);
                m.damping_total += t1.elapsed();
                s
            } else {
                target
            };

            if let Some(swarm) = swarm.as_mut() {
                let t2 = Instant::now();
                presets::step_story_swarm(swarm, &state, ctx.time_secs)?;
                m.particles_total += t2.elapsed();
            }

            if f + 1 == frames {
                let json = serde_json::to_vec(&state)
                    .with_context(|| format!("serialize final '{}' state", scene.name))?;
                hasher.update(scene.name.as_bytes());
                hasher.update(&json);
            }
        }
    }

    m.wall_total = wall.elapsed();
    m.digest = hex(&hasher.finalize());

    if !is_warmup {
        eprintln!(
            "run {run_idx:03}: wall={wall:.3}ms eval={ev:.3}ms damping={da:.3}ms particles={pa:.3}ms",
            wall = m.wall_total.as_secs_f64() * 1000.0,
            ev = m.eval_total.as_secs_f64() * 1000.0,
            da = m.damping_total.as_secs_f64() * 1000.0,
            pa = m.particles_total.as_secs_f64() * 1000.0,
        );
    }

    Ok(m)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn report_percentiles(runs: &[RunMetrics]) {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: fn(&RunMetrics) -> Duration) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    let fields: &[Field] = &[
        ("eval_total", |m| m.eval_total),
        ("damping_total", |m| m.damping_total),
        ("particles_total", |m| m.particles_total),
        ("wall_total", |m| m.wall_total),
    ];

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        eprintln!(
            "  {name:16} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = *name,
            p50 = fmt_ms(p(&v, 0.50)),
            p90 = fmt_ms(p(&v, 0.90)),
            p99 = fmt_ms(p(&v, 0.99))
        );
    }
}
