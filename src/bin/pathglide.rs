use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pathglide::{
    Anchor, ClockBackend, EasingSpec, Keyframe, KeyframeInput, MotionOptions, MotionPath,
    PathGeometry, Rect, Repeat, SvgPath, Target, TimelineOptions, TweenOptions,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "pathglide", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the per-sample keyframe list of a motion-path scene.
    Build(BuildArgs),
    /// Print the points sampled along SVG path data.
    Sample(SampleArgs),
    /// Run a timeline on a simulated clock and report how it ended.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// SVG path data, e.g. "M0 0 L100 0".
    #[arg(long)]
    path: String,

    /// Arc-length step between samples.
    #[arg(long, default_value_t = pathglide::DEFAULT_STEP)]
    step: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Stop after this much simulated time.
    #[arg(long, default_value_t = 60_000.0)]
    max_ms: f64,
}

/// `[x, y, width, height]`.
type BoxDef = [f64; 4];

fn rect(b: BoxDef) -> Rect {
    Rect::new(b[0], b[1], b[0] + b[2], b[1] + b[3])
}

#[derive(Deserialize, Debug)]
struct PathDef {
    d: String,
    #[serde(default)]
    view_box: Option<BoxDef>,
    #[serde(default)]
    rendered_box: Option<BoxDef>,
}

impl PathDef {
    fn load(&self) -> anyhow::Result<Rc<SvgPath>> {
        let mut path = SvgPath::parse(&self.d).with_context(|| "parse path data")?;
        if let Some(b) = self.rendered_box {
            path = path.with_rendered_box(rect(b));
        }
        if let Some(b) = self.view_box {
            path = path.with_view_box(rect(b));
        }
        Ok(Rc::new(path))
    }
}

#[derive(Deserialize, Debug)]
struct SceneDef {
    path: PathDef,
    #[serde(default = "default_target")]
    target: BoxDef,
    #[serde(default)]
    anchor: Anchor,
    #[serde(default)]
    rotate: bool,
    #[serde(default)]
    step: Option<f64>,
    #[serde(default)]
    easing: Option<EasingSpec>,
    keyframes: serde_json::Value,
}

fn default_target() -> BoxDef {
    [0.0, 0.0, 0.0, 0.0]
}

#[derive(Deserialize, Debug)]
struct TimelineDef {
    #[serde(default)]
    repeat: Repeat,
    #[serde(default)]
    duration_ms: Option<f64>,
    tweens: Vec<TweenDef>,
}

#[derive(Deserialize, Debug)]
struct TweenDef {
    #[serde(default = "default_target")]
    target: BoxDef,
    #[serde(default)]
    duration_ms: Option<f64>,
    #[serde(default)]
    delay_ms: Option<f64>,
    #[serde(default)]
    easing: Option<EasingSpec>,
    #[serde(default)]
    path: Option<PathDef>,
    #[serde(default)]
    rotate: Option<bool>,
    keyframes: serde_json::Value,
}

#[derive(Serialize, Debug)]
struct SimulationReport {
    state: pathglide::TimelineState,
    passes: u32,
    elapsed_ms: Option<f64>,
    tweens: usize,
    keyframes_per_tween: Vec<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn resolve_easing(spec: Option<&EasingSpec>) -> pathglide::Easing {
    spec.map(EasingSpec::resolve).unwrap_or_default()
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let scene: SceneDef = read_json(&args.in_path, "scene")?;
    let easing = resolve_easing(scene.easing.as_ref());
    let input = KeyframeInput::from_value(scene.keyframes).with_context(|| "parse scene keyframes")?;
    let keyframes = pathglide::normalize_keyframes(input, easing);

    let path = scene.path.load()?;
    let mut options = MotionOptions::new(path)
        .with_anchor(scene.anchor)
        .with_rotate(scene.rotate);
    if let Some(step) = scene.step {
        options = options.with_step(step);
    }
    let target: Rc<dyn Target> = Rc::new(rect(scene.target));
    let motion = MotionPath::new(target, options);
    let built = motion.build(&keyframes, &easing)?;

    let json = serde_json::to_string_pretty(&*built).with_context(|| "serialize keyframes")?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {} keyframes to {}", built.len(), out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let path = SvgPath::parse(&args.path).with_context(|| "parse path data")?;
    let sampled = pathglide::sample(&path, args.step)?;
    eprintln!(
        "length {:.3}, {} samples",
        path.total_length(),
        sampled.points.len()
    );
    let mut stdout = std::io::stdout().lock();
    for p in &sampled.points {
        writeln!(stdout, "{} {}", p.x, p.y).with_context(|| "write sample")?;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.frame_ms.is_finite() && args.frame_ms > 0.0,
        "--frame-ms must be positive"
    );
    let def: TimelineDef = read_json(&args.in_path, "timeline")?;

    let options = TimelineOptions {
        defaults: TweenOptions {
            duration_ms: def.duration_ms,
            ..TweenOptions::default()
        },
        paused: true,
        repeat: def.repeat,
        ..TimelineOptions::default()
    };
    let mut tl = pathglide::timeline(ClockBackend::new(), options);
    for (i, t) in def.tweens.into_iter().enumerate() {
        let easing = resolve_easing(t.easing.as_ref());
        let input = KeyframeInput::from_value(t.keyframes)
            .with_context(|| format!("parse keyframes of tween {i}"))?;
        let keyframes: Vec<Keyframe> = pathglide::normalize_keyframes(input, easing);
        let mut opts = TweenOptions {
            duration_ms: t.duration_ms,
            delay_ms: t.delay_ms,
            easing: t.easing,
            rotate: t.rotate,
            ..TweenOptions::default()
        };
        if let Some(path) = &t.path {
            let path: Rc<dyn PathGeometry> = path.load()?;
            opts.path = Some(path);
        }
        let target: Rc<dyn Target> = Rc::new(rect(t.target));
        tl.to(target, keyframes, opts)
            .with_context(|| format!("tween {i}"))?;
    }

    tl.play()?;
    let mut now = 0.0;
    while tl.state() != pathglide::TimelineState::Finished && now <= args.max_ms {
        tl.tick(now)?;
        now += args.frame_ms;
    }

    let report = SimulationReport {
        state: tl.state(),
        passes: tl.pass(),
        elapsed_ms: tl.current_time(),
        tweens: tl.tweens().len(),
        keyframes_per_tween: tl.tweens().iter().map(|t| t.keyframes().len()).collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).with_context(|| "serialize report")?
    );
    Ok(())
}
