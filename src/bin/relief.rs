use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "relief", version)]
struct Cli {
    /// Studio config JSON (defaults apply to omitted fields).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn an image into a relief mesh.
    Synth(SynthArgs),
    /// Animate a relief for a number of frames and print the resulting poses.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SynthArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Transfer mode: `standard` or `human`.
    #[arg(long, default_value = "standard")]
    mode: String,

    /// Write the full mesh as JSON here; otherwise only a summary is printed.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Transfer mode: `standard` or `human`.
    #[arg(long, default_value = "standard")]
    mode: String,

    /// Action: idle, walk, run, fight, shake, vibe.
    #[arg(long, default_value = "idle")]
    action: String,

    /// Mood: neutral, happy, angry, sad, cool.
    #[arg(long, default_value = "neutral")]
    mood: String,

    /// Camera mode: static or cinematic.
    #[arg(long, default_value = "static")]
    camera: String,

    /// Animation speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Modifiers applied before animating, in order (twist, taper, flip).
    #[arg(long = "modifier")]
    modifiers: Vec<String>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print every frame instead of only the last one.
    #[arg(long, default_value_t = false)]
    all_frames: bool,
}

#[derive(serde::Serialize)]
struct SynthSummary {
    width: u32,
    height: u32,
    segs_x: u32,
    segs_y: u32,
    vertices: usize,
    triangles: usize,
    min: relief::Vec3,
    max: relief::Vec3,
}

#[derive(serde::Serialize)]
struct SimulateReport {
    frames: u64,
    light: relief::MoodLight,
    state: relief::AnimationState,
    ticks: Vec<relief::TickOutput>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Synth(args) => cmd_synth(args, config),
        Command::Simulate(args) => cmd_simulate(args, config),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RELIEF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<relief::StudioConfig> {
    match path {
        Some(p) => relief::StudioConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(relief::StudioConfig::default()),
    }
}

fn read_pixels(path: &Path) -> anyhow::Result<relief::PixelBuffer> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    relief::decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))
}

fn parse_modifier(name: &str) -> anyhow::Result<relief::ModifierKind> {
    match name.trim().to_ascii_lowercase().as_str() {
        "twist" => Ok(relief::ModifierKind::Twist),
        "taper" => Ok(relief::ModifierKind::Taper),
        "flip" | "flip_normals" => Ok(relief::ModifierKind::FlipNormals),
        other => anyhow::bail!("unknown modifier '{other}' (expected twist, taper or flip)"),
    }
}

fn cmd_synth(args: SynthArgs, config: relief::StudioConfig) -> anyhow::Result<()> {
    let pixels = read_pixels(&args.in_path)?;
    let mode = relief::GenMode::parse_lossy(&args.mode);
    let grid = relief::synthesize(&pixels, mode, &config.synth).context("synthesize mesh")?;

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = std::fs::File::create(out)
            .with_context(|| format!("create mesh json '{}'", out.display()))?;
        serde_json::to_writer(std::io::BufWriter::new(f), &grid)
            .with_context(|| format!("write mesh json '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    let (min, max) = grid.mesh.bounds().unwrap_or_default();
    let triangles = grid.mesh.indices.as_ref().map_or(0, |i| i.len() / 3);
    let summary = SynthSummary {
        width: pixels.width(),
        height: pixels.height(),
        segs_x: grid.segs_x,
        segs_y: grid.segs_y,
        vertices: grid.mesh.vertex_count(),
        triangles,
        min,
        max,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize summary")?
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs, mut config: relief::StudioConfig) -> anyhow::Result<()> {
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let pixels = read_pixels(&args.in_path)?;
    let modifiers = args
        .modifiers
        .iter()
        .map(|m| parse_modifier(m))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut studio = relief::Studio::new(config).context("create studio")?;
    let mode = relief::GenMode::parse_lossy(&args.mode);
    let id = studio
        .add_generated(&pixels, mode, args.in_path.display().to_string())
        .context("add relief")?;
    for kind in modifiers {
        studio
            .apply_modifier(id, kind)
            .with_context(|| format!("apply {kind:?}"))?;
    }

    studio.set_action(relief::Action::parse_lossy(&args.action));
    studio.set_camera_mode(relief::CameraMode::parse_lossy(&args.camera));
    studio.set_speed(args.speed).context("set speed")?;
    studio.set_mood(relief::Mood::parse_lossy(&args.mood));

    let mut ticks = Vec::new();
    for _ in 0..args.frames {
        let out = studio.step();
        if args.all_frames {
            ticks.push(out);
        } else {
            ticks = vec![out];
        }
    }
    tracing::info!(frames = args.frames, "simulation finished");

    let report = SimulateReport {
        frames: args.frames,
        light: studio.light().clone(),
        state: studio.state().clone(),
        ticks,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize report")?
    );
    Ok(())
}
