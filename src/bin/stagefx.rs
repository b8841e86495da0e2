use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "stagefx", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of a key script as a PNG.
    Frame(FrameArgs),
    /// Render a key script as a numbered PNG sequence.
    Png(SeqArgs),
    /// Render a key script as an MP4 video (requires `ffmpeg` on PATH).
    Render(SeqArgs),
    /// Print the key bindings.
    Keys,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Config JSON (width, height, fps, seed, palette).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Key script, e.g. "q@0 s@0.3 r@1.2".
    #[arg(long, conflicts_with = "keys_file")]
    keys: Option<String>,

    /// Key script file (`.json` or the text form).
    #[arg(long)]
    keys_file: Option<PathBuf>,

    /// Override surface width.
    #[arg(long)]
    width: Option<u32>,

    /// Override surface height.
    #[arg(long)]
    height: Option<u32>,

    /// Override frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for random directions and strobes.
    #[arg(long)]
    seed: Option<u64>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Time of the frame in seconds.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SeqArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Length in seconds. Defaults to one second after the last key.
    #[arg(long)]
    duration: Option<f64>,

    /// Output directory (png) or MP4 path (render).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Png(args) => cmd_png(args),
        Command::Render(args) => cmd_render(args),
        Command::Keys => {
            for b in stagefx::KeyBinding::ALL {
                if let Some(key) = b.key() {
                    println!("{key}  {b:?}");
                }
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SessionArgs) -> anyhow::Result<stagefx::FxConfig> {
    let mut cfg = match &args.config {
        Some(path) => stagefx::FxConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => stagefx::FxConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(fps) = args.fps {
        cfg.fps = stagefx::Fps::new(fps, 1)?;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_script(args: &SessionArgs) -> anyhow::Result<stagefx::KeyScript> {
    let script = match (&args.keys, &args.keys_file) {
        (Some(text), _) => stagefx::KeyScript::parse(text).context("parse --keys")?,
        (None, Some(path)) => stagefx::KeyScript::from_path(path)
            .with_context(|| format!("load key script '{}'", path.display()))?,
        (None, None) => stagefx::KeyScript::default(),
    };
    let unknown = script.unknown_keys();
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "key script contains unmapped keys; they will be ignored");
    }
    Ok(script)
}

fn make_backend(choice: BackendChoice) -> Box<dyn stagefx::RenderBackend> {
    let kind = match choice {
        BackendChoice::Cpu => stagefx::BackendKind::Cpu,
    };
    stagefx::create_backend(kind)
}

/// Longest timeline the CLI simulates (about 6 days at 30 fps).
const MAX_FRAMES: u64 = 1 << 24;

/// Frame count covering `secs`, refusing timelines longer than [`MAX_FRAMES`].
fn frames_within_limit(cfg: &stagefx::FxConfig, secs: f64, what: &str) -> anyhow::Result<u64> {
    let frames = cfg.fps.secs_to_frames_ceil(secs);
    if frames > MAX_FRAMES {
        anyhow::bail!(
            "{what} {secs}s is beyond the {MAX_FRAMES}-frame limit at {} fps",
            cfg.fps.as_f64()
        );
    }
    Ok(frames)
}

fn frame_range(
    cfg: &stagefx::FxConfig,
    script: &stagefx::KeyScript,
    duration: Option<f64>,
) -> anyhow::Result<stagefx::FrameRange> {
    let secs = duration.unwrap_or(script.last_secs() + 1.0);
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("duration must be a positive number of seconds");
    }
    let frames = frames_within_limit(cfg, secs, "duration")?;
    Ok(stagefx::FrameRange::new(
        stagefx::FrameIndex(0),
        stagefx::FrameIndex(frames),
    )?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let script = load_script(&args.session)?;
    if !args.at.is_finite() || args.at < 0.0 {
        anyhow::bail!("--at must be a non-negative number of seconds");
    }
    let idx = frames_within_limit(&cfg, args.at, "--at")?;
    let end = idx.checked_add(1).context("--at is past the last frame")?;
    let range = stagefx::FrameRange::new(stagefx::FrameIndex(idx), stagefx::FrameIndex(end))?;

    let mut backend = make_backend(args.session.backend);
    let mut session = stagefx::FxSession::new(&cfg)?;
    let mut sink = stagefx::InMemorySink::new();
    session.render_script(&script, range, backend.as_mut(), &mut sink)?;

    let (_, frame) = sink
        .frames()
        .last()
        .context("no frame was rendered (bug)")?;
    if let Some(parent) = args.out.parent() {
        stagefx::encode::sink::create_output_dir(parent)?;
    }
    stagefx::encode::png::write_png(&args.out, frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_png(args: SeqArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let script = load_script(&args.session)?;
    let range = frame_range(&cfg, &script, args.duration)?;

    let mut backend = make_backend(args.session.backend);
    let mut session = stagefx::FxSession::new(&cfg)?;
    let mut sink = stagefx::PngSequenceSink::new(&args.out);
    let stats = session.render_script(&script, range, backend.as_mut(), &mut sink)?;

    eprintln!(
        "wrote {} frames to {} ({} keys played, {} ignored)",
        stats.frames,
        args.out.display(),
        stats.keys_played,
        stats.keys_ignored
    );
    Ok(())
}

fn cmd_render(args: SeqArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let script = load_script(&args.session)?;
    let range = frame_range(&cfg, &script, args.duration)?;

    let mut backend = make_backend(args.session.backend);
    let mut session = stagefx::FxSession::new(&cfg)?;
    let mut sink = stagefx::FfmpegSink::new(stagefx::FfmpegSinkOpts::new(&args.out));
    let stats = session.render_script(&script, range, backend.as_mut(), &mut sink)?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames);
    Ok(())
}
