use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use printcomp::{
    Bounds, Compositor, CompositorConfig, EditorLayout, FsSourceResolver, LayerReport,
    PrintcompError, QualityReport, RenderJob, RenderRequest, Side, Size, derive_safe_zone,
};

#[derive(Parser, Debug)]
#[command(name = "printcomp", version)]
struct Cli {
    /// Log debug output to stderr (`RUST_LOG` still applies).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a print file (PNG) from a render request.
    Render(RenderArgs),
    /// Print the safe zone for a garment side as JSON.
    SafeZone(SafeZoneArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Render request JSON. Image sources resolve relative to its directory.
    #[arg(long)]
    request: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Compositor config JSON. Fonts resolve relative to its directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render a preview this many pixels wide instead of the full print canvas.
    #[arg(long)]
    preview_width: Option<u32>,
}

#[derive(Parser, Debug)]
struct SafeZoneArgs {
    /// Garment side (`front` or `back`).
    #[arg(long, default_value = "front")]
    side: Side,

    /// Garment box on screen as `x,y,w,h`.
    #[arg(long, value_parser = parse_bounds, conflicts_with = "container")]
    garment: Option<Bounds>,

    /// Mockup container as `x,y,w,h`; used with `--mockup`, or alone for the loading fallback.
    #[arg(long, value_parser = parse_bounds)]
    container: Option<Bounds>,

    /// Natural mockup image size as `w,h`.
    #[arg(long, value_parser = parse_size, requires = "container")]
    mockup: Option<Size>,

    /// Compositor config JSON (for calibration presets).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderSummary<'a> {
    #[serde(flatten)]
    quality: QualityReport,
    width: u32,
    height: u32,
    out: &'a Path,
    layers: &'a [LayerReport],
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let res = match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::SafeZone(args) => cmd_safe_zone(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Map failures onto the messages users see: oversized uploads and unreadable images differ.
fn report_error(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<PrintcompError>() {
        Some(PrintcompError::ResourceExceeded { limit, actual, max }) => {
            eprintln!("file too large: source {limit} is {actual}, maximum is {max}");
            ExitCode::from(3)
        }
        Some(PrintcompError::InvalidInput(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        _ => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<(CompositorConfig, PathBuf)> {
    match path {
        Some(p) => {
            let cfg = CompositorConfig::from_path(p)?;
            Ok((cfg, parent_dir(p)))
        }
        None => Ok((CompositorConfig::default(), PathBuf::from("."))),
    }
}

fn parent_dir(p: &Path) -> PathBuf {
    p.parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (cfg, cfg_root) = load_config(args.config.as_deref())?;
    let fonts = cfg.load_fonts(&cfg_root)?;

    let json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("read render request '{}'", args.request.display()))?;
    let request = RenderRequest::from_json(&json)?;
    let layers = request.layers_with_limits(&cfg.limits)?;
    tracing::info!(side = ?request.side, layers = layers.len(), "render request loaded");

    let sources = FsSourceResolver::new(parent_dir(&args.request), cfg.limits);
    let mut job = RenderJob::new(&layers, &sources, cfg.canvas);
    if let Some(w) = args.preview_width {
        job = job.with_target(cfg.canvas.scaled_to_width(w)?);
    }

    let mut compositor = Compositor::from_config(&cfg, fonts);
    let out = compositor.render(&job)?;
    out.raster.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());

    let summary = RenderSummary {
        quality: out.quality,
        width: out.raster.width,
        height: out.raster.height,
        out: &args.out,
        layers: &out.layers,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_safe_zone(args: SafeZoneArgs) -> anyhow::Result<()> {
    let (cfg, _) = load_config(args.config.as_deref())?;
    let zone = match (args.garment, args.container) {
        (Some(garment), _) => derive_safe_zone(garment, cfg.presets.for_side(args.side)),
        (None, Some(container)) => {
            let mut layout = EditorLayout::new(container, args.side, cfg.presets);
            if let Some(natural) = args.mockup {
                layout.mockup_loaded(natural)?;
            }
            layout.safe_zone()
        }
        (None, None) => anyhow::bail!("one of --garment or --container is required"),
    };
    println!("{}", serde_json::to_string_pretty(&zone)?);
    Ok(())
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<_, _>>()?;
    parts
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {N} comma-separated numbers, got {}", v.len()))
}

fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let [x, y, w, h] = parse_numbers::<4>(s)?;
    Ok(Bounds::new(x, y, w, h))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let [w, h] = parse_numbers::<2>(s)?;
    Ok(Size::new(w, h))
}
