use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

use georings::config::FileConfig;
use georings::domain::{Center, RingSpec};
use georings::geojson::{GeoJson, read_geojson, write_geojson};
use georings::geometry::{Projector, simplify};
use georings::layers::{OutputMode, RingsConfig, generate_rings};

/// Generate synthetic GeoJSON ring fixtures around a point
///
/// Examples:
///   # The stock fixture: three bands around central London
///   georings > rings.geojson
///
///   # Same rings as a single MultiPolygon
///   georings generate --mode multi-polygon
///
///   # Custom center and rings, solid polygons, pretty printed
///   georings generate --lat 40.7128 --lng -74.006 -r 200:32 -r 100:16 --no-holes --pretty
///
///   # Thin out an existing GeoJSON file
///   georings simplify input.geojson --tolerance 0.0000001 -o output.geojson
#[derive(Parser, Debug)]
#[command(name = "georings")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate concentric ring polygons (default)
    Generate(GenerateArgs),

    /// Simplify the lines and rings of a GeoJSON document
    Simplify(SimplifyArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Path to config file (optional, auto-searches georings.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Center latitude in decimal degrees (use with --lng)
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Center longitude in decimal degrees (use with --lat)
    #[arg(long, alias = "lon", requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Ring as RADIUS:POINTS, outermost first; repeat for more rings
    #[arg(short = 'r', long = "ring", value_name = "RADIUS:POINTS")]
    rings: Vec<RingSpec>,

    /// Output shape
    #[arg(long, value_enum)]
    mode: Option<OutputMode>,

    /// Emit solid polygons instead of bands
    #[arg(long)]
    no_holes: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Simplify the generated rings, dropping vertices whose triangle area
    /// is below this tolerance in square degrees
    #[arg(long, value_name = "TOLERANCE")]
    simplify: Option<f64>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SimplifyArgs {
    /// GeoJSON file to read, or - for stdin
    input: PathBuf,

    /// Minimum triangle area, in square degrees, a vertex needs to survive
    #[arg(short = 't', long)]
    tolerance: f64,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

/// Everything `generate` needs after merging CLI, config file and defaults
#[derive(Debug)]
struct GenerateJob {
    rings: RingsConfig,
    pretty: bool,
    simplify: Option<f64>,
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level_filter(cli.verbose))
        .format_timestamp(None)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose > 0;
    match cli.command {
        None => run_generate(&GenerateArgs::default(), false),
        Some(Command::Generate(args)) => run_generate(&args, true),
        Some(Command::Simplify(args)) => run_simplify(&args, verbose),
    }
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn resolve_generate(args: &GenerateArgs, file_config: Option<FileConfig>) -> GenerateJob {
    let file_config = file_config.unwrap_or_default();

    let center = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Center::new(lat, lng),
        _ => file_config.center().unwrap_or_default(),
    };
    let rings = if !args.rings.is_empty() {
        args.rings.clone()
    } else {
        file_config.rings.clone().unwrap_or_else(RingSpec::defaults)
    };
    let mode = args.mode.or(file_config.mode).unwrap_or_default();
    let holes = !args.no_holes && file_config.holes;

    GenerateJob {
        rings: RingsConfig::default()
            .with_center(center)
            .with_rings(rings)
            .with_holes(holes)
            .with_mode(mode),
        pretty: args.pretty || file_config.pretty,
        simplify: args.simplify,
        output: args.output.clone().or(file_config.output),
    }
}

/// `discover` searches the standard config locations when no `--config` is given
fn file_config(args: &GenerateArgs, discover: bool) -> Result<Option<FileConfig>> {
    Ok(match &args.config {
        Some(path) => Some(FileConfig::from_path(path)?),
        None if discover => FileConfig::load(),
        None => None,
    })
}

fn run_generate(args: &GenerateArgs, discover: bool) -> Result<()> {
    let job = resolve_generate(args, file_config(args, discover)?);
    let config = &job.rings;

    log::debug!(
        "Center ({:.4}, {:.4}), {} ring(s), mode {:?}, holes {}",
        config.center.lat,
        config.center.lng,
        config.rings.len(),
        config.mode,
        config.holes
    );

    let mut doc = generate_rings(config).context("Failed to generate rings")?;

    if log::log_enabled!(log::Level::Debug) {
        let projector = Projector::new(config.center);
        for spec in &config.rings {
            let ring = config.center.ring(spec.radius, spec.points)?;
            log::debug!(
                "  {}: max radial error {:.3e} m",
                spec,
                projector.max_radial_error(&ring, spec.radius)
            );
        }
    }

    if let Some(tolerance) = job.simplify {
        doc = simplify(&doc, tolerance).context("Failed to simplify rings")?;
    }

    let written = write_geojson(&doc, job.output.as_deref(), job.pretty)?;
    log::info!(
        "Wrote {} to {} ({} bytes)",
        summarize(&doc),
        target_name(&job.output),
        written
    );

    Ok(())
}

fn run_simplify(args: &SimplifyArgs, verbose: bool) -> Result<()> {
    let spinner = verbose.then(|| create_spinner("Reading GeoJSON..."));
    let start = Instant::now();

    let input = read_geojson(&args.input)?;
    let simplified = simplify(&input, args.tolerance).context("Failed to simplify GeoJSON")?;

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "Simplified {} [{:.1}s]",
            summarize(&input),
            start.elapsed().as_secs_f32()
        ));
    }

    let written = write_geojson(&simplified, args.output.as_deref(), args.pretty)?;
    log::info!("Wrote {} bytes to {}", written, target_name(&args.output));

    Ok(())
}

fn summarize(doc: &GeoJson) -> String {
    match doc {
        GeoJson::FeatureCollection(fc) => format!("{} features", fc.features.len()),
        other => other.kind().to_string(),
    }
}

fn target_name(output: &Option<PathBuf>) -> String {
    output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
