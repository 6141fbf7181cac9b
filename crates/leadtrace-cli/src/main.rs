//! leadtrace CLI — electrode-trace extraction from raw scalar volumes.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use leadtrace::{
    extract_trace, Connectivity, ExtractConfig, ExtractionResult, IndexBounds, ScalarVolume,
    SliceRange,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "leadtrace")]
#[command(about = "Extract an electrode trace from a volumetric intensity scan")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the electrode path from a raw little-endian f32 volume.
    Extract(CliExtractArgs),

    /// Generate a seeded synthetic volume and run extraction on it.
    Synth(CliSynthArgs),

    /// Print the default extraction configuration as JSON.
    ConfigTemplate,
}

#[derive(Debug, Clone, Args)]
struct CliExtractArgs {
    /// Path to the raw volume file (little-endian f32, x fastest).
    #[arg(long)]
    volume: PathBuf,

    /// Volume dimensions as NX,NY,NZ.
    #[arg(long, value_parser = parse_usize3)]
    dims: [usize; 3],

    /// Physical voxel spacing as SX,SY,SZ.
    #[arg(long, value_parser = parse_f64x3, default_value = "1.0,1.0,1.0")]
    spacing: [f64; 3],

    /// Physical origin as OX,OY,OZ.
    #[arg(long, value_parser = parse_f64x3, default_value = "0.0,0.0,0.0")]
    origin: [f64; 3],

    /// Path to write the extraction result (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Extraction configuration JSON; individual flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tissue-reject threshold (samples at or below are suppressed).
    #[arg(long)]
    tissue_reject: Option<f32>,

    /// Metal-detect threshold (remaining samples at or above are foreground).
    #[arg(long)]
    metal_detect: Option<f32>,

    /// Planar proximity gate in physical units.
    #[arg(long)]
    proximity: Option<f64>,

    /// Region of interest as XMIN,XMAX,YMIN,YMAX,ZMIN,ZMAX.
    #[arg(long, value_parser = parse_usize6)]
    roi: Option<[usize; 6]>,

    /// Top slice index of the descending traversal (requires --slice-bottom).
    #[arg(long, requires = "slice_bottom")]
    slice_top: Option<usize>,

    /// Bottom slice index of the traversal (requires --slice-top).
    #[arg(long, requires = "slice_top")]
    slice_bottom: Option<usize>,

    /// Foreground connectivity for component labeling.
    #[arg(long, value_enum)]
    connectivity: Option<ConnectivityArg>,
}

#[derive(Debug, Clone, Args)]
struct CliSynthArgs {
    /// Volume dimensions as NX,NY,NZ.
    #[arg(long, value_parser = parse_usize3, default_value = "96,96,64")]
    dims: [usize; 3],

    /// RNG seed for the noise background.
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Electrode column position as X,Y; defaults to the volume center.
    #[arg(long, value_parser = parse_usize2)]
    column: Option<[usize; 2]>,

    /// Metal intensity of the synthetic electrode.
    #[arg(long, default_value = "3200.0")]
    metal: f32,

    /// Optional path to write the extraction result (JSON).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConnectivityArg {
    Four,
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        }
    }
}

fn parse_fixed<T, const N: usize>(s: &str, what: &str) -> Result<[T; N], String>
where
    T: std::str::FromStr + Copy + Default,
{
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated {what}, got {}", parts.len()));
    }
    let mut out = [T::default(); N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid {what} component: {part}"))?;
    }
    Ok(out)
}

fn parse_usize2(s: &str) -> Result<[usize; 2], String> {
    parse_fixed(s, "indices")
}

fn parse_usize3(s: &str) -> Result<[usize; 3], String> {
    parse_fixed(s, "indices")
}

fn parse_usize6(s: &str) -> Result<[usize; 6], String> {
    parse_fixed(s, "indices")
}

fn parse_f64x3(s: &str) -> Result<[f64; 3], String> {
    parse_fixed(s, "values")
}

fn read_raw_volume(
    path: &Path,
    dims: [usize; 3],
    spacing: [f64; 3],
    origin: [f64; 3],
) -> CliResult<ScalarVolume> {
    let bytes = std::fs::read(path)?;
    let expected = dims[0] * dims[1] * dims[2] * 4;
    if bytes.len() != expected {
        return Err(format!(
            "volume file holds {} bytes, expected {} for dimensions {:?}",
            bytes.len(),
            expected,
            dims
        )
        .into());
    }
    let data = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(ScalarVolume::new(dims, spacing, origin, data)?)
}

fn build_config(args: &CliExtractArgs) -> CliResult<ExtractConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::from_json_file(path)?,
        None => ExtractConfig::default(),
    };
    if let Some(v) = args.tissue_reject {
        config.threshold.tissue_reject = v;
    }
    if let Some(v) = args.metal_detect {
        config.threshold.metal_detect = v;
    }
    if let Some(v) = args.proximity {
        config.proximity_radius = v;
    }
    if let Some([x0, x1, y0, y1, z0, z1]) = args.roi {
        config.roi = Some(IndexBounds::new(x0, x1, y0, y1, z0, z1));
    }
    if let (Some(top), Some(bottom)) = (args.slice_top, args.slice_bottom) {
        config.slice_range = Some(SliceRange { top, bottom });
    }
    if let Some(c) = args.connectivity {
        config.connectivity = c.into();
    }
    Ok(config)
}

fn write_result(path: &Path, result: &ExtractionResult) -> CliResult<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn print_summary(result: &ExtractionResult) {
    let stats = &result.stats;
    println!(
        "Traversed {} slice(s): {} region(s), {} accepted, {} rejected.",
        stats.n_slices, stats.n_regions, stats.n_accepted, stats.n_rejected
    );
    match (result.path.points().first(), result.path.points().last()) {
        (Some(first), Some(last)) => println!(
            "Path: {} point(s), from ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2}).",
            result.path.len(),
            first.x,
            first.y,
            first.z,
            last.x,
            last.y,
            last.z
        ),
        _ => println!("No electrode trace found."),
    }
}

fn cmd_extract(args: CliExtractArgs) -> CliResult<()> {
    let config = build_config(&args)?;
    let volume = read_raw_volume(&args.volume, args.dims, args.spacing, args.origin)?;
    info!("loaded volume {:?} from {}", args.dims, args.volume.display());

    let result = extract_trace(&volume, &config)?;
    print_summary(&result);
    write_result(&args.out, &result)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

fn cmd_synth(args: CliSynthArgs) -> CliResult<()> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let dims = args.dims;
    let [cx, cy] = args.column.unwrap_or([dims[0] / 2, dims[1] / 2]);
    if cx >= dims[0] || cy >= dims[1] {
        return Err(format!("column ({cx}, {cy}) outside dimensions {dims:?}").into());
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut data = vec![0.0f32; dims[0] * dims[1] * dims[2]];
    for v in &mut data {
        *v = rng.random_range(0.0..800.0);
    }
    for z in 0..dims[2] {
        data[(z * dims[1] + cy) * dims[0] + cx] = args.metal;
    }
    let volume = ScalarVolume::new(dims, [1.0; 3], [0.0; 3], data)?;
    info!("synthesized volume {dims:?} with column at ({cx}, {cy})");

    let result = extract_trace(&volume, &ExtractConfig::default())?;
    print_summary(&result);
    if let Some(out) = &args.out {
        write_result(out, &result)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

fn cmd_config_template() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&ExtractConfig::default())?);
    Ok(())
}

fn main() -> CliResult<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => cmd_extract(args),
        Commands::Synth(args) => cmd_synth(args),
        Commands::ConfigTemplate => cmd_config_template(),
    }
}
