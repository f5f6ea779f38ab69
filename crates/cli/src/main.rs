//! sleighpack - Split weighted, geolocated items into capacity-bounded rounds
//!
//! Reads an `id,latitude,longitude,weight` item list, orders items by
//! distance from a reference point and writes one manifest line per round.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use sleighpack_core::config::{DEFAULT_CAPACITY, DEFAULT_MAX_ROUNDS, DEFAULT_REFERENCE};
use sleighpack_core::manifest::{read_items, write_round, write_round_json};
use sleighpack_core::{
    DistanceIndex, MembershipTracker, PlanConfig, Result, RoundPlanner, StopReason,
};
use tracing_subscriber::EnvFilter;

/// Output format for the round manifest.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputType {
    /// `round, id, id, ...` per line (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Split weighted, geolocated items into capacity-bounded rounds,
/// nearest items first.
#[derive(Parser, Debug)]
#[command(name = "sleighpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the item list (`id,latitude,longitude,weight` with a header line)
    input: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Planning options ===
    /// Latitude of the reference point, in degrees
    #[arg(long = "ref-lat", default_value_t = DEFAULT_REFERENCE.lat, allow_hyphen_values = true)]
    ref_lat: f64,

    /// Longitude of the reference point, in degrees
    #[arg(long = "ref-lon", default_value_t = DEFAULT_REFERENCE.lon, allow_hyphen_values = true)]
    ref_lon: f64,

    /// Maximum total weight per round
    #[arg(short = 'c', long, default_value_t = DEFAULT_CAPACITY)]
    capacity: f64,

    /// Upper bound on the number of rounds
    #[arg(short = 'm', long = "max-rounds", default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    // === Output options ===
    /// Path to file where the manifest is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,
}

/// Infer output type from file extension.
fn infer_output_type(path: &str) -> Option<OutputType> {
    let path_lower = path.to_lowercase();
    if path_lower.ends_with(".json") || path_lower.ends_with(".jsonl") {
        Some(OutputType::Json)
    } else {
        None
    }
}

fn build_config(args: &Args) -> Result<PlanConfig> {
    let config = PlanConfig::default()
        .with_reference(args.ref_lat, args.ref_lon)
        .with_capacity(args.capacity)
        .with_max_rounds(args.max_rounds);
    config.validate()?;
    Ok(config)
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

struct Summary {
    rounds: usize,
    assigned: usize,
    unassigned: usize,
    stop_reason: Option<StopReason>,
}

/// Plan rounds for a single item file and stream them to `writer`.
fn process_file<W: Write>(
    path: &Path,
    writer: &mut W,
    config: &PlanConfig,
    output_type: OutputType,
) -> Result<Summary> {
    let file = File::open(path)?;
    let items = read_items(BufReader::new(file))?;
    tracing::info!(items = items.len(), path = %path.display(), "loaded items");

    let index = DistanceIndex::build(&items, config.reference)?;
    let mut tracker = MembershipTracker::new();
    tracker.try_reserve(items.len())?;

    let mut planner = RoundPlanner::new(&index, &mut tracker, config)?;

    let mut rounds = 0;
    let mut assigned = 0;
    for round in planner.by_ref() {
        let round = round?;
        match output_type {
            OutputType::Text => write_round(writer, &round)?,
            OutputType::Json => write_round_json(writer, &round)?,
        }
        rounds += 1;
        assigned += round.ids.len();
    }

    Ok(Summary {
        rounds,
        assigned,
        unassigned: planner.unassigned().len(),
        stop_reason: planner.stop_reason(),
    })
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Determine output type (may be inferred from output filename)
    let output_type = if args.output_type == OutputType::Text && args.outfile != "-" {
        infer_output_type(&args.outfile).unwrap_or(args.output_type)
    } else {
        args.output_type
    };

    if !args.input.exists() {
        eprintln!("Error: File not found: {}", args.input.display());
        std::process::exit(1);
    }

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    let summary = match process_file(&args.input, &mut output, &config, output_type) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error processing {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };

    output.flush()?;

    let reason = summary
        .stop_reason
        .map_or_else(|| "unknown".to_string(), |r| r.to_string());
    eprintln!(
        "{} rounds written, {} items assigned, {} unassigned ({})",
        summary.rounds, summary.assigned, summary.unassigned, reason
    );

    Ok(())
}
