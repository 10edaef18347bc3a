use clap::Parser;
use rand::Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use turfmast_core::banner::{VERSION_MAJOR, VERSION_MINOR};
use turfmast_core::{parse_seed, run, RandomiserSettings};

#[derive(Debug, Parser)]
#[command(
    name = "turfmast-randomiser",
    version,
    about = "Neo Turf Masters hole and pin randomiser"
)]
struct Args {
    /// Unmodified P1 program ROM
    #[arg(long)]
    input: PathBuf,

    /// Where to write the patched ROM
    #[arg(long)]
    output: PathBuf,

    /// Seed in hexadecimal; random when omitted
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u32>,

    /// Randomise the order of the holes
    #[arg(long, default_value_t = false)]
    holes: bool,

    /// Generate new pin locations for each hole
    #[arg(long, default_value_t = false)]
    pins: bool,

    /// Also write <OUTPUT>.spoiler.json listing where every hole went
    #[arg(long, default_value_t = false)]
    spoiler: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen::<u32>());

    let settings = RandomiserSettings {
        seed,
        randomize_holes: args.holes,
        randomize_pins: args.pins,
        write_spoiler: args.spoiler,
        input_path: args.input,
        output_path: args.output,
    };

    if let Err(err) = run(settings) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    println!("TurfMastRand Version {}.{}", VERSION_MAJOR, VERSION_MINOR);
    println!("Seed: {:08X}", seed);
}
