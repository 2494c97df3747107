use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use fshape_motifs::pipeline::query::{self, QueryRunOptions};

/// Match a query reactivity pattern against fSHAPE/SHAPE profiles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the pattern data
    #[arg(long)]
    query: PathBuf,

    /// Directory the result files are written to
    #[arg(long)]
    results: PathBuf,

    /// Shuffle each input file in a random manner to test robustness
    #[arg(long)]
    scramble: bool,

    /// RNG seed for --scramble; omit for a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Paths to fSHAPE or SHAPE files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let opts = QueryRunOptions {
        scramble: args.scramble,
        seed: args.seed,
        ..QueryRunOptions::default()
    };
    query::run(&args.query, &args.inputs, &args.results, &opts)?;
    Ok(())
}
