use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use fshape_motifs::pipeline::silence;

/// Blank out reactivity positions too far from any high-signal position to
/// ever take part in a motif of the expected length.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory of reactivity CSV files
    #[arg(short = 'i', long = "input-data-path")]
    input_data_path: PathBuf,

    /// Directory the silenced copies are written to
    #[arg(short = 'r', long = "results-path")]
    results_path: PathBuf,

    /// Motif length in nucleotides
    #[arg(short = 'l', long = "expected-motif-length")]
    expected_motif_length: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    silence::run(
        &args.input_data_path,
        &args.results_path,
        args.expected_motif_length,
    )?;
    Ok(())
}
