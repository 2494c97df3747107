use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use fshape_motifs::pipeline::consensus::{self, ConsensusRunOptions};

/// Find the motif conserved across a directory of reactivity profiles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory of reactivity CSV files (Reactivity and Sequence columns)
    #[arg(short = 'i', long = "input-data-path")]
    input_data_path: PathBuf,

    /// Directory the result files are written to
    #[arg(short = 'r', long = "results-path")]
    results_path: PathBuf,

    /// Motif length in nucleotides
    #[arg(short = 'l', long = "expected-motif-length")]
    expected_motif_length: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    consensus::run(
        &args.input_data_path,
        &args.results_path,
        args.expected_motif_length,
        &ConsensusRunOptions::default(),
    )?;
    Ok(())
}
