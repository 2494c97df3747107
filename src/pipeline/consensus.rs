use std::fs;
use std::path::Path;

use itertools::Itertools;
use log::info;

use crate::algorithms::mass::window_distance;
use crate::algorithms::ostinato::{align_to_seed, find_consensus};
use crate::core::series::Series;
use crate::error::{Error, Result};
use crate::io::reactivity_csv::load_series_dir;
use crate::metrics::euclidean::ZNormalizedEuclidean;
use crate::pipeline::report;
use crate::render::{self, PlotConfig};

/// Options of one `find-conserved-motifs` run.
#[derive(Debug, Clone, Default)]
pub struct ConsensusRunOptions {
    pub plot: PlotConfig,
}

/// Full consensus pipeline over a directory of reactivity CSVs.
///
/// Finds the consensus seed of length `m`, aligns every series to it, and
/// exports: the seed window (`conserved-motif-{m}.csv`), the alignment
/// summary (`all-motifs-list-{m}.txt`), pairwise distances between the
/// aligned windows (`aligned-motifs-distances-{m}.csv`), and two SVG
/// figures (overlaid alignment and per-series panels with the aligned
/// window highlighted).
pub fn run(input_dir: &Path, results_dir: &Path, m: usize, opts: &ConsensusRunOptions) -> Result<()> {
    fs::create_dir_all(results_dir).map_err(|source| Error::Io {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let series = load_series_dir(input_dir)?;
    info!("loaded {} series from {}", series.len(), input_dir.display());

    // Shared y-range of the panel figure, padded by 0.2
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in &series {
        let (lo, hi) = s.finite_min_max()?;
        y_min = y_min.min(lo);
        y_max = y_max.max(hi);
    }
    let y_range = (y_min - 0.2, y_max + 0.2);

    let seed = find_consensus(&series, m)?;
    let aligned = align_to_seed(&series, &seed, m);
    let seed_series = &series[seed.series_index];
    info!(
        "consensus seed: {} @ {} (radius {:.2})",
        seed_series.name(),
        seed.start,
        seed.radius
    );

    let mut lines = vec![format!(
        "Lowest radius ({:.2}) found in location {}-{} of data file {} (seed motif sequence: {}).",
        seed.radius,
        seed.start + 1,
        seed.start + m + 1,
        seed_series.name(),
        seed_series.sequence(seed.start, m)
    )];
    for (i, s) in series.iter().enumerate() {
        if i == seed.series_index {
            continue;
        }
        lines.push(format!(
            "{}: {} {}-{}",
            s.name(),
            s.sequence(aligned[i], m),
            aligned[i] + 1,
            aligned[i] + m + 1
        ));
    }

    let seed_window = &seed_series.fshapes()[seed.start..seed.start + m];
    report::write_seed_motif(&results_dir.join(format!("conserved-motif-{m}.csv")), seed_window)?;
    report::write_alignment_list(&results_dir.join(format!("all-motifs-list-{m}.txt")), &lines)?;

    let pairs = pairwise_distances(&series, &aligned, m);
    report::write_pairwise_distances(
        &results_dir.join(format!("aligned-motifs-distances-{m}.csv")),
        &pairs,
    )?;

    let windows: Vec<Vec<f64>> = series
        .iter()
        .zip(&aligned)
        .map(|(s, &start)| s.fshapes()[start..start + m].to_vec())
        .collect();
    render::plot_alignment(
        &results_dir.join(format!("all-motifs-alignment-{m}.svg")),
        &windows,
        seed.series_index,
        &opts.plot,
    )?;
    let highlights: Vec<(usize, usize)> = aligned.iter().map(|&start| (start, m)).collect();
    render::plot_signal_panels(
        &results_dir.join(format!("all-motifs-presented-independently-{m}.svg")),
        &series,
        &highlights,
        y_range,
        &opts.plot,
    )?;

    Ok(())
}

/// Z-normalized distances between every pair of aligned windows, pairs
/// enumerated in series load order.
fn pairwise_distances(series: &[Series], aligned: &[usize], m: usize) -> Vec<(String, String, f64)> {
    (0..series.len())
        .combinations(2)
        .map(|pair| {
            let (i, j) = (pair[0], pair[1]);
            let a = &series[i].fshapes()[aligned[i]..aligned[i] + m];
            let b = &series[j].fshapes()[aligned[j]..aligned[j] + m];
            (
                series[i].name().to_string(),
                series[j].name().to_string(),
                window_distance::<ZNormalizedEuclidean>(a, b),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::Nucleotide;

    fn series_from(name: &str, values: &[f64]) -> Series {
        let nts: Vec<Nucleotide> = values.iter().map(|&v| Nucleotide::new(v)).collect();
        Series::new(name, &nts)
    }

    #[test]
    fn test_pairwise_distances_cover_all_pairs_in_order() {
        let values: Vec<f64> = (0..20).map(|i| (i as f64 * 0.7).sin()).collect();
        let series = vec![
            series_from("a", &values),
            series_from("b", &values),
            series_from("c", &values),
        ];
        let aligned = vec![2, 2, 2];
        let pairs = pairwise_distances(&series, &aligned, 5);

        let names: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(a, b, _)| (a.as_str(), b.as_str()))
            .collect();
        assert_eq!(names, vec![("a", "b"), ("a", "c"), ("b", "c")]);
        for (_, _, d) in &pairs {
            assert!(*d < 1e-9, "Identical windows should be at distance 0");
        }
    }
}
