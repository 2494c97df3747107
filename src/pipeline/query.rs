use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::algorithms::mass::{distance_profile, window_distance};
use crate::algorithms::motifs::{discover_motifs, Motif, MotifConfig};
use crate::core::series::Series;
use crate::error::Result;
use crate::io::fshape::load_fshape_file;
use crate::metrics::absolute::AbsoluteEuclidean;
use crate::metrics::euclidean::ZNormalizedEuclidean;
use crate::pipeline::report;
use crate::render::{self, PlotConfig};

/// Knobs of the query-matching pipeline.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Upper bound on motifs extracted per candidate.
    pub max_motifs: usize,
    /// Neighbor cutoff factor passed down to motif discovery.
    pub neighbor_std_factor: f64,
    /// A query value above this is a "reactive" position the match must
    /// reproduce (sign-compatibility filter).
    pub reactive_threshold: f64,
    /// Number of best matches kept for visualization.
    pub top: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_motifs: 10,
            neighbor_std_factor: 2.0,
            reactive_threshold: 1.0,
            top: 10,
        }
    }
}

/// One candidate motif: a shared, immutable series plus exactly one motif.
///
/// Splitting multi-motif candidates clones the `Arc`, never the columns, so
/// every record downstream can assume one motif without aliasing the
/// backing data mutably.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub series: Arc<Series>,
    pub motif: Motif,
}

impl MatchRecord {
    pub fn start(&self) -> usize {
        self.motif.start_offset
    }

    /// Half-open matched range rendered as `start-end`.
    pub fn range_label(&self, m: usize) -> String {
        format!("{}-{}", self.start(), self.start() + m)
    }

    pub fn fshape_window(&self, m: usize) -> &[f64] {
        &self.series.fshapes()[self.start()..self.start() + m]
    }

    pub fn shape_window(&self, m: usize) -> &[f64] {
        &self.series.shapes()[self.start()..self.start() + m]
    }

    pub fn sequence(&self, m: usize) -> String {
        self.series.sequence(self.start(), m)
    }

    pub fn has_missing_values(&self, m: usize) -> bool {
        self.fshape_window(m).iter().any(|v| !v.is_finite())
    }

    /// Plain Euclidean distance to the query (the human-readable column).
    pub fn raw_distance(&self, query: &Series) -> f64 {
        window_distance::<AbsoluteEuclidean>(query.fshapes(), self.fshape_window(query.len()))
    }

    /// Every reactive query position must be reactive in the match too.
    /// The check is independent of base identity and applies at every
    /// position.
    pub fn is_sign_compatible(&self, query: &Series, threshold: f64) -> bool {
        let window = self.fshape_window(query.len());
        query
            .fshapes()
            .iter()
            .zip(window)
            .all(|(&q, &w)| !(q > threshold && w <= threshold))
    }

    /// Base-composition similarity: 2 per exact match, 1 per shared
    /// purine {A,G} or pyrimidine {C,T,U} group, query `N` skipped.
    /// A review heuristic only, never used for ranking.
    pub fn sequence_score(&self, query: &Series) -> u32 {
        let window = &self.series.bases()[self.start()..self.start() + query.len()];
        query
            .bases()
            .iter()
            .zip(window)
            .map(|(&q, &w)| match () {
                _ if q == 'N' => 0,
                _ if q == w => 2,
                _ if is_purine(q) && is_purine(w) => 1,
                _ if is_pyrimidine(q) && is_pyrimidine(w) => 1,
                _ => 0,
            })
            .sum()
    }
}

fn is_purine(base: char) -> bool {
    matches!(base, 'A' | 'G')
}

fn is_pyrimidine(base: char) -> bool {
    matches!(base, 'C' | 'T' | 'U')
}

/// Result of the matching pipeline: the full ranked set and the
/// sign-compatible subset, both sorted ascending by z-normalized distance.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub ranked: Vec<MatchRecord>,
    pub filtered: Vec<MatchRecord>,
}

impl MatchOutcome {
    pub fn top(&self, n: usize) -> &[MatchRecord] {
        &self.filtered[..self.filtered.len().min(n)]
    }
}

/// Match a query pattern against a set of candidate series.
///
/// Per candidate (in parallel): skip candidates without enough finite
/// values to cover one window, compute the distance profile against the
/// query, extract self-similar motifs. Then, sequentially: split to one
/// motif per record, drop matches spanning missing data, rank by the
/// profile value at the matched offset, and apply the sign filter.
/// An empty query has no window to match and yields an empty outcome.
pub fn match_query(query: &Series, candidates: Vec<Series>, cfg: &MatchConfig) -> MatchOutcome {
    let m = query.len();
    if m == 0 {
        return MatchOutcome::default();
    }
    let motif_cfg = MotifConfig {
        max_motifs: cfg.max_motifs,
        exclusion_zone: (m / 2).max(1),
        neighbor_std_factor: cfg.neighbor_std_factor,
    };

    let per_candidate: Vec<Vec<MatchRecord>> = candidates
        .into_par_iter()
        .map(|candidate| {
            if candidate.len() < m || candidate.finite_count() < m {
                return Vec::new();
            }
            let profile =
                distance_profile::<ZNormalizedEuclidean>(query.fshapes(), candidate.fshapes());
            let motifs = discover_motifs(&profile, &motif_cfg);
            let series = Arc::new(candidate);
            motifs
                .into_iter()
                .map(|motif| MatchRecord {
                    series: Arc::clone(&series),
                    motif,
                })
                .collect()
        })
        .collect();

    let mut ranked: Vec<MatchRecord> = per_candidate.into_iter().flatten().collect();
    ranked.retain(|r| !r.has_missing_values(m));
    ranked.sort_by(|a, b| {
        a.motif
            .profile_distance
            .total_cmp(&b.motif.profile_distance)
    });

    let filtered = ranked
        .iter()
        .filter(|r| r.is_sign_compatible(query, cfg.reactive_threshold))
        .cloned()
        .collect();

    MatchOutcome { ranked, filtered }
}

/// Options of one `find-query` run.
#[derive(Debug, Clone, Default)]
pub struct QueryRunOptions {
    pub scramble: bool,
    /// RNG seed for `scramble`; unseeded runs are non-deterministic and
    /// excluded from golden-output comparisons.
    pub seed: Option<u64>,
    pub config: MatchConfig,
    pub plot: PlotConfig,
}

/// Full `find-query` pipeline: load, optionally scramble, match, export
/// both tables, render the top matches. An empty result set still produces
/// header-only tables and skips rendering.
pub fn run(
    query_path: &Path,
    input_paths: &[PathBuf],
    results_dir: &Path,
    opts: &QueryRunOptions,
) -> Result<()> {
    fs::create_dir_all(results_dir).map_err(|source| crate::error::Error::Io {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let query = load_fshape_file(query_path)?;
    if query.is_empty() {
        return Err(crate::error::Error::MotifTooShort(0));
    }
    let mut candidates = input_paths
        .iter()
        .map(|p| load_fshape_file(p))
        .collect::<Result<Vec<_>>>()?;
    info!(
        "matching query {} (m={}) against {} candidate(s)",
        query.name(),
        query.len(),
        candidates.len()
    );

    if opts.scramble {
        let mut rng = match opts.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        for candidate in &mut candidates {
            candidate.scramble(&mut rng);
        }
    }

    let outcome = match_query(&query, candidates, &opts.config);
    info!(
        "{} ranked match(es), {} after the sign filter",
        outcome.ranked.len(),
        outcome.filtered.len()
    );

    report::write_match_table(&results_dir.join("output.csv"), &outcome.ranked, &query)?;
    report::write_match_table(
        &results_dir.join("output-filtered.csv"),
        &outcome.filtered,
        &query,
    )?;

    let top = outcome.top(opts.config.top);
    render::plot_query_matches(
        &results_dir.join("motifs-highlighted.svg"),
        &query,
        top,
        &opts.plot,
    )?;
    render::plot_matched_windows(
        &results_dir.join("motifs-only.svg"),
        &query,
        top,
        &opts.plot,
    )?;

    Ok(())
}
