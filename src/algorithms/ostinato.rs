use rayon::prelude::*;

use crate::algorithms::join::min_join_profile;
use crate::algorithms::mass::distance_profile;
use crate::core::series::Series;
use crate::error::{Error, Result};
use crate::metrics::euclidean::ZNormalizedEuclidean;

/// The chosen consensus seed: one window of one series, together with its
/// radius (the maximum over all series of the minimum distance between the
/// seed and any window of that series).
#[derive(Debug, Clone)]
pub struct ConsensusSeed {
    pub series_index: usize,
    pub start: usize,
    pub radius: f64,
}

/// Best window of one candidate series: for each of its windows, take the
/// max over all other series of the min distance, then keep the window
/// minimizing that max. Returns `None` when no window has a finite radius.
fn evaluate_candidate(series: &[Series], c: usize, m: usize) -> Option<(usize, f64)> {
    let n_c = series[c].len() - m + 1;
    let mut worst = vec![0.0_f64; n_c];

    for (o, other) in series.iter().enumerate() {
        if o == c {
            continue;
        }
        let mins =
            min_join_profile::<ZNormalizedEuclidean>(series[c].fshapes(), other.fshapes(), m);
        for (w, &d) in worst.iter_mut().zip(&mins) {
            *w = w.max(d);
        }
    }

    // First finite minimum in offset order
    let mut best: Option<(usize, f64)> = None;
    for (start, &radius) in worst.iter().enumerate() {
        if radius.is_finite() && best.map_or(true, |(_, r)| radius < r) {
            best = Some((start, radius));
        }
    }
    best
}

/// Find the consensus motif seed across multiple reactivity series.
///
/// Every length-`m` window of every series is a candidate; the seed is the
/// candidate with the globally minimal radius. Ties break to the first
/// candidate in series-then-offset scan order. Candidates are evaluated in
/// parallel; the scan over results is sequential so the tie-break stays
/// deterministic.
pub fn find_consensus(series: &[Series], m: usize) -> Result<ConsensusSeed> {
    if m < 2 {
        return Err(Error::MotifTooShort(m));
    }
    if series.len() < 2 {
        return Err(Error::TooFewSeries(series.len()));
    }
    for s in series {
        if s.len() < m {
            return Err(Error::SeriesTooShort {
                name: s.name().to_string(),
                len: s.len(),
                m,
            });
        }
    }

    let candidates: Vec<Option<(usize, f64)>> = (0..series.len())
        .into_par_iter()
        .map(|c| evaluate_candidate(series, c, m))
        .collect();

    let mut seed: Option<ConsensusSeed> = None;
    for (c, candidate) in candidates.iter().enumerate() {
        if let Some((start, radius)) = *candidate {
            if seed.as_ref().map_or(true, |s| radius < s.radius) {
                seed = Some(ConsensusSeed {
                    series_index: c,
                    start,
                    radius,
                });
            }
        }
    }
    seed.ok_or(Error::NoUsableWindow)
}

/// Best-matching offset of the seed window in every series.
///
/// The seed's own series keeps the seed start; every other series gets the
/// argmin of the seed's distance profile, first offset on ties.
pub fn align_to_seed(series: &[Series], seed: &ConsensusSeed, m: usize) -> Vec<usize> {
    let seed_window = &series[seed.series_index].fshapes()[seed.start..seed.start + m];

    series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i == seed.series_index {
                return seed.start;
            }
            let dp = distance_profile::<ZNormalizedEuclidean>(seed_window, s.fshapes());
            let mut best = 0;
            for (j, &d) in dp.iter().enumerate() {
                if d < dp[best] {
                    best = j;
                }
            }
            best
        })
        .collect()
}
