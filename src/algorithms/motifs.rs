use crate::algorithms::common::apply_exclusion_zone;

/// Tunable knobs for motif extraction from a distance profile.
///
/// Named configuration instead of embedded constants; the defaults mirror
/// the exploratory-analysis settings the pipelines were tuned with.
#[derive(Debug, Clone)]
pub struct MotifConfig {
    /// Upper bound on motifs extracted per profile.
    pub max_motifs: usize,
    /// Radius around a claimed offset excluded from further search.
    pub exclusion_zone: usize,
    /// Neighbor cutoff = mean + `neighbor_std_factor` * std of the profile.
    pub neighbor_std_factor: f64,
}

impl MotifConfig {
    /// Defaults for a query of length `m`: at most 10 motifs, exclusion
    /// zone of half the query length.
    pub fn for_query_len(m: usize) -> Self {
        Self {
            max_motifs: 10,
            exclusion_zone: (m / 2).max(1),
            neighbor_std_factor: 2.0,
        }
    }
}

/// A self-similar neighborhood in one series: the best-matching offset, its
/// profile value, and the offsets of nearby-quality matches.
#[derive(Debug, Clone)]
pub struct Motif {
    pub start_offset: usize,
    pub profile_distance: f64,
    pub neighbor_offsets: Vec<usize>,
}

/// Greedy motif extraction from a distance profile.
///
/// Each round takes the profile's global minimum as a motif center, claims
/// an exclusion zone around it, then collects neighbors: remaining offsets
/// (best first) whose profile value is at most `mean + k*std` of the finite
/// profile, each claiming its own exclusion zone. Rounds repeat on the
/// remaining offsets up to `max_motifs`.
pub fn discover_motifs(profile: &[f64], cfg: &MotifConfig) -> Vec<Motif> {
    let finite: Vec<f64> = profile.iter().copied().filter(|d| d.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }
    let n_f = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n_f;
    let var = finite.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n_f;
    let max_distance = mean + cfg.neighbor_std_factor * var.sqrt();

    let mut working = profile.to_vec();
    let mut motifs = Vec::new();

    while motifs.len() < cfg.max_motifs {
        let Some((center, center_dist)) = min_finite(&working) else {
            break;
        };
        apply_exclusion_zone(&mut working, center, cfg.exclusion_zone);

        let mut neighbor_offsets = Vec::new();
        while let Some((j, d)) = min_finite(&working) {
            if d > max_distance {
                break;
            }
            neighbor_offsets.push(j);
            apply_exclusion_zone(&mut working, j, cfg.exclusion_zone);
        }

        motifs.push(Motif {
            start_offset: center,
            profile_distance: center_dist,
            neighbor_offsets,
        });
    }

    motifs
}

/// First smallest finite entry, or `None` when all entries are infinite.
fn min_finite(profile: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &d) in profile.iter().enumerate() {
        if d.is_finite() && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sharp_minimum() {
        let mut profile = vec![5.0; 40];
        profile[12] = 0.1;
        let cfg = MotifConfig::for_query_len(8);
        let motifs = discover_motifs(&profile, &cfg);

        assert!(!motifs.is_empty());
        assert_eq!(motifs[0].start_offset, 12);
        assert!((motifs[0].profile_distance - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_neighbors_within_threshold() {
        // Flat profile at 5.0 with deep dips at 10 and 30: the second dip
        // is below mean + 2*std and far outside the exclusion zone, so it
        // becomes a neighbor of the first.
        let mut profile = vec![5.0; 50];
        profile[10] = 0.1;
        profile[30] = 0.2;
        let cfg = MotifConfig::for_query_len(8);
        let motifs = discover_motifs(&profile, &cfg);

        assert_eq!(motifs[0].start_offset, 10);
        assert!(
            motifs[0].neighbor_offsets.contains(&30),
            "Dip at 30 should be claimed as a neighbor, got {:?}",
            motifs[0].neighbor_offsets
        );
    }

    #[test]
    fn test_exclusion_zone_suppresses_adjacent_offsets() {
        let mut profile = vec![5.0; 50];
        profile[10] = 0.1;
        profile[12] = 0.15; // inside the zone of 10
        let cfg = MotifConfig::for_query_len(8); // zone = 4
        let motifs = discover_motifs(&profile, &cfg);

        for motif in &motifs {
            assert_ne!(motif.start_offset, 12);
            assert!(!motif.neighbor_offsets.contains(&12));
        }
    }

    #[test]
    fn test_max_motif_bound() {
        // Strictly increasing profile: every round claims one center and
        // no neighbors, so extraction is bounded by max_motifs.
        let profile: Vec<f64> = (0..500).map(|i| 10.0 + i as f64).collect();
        let cfg = MotifConfig {
            max_motifs: 10,
            exclusion_zone: 1,
            neighbor_std_factor: -10.0, // threshold below every value
        };
        let motifs = discover_motifs(&profile, &cfg);
        assert_eq!(motifs.len(), 10);
    }

    #[test]
    fn test_all_infinite_profile_yields_nothing() {
        let profile = vec![f64::INFINITY; 20];
        let cfg = MotifConfig::for_query_len(6);
        assert!(discover_motifs(&profile, &cfg).is_empty());
    }

    #[test]
    fn test_motif_centers_respect_exclusion_zone() {
        let profile: Vec<f64> = (0..100).map(|i| ((i as f64) * 0.7).sin().abs()).collect();
        let cfg = MotifConfig::for_query_len(10); // zone = 5
        let motifs = discover_motifs(&profile, &cfg);

        let mut claimed: Vec<usize> = Vec::new();
        for motif in &motifs {
            for prev in &claimed {
                assert!(
                    motif.start_offset.abs_diff(*prev) > cfg.exclusion_zone,
                    "Centers {} and {prev} overlap",
                    motif.start_offset
                );
            }
            claimed.push(motif.start_offset);
            claimed.extend(motif.neighbor_offsets.iter().copied());
        }
    }
}
