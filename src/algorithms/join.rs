use crate::algorithms::common::sliding_dot_product;
use crate::core::distance_metric::DistanceMetric;
use crate::core::profile::{sanitize, valid_windows};

/// For every window of `a`, the minimum distance to any fully-finite window
/// of `b`.
///
/// Diagonal traversal with O(1) dot-product updates, so the whole join is
/// O(n_a * n_b) regardless of `m`. Windows spanning missing values on
/// either side never participate: an invalid `a` window keeps distance
/// infinity, an invalid `b` window is skipped as a match target.
pub fn min_join_profile<M: DistanceMetric>(a: &[f64], b: &[f64], m: usize) -> Vec<f64> {
    assert!(m >= 1, "Window length must be >= 1");
    assert!(a.len() >= m, "Series A shorter than window");
    assert!(b.len() >= m, "Series B shorter than window");

    let n_a = a.len() - m + 1;
    let n_b = b.len() - m + 1;

    let a_clean = sanitize(a);
    let b_clean = sanitize(b);
    let va = valid_windows(a, m);
    let vb = valid_windows(b, m);

    let ctx_a = M::precompute(&a_clean, m);
    let ctx_b = M::precompute(&b_clean, m);

    // First dot product of each diagonal, both orientations
    let qt_first_pos = sliding_dot_product(&a_clean[0..m], &b_clean);
    let qt_first_neg = sliding_dot_product(&b_clean[0..m], &a_clean);

    let mut best = vec![f64::INFINITY; n_a];

    let consider = |best: &mut [f64], i: usize, j: usize, qt: f64| {
        if va[i] && vb[j] {
            let d = M::qt_to_distance(qt, i, j, m, &ctx_a, &ctx_b);
            if d < best[i] {
                best[i] = d;
            }
        }
    };

    // Diagonals starting at (0, k)
    for k in 0..n_b {
        let diag_len = n_a.min(n_b - k);
        let mut qt = qt_first_pos[k];
        consider(&mut best, 0, k, qt);
        for p in 1..diag_len {
            let (i, j) = (p, p + k);
            qt = qt - a_clean[i - 1] * b_clean[j - 1] + a_clean[i + m - 1] * b_clean[j + m - 1];
            consider(&mut best, i, j, qt);
        }
    }

    // Diagonals starting at (k, 0)
    for k in 1..n_a {
        let diag_len = n_b.min(n_a - k);
        let mut qt = qt_first_neg[k];
        consider(&mut best, k, 0, qt);
        for p in 1..diag_len {
            let (i, j) = (p + k, p);
            qt = qt - a_clean[i - 1] * b_clean[j - 1] + a_clean[i + m - 1] * b_clean[j + m - 1];
            consider(&mut best, i, j, qt);
        }
    }

    best
}
