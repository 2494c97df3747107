use crate::algorithms::common::sliding_dot_product;
use crate::core::distance_metric::DistanceMetric;
use crate::core::profile::sanitize;

/// Distance profile of `query` against every window of `ts`.
///
/// MASS-style: rolling statistics once per operand, one sliding dot
/// product, then a QT-to-distance conversion per offset. Output length is
/// `ts.len() - query.len() + 1`.
///
/// Non-finite values in either operand are zero-filled before the dot
/// product so the arithmetic stays finite; windows spanning missing data
/// are detected by the callers that care (the consensus search masks them,
/// the query pipeline drops them after motif discovery).
///
/// # Panics
/// Panics if `query` is empty or `ts` is shorter than `query`.
pub fn distance_profile<M: DistanceMetric>(query: &[f64], ts: &[f64]) -> Vec<f64> {
    let m = query.len();
    assert!(m > 0, "Query must be non-empty");
    assert!(ts.len() >= m, "Series must be at least as long as the query");

    let q_clean = sanitize(query);
    let ts_clean = sanitize(ts);

    let ctx_q = M::precompute(&q_clean, m);
    let ctx_ts = M::precompute(&ts_clean, m);
    let qt = sliding_dot_product(&q_clean, &ts_clean);

    qt.iter()
        .enumerate()
        .map(|(j, &qt_j)| M::qt_to_distance(qt_j, 0, j, m, &ctx_q, &ctx_ts))
        .collect()
}

/// Z-normalized distance between two equal-length windows.
///
/// A one-window special case of [`distance_profile`], used for the pairwise
/// distances of aligned consensus windows.
pub fn window_distance<M: DistanceMetric>(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Windows must have equal length");
    distance_profile::<M>(a, b)[0]
}
