use crate::core::distance_metric::DistanceMetric;

/// Per-window sums of squares, computed via cumulative sums in O(n).
#[derive(Debug, Clone)]
pub struct SquaredSums {
    /// `sum_sq[i]` = sum of squares of `ts[i..i+m]`.
    pub sum_sq: Vec<f64>,
}

impl SquaredSums {
    pub fn compute(ts: &[f64], m: usize) -> Self {
        assert!(m > 0, "Window length must be > 0");
        assert!(ts.len() >= m, "Series must be at least as long as m");

        let n = ts.len();
        let mut cumsum_sq = vec![0.0; n + 1];
        for i in 0..n {
            cumsum_sq[i + 1] = cumsum_sq[i] + ts[i] * ts[i];
        }

        let sum_sq = (0..n - m + 1)
            .map(|i| cumsum_sq[i + m] - cumsum_sq[i])
            .collect();
        Self { sum_sq }
    }
}

/// Plain (non-normalized) Euclidean distance.
///
/// `d(i,j) = sqrt(sum_sq[i] + sum_sq[j] - 2*QT)`. Used only for the
/// human-readable `Distance` column of the match reports; ranking always
/// goes through [`ZNormalizedEuclidean`](super::euclidean::ZNormalizedEuclidean).
#[derive(Debug, Clone)]
pub struct AbsoluteEuclidean;

impl DistanceMetric for AbsoluteEuclidean {
    type Context = SquaredSums;

    fn precompute(ts: &[f64], m: usize) -> Self::Context {
        SquaredSums::compute(ts, m)
    }

    fn qt_to_distance(
        qt: f64,
        i: usize,
        j: usize,
        _m: usize,
        ctx_a: &Self::Context,
        ctx_b: &Self::Context,
    ) -> f64 {
        // Clamp against tiny negatives from rounding
        (ctx_a.sum_sq[i] + ctx_b.sum_sq[j] - 2.0 * qt)
            .max(0.0)
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_sums() {
        // Windows of [1,2,3,4] at m=2: 5, 13, 25
        let ctx = SquaredSums::compute(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(ctx.sum_sq, vec![5.0, 13.0, 25.0]);
    }

    #[test]
    fn test_distance_hand_computed() {
        // ||[1,2] - [3,4]|| = sqrt(8)
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        let ctx_a = AbsoluteEuclidean::precompute(&a, 2);
        let ctx_b = AbsoluteEuclidean::precompute(&b, 2);
        let qt = 1.0 * 3.0 + 2.0 * 4.0;
        let d = AbsoluteEuclidean::qt_to_distance(qt, 0, 0, 2, &ctx_a, &ctx_b);
        assert!((d - 8.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_identical_windows_distance_zero() {
        let a = [0.5, -1.0, 2.0];
        let ctx = AbsoluteEuclidean::precompute(&a, 3);
        let qt: f64 = a.iter().map(|x| x * x).sum();
        let d = AbsoluteEuclidean::qt_to_distance(qt, 0, 0, 3, &ctx, &ctx);
        assert!(d < 1e-10);
    }
}
