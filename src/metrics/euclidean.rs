use crate::core::distance_metric::DistanceMetric;
use crate::core::profile::RollingStats;

/// Z-normalized Euclidean distance.
///
/// `d = sqrt(2 * m * (1 - r))` with
/// `r = (QT - m * mu_i * mu_j) / (m * sigma_i * sigma_j)`, which makes the
/// distance invariant to additive and multiplicative scaling of the signal.
/// Probing intensity varies by experiment, so this is the ranking metric
/// everywhere in the toolkit.
///
/// Saturation at zero variance:
/// - both windows constant → d = 0 (a constant matches a constant exactly)
/// - exactly one constant → d = sqrt(2*m)
/// - `r` is clamped to [-1, 1] for numerical stability
#[derive(Debug, Clone)]
pub struct ZNormalizedEuclidean;

impl DistanceMetric for ZNormalizedEuclidean {
    type Context = RollingStats;

    fn precompute(ts: &[f64], m: usize) -> Self::Context {
        RollingStats::compute(ts, m)
    }

    fn qt_to_distance(
        qt: f64,
        i: usize,
        j: usize,
        m: usize,
        ctx_a: &Self::Context,
        ctx_b: &Self::Context,
    ) -> f64 {
        let msi = ctx_a.m_sigma_inv[i];
        let msj = ctx_b.m_sigma_inv[j];
        let m_f = m as f64;

        if msi == 0.0 && msj == 0.0 {
            return 0.0;
        }
        if msi == 0.0 || msj == 0.0 {
            return (2.0 * m_f).sqrt();
        }

        // m_sigma_inv = 1/(sqrt(m)*sigma), so the product is 1/(m*sigma_i*sigma_j)
        let r = (qt - m_f * ctx_a.mean[i] * ctx_b.mean[j]) * msi * msj;
        let r_clamped = r.clamp(-1.0, 1.0);
        (2.0 * m_f * (1.0 - r_clamped)).max(0.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &[f64], b: &[f64]) -> f64 {
        let m = a.len();
        let ctx_a = ZNormalizedEuclidean::precompute(a, m);
        let ctx_b = ZNormalizedEuclidean::precompute(b, m);
        let qt: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        ZNormalizedEuclidean::qt_to_distance(qt, 0, 0, m, &ctx_a, &ctx_b)
    }

    #[test]
    fn test_self_distance_is_zero() {
        let w = vec![1.0, 2.0, 3.0, 4.0];
        assert!(distance(&w, &w) < 1e-7);
    }

    #[test]
    fn test_affine_invariance() {
        // scale * x + shift must not change the distance (up to tolerance)
        let a = vec![0.3, 1.4, -0.2, 0.8, 2.1];
        let b: Vec<f64> = a.iter().map(|x| 3.5 * x - 1.2).collect();
        assert!(
            distance(&a, &b) < 1e-7,
            "Affine transform changed the distance: {}",
            distance(&a, &b)
        );
    }

    #[test]
    fn test_both_constant_saturates_to_zero() {
        let a = vec![2.0; 5];
        let b = vec![7.0; 5];
        assert_eq!(distance(&a, &b), 0.0);
    }

    #[test]
    fn test_one_constant_saturates_to_sqrt_2m() {
        let a = vec![2.0; 4];
        let b = vec![1.0, 2.0, 3.0, 4.0];
        let expected = (2.0 * 4.0_f64).sqrt();
        assert!((distance(&a, &b) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_anticorrelated_windows() {
        // z-norm of [1,2] is [-1,1]; z-norm of [4,3] is [1,-1]
        // r = -1 → d = sqrt(2*2*2) = 2*sqrt(2)
        let a = vec![1.0, 2.0];
        let b = vec![4.0, 3.0];
        let expected = 8.0_f64.sqrt();
        assert!((distance(&a, &b) - expected).abs() < 1e-10);
    }
}
