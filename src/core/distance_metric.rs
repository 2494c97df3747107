/// Subsequence distance metric used by the similarity engine.
///
/// Static polymorphism: profile and join code is generic over
/// `M: DistanceMetric`, so the distance conversion inlines into the
/// traversal loops. The associated `Context` holds per-series statistics
/// precomputed once (rolling means/stds, sums of squares), never per pair.
pub trait DistanceMetric: Send + Sync {
    /// Precomputed per-series statistics.
    type Context: Send + Sync;

    fn precompute(ts: &[f64], m: usize) -> Self::Context;

    /// Convert a dot product between window `i` of series A and window `j`
    /// of series B into a distance, given both series' contexts.
    fn qt_to_distance(
        qt: f64,
        i: usize,
        j: usize,
        m: usize,
        ctx_a: &Self::Context,
        ctx_b: &Self::Context,
    ) -> f64;
}
