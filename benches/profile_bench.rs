use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fshape_motifs::algorithms::common::{
    sliding_dot_product, sliding_dot_product_fft, sliding_dot_product_naive,
};
use fshape_motifs::algorithms::join::min_join_profile;
use fshape_motifs::core::profile::RollingStats;
use fshape_motifs::{distance_profile, find_consensus, Nucleotide, Series, ZNormalizedEuclidean};

fn bench_sliding_dot_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("sliding_dot_product");
    for n in [1_000, 5_000, 10_000] {
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        let m = 100;
        let q: Vec<f64> = ts[0..m].to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sliding_dot_product(black_box(&q), black_box(&ts)))
        });
    }
    group.finish();
}

fn bench_sdp_naive_vs_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdp_naive_vs_fft");
    let m = 100;
    for n in [500, 1_000, 2_000, 5_000, 10_000] {
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        let q: Vec<f64> = ts[0..m].to_vec();
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, _| {
            b.iter(|| sliding_dot_product_naive(black_box(&q), black_box(&ts)))
        });
        group.bench_with_input(BenchmarkId::new("fft", n), &n, |b, _| {
            b.iter(|| sliding_dot_product_fft(black_box(&q), black_box(&ts)))
        });
    }
    group.finish();
}

fn bench_rolling_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_stats");
    for n in [1_000, 5_000, 10_000] {
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| RollingStats::compute(black_box(&ts), 100))
        });
    }
    group.finish();
}

fn bench_distance_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_profile");
    let m = 13;
    for n in [1_000, 5_000, 10_000] {
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        let q: Vec<f64> = ts[200..200 + m].to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| distance_profile::<ZNormalizedEuclidean>(black_box(&q), black_box(&ts)))
        });
    }
    group.finish();
}

fn bench_min_join_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_join_profile");
    group.sample_size(10);
    for n in [1_000, 5_000] {
        let a: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        let b_ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.13).cos()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| min_join_profile::<ZNormalizedEuclidean>(black_box(&a), black_box(&b_ts), 13))
        });
    }
    group.finish();
}

fn bench_consensus(c: &mut Criterion) {
    let mut group = c.benchmark_group("consensus");
    group.sample_size(10);
    for n in [500, 1_000] {
        let series: Vec<Series> = (0..4)
            .map(|k| {
                let nts: Vec<Nucleotide> = (0..n)
                    .map(|i| Nucleotide::new(((i + 7 * k * i) as f64 * 0.1).sin()))
                    .collect();
                Series::new(format!("s{k}"), &nts)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| find_consensus(black_box(&series), 13))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sliding_dot_product,
    bench_sdp_naive_vs_fft,
    bench_rolling_stats,
    bench_distance_profile,
    bench_min_join_profile,
    bench_consensus,
);
criterion_main!(benches);
