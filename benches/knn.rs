use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kdpack::{KdIndex, KdParams, SliceAdapter, SplitRule};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 4] = [1000, 10_000, 100_000, 1_000_000];
const LEAF_SIZES: [usize; 5] = [1, 4, 10, 20, 50];

fn random_points(rng: &mut StdRng, count: usize) -> Vec<[f64; 3]> {
    (0..count)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    for &size in &SIZES {
        let points = random_points(&mut rng, size);
        let dataset: SliceAdapter<'_, f64, 3> = SliceAdapter::new(&points);

        for rule in [SplitRule::WidestSpread, SplitRule::Cycle] {
            let name = format!("{:?}", rule).to_lowercase();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    let index = KdIndex::with_params(&dataset, KdParams::default().with_split_rule(rule));
                    black_box(index.used_memory());
                })
            });
        }
    }
    group.finish();
}

fn benchmark_knn(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let points = random_points(&mut rng, 100_000);
    let queries = random_points(&mut rng, 1000);
    let dataset: SliceAdapter<'_, f64, 3> = SliceAdapter::new(&points);

    let mut group = c.benchmark_group("knn_100k");
    for &leaf in &LEAF_SIZES {
        let index = KdIndex::with_params(&dataset, KdParams::default().with_leaf_max_size(leaf));
        for k in [1, 10, 100] {
            group.bench_with_input(BenchmarkId::new(format!("leaf_{}", leaf), k), &k, |b, &k| {
                b.iter(|| {
                    for q in &queries {
                        black_box(index.knn_search(k, q));
                    }
                })
            });
        }
    }
    group.finish();
}

fn benchmark_knn_batch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let points = random_points(&mut rng, 100_000);
    let queries = random_points(&mut rng, 10_000);
    let dataset: SliceAdapter<'_, f64, 3> = SliceAdapter::new(&points);
    let index = KdIndex::new(&dataset);

    let mut group = c.benchmark_group("knn_batch");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(index.knn_search(10, q));
            }
        })
    });
    group.bench_function("parallel", |b| b.iter(|| black_box(index.knn_search_batch(10, &queries))));
    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_knn, benchmark_knn_batch);
criterion_main!(benches);
