use criterion::{black_box, criterion_group, criterion_main, Criterion};
use casvec_kmeans::{Config, KMeans, Observation};

fn pseudo_random(dim: usize, seed: u64) -> Vec<f64> {
    let mut v = Vec::with_capacity(dim);
    let mut state = seed;
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        v.push(((state >> 33) as f64) / (u32::MAX as f64) - 0.5);
    }
    v
}

fn make_blobs(dim: usize, blobs: usize, per_blob: usize) -> Vec<Observation> {
    let mut out = Vec::with_capacity(blobs * per_blob);
    for b in 0..blobs {
        let center: Vec<f64> = pseudo_random(dim, b as u64 + 1)
            .into_iter()
            .map(|x| x * 20.0)
            .collect();
        for i in 0..per_blob {
            let noise = pseudo_random(dim, (b * per_blob + i) as u64 * 997 + 13);
            let coords = center.iter().zip(noise).map(|(c, n)| c + n).collect();
            out.push(Observation::new(out.len(), coords));
        }
    }
    out
}

fn bench_partition(c: &mut Criterion) {
    let km = KMeans::new(Config {
        seed: Some(1),
        ..Config::default()
    });

    let small = make_blobs(2, 4, 25);
    c.bench_function("kmeans_partition_2d_100points_k4", |b| {
        b.iter(|| {
            let _ = black_box(km.partition(black_box(small.clone()), 4));
        });
    });

    let wide = make_blobs(128, 10, 50);
    c.bench_function("kmeans_partition_128d_500points_k10", |b| {
        b.iter(|| {
            let _ = black_box(km.partition(black_box(wide.clone()), 10));
        });
    });
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
