//! Criterion microbenches for the hot paths of the geometry core.
//!
//! - Quaternion: polar -> quaternion -> cartesian on random inputs.
//! - Spirals: evaluating every vertex of a sampled curve.
//! - Platonic solids and tilings: full construction (tables, faces, edges).
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use superslice::platonic::{Polyhedron, Solid};
use superslice::quat::Quat;
use superslice::spirals::{CurveSpec, Spiral};
use superslice::tilings::{Grid, TilingKind};

fn bench_quat(c: &mut Criterion) {
    let mut group = c.benchmark_group("quat");
    let mut rng = StdRng::seed_from_u64(42);
    group.bench_function(BenchmarkId::new("polar_to_cartesian", "random"), |b| {
        b.iter_batched(
            || {
                (
                    rng.gen_range(0.0..10.0),
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-3.0..3.0),
                )
            },
            |(n, e, d)| {
                let _ = Quat::from_polar(n, e, d, 0.0).map(|q| q.cartesian());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_spirals(c: &mut Criterion) {
    let mut group = c.benchmark_group("spirals");
    for n in [64usize, 1024] {
        let spiral = Spiral::new(n, CurveSpec::named("Logarithmic", [("a", 1.0), ("k", 0.1)]))
            .unwrap();
        group.bench_function(BenchmarkId::new("logarithmic_cartesians", n), |b| {
            b.iter(|| {
                let _ = spiral.polytope().cartesians();
            })
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for solid in Solid::ALL {
        group.bench_function(BenchmarkId::new("polyhedron", solid.name()), |b| {
            b.iter(|| {
                let _ = Polyhedron::new(solid, 1.0);
            })
        });
    }
    group.bench_function(BenchmarkId::new("tiling", "hex_16x16"), |b| {
        b.iter(|| {
            let _ = Grid::new(TilingKind::Hex, 1.0, 16, 16).build();
        })
    });
    group.finish();
}

criterion_group!(benches, bench_quat, bench_spirals, bench_build);
criterion_main!(benches);
