//! Criterion benchmarks for the rectangle merger and the polygon sampler.
//! Merge inputs are n×n unit-cell grids with the centre removed, so the trace
//! produces one outline and one hole.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rectilinear::geom2::rand::{draw_polygons, PolygonGenConfig, PolygonGenerator, ReplayToken};
use rectilinear::geom2::{merge_rectangles, Rectangle};

fn holed_grid(n: i32) -> Vec<Rectangle> {
    let mid = n / 2;
    let mut cells = Vec::with_capacity((n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            if (i, j) != (mid, mid) {
                cells.push(Rectangle::new((i, j), (i + 1, j + 1)));
            }
        }
    }
    cells
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &n in &[3i32, 8, 16] {
        group.bench_with_input(BenchmarkId::new("merge_grid", n), &n, |b, &n| {
            b.iter_batched(
                || holed_grid(n),
                |cells| {
                    let _polys = merge_rectangles(&cells).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_gen(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen2d");
    let cfg = PolygonGenConfig {
        min_holes: 0,
        ..PolygonGenConfig::default()
    };
    group.bench_function(BenchmarkId::new("draw_polygons", "default"), |b| {
        b.iter_batched(
            || ReplayToken { seed: 42, index: 0 },
            |mut tok| {
                tok.index = tok.index.wrapping_add(1);
                let _ = draw_polygons(&cfg, tok);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("polygon_regen", "default"), |b| {
        b.iter_batched(
            || {
                let mut gen = PolygonGenerator::new(cfg, 2025).unwrap();
                let s = gen.generate_next().unwrap();
                (gen, s.replay)
            },
            |(gen, replay)| {
                let _ = gen.regenerate(&replay).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_merge, bench_gen);
criterion_main!(benches);
