//! Performance measurement for full-grid generation and transformation

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ringgrid::{GridGenerator, SeedKind};
use std::hint::black_box;

/// Measures assured root-seeded generation, cycling the root position
fn bench_root_generation(c: &mut Criterion) {
    c.bench_function("root_generate_assured", |b| {
        let mut generator = GridGenerator::seeded(12345);
        let mut pos = 0;
        b.iter(|| {
            pos = (pos + 1) % 9;
            let Ok(grid) = generator.generate(&SeedKind::RootBoxAt(pos)) else {
                return;
            };
            black_box(grid);
        });
    });
}

/// Measures assured intersection-seeded generation from fixed lines
fn bench_intersection_generation(c: &mut Criterion) {
    c.bench_function("intersection_generate_assured", |b| {
        let mut generator = GridGenerator::seeded(12345);
        let row: [u8; 9] = [4, 9, 1, 7, 2, 8, 3, 6, 5];
        let col: [u8; 9] = [8, 1, 6, 2, 4, 3, 9, 5, 7];
        b.iter(|| {
            let Ok(grid) = generator.generate(&SeedKind::IntersectionLine { row, col }) else {
                return;
            };
            black_box(grid);
        });
    });
}

/// Measures one pass of the symmetry battery over an already-valid grid
fn bench_transform_battery(c: &mut Criterion) {
    let mut generator = GridGenerator::seeded(12345);
    let Ok(seed_grid) = generator.generate(&SeedKind::RootBox) else {
        return;
    };

    c.bench_function("transform_battery", |b| {
        let mut rng = StdRng::seed_from_u64(67890);
        let mut grid = seed_grid.clone();
        b.iter(|| {
            for (i, j) in [(0, 1), (0, 2), (1, 2)] {
                let _ = grid.band_swap(i, j);
                let _ = grid.stack_swap(i, j);
                let _ = grid.band_row_swap(1, i, j);
                let _ = grid.stack_col_swap(1, i, j);
                let _ = grid.torus_shift(i, j);
            }
            grid.transpose();
            grid.anti_transpose();
            grid.mirror_rows();
            grid.mirror_cols();
            grid.rotate();
            grid.counter_rotate();
            let _ = grid.relabel_digits(6, 9, &mut rng);
            black_box(grid.validate());
        });
    });
}

criterion_group!(
    benches,
    bench_root_generation,
    bench_intersection_generation,
    bench_transform_battery
);
criterion_main!(benches);
