use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use r2k2_tournaments::bracket::Bracket;
use r2k2_tournaments::bracket::seeding::seed_order;

/// Benchmark canonical seed-order computation across bracket sizes
fn bench_seed_order(c: &mut Criterion) {
    for size in [4usize, 8, 16, 32] {
        c.bench_with_input(BenchmarkId::new("seed_order", size), &size, |b, &size| {
            b.iter(|| seed_order(size));
        });
    }
}

/// Benchmark full bracket generation including bye resolution
fn bench_generate(c: &mut Criterion) {
    for n in [5usize, 10, 20] {
        let seeds: Vec<i64> = (1..=n as i64).collect();
        c.bench_with_input(BenchmarkId::new("bracket_generate", n), &seeds, |b, seeds| {
            b.iter(|| Bracket::generate(1, seeds).expect("valid entrant count"));
        });
    }
}

criterion_group!(benches, bench_seed_order, bench_generate);
criterion_main!(benches);
