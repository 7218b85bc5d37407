use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineboard_core::*;
use std::hint::black_box;

const TIERS: [(&str, Coord2, CellCount); 4] = [
    ("easy", (8, 8), 10),
    ("medium", (16, 16), 40),
    ("hard", (32, 16), 99),
    ("impossible", (32, 32), 170),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (name, size, mines) in TIERS {
        let config = GameConfig::new(size, mines);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomMinefieldGenerator::new(seed).generate(config))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
