// Benchmarks for the settle -> support -> cascade pipeline.
//
// The pile is generated deterministically: ~1200 line blocks scattered over a
// 10x10 footprint at heights up to 300, roughly the shape of real inputs.

use brickfall_sim::cascade::analyze_cascades;
use brickfall_sim::pile::Pile;
use brickfall_sim::{AnalysisConfig, Block, BlockId, Point, SettleStrategy, analyze};
use criterion::{Criterion, criterion_group, criterion_main};
use std::collections::HashSet;
use std::hint::black_box;

/// Fixed-seed linear congruential generator; good enough to scatter blocks.
struct Lcg(u64);

impl Lcg {
    fn below(&mut self, bound: i32) -> i32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as i32
    }
}

fn scattered_pile(count: usize) -> Vec<Block> {
    let mut rng = Lcg(0x5eed);
    let mut taken = HashSet::new();
    let mut blocks = Vec::with_capacity(count);
    while blocks.len() < count {
        let (x, y, z) = (rng.below(10), rng.below(10), 1 + rng.below(300));
        let len = rng.below(4);
        let hi = match rng.below(3) {
            0 => Point::new((x + len).min(9), y, z),
            1 => Point::new(x, (y + len).min(9), z),
            _ => Point::new(x, y, z + len),
        };
        let id = BlockId(blocks.len() as u32 + 1);
        let Ok(block) = Block::new(id, Point::new(x, y, z), hi) else {
            continue;
        };
        if block.cells().any(|c| taken.contains(&c)) {
            continue;
        }
        taken.extend(block.cells());
        blocks.push(block);
    }
    blocks
}

fn bench_settle(c: &mut Criterion) {
    let blocks = scattered_pile(1200);
    let mut group = c.benchmark_group("settle");
    for (name, strategy) in [
        ("relaxation", SettleStrategy::Relaxation),
        ("sorted_pass", SettleStrategy::SortedPass),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut pile = Pile::new(blocks.clone()).unwrap();
                black_box(pile.settle(strategy))
            })
        });
    }
    group.finish();
}

fn bench_cascades(c: &mut Criterion) {
    let mut pile = Pile::new(scattered_pile(1200)).unwrap();
    pile.settle(SettleStrategy::SortedPass);
    let graph = pile.support_graph();

    let mut group = c.benchmark_group("cascades");
    group.sample_size(10);
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(analyze_cascades(&graph, false)))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(analyze_cascades(&graph, true)))
    });
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let blocks = scattered_pile(1200);
    let config = AnalysisConfig::default();
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.bench_function("analyze", |b| {
        b.iter(|| black_box(analyze(blocks.clone(), &config).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_settle, bench_cascades, bench_full_pipeline);
criterion_main!(benches);
