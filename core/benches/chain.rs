use chainlet_core::Chain;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SEED: &[(&str, &str, f64)] = &[("Alice", "Bob", 1.5), ("Charlie", "Dave", 0.75)];

fn build_chain(blocks: usize) -> Chain {
    let mut chain = Chain::new().unwrap();
    for _ in 0..blocks {
        chain.append_block(SEED).unwrap();
    }
    chain
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append 100 blocks", |b| {
        b.iter(|| black_box(build_chain(100)))
    });
}

fn bench_verify(c: &mut Criterion) {
    let chain = build_chain(1_000);
    c.bench_function("verify 1000 blocks", |b| {
        b.iter(|| black_box(chain.verify()))
    });
}

criterion_group!(benches, bench_append, bench_verify);
criterion_main!(benches);
