//! Criterion micro-benchmarks for slot and token allocation.

use std::hint::black_box;

use burrow_core::{SlotId, Vec2};
use burrow_engine::Token;
use burrow_pool::{Pool, SlotRegistry};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_slot_acquire_release(c: &mut Criterion) {
    let positions: Vec<Vec2> = (0..64).map(|i| Vec2::new(i as f32, 0.0)).collect();
    let mut registry = SlotRegistry::new(positions);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    // Half full, so both acquire and release hit the common path.
    let held: Vec<SlotId> = (0..32)
        .filter_map(|_| registry.acquire_random_free(&mut rng))
        .collect();
    black_box(&held);
    c.bench_function("slot_acquire_release_64", |b| {
        b.iter(|| {
            let slot = registry.acquire_random_free(&mut rng).unwrap();
            registry.release(black_box(slot)).unwrap();
        });
    });
}

fn bench_token_acquire_release(c: &mut Criterion) {
    let mut pool: Pool<Token> = Pool::with_prewarmed(64);
    c.bench_function("token_acquire_release", |b| {
        b.iter(|| {
            let key = pool.acquire();
            pool.release(black_box(key)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_slot_acquire_release,
    bench_token_acquire_release
);
criterion_main!(benches);
