use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

use lob_matching_engine::matching_engine::MatchingEngine;
use lob_matching_engine::types::{Order, Side};

fn bench_resting_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching_engine");

    group.bench_function("rest_non_crossing_orders", |b| {
        let engine = MatchingEngine::new();
        let mut id = 0u64;
        b.iter(|| {
            id += 1;
            let order = Order::new(id, Side::Buy, dec!(90.00), 10);
            black_box(engine.process_order(order));
        });
    });

    group.bench_function("full_cross_single_level", |b| {
        let engine = MatchingEngine::new();
        let mut id = 0u64;
        b.iter(|| {
            id += 1;
            engine.process_order(Order::new(id, Side::Sell, dec!(100.00), 10));
            id += 1;
            black_box(engine.process_order(Order::new(id, Side::Buy, dec!(100.00), 10)));
        });
    });

    group.bench_function("mixed_workload", |b| {
        let engine = MatchingEngine::new();
        let mut id = 0u64;
        b.iter(|| {
            // 60% resting buys below the market
            for _ in 0..6 {
                id += 1;
                black_box(engine.process_order(Order::new(id, Side::Buy, dec!(90.00), 10)));
            }
            // 20% resting sells above the market
            for _ in 0..2 {
                id += 1;
                black_box(engine.process_order(Order::new(id, Side::Sell, dec!(110.00), 10)));
            }
            // 20% aggressive sweeps against the resting buys
            for _ in 0..2 {
                id += 1;
                black_box(engine.process_order(Order::new(id, Side::Sell, dec!(90.00), 10)));
            }
        });
    });

    group.bench_function("multi_level_sweep", |b| {
        let engine = MatchingEngine::new();
        let mut id = 0u64;
        b.iter(|| {
            for level in 0..20 {
                id += 1;
                let price = dec!(100.00) + rust_decimal::Decimal::from(level);
                engine.process_order(Order::new(id, Side::Sell, price, 50));
            }
            id += 1;
            black_box(engine.process_order(Order::new(id, Side::Buy, dec!(150.00), 1000)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resting_orders);
criterion_main!(benches);
