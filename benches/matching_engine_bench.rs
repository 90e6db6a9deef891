use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spot_matching_core::matching_engine::MatchingEngine;
use spot_matching_core::types::{Order, OrderIdGenerator, Side};

fn make_order(ids: &OrderIdGenerator, user_id: u64, side: Side, size: f64) -> Order {
    Order {
        id: ids.next_id(),
        user_id,
        side,
        size,
        timestamp: spot_matching_core::types::now_nanos(),
    }
}

fn bench_limit_order_insertion(c: &mut Criterion) {
    let engine = MatchingEngine::new();
    let ids = OrderIdGenerator::new();
    let mut group = c.benchmark_group("limit_order_insertion");

    group.bench_function("place_limit", |b| {
        b.iter(|| {
            let order = make_order(&ids, 1, Side::Bid, 1.0);
            black_box(engine.place_limit(100.0, order).unwrap());
        })
    });

    group.finish();
}

fn bench_market_order_sweep(c: &mut Criterion) {
    let ids = OrderIdGenerator::new();
    let mut group = c.benchmark_group("market_order_sweep");

    group.bench_function("sweep_ten_levels", |b| {
        b.iter_with_setup(
            || {
                let engine = MatchingEngine::new();
                for i in 0..10 {
                    let price = 100.0 + i as f64;
                    for _ in 0..50 {
                        let order = make_order(&ids, 1, Side::Ask, 1.0);
                        engine.place_limit(price, order).unwrap();
                    }
                }
                engine
            },
            |engine| {
                let order = make_order(&ids, 2, Side::Bid, 500.0);
                black_box(engine.place_market(order).unwrap());
            },
        )
    });

    group.finish();
}

fn bench_cancel(c: &mut Criterion) {
    let ids = OrderIdGenerator::new();
    let mut group = c.benchmark_group("cancel");

    group.bench_function("cancel_resting_order", |b| {
        b.iter_with_setup(
            || {
                let engine = MatchingEngine::new();
                let order = make_order(&ids, 1, Side::Bid, 1.0);
                let id = order.id;
                engine.place_limit(100.0, order).unwrap();
                (engine, id)
            },
            |(engine, id)| {
                black_box(engine.cancel(id).unwrap());
            },
        )
    });

    group.finish();
}

fn bench_fifo_matching(c: &mut Criterion) {
    let engine = MatchingEngine::new();
    let ids = OrderIdGenerator::new();
    for _ in 0..1000 {
        let order = make_order(&ids, 1, Side::Ask, 1.0);
        engine.place_limit(100.0, order).unwrap();
    }

    let mut group = c.benchmark_group("fifo_matching");
    group.bench_function("single_order_fill", |b| {
        b.iter(|| {
            let order = make_order(&ids, 2, Side::Bid, 1.0);
            black_box(engine.place_market(order));
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_limit_order_insertion,
    bench_market_order_sweep,
    bench_cancel,
    bench_fifo_matching,
);
criterion_main!(benches);
