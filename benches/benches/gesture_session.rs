// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};
use std::time::Duration;
use understory_gesture_transform::{GestureConfig, GestureSession, InertiaKind};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_session/update");

    for samples in [16usize, 256, 4_096] {
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(
            BenchmarkId::new("pan_pinch_twist", samples),
            &samples,
            |b, &samples| {
                b.iter_batched(
                    || {
                        let mut session = GestureSession::new(GestureConfig::new());
                        session.begin(Point::new(200.0, 200.0));
                        session
                    },
                    |mut session| {
                        for i in 0..samples {
                            let t = i as f64 / samples as f64;
                            let focal = Point::new(200.0 + 100.0 * t, 200.0 - 50.0 * t);
                            black_box(session.update(focal, 1.0 + t, 0.5 * t));
                        }
                        black_box(session.transform());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_inertia(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_session/inertia");

    let kinds = [
        (
            "fling",
            InertiaKind::FlingPan {
                velocity: Vec2::new(3_000.0, -1_200.0),
            },
        ),
        (
            "settle",
            InertiaKind::SettleScale {
                ratio: 1.08,
                focal: Point::new(320.0, 240.0),
            },
        ),
    ];

    for (name, kind) in kinds {
        group.bench_function(BenchmarkId::new("step_to_rest", name), |b| {
            b.iter_batched(
                || {
                    let mut session = GestureSession::default();
                    session.start_inertia(kind);
                    session
                },
                |mut session| {
                    while !session.step().finished {}
                    black_box(session.transform());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("advance_60hz", name), |b| {
            b.iter_batched(
                || {
                    let mut session = GestureSession::default();
                    session.start_inertia(kind);
                    session
                },
                |mut session| {
                    while !session.advance(Duration::from_micros(16_667)).finished {}
                    black_box(session.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_inertia);
criterion_main!(benches);
