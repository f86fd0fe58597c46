// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `GestureSession`.
//!
//! These drive whole sessions the way a host would: pointer transitions, gesture samples,
//! release, then inertia stepped to completion.

use core::time::Duration;

use kurbo::{Affine, Point, Vec2};
use understory_gesture_transform::{
    GestureConfig, GestureSession, Inertia, InertiaConfig, InertiaKind, InertiaTick,
    SessionPhase, decompose,
};

const EPS: f64 = 1e-9;

fn flinging(velocity: Vec2) -> GestureSession {
    let mut session = GestureSession::default();
    session.pointer_down(0);
    session.begin(Point::ORIGIN);
    session.update(Point::new(1.0, 1.0), 1.0, 0.0);
    session.pointer_up(80);
    assert_eq!(
        session.end(velocity),
        InertiaKind::FlingPan { velocity },
        "single-pointer release should fling"
    );
    session
}

#[test]
fn two_finger_quick_release_settles_scale() {
    let mut session = GestureSession::default();
    session.pointer_down(1_000);
    session.pointer_down(1_010);
    session.begin(Point::new(40.0, 60.0));
    session.update(Point::new(40.0, 60.0), 1.05, 0.0);
    session.pointer_up(2_000);
    session.pointer_up(2_150);

    let kind = session.end(Vec2::new(5.0, 5.0));

    assert_eq!(
        kind,
        InertiaKind::SettleScale {
            ratio: 1.05,
            focal: Point::new(40.0, 60.0),
        }
    );
    assert_eq!(session.phase(), SessionPhase::Inertial);
}

#[test]
fn two_finger_slow_release_flings() {
    let mut session = GestureSession::default();
    session.pointer_down(0);
    session.pointer_down(0);
    session.begin(Point::ORIGIN);
    session.update(Point::ORIGIN, 1.05, 0.0);
    session.pointer_up(100);
    session.pointer_up(400);

    assert!(matches!(
        session.end(Vec2::new(5.0, 5.0)),
        InertiaKind::FlingPan { .. }
    ));
}

#[test]
fn stale_pinch_timing_does_not_leak_into_next_session() {
    let mut session = GestureSession::default();
    session.pointer_down(0);
    session.pointer_down(0);
    session.begin(Point::ORIGIN);
    session.update(Point::ORIGIN, 1.2, 0.0);
    session.pointer_up(100);
    session.pointer_up(120);
    session.end(Vec2::ZERO);

    // A plain one-finger drag follows.
    session.pointer_down(1_000);
    session.begin(Point::ORIGIN);
    session.update(Point::new(10.0, 0.0), 1.0, 0.0);
    session.pointer_up(1_050);

    assert!(matches!(
        session.end(Vec2::new(5.0, 5.0)),
        InertiaKind::FlingPan { .. }
    ));
}

#[test]
fn fling_stops_at_analytic_cutoff() {
    let config = InertiaConfig::DEFAULT;
    let step = config.step.as_secs_f64();

    for speed in [1.0_f64, 20.0, 350.0, 4_000.0] {
        let mut session = flinging(Vec2::new(speed * 0.6, speed * 0.8));
        let mut moving_ticks = 0_u32;
        loop {
            let tick = session.step();
            if tick.update.is_some() {
                moving_ticks += 1;
            }
            if tick.finished {
                break;
            }
        }

        let cutoff = (speed * speed / config.fling_stop_threshold).ln()
            / (2.0 * config.fling_decay_rate);
        let elapsed = f64::from(moving_ticks) * step;
        assert!(
            (elapsed - cutoff).abs() <= step,
            "speed {speed}: {moving_ticks} ticks ({elapsed}s) vs cutoff {cutoff}s"
        );
        assert_eq!(session.step(), InertiaTick { update: None, finished: true });
    }
}

#[test]
fn slow_fling_ends_immediately() {
    let mut session = flinging(Vec2::new(0.2, 0.0));
    let before = session.transform();

    let tick = session.step();

    assert!(tick.finished, "speed below threshold should stop at once");
    assert_eq!(tick.update, None);
    assert_eq!(session.transform(), before);
}

#[test]
fn settle_moves_monotonically_back_to_rest() {
    for ratio in [0.5_f64, 0.97, 1.01, 1.3, 4.0] {
        let mut session = GestureSession::default();
        session.start_inertia(InertiaKind::SettleScale {
            ratio,
            focal: Point::new(12.0, -8.0),
        });

        // Instantaneous scale relative to where the settle will end up.
        let mut current = ratio;
        let mut ticks = 0;
        loop {
            let tick = session.step();
            ticks += 1;
            let update = tick.update.expect("every settle tick scales");
            let step_ratio = update.scale.as_coeffs()[0];
            let next = current * step_ratio;
            if ratio > 1.0 {
                assert!(next <= current + EPS && next >= 1.0 - EPS, "ratio {ratio}");
            } else {
                assert!(next >= current - EPS && next <= 1.0 + EPS, "ratio {ratio}");
            }
            current = next;
            if tick.finished {
                break;
            }
        }

        assert_eq!(ticks, 34, "ratio {ratio}");
        assert!((current - 1.0).abs() < EPS, "ratio {ratio}: ended at {current}");
        assert!((decompose(session.transform()).scale - 1.0 / ratio).abs() < EPS);
        assert!(!session.is_animating());
    }
}

#[test]
fn settle_uses_configured_duration() {
    let inertia = InertiaConfig {
        step: Duration::from_millis(10),
        settle_duration: Duration::from_millis(100),
        ..InertiaConfig::DEFAULT
    };
    let mut session = GestureSession::new(GestureConfig::new().with_inertia(inertia));
    session.start_inertia(InertiaKind::SettleScale {
        ratio: 2.0,
        focal: Point::ORIGIN,
    });

    let mut ticks = 0;
    while !session.step().finished {
        ticks += 1;
    }

    assert_eq!(ticks + 1, 10);
}

#[test]
fn new_gesture_stops_old_animation() {
    let mut session = flinging(Vec2::new(2_000.0, 0.0));
    assert!(session.step().update.is_some());
    assert!(session.advance(Duration::from_millis(45)).update.is_some());

    session.begin(Point::new(300.0, 300.0));
    let frozen = session.transform();

    for _ in 0..50 {
        assert_eq!(session.step(), InertiaTick { update: None, finished: true });
        assert_eq!(session.advance(Duration::from_millis(16)).update, None);
    }
    assert_eq!(session.transform(), frozen);
    assert_eq!(session.phase(), SessionPhase::Active);
}

#[test]
fn settle_start_replaces_fling() {
    let mut session = flinging(Vec2::new(2_000.0, 0.0));
    session.step();

    session.start_inertia(InertiaKind::SettleScale {
        ratio: 1.2,
        focal: Point::ORIGIN,
    });

    loop {
        let tick = session.step();
        let update = tick.update.expect("every settle tick scales");
        assert_eq!(
            update.translation,
            Affine::IDENTITY,
            "no pan after the fling was replaced"
        );
        if tick.finished {
            break;
        }
    }
    assert!(session.inertia().is_none());
}

#[test]
fn fling_continues_seamlessly_from_gesture() {
    let mut session = GestureSession::new(GestureConfig::new().with_scale(false));
    session.pointer_down(0);
    session.begin(Point::new(10.0, 10.0));
    session.update(Point::new(60.0, 10.0), 1.0, 0.0);
    session.pointer_up(90);
    session.end(Vec2::new(1_000.0, 0.0));

    let tick = session.step();

    let update = tick.update.expect("fast fling moves on first tick");
    let dx = update.translation.translation().x;
    let expected = 1_000.0 * (-8.0_f64 * 0.015).exp() * 0.015;
    assert!((dx - expected).abs() < EPS);
    assert!((update.cumulative.translation().x - (50.0 + expected)).abs() < EPS);
    assert!(matches!(session.inertia(), Some(Inertia::FlingPan(_))));
}

#[test]
fn gesture_sequence_composes_in_fixed_order() {
    let mut session = GestureSession::default();
    session.begin(Point::ORIGIN);
    session.update(Point::ORIGIN, 1.0, 0.25);

    let update = session.update(Point::new(10.0, 0.0), 2.0, 0.25 + core::f64::consts::FRAC_PI_2);

    let expected = update.rotation * update.scale * update.translation;
    for (got, want) in update.delta().as_coeffs().iter().zip(expected.as_coeffs()) {
        assert!((got - want).abs() < EPS);
    }
    assert_eq!(update.cumulative, session.transform());
    assert_eq!(update.cumulative, update.delta() * Affine::IDENTITY);
}

#[test]
fn disabled_inertia_never_animates() {
    let mut session =
        GestureSession::new(GestureConfig::new().with_inertia(InertiaConfig::DISABLED));
    session.pointer_down(0);
    session.begin(Point::ORIGIN);
    session.update(Point::new(20.0, 0.0), 1.0, 0.0);
    session.pointer_up(10);

    assert_eq!(session.end(Vec2::new(900.0, 0.0)), InertiaKind::None);
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[test]
fn ending_before_last_pointer_lifts_cannot_settle() {
    let mut session = GestureSession::default();
    session.pointer_down(0);
    session.pointer_down(0);
    session.begin(Point::ORIGIN);
    session.update(Point::ORIGIN, 1.05, 0.0);
    // The host ends the gesture on the two-to-one transition.
    session.pointer_up(100);

    assert!(matches!(
        session.end(Vec2::new(5.0, 5.0)),
        InertiaKind::FlingPan { .. }
    ));
}
