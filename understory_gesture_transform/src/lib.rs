// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_transform --heading-base-level=0

//! Understory Gesture Transform: multi-touch gestures to an accumulated affine transform.
//!
//! This crate turns a stream of pan, pinch and twist samples into a cumulative
//! [`Affine`](kurbo::Affine) that a host renders its content with, and keeps the content
//! moving after the fingers lift. It focuses on:
//! - Incremental deltas: each host sample is turned into the change since the last one
//!   ([`ValueUpdater`]) and folded into the cumulative transform by left-multiplication.
//! - Focal-point pivots: scale and rotation hold the fingers (or a fixed [`Alignment`] of
//!   the target) in place.
//! - Release inertia: a decaying fling for pans, or a short ease-out settle for quick
//!   two-finger pinch releases ([`select_inertia`]).
//!
//! It does **not** recognize gestures or own a clock. Callers are expected to:
//! - Run their own gesture recognizer and report focal point, total scale and total rotation.
//! - Forward raw pointer down/up transitions so the release heuristic can see how the
//!   pointers lifted.
//! - Drive inertia from their frame clock with [`GestureSession::advance`] and re-render with
//!   each [`TransformUpdate::cumulative`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Vec2};
//! use understory_gesture_transform::{GestureConfig, GestureSession, InertiaKind};
//!
//! let mut session = GestureSession::new(GestureConfig::new().with_rotate(false));
//!
//! // Two fingers down, pinch out around (100, 100).
//! session.pointer_down(0);
//! session.pointer_down(5);
//! session.begin(Point::new(100.0, 100.0));
//! session.update(Point::new(100.0, 100.0), 1.5, 0.0);
//! let update = session.update(Point::new(100.0, 100.0), 1.6, 0.0);
//!
//! // The focal point did not move.
//! assert!((update.cumulative * Point::new(100.0, 100.0)).distance(Point::new(100.0, 100.0)) < 1e-9);
//!
//! // Both fingers lift 40ms apart: the scale settles instead of flinging.
//! session.pointer_up(400);
//! session.pointer_up(440);
//! let kind = session.end(Vec2::new(5.0, 5.0));
//! assert!(matches!(kind, InertiaKind::SettleScale { .. }));
//!
//! // Drive the animation from a 60Hz frame clock.
//! while !session.advance(Duration::from_micros(16_667)).finished {}
//! assert!(!session.is_animating());
//! ```
//!
//! ## Static helpers
//!
//! The transform math is usable without a session:
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_gesture_transform::{compose, decompose, matrix};
//!
//! let t = matrix::translate(Vec2::new(10.0, 0.0));
//! let s = matrix::scale_about(2.0, Point::new(10.0, 0.0));
//! let m = compose(None, Some(t), Some(s), None);
//!
//! let d = decompose(m);
//! assert_eq!(d.scale, 2.0);
//! assert_eq!(d.rotation, 0.0);
//! ```
//!
//! ## Design notes
//!
//! - Deltas within one update are applied translation first, then scale, then rotation.
//! - The first rotation sample of a session only establishes a baseline ([`RotationTracker`]).
//! - Inertia advances in fixed steps ([`InertiaConfig::step`]); starting a gesture or another
//!   animation cancels the running one before it can step again.
//! - Structured `tracing` events are emitted with the `tracing` feature.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod focal;
mod heuristic;
mod inertia;
pub mod matrix;
mod pointers;
mod session;
mod updater;

pub use config::{ConfigError, GestureConfig, InertiaConfig};
pub use focal::{Alignment, FocalPoint, TargetGeometry};
pub use heuristic::{InertiaKind, ReleaseInfo, select_inertia};
pub use inertia::{FlingPan, Inertia, InertiaStep, SettleScale, decelerate};
pub use matrix::{Decomposed, TransformUpdate, compose, decompose};
pub use pointers::{PointerChange, PointerTracker};
pub use session::{GestureSession, InertiaTick, SessionPhase};
pub use updater::{Combinator, RotationTracker, ValueUpdater};
