// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-release animation, advanced one fixed step at a time.
//!
//! Two modes exist:
//!
//! - **Fling**: velocity decays as `v0 * exp(-rate * t)`; each step pans by `v * step`. The
//!   fling ends on the first step whose squared speed is below the stop threshold, without
//!   moving.
//! - **Settle**: over a fixed duration the instantaneous scale eases from the release step
//!   back to `1.0` along [`decelerate`]. The step that reaches the duration lands exactly on
//!   `1.0` and ends the settle.
//!
//! Both modes feed the same [`ValueUpdater`]s the live gesture used, so their deltas continue
//! seamlessly from the last manual update. Nothing here owns a clock: the session calls
//! [`Inertia::step`] from whatever drives its frames.

use core::time::Duration;

use kurbo::{Affine, Point, Vec2};

use crate::config::InertiaConfig;
use crate::matrix;
use crate::updater::ValueUpdater;

/// The standard ease-out curve, `1 - (1 - t)^2`, for `t` clamped to `[0, 1]`.
#[must_use]
pub fn decelerate(t: f64) -> f64 {
    let rest = 1.0 - t.clamp(0.0, 1.0);
    1.0 - rest * rest
}

/// `e^x`, from `std` when available and from `libm` otherwise.
fn exp(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.exp()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::exp(x)
    }
}

/// A decaying pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingPan {
    velocity: Vec2,
    elapsed: Duration,
}

impl FlingPan {
    /// Starts a fling at `velocity`, in target units per second.
    #[must_use]
    pub fn new(velocity: Vec2) -> Self {
        debug_assert!(velocity.is_finite(), "fling velocity must be finite");
        Self {
            velocity,
            elapsed: Duration::ZERO,
        }
    }

    /// Release velocity.
    #[must_use]
    pub fn initial_velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Velocity after `elapsed` under `config`.
    #[must_use]
    pub fn velocity_at(&self, elapsed: Duration, config: &InertiaConfig) -> Vec2 {
        self.velocity * exp(-config.fling_decay_rate * elapsed.as_secs_f64())
    }

    /// Advances one step and returns the translation delta, or `None` once the fling is over.
    pub fn step(
        &mut self,
        config: &InertiaConfig,
        translation: &mut ValueUpdater<Point, Vec2>,
    ) -> Option<Affine> {
        self.elapsed += config.step;
        let velocity = self.velocity_at(self.elapsed, config);
        if velocity.hypot2() < config.fling_stop_threshold {
            return None;
        }
        let target = translation.value() + velocity * config.step.as_secs_f64();
        Some(matrix::translate(translation.update(target)))
    }
}

/// A scale step easing back to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleScale {
    ratio: f64,
    focal: Point,
    elapsed: Duration,
}

impl SettleScale {
    /// Starts a settle from `ratio`, pivoting about `focal`.
    ///
    /// The scale updater must be seeded with `ratio` so the first step is continuous.
    #[must_use]
    pub fn new(ratio: f64, focal: Point) -> Self {
        debug_assert!(ratio.is_finite(), "settle ratio must be finite");
        Self {
            ratio,
            focal,
            elapsed: Duration::ZERO,
        }
    }

    /// Scale step at release.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Frozen pivot.
    #[must_use]
    pub fn focal(&self) -> Point {
        self.focal
    }

    /// Instantaneous scale after `elapsed` under `config`.
    #[must_use]
    pub fn scale_at(&self, elapsed: Duration, config: &InertiaConfig) -> f64 {
        let progress = elapsed.as_secs_f64() / config.settle_duration.as_secs_f64();
        1.0 + (self.ratio - 1.0) * (1.0 - decelerate(progress))
    }

    /// Advances one step, returning the scale delta and whether the settle is complete.
    pub fn step(
        &mut self,
        config: &InertiaConfig,
        scale: &mut ValueUpdater<f64>,
    ) -> (Affine, bool) {
        self.elapsed += config.step;
        let step_ratio = scale.update(self.scale_at(self.elapsed, config));
        (
            matrix::scale_about(step_ratio, self.focal),
            self.elapsed >= config.settle_duration,
        )
    }
}

/// The running post-release animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inertia {
    /// Decaying pan.
    FlingPan(FlingPan),
    /// Scale easing back to rest.
    SettleScale(SettleScale),
}

/// What one step of an [`Inertia`] produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InertiaStep {
    /// Pan by this delta.
    Translate(Affine),
    /// Scale by this delta.
    Scale(Affine),
}

impl Inertia {
    /// Time simulated so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::FlingPan(fling) => fling.elapsed,
            Self::SettleScale(settle) => settle.elapsed,
        }
    }

    /// Advances one fixed step.
    ///
    /// Returns the delta to apply (if any) and whether the animation has finished.
    pub fn step(
        &mut self,
        config: &InertiaConfig,
        translation: &mut ValueUpdater<Point, Vec2>,
        scale: &mut ValueUpdater<f64>,
    ) -> (Option<InertiaStep>, bool) {
        match self {
            Self::FlingPan(fling) => match fling.step(config, translation) {
                Some(delta) => (Some(InertiaStep::Translate(delta)), false),
                None => (None, true),
            },
            Self::SettleScale(settle) => {
                let (delta, done) = settle.step(config, scale);
                (Some(InertiaStep::Scale(delta)), done)
            }
        }
    }
}
