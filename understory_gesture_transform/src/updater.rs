// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental value tracking: turn a stream of absolute samples into per-step changes.
//!
//! ## Usage
//!
//! 1) Seed an updater with the value observed when a gesture session starts.
//! 2) On each update, call [`ValueUpdater::update`] with the new absolute sample to get the
//!    change since the previous sample.
//! 3) Re-seed with [`ValueUpdater::reset`] when the next session starts.
//!
//! Three instantiations cover pan, pinch and twist input:
//!
//! - [`ValueUpdater::offset`]: focal points, step is `new - old` as a [`Vec2`].
//! - [`ValueUpdater::ratio`]: scale samples, step is `new / old`.
//! - [`ValueUpdater::difference`]: angles, step is `new - old`.
//!
//! Rotation has no meaningful starting sample, so it is tracked by [`RotationTracker`], which
//! establishes a baseline from the first sample before it reports any change.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture_transform::ValueUpdater;
//!
//! let mut pan = ValueUpdater::offset(Point::new(10.0, 20.0));
//! assert_eq!(pan.update(Point::new(15.0, 25.0)), Vec2::new(5.0, 5.0));
//! assert_eq!(pan.update(Point::new(16.0, 25.0)), Vec2::new(1.0, 0.0));
//!
//! let mut zoom = ValueUpdater::ratio(1.0);
//! assert_eq!(zoom.update(2.0), 2.0);
//! assert_eq!(zoom.update(3.0), 1.5);
//! ```

use kurbo::{Point, Vec2};

/// Derives the step value from the previous and the new sample, in that order.
pub type Combinator<T, D> = fn(T, T) -> D;

/// Remembers the last sample and reports the change to each new one.
///
/// An updater always holds a seed: there is no way to construct one without a starting value,
/// so the delta of the first [`update`](Self::update) is always defined.
#[derive(Clone, Copy, Debug)]
pub struct ValueUpdater<T, D = T> {
    last: T,
    combine: Combinator<T, D>,
}

impl<T: Copy, D> ValueUpdater<T, D> {
    /// Creates an updater seeded with `seed`, deriving steps with `combine(old, new)`.
    #[must_use]
    pub fn new(seed: T, combine: Combinator<T, D>) -> Self {
        Self {
            last: seed,
            combine,
        }
    }

    /// Returns the last sample seen (or the seed, if nothing has been seen since).
    #[must_use]
    pub fn value(&self) -> T {
        self.last
    }

    /// Forgets the previous sample and starts over from `seed`.
    pub fn reset(&mut self, seed: T) {
        self.last = seed;
    }

    /// Returns the change from the previous sample to `value`, then remembers `value`.
    pub fn update(&mut self, value: T) -> D {
        let step = (self.combine)(self.last, value);
        self.last = value;
        step
    }
}

impl ValueUpdater<Point, Vec2> {
    /// Tracks a moving point, reporting the offset travelled since the last sample.
    #[must_use]
    pub fn offset(seed: Point) -> Self {
        Self::new(seed, |old, new| new - old)
    }
}

impl ValueUpdater<f64> {
    /// Tracks a scale factor, reporting the multiplicative step since the last sample.
    ///
    /// A previous sample at (or within `f64::EPSILON` of) zero, or a quotient that is not
    /// positive and finite, yields a step of `1.0` rather than a collapsing, mirroring or
    /// NaN ratio.
    #[must_use]
    pub fn ratio(seed: f64) -> Self {
        Self::new(seed, guarded_ratio)
    }

    /// Tracks a scalar such as an angle, reporting the additive step since the last sample.
    #[must_use]
    pub fn difference(seed: f64) -> Self {
        Self::new(seed, |old, new| new - old)
    }
}

fn guarded_ratio(old: f64, new: f64) -> f64 {
    if old.abs() < f64::EPSILON {
        return 1.0;
    }
    let ratio = new / old;
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Rotation tracking with an explicit "no baseline yet" state.
///
/// Hosts report rotation as an absolute angle relative to an origin the engine never sees, so
/// the first non-zero sample of a session only establishes where that origin is. Every later
/// sample reports the angular change since the one before.
#[derive(Clone, Copy, Debug, Default)]
pub enum RotationTracker {
    /// No sample has been seen since the session started.
    #[default]
    Unset,
    /// Exactly one sample has been seen; it is the baseline.
    Baseline(ValueUpdater<f64>),
    /// At least two samples have been seen; changes are being reported.
    Tracking(ValueUpdater<f64>),
}

impl RotationTracker {
    /// Returns to [`RotationTracker::Unset`].
    pub fn reset(&mut self) {
        *self = Self::Unset;
    }

    /// Feeds an angle in radians.
    ///
    /// Returns `None` for the sample that establishes the baseline and `Some(delta)` after.
    pub fn update(&mut self, radians: f64) -> Option<f64> {
        match self {
            Self::Unset => {
                *self = Self::Baseline(ValueUpdater::difference(radians));
                None
            }
            Self::Baseline(updater) => {
                let delta = updater.update(radians);
                let updater = *updater;
                *self = Self::Tracking(updater);
                Some(delta)
            }
            Self::Tracking(updater) => Some(updater.update(radians)),
        }
    }

    /// Returns the most recent angle, if any sample has been seen.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Unset => None,
            Self::Baseline(updater) | Self::Tracking(updater) => Some(updater.value()),
        }
    }

    /// Returns `true` once changes are being reported.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking(_))
    }
}
