// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elementary transforms, composition and decomposition.
//!
//! Every builder here returns a plain [`Affine`]. Scale and rotation are built about a focal
//! point, which is the fixed point of the resulting transform: gesture deltas pivot around the
//! fingers rather than around the origin.
//!
//! Deltas are folded into an accumulated transform by left-multiplication
//! (`cumulative = delta * cumulative`), so the most recent delta is applied last.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// Pure translation by `offset`.
#[must_use]
pub fn translate(offset: Vec2) -> Affine {
    Affine::new([1.0, 0.0, 0.0, 1.0, offset.x, offset.y])
}

/// Uniform scale by `factor` that leaves `focal` where it is.
#[must_use]
pub fn scale_about(factor: f64, focal: Point) -> Affine {
    let keep = 1.0 - factor;
    Affine::new([factor, 0.0, 0.0, factor, keep * focal.x, keep * focal.y])
}

/// Counter-clockwise rotation (in a y-up frame) by `radians` that leaves `focal` where it is.
#[must_use]
pub fn rotate_about(radians: f64, focal: Point) -> Affine {
    let (s, c) = radians.sin_cos();
    Affine::new([
        c,
        s,
        -s,
        c,
        (1.0 - c) * focal.x + s * focal.y,
        (1.0 - c) * focal.y - s * focal.x,
    ])
}

/// Folds optional deltas into `base` (identity when `None`).
///
/// The order is fixed: translation first, then scale, then rotation, each by
/// left-multiplication, so the result is `rotation * scale * translation * base`. Missing
/// components are skipped.
#[must_use]
pub fn compose(
    base: Option<Affine>,
    translation: Option<Affine>,
    scale: Option<Affine>,
    rotation: Option<Affine>,
) -> Affine {
    [translation, scale, rotation]
        .into_iter()
        .flatten()
        .fold(base.unwrap_or(Affine::IDENTITY), |acc, delta| delta * acc)
}

/// Translation, uniform scale and rotation recovered from a transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed {
    /// Where the origin ends up.
    pub translation: Vec2,
    /// Length of the transformed unit-x vector.
    pub scale: f64,
    /// Angle of the transformed unit-x vector, in `(-PI, PI]`.
    pub rotation: f64,
}

impl Decomposed {
    /// Rebuilds the similarity transform these components describe.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation)
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale)
    }
}

/// Recovers translation, scale and rotation by probing the origin and the unit-x point.
///
/// This is exact only for transforms built from translation, uniform scale and rotation.
/// Sheared or non-uniformly scaled input still yields finite numbers, but they do not
/// describe the transform.
#[must_use]
pub fn decompose(m: Affine) -> Decomposed {
    let origin = m * Point::ORIGIN;
    let unit_x = m * Point::new(1.0, 0.0);
    let axis = unit_x - origin;
    let mut rotation = axis.atan2();
    if rotation <= -core::f64::consts::PI {
        rotation = core::f64::consts::PI;
    }
    Decomposed {
        translation: origin.to_vec2(),
        scale: axis.hypot(),
        rotation,
    }
}

/// One emitted transform change: the accumulated transform and the deltas that produced it.
///
/// Deltas that did not contribute this cycle are [`Affine::IDENTITY`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformUpdate {
    /// The accumulated transform after this update; render with this.
    pub cumulative: Affine,
    /// Translation applied this update.
    pub translation: Affine,
    /// Scale (about the focal point) applied this update.
    pub scale: Affine,
    /// Rotation (about the focal point) applied this update.
    pub rotation: Affine,
}

impl TransformUpdate {
    /// An update that changes nothing, reporting `cumulative` as-is.
    #[must_use]
    pub fn identity(cumulative: Affine) -> Self {
        Self {
            cumulative,
            translation: Affine::IDENTITY,
            scale: Affine::IDENTITY,
            rotation: Affine::IDENTITY,
        }
    }

    /// The combined delta of this update, in composition order.
    #[must_use]
    pub fn delta(&self) -> Affine {
        compose(
            None,
            Some(self.translation),
            Some(self.scale),
            Some(self.rotation),
        )
    }

    /// Merges a later update into this one.
    ///
    /// The cumulative transform is taken from `later`; deltas of the same kind compose.
    #[must_use]
    pub fn then(self, later: Self) -> Self {
        Self {
            cumulative: later.cumulative,
            translation: later.translation * self.translation,
            scale: later.scale * self.scale,
            rotation: later.rotation * self.rotation,
        }
    }
}
