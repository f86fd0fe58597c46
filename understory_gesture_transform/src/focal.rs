// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

/// A point within a rectangle, in `-1..=1` coordinates relative to its center.
///
/// `(-1, -1)` is the minimum corner, `(0, 0)` the center and `(1, 1)` the maximum corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    /// Horizontal position, `-1` at the left edge and `1` at the right edge.
    pub x: f64,
    /// Vertical position, `-1` at the top edge and `1` at the bottom edge.
    pub y: f64,
}

impl Alignment {
    /// The minimum corner.
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    /// The middle of the top edge.
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    /// The top edge's maximum corner.
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    /// The middle of the left edge.
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    /// The center.
    pub const CENTER: Self = Self::new(0.0, 0.0);
    /// The middle of the right edge.
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    /// The bottom edge's minimum corner.
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    /// The middle of the bottom edge.
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    /// The maximum corner.
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    /// Creates an alignment from relative coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point this alignment designates within `rect`.
    #[must_use]
    pub fn within(self, rect: Rect) -> Point {
        let center = rect.center();
        Point::new(
            center.x + self.x * rect.width() * 0.5,
            center.y + self.y * rect.height() * 0.5,
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Host-supplied layout of the transformed target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetGeometry {
    /// The target's bounds in its own local coordinates.
    pub bounds: Rect,
    /// Maps host (gesture) coordinates into the target's local coordinates.
    pub to_local: Affine,
}

impl TargetGeometry {
    /// Geometry whose local coordinates coincide with host coordinates.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            to_local: Affine::IDENTITY,
        }
    }

    /// Sets the host-to-local mapping.
    #[must_use]
    pub fn with_to_local(mut self, to_local: Affine) -> Self {
        self.to_local = to_local;
        self
    }
}

impl Default for TargetGeometry {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

/// Where scale and rotation deltas pivot.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum FocalPoint {
    /// Pivot around the gesture's focal point, converted into target-local coordinates.
    #[default]
    Gesture,
    /// Pivot around a fixed point of the target's bounds, ignoring where the fingers are.
    Aligned(Alignment),
}

impl FocalPoint {
    /// Resolves the pivot for a raw host focal point.
    #[must_use]
    pub fn resolve(self, raw: Point, geometry: &TargetGeometry) -> Point {
        match self {
            Self::Gesture => geometry.to_local * raw,
            Self::Aligned(alignment) => alignment.within(geometry.bounds),
        }
    }
}
