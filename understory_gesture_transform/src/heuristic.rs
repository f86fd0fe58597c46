// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing what happens after the fingers lift.
//!
//! Two pointers lifting almost together reads as a deliberate pinch release and settles the
//! scale; anything else that is still moving on release flings. Rules are checked in order
//! and the first match wins:
//!
//! 1. A two-pointer session ending with at most one pointer down, released with non-zero
//!    velocity:
//!    - scaling enabled, a recorded scale step, and both pointers lifted within
//!      [`InertiaConfig::pinch_release_window`](crate::InertiaConfig::pinch_release_window):
//!      [`InertiaKind::SettleScale`];
//!    - otherwise, translation enabled: [`InertiaKind::FlingPan`].
//! 2. No pointers left, translation enabled, non-zero velocity: [`InertiaKind::FlingPan`].
//! 3. Otherwise [`InertiaKind::None`].

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::config::GestureConfig;

/// What the session looked like at the moment it ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseInfo {
    /// Pointers still down.
    pub pointer_count: u32,
    /// Whether two pointers were down at once during the session.
    pub two_pointer: bool,
    /// Time between the last two pointers lifting, once both have.
    pub release_gap: Option<Duration>,
    /// Release velocity in target units per second.
    pub velocity: Vec2,
    /// The last scale step other than `1.0`, or `1.0` if there was none.
    pub last_scale_ratio: f64,
    /// The resolved focal point of the last update.
    pub focal: Point,
}

/// Post-release animation to run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InertiaKind {
    /// Stop where the gesture left off.
    None,
    /// Keep panning with exponentially decaying velocity.
    FlingPan {
        /// Initial velocity in target units per second.
        velocity: Vec2,
    },
    /// Ease the last scale step back out about a frozen focal point.
    SettleScale {
        /// Scale step at release.
        ratio: f64,
        /// Pivot for the whole settle.
        focal: Point,
    },
}

/// Applies the release rules to `release` under `config`.
#[must_use]
pub fn select_inertia(release: &ReleaseInfo, config: &GestureConfig) -> InertiaKind {
    if !config.inertia.enabled {
        return InertiaKind::None;
    }
    let moving = release.velocity.is_finite() && release.velocity != Vec2::ZERO;
    let fling = InertiaKind::FlingPan {
        velocity: release.velocity,
    };

    if release.two_pointer && release.pointer_count <= 1 && moving {
        let pinch_release = release
            .release_gap
            .is_some_and(|gap| gap < config.inertia.pinch_release_window);
        let scaled = release.last_scale_ratio.is_finite() && release.last_scale_ratio != 1.0;
        if config.scale && pinch_release && scaled {
            return InertiaKind::SettleScale {
                ratio: release.last_scale_ratio,
                focal: release.focal,
            };
        }
        if config.translate {
            return fling;
        }
    } else if release.pointer_count == 0 && config.translate && moving {
        return fling;
    }
    InertiaKind::None
}
