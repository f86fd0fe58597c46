// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture session: live updates, release, and inertia in one owned value.
//!
//! ## Usage
//!
//! 1) Forward raw pointer transitions with [`GestureSession::pointer_down`] and
//!    [`GestureSession::pointer_up`].
//! 2) Call [`GestureSession::begin`] when the host recognizes a scale/pan gesture.
//! 3) Call [`GestureSession::update`] for every host sample and render with
//!    [`TransformUpdate::cumulative`].
//! 4) Call [`GestureSession::end`] with the release velocity. If it returns anything other than
//!    [`InertiaKind::None`], drive [`GestureSession::advance`] (or [`GestureSession::step`])
//!    from the frame clock until [`InertiaTick::finished`] is set.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture_transform::{GestureConfig, GestureSession, InertiaKind};
//!
//! let mut session = GestureSession::new(GestureConfig::new());
//!
//! session.pointer_down(0);
//! session.begin(Point::new(10.0, 10.0));
//! let update = session.update(Point::new(30.0, 25.0), 1.0, 0.0);
//! assert_eq!(update.cumulative.translation(), Vec2::new(20.0, 15.0));
//!
//! session.pointer_up(120);
//! let kind = session.end(Vec2::new(400.0, 0.0));
//! assert!(matches!(kind, InertiaKind::FlingPan { .. }));
//!
//! while !session.step().finished {}
//! assert!(session.transform().translation().x > 20.0);
//! ```

use core::time::Duration;

use kurbo::{Affine, Point, Vec2};

use crate::config::{ConfigError, GestureConfig, InertiaConfig};
use crate::focal::TargetGeometry;
use crate::heuristic::{InertiaKind, ReleaseInfo, select_inertia};
use crate::inertia::{FlingPan, Inertia, InertiaStep, SettleScale};
use crate::matrix::{self, TransformUpdate};
use crate::pointers::{PointerChange, PointerTracker};
use crate::updater::{RotationTracker, ValueUpdater};

/// Where a [`GestureSession`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing is happening.
    Idle,
    /// A gesture is in progress.
    Active,
    /// The gesture has ended and an inertial animation is running.
    Inertial,
}

/// Result of advancing inertia.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaTick {
    /// Transform change to render, if anything moved.
    pub update: Option<TransformUpdate>,
    /// No animation is running any more.
    pub finished: bool,
}

impl InertiaTick {
    const IDLE: Self = Self {
        update: None,
        finished: true,
    };
}

/// Turns gesture samples into an accumulated transform and runs post-release inertia.
///
/// The session owns all state: the accumulated transform, the per-gesture
/// [`ValueUpdater`]s, pointer bookkeeping and at most one running [`Inertia`]. Starting a
/// gesture or another animation cancels the running animation before anything else happens.
#[derive(Clone, Debug)]
pub struct GestureSession {
    config: GestureConfig,
    geometry: TargetGeometry,
    transform: Affine,
    active: bool,
    translation: ValueUpdater<Point, Vec2>,
    scale: ValueUpdater<f64>,
    rotation: RotationTracker,
    last_scale_ratio: f64,
    last_focal: Point,
    pointers: PointerTracker,
    inertia: Option<Inertia>,
    pending: Duration,
}

impl GestureSession {
    /// Creates an idle session with an identity transform.
    ///
    /// Unusable inertia tuning is replaced by the defaults; use [`GestureSession::try_new`]
    /// to reject it instead.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config: usable(config),
            geometry: TargetGeometry::default(),
            transform: Affine::IDENTITY,
            active: false,
            translation: ValueUpdater::offset(Point::ORIGIN),
            scale: ValueUpdater::ratio(1.0),
            rotation: RotationTracker::Unset,
            last_scale_ratio: 1.0,
            last_focal: Point::ORIGIN,
            pointers: PointerTracker::default(),
            inertia: None,
            pending: Duration::ZERO,
        }
    }

    /// Creates an idle session, rejecting unusable inertia tuning.
    pub fn try_new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration, replacing unusable inertia tuning with the defaults.
    ///
    /// Takes effect from the next update or animation step.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = usable(config);
    }

    /// Replaces the configuration, rejecting unusable inertia tuning.
    ///
    /// Takes effect from the next update or animation step.
    pub fn try_set_config(&mut self, config: GestureConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Updates the target layout used to resolve focal points.
    pub fn set_target_geometry(&mut self, geometry: TargetGeometry) {
        self.geometry = geometry;
    }

    /// Current target layout.
    #[must_use]
    pub fn target_geometry(&self) -> &TargetGeometry {
        &self.geometry
    }

    /// The accumulated transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replaces the accumulated transform, cancelling any animation.
    pub fn set_transform(&mut self, transform: Affine) {
        self.cancel_inertia();
        self.transform = transform;
    }

    /// Returns to identity and idle.
    ///
    /// Ends any gesture and animation and forgets everything tracked for them. Pointers that
    /// are still down stay counted, since their ups are still to come.
    pub fn reset(&mut self) {
        self.set_transform(Affine::IDENTITY);
        self.active = false;
        self.translation.reset(Point::ORIGIN);
        self.scale.reset(1.0);
        self.rotation.reset();
        self.last_scale_ratio = 1.0;
        self.last_focal = Point::ORIGIN;
        self.pointers.begin_session();
    }

    /// Where the session is in its lifecycle.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.active {
            SessionPhase::Active
        } else if self.inertia.is_some() {
            SessionPhase::Inertial
        } else {
            SessionPhase::Idle
        }
    }

    /// Pointer bookkeeping.
    #[must_use]
    pub fn pointers(&self) -> &PointerTracker {
        &self.pointers
    }

    /// Applies a host pointer transition at `time_ms`.
    pub fn on_pointer_change(&mut self, change: PointerChange, time_ms: u64) {
        self.pointers.on_pointer_change(change, time_ms);
    }

    /// Records a pointer touching down at `time_ms`.
    pub fn pointer_down(&mut self, time_ms: u64) {
        self.pointers.pointer_down(time_ms);
    }

    /// Records a pointer lifting at `time_ms`.
    pub fn pointer_up(&mut self, time_ms: u64) {
        self.pointers.pointer_up(time_ms);
    }

    /// Starts a gesture at the host focal point `focal`.
    ///
    /// Cancels any running animation and re-seeds every tracker: translation from `focal`,
    /// scale from `1.0`, rotation from its first sample.
    pub fn begin(&mut self, focal: Point) {
        self.cancel_inertia();
        self.translation.reset(focal);
        self.scale.reset(1.0);
        self.rotation.reset();
        self.last_scale_ratio = 1.0;
        self.last_focal = self.config.focal_point.resolve(focal, &self.geometry);
        self.pointers.begin_session();
        self.active = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(x = focal.x, y = focal.y, "gesture session begin");
    }

    /// Applies one host sample.
    ///
    /// `scale` is the gesture's total scale since [`begin`](Self::begin) and `rotation` its
    /// total rotation in radians; `1.0` and `0.0` mean "no change in that dimension". Deltas are
    /// applied translation first, then scale, then rotation.
    ///
    /// Outside an active gesture this changes nothing and returns an identity update.
    pub fn update(&mut self, focal: Point, scale: f64, rotation: f64) -> TransformUpdate {
        let mut update = TransformUpdate::identity(self.transform);
        if !self.active {
            #[cfg(feature = "tracing")]
            tracing::warn!("gesture update outside of a session");
            return update;
        }

        if self.config.translate {
            let delta = matrix::translate(self.translation.update(focal));
            self.transform = delta * self.transform;
            update.translation = delta;
        }

        let pivot = self.config.focal_point.resolve(focal, &self.geometry);
        self.last_focal = pivot;

        // Zero, negative or non-finite samples would collapse or mirror the content.
        if self.config.scale && scale != 1.0 && scale.is_finite() && scale > 0.0 {
            let ratio = self.scale.update(scale);
            if ratio != 1.0 {
                self.last_scale_ratio = ratio;
            }
            let delta = matrix::scale_about(ratio, pivot);
            self.transform = delta * self.transform;
            update.scale = delta;
        }

        if self.config.rotate
            && rotation != 0.0
            && let Some(radians) = self.rotation.update(rotation)
        {
            let delta = matrix::rotate_about(radians, pivot);
            self.transform = delta * self.transform;
            update.rotation = delta;
        }

        update.cumulative = self.transform;
        update
    }

    /// Ends the gesture with the host's release velocity and starts inertia if warranted.
    ///
    /// The accumulated transform is not touched. Returns the animation that was started.
    ///
    /// A pinch release can only be recognized once the last pointer has lifted: forward the
    /// final [`pointer_up`](Self::pointer_up) before calling this. Hosts that end the gesture
    /// on the two-to-one pointer transition and restart it with one pointer will only ever
    /// see fling or no inertia.
    pub fn end(&mut self, velocity: Vec2) -> InertiaKind {
        if !self.active {
            #[cfg(feature = "tracing")]
            tracing::warn!("gesture end outside of a session");
            return InertiaKind::None;
        }
        self.active = false;

        let release = ReleaseInfo {
            pointer_count: self.pointers.count(),
            two_pointer: self.pointers.is_two_pointer(),
            release_gap: self.pointers.release_gap(),
            velocity,
            last_scale_ratio: self.last_scale_ratio,
            focal: self.last_focal,
        };
        let kind = select_inertia(&release, &self.config);
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(pointers = release.pointer_count, "gesture session end");
            tracing::trace!(?release, ?kind, "inertia selected");
        }
        self.start_inertia(kind);
        kind
    }

    /// Starts an inertial animation, cancelling any running one first.
    ///
    /// A settle re-seeds the scale tracker with its ratio; a fling continues from the last
    /// tracked focal point.
    pub fn start_inertia(&mut self, kind: InertiaKind) {
        self.cancel_inertia();
        self.inertia = match kind {
            InertiaKind::None => None,
            InertiaKind::FlingPan { velocity } => Some(Inertia::FlingPan(FlingPan::new(velocity))),
            InertiaKind::SettleScale { ratio, focal } => {
                self.scale.reset(ratio);
                Some(Inertia::SettleScale(SettleScale::new(ratio, focal)))
            }
        };
        #[cfg(feature = "tracing")]
        if self.inertia.is_some() {
            tracing::debug!(?kind, "inertia start");
        }
    }

    /// Stops any running animation immediately; no further steps will produce updates.
    pub fn cancel_inertia(&mut self) {
        if self.inertia.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("inertia cancelled");
        }
        self.pending = Duration::ZERO;
    }

    /// Whether an inertial animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inertia.is_some()
    }

    /// The running animation, if any.
    #[must_use]
    pub fn inertia(&self) -> Option<&Inertia> {
        self.inertia.as_ref()
    }

    /// Advances the running animation by exactly one fixed step.
    pub fn step(&mut self) -> InertiaTick {
        let Some(inertia) = self.inertia.as_mut() else {
            return InertiaTick::IDLE;
        };
        let (out, finished) =
            inertia.step(&self.config.inertia, &mut self.translation, &mut self.scale);

        let update = out.map(|out| {
            let mut update = TransformUpdate::identity(self.transform);
            match out {
                InertiaStep::Translate(delta) => {
                    self.transform = delta * self.transform;
                    update.translation = delta;
                }
                InertiaStep::Scale(delta) => {
                    self.transform = delta * self.transform;
                    update.scale = delta;
                }
            }
            update.cumulative = self.transform;
            update
        });

        if finished {
            self.inertia = None;
            self.pending = Duration::ZERO;
            #[cfg(feature = "tracing")]
            tracing::debug!("inertia finished");
        }
        InertiaTick { update, finished }
    }

    /// Advances the running animation by host frame time `dt`.
    ///
    /// Time is accumulated and spent in whole fixed steps; leftovers carry over to the next
    /// call. The updates of all steps run are merged into one.
    pub fn advance(&mut self, dt: Duration) -> InertiaTick {
        if self.inertia.is_none() {
            return InertiaTick::IDLE;
        }
        let step = self.config.inertia.step;
        self.pending = self.pending.saturating_add(dt);

        let mut merged: Option<TransformUpdate> = None;
        while self.pending >= step {
            self.pending -= step;
            let tick = self.step();
            if let Some(update) = tick.update {
                merged = Some(match merged {
                    Some(earlier) => earlier.then(update),
                    None => update,
                });
            }
            if tick.finished {
                return InertiaTick {
                    update: merged,
                    finished: true,
                };
            }
        }
        InertiaTick {
            update: merged,
            finished: false,
        }
    }
}

fn usable(config: GestureConfig) -> GestureConfig {
    match config.validate() {
        Ok(()) => config,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "invalid inertia config, using defaults");
            config.with_inertia(InertiaConfig::DEFAULT)
        }
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
