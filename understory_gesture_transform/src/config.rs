// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::focal::{Alignment, FocalPoint};

/// A rejected [`InertiaConfig`] field.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The animation step must advance time.
    #[error("inertia step must be non-zero")]
    ZeroStep,
    /// The fling decay rate must be positive and finite.
    #[error("fling decay rate must be positive and finite, got {0}")]
    InvalidDecayRate(f64),
    /// The fling stop threshold must be positive and finite.
    #[error("fling stop threshold must be positive and finite, got {0}")]
    InvalidStopThreshold(f64),
    /// The settle animation must last some time.
    #[error("settle duration must be non-zero")]
    ZeroSettleDuration,
}

/// Tuning for post-release animation.
///
/// The defaults reproduce the feel the engine was tuned for; the release window and the
/// stop threshold are product choices rather than physical constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaConfig {
    /// Whether a release may start inertia at all.
    pub enabled: bool,
    /// Fixed simulation step (default: 15ms).
    pub step: Duration,
    /// Exponential fling velocity decay, per second (default: 8.0).
    pub fling_decay_rate: f64,
    /// Fling stops once squared speed drops below this (default: 0.1).
    pub fling_stop_threshold: f64,
    /// Total length of the scale settle (default: 500ms).
    pub settle_duration: Duration,
    /// Two releases closer together than this count as a pinch release (default: 200ms).
    pub pinch_release_window: Duration,
}

impl InertiaConfig {
    /// Default tuning.
    pub const DEFAULT: Self = Self {
        enabled: true,
        step: Duration::from_millis(15),
        fling_decay_rate: 8.0,
        fling_stop_threshold: 0.1,
        settle_duration: Duration::from_millis(500),
        pinch_release_window: Duration::from_millis(200),
    };

    /// Inertia switched off.
    pub const DISABLED: Self = Self {
        enabled: false,
        ..Self::DEFAULT
    };

    /// Checks that every field can drive an animation to completion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step.is_zero() {
            return Err(ConfigError::ZeroStep);
        }
        if !(self.fling_decay_rate.is_finite() && self.fling_decay_rate > 0.0) {
            return Err(ConfigError::InvalidDecayRate(self.fling_decay_rate));
        }
        if !(self.fling_stop_threshold.is_finite() && self.fling_stop_threshold > 0.0) {
            return Err(ConfigError::InvalidStopThreshold(self.fling_stop_threshold));
        }
        if self.settle_duration.is_zero() {
            return Err(ConfigError::ZeroSettleDuration);
        }
        Ok(())
    }
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which gestures a session responds to, and how.
///
/// ```
/// use understory_gesture_transform::{Alignment, GestureConfig};
///
/// let config = GestureConfig::new()
///     .with_rotate(false)
///     .with_aligned_focal_point(Alignment::CENTER);
/// assert!(config.translate && config.scale && !config.rotate);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Follow focal point movement with translation.
    pub translate: bool,
    /// Follow pinch with uniform scale.
    pub scale: bool,
    /// Follow twist with rotation.
    pub rotate: bool,
    /// Whether the renderer should clip transformed content to the target bounds.
    ///
    /// The engine itself never reads this.
    pub clip_to_bounds: bool,
    /// Pivot for scale and rotation.
    pub focal_point: FocalPoint,
    /// Post-release animation tuning.
    pub inertia: InertiaConfig,
}

impl GestureConfig {
    /// All gestures on, clipping on, pivot at the fingers, default inertia.
    #[must_use]
    pub fn new() -> Self {
        Self {
            translate: true,
            scale: true,
            rotate: true,
            clip_to_bounds: true,
            focal_point: FocalPoint::Gesture,
            inertia: InertiaConfig::DEFAULT,
        }
    }

    /// Enables or disables translation.
    #[must_use]
    pub fn with_translate(mut self, enabled: bool) -> Self {
        self.translate = enabled;
        self
    }

    /// Enables or disables scaling.
    #[must_use]
    pub fn with_scale(mut self, enabled: bool) -> Self {
        self.scale = enabled;
        self
    }

    /// Enables or disables rotation.
    #[must_use]
    pub fn with_rotate(mut self, enabled: bool) -> Self {
        self.rotate = enabled;
        self
    }

    /// Sets the clipping hint for the renderer.
    #[must_use]
    pub fn with_clip_to_bounds(mut self, clip: bool) -> Self {
        self.clip_to_bounds = clip;
        self
    }

    /// Sets the pivot for scale and rotation.
    #[must_use]
    pub fn with_focal_point(mut self, focal_point: FocalPoint) -> Self {
        self.focal_point = focal_point;
        self
    }

    /// Pivots scale and rotation about a fixed point of the target bounds.
    #[must_use]
    pub fn with_aligned_focal_point(self, alignment: Alignment) -> Self {
        self.with_focal_point(FocalPoint::Aligned(alignment))
    }

    /// Sets the inertia tuning.
    #[must_use]
    pub fn with_inertia(mut self, inertia: InertiaConfig) -> Self {
        self.inertia = inertia;
        self
    }

    /// Validates the inertia tuning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.inertia.validate()
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GestureConfig::default().validate(), Ok(()));
        assert_eq!(InertiaConfig::DISABLED.validate(), Ok(()));
    }

    #[test]
    fn builder_sets_fields() {
        let config = GestureConfig::new()
            .with_translate(false)
            .with_scale(true)
            .with_rotate(false)
            .with_clip_to_bounds(false)
            .with_aligned_focal_point(Alignment::TOP_LEFT)
            .with_inertia(InertiaConfig::DISABLED);

        assert!(!config.translate);
        assert!(config.scale);
        assert!(!config.rotate);
        assert!(!config.clip_to_bounds);
        assert_eq!(config.focal_point, FocalPoint::Aligned(Alignment::TOP_LEFT));
        assert!(!config.inertia.enabled);
    }

    #[test]
    fn validate_rejects_unusable_tuning() {
        let zero_step = InertiaConfig {
            step: Duration::ZERO,
            ..InertiaConfig::DEFAULT
        };
        assert_eq!(zero_step.validate(), Err(ConfigError::ZeroStep));

        let nan_decay = InertiaConfig {
            fling_decay_rate: f64::NAN,
            ..InertiaConfig::DEFAULT
        };
        assert!(matches!(
            nan_decay.validate(),
            Err(ConfigError::InvalidDecayRate(_))
        ));

        let negative_threshold = InertiaConfig {
            fling_stop_threshold: -1.0,
            ..InertiaConfig::DEFAULT
        };
        assert_eq!(
            negative_threshold.validate(),
            Err(ConfigError::InvalidStopThreshold(-1.0))
        );

        let instant_settle = InertiaConfig {
            settle_duration: Duration::ZERO,
            ..InertiaConfig::DEFAULT
        };
        assert_eq!(
            GestureConfig::new().with_inertia(instant_settle).validate(),
            Err(ConfigError::ZeroSettleDuration)
        );
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            ConfigError::InvalidDecayRate(-2.0).to_string(),
            "fling decay rate must be positive and finite, got -2"
        );
    }
}
