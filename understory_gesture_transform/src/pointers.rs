// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer count bookkeeping for the release heuristic.
//!
//! The tracker only answers three questions when a gesture ends: how many pointers are still
//! down, whether two were down at once during the session, and how far apart in time the
//! last two pointers lifted.
//!
//! ```
//! use core::time::Duration;
//! use understory_gesture_transform::PointerTracker;
//!
//! let mut pointers = PointerTracker::default();
//! pointers.pointer_down(0);
//! pointers.pointer_down(10);
//! pointers.pointer_up(500);
//! pointers.pointer_up(620);
//!
//! assert!(pointers.is_two_pointer());
//! assert_eq!(pointers.count(), 0);
//! assert_eq!(pointers.release_gap(), Some(Duration::from_millis(120)));
//! ```

use core::time::Duration;

/// A raw pointer transition reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerChange {
    /// A pointer touched down.
    Down,
    /// A pointer lifted.
    Up,
}

/// Tracks pointer count and release timing across a gesture session.
///
/// Timestamps are milliseconds on any monotonic host clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerTracker {
    count: u32,
    two_pointer: bool,
    second_up_at: Option<u64>,
    release_gap: Option<Duration>,
}

impl PointerTracker {
    /// Applies a host pointer transition.
    pub fn on_pointer_change(&mut self, change: PointerChange, time_ms: u64) {
        match change {
            PointerChange::Down => self.pointer_down(time_ms),
            PointerChange::Up => self.pointer_up(time_ms),
        }
    }

    /// Records a pointer touching down.
    pub fn pointer_down(&mut self, _time_ms: u64) {
        self.count = self.count.saturating_add(1);
        if self.count >= 2 {
            self.two_pointer = true;
        }
    }

    /// Records a pointer lifting.
    ///
    /// An up without a matching down is ignored.
    pub fn pointer_up(&mut self, time_ms: u64) {
        if self.count == 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(time_ms, "pointer up with no pointer down");
            return;
        }
        self.count -= 1;
        match self.count {
            1 => {
                self.second_up_at = Some(time_ms);
                self.release_gap = None;
            }
            0 => {
                self.release_gap = self
                    .second_up_at
                    .map(|at| Duration::from_millis(time_ms.saturating_sub(at)));
            }
            _ => {}
        }
    }

    /// Clears release timing left over from a previous session.
    ///
    /// The two-pointer flag restarts from the current count, so a second pointer that is
    /// already down when the session starts still counts.
    pub fn begin_session(&mut self) {
        self.two_pointer = self.count >= 2;
        self.second_up_at = None;
        self.release_gap = None;
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether two pointers have been down at once since the session started.
    #[must_use]
    pub fn is_two_pointer(&self) -> bool {
        self.two_pointer
    }

    /// Time between the second-to-last and the last pointer lifting.
    ///
    /// `None` until the last pointer has lifted after a two-pointer phase.
    #[must_use]
    pub fn release_gap(&self) -> Option<Duration> {
        self.release_gap
    }
}
