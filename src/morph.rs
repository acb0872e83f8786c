//! Throttle for shape morphs.
//!
//! A morph arms a deadline. Until it passes, further morph requests are
//! dropped: not queued, and the deadline is not extended. Whether the
//! particles have visually settled plays no part.

use std::time::{Duration, Instant};

/// Morph throttle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphState {
    #[default]
    Idle,
    Morphing {
        /// Instant at which new morphs are accepted again.
        until: Instant,
    },
}

impl MorphState {
    /// Whether a morph is in flight at `now`. Settles to `Idle` once the
    /// deadline has passed.
    pub fn is_morphing(&mut self, now: Instant) -> bool {
        if let MorphState::Morphing { until } = *self {
            if now < until {
                return true;
            }
            *self = MorphState::Idle;
        }
        false
    }

    /// Try to start a morph lasting `duration`. Returns `false` (and changes
    /// nothing) if one is already in flight.
    pub fn try_begin(&mut self, now: Instant, duration: Duration) -> bool {
        if self.is_morphing(now) {
            return false;
        }
        *self = MorphState::Morphing {
            until: now + duration,
        };
        true
    }
}
