//! Motion throttling

use crate::types::PointerSample;

/// Fraction of the trigger distance a pointer must travel between
/// processed samples
pub const THROTTLE_FRACTION: f32 = 1.0 / 3.0;

/// Drops move samples that are too close to the last processed one
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionThrottle {
    last: PointerSample,
}

impl MotionThrottle {
    /// Restart from a new processed position
    pub fn reset(&mut self, position: PointerSample) {
        self.last = position;
    }

    /// Last processed position
    pub fn last(&self) -> PointerSample {
        self.last
    }

    /// Accept `position` if it is at least a third of `trigger` away from
    /// the last processed sample, and make it the new reference point
    pub fn accept(&mut self, position: PointerSample, trigger: f32) -> bool {
        if position.distance_to(self.last) < trigger * THROTTLE_FRACTION {
            return false;
        }
        self.last = position;
        true
    }
}
