//! Tap timing and double-tap detection

use serde::{Deserialize, Serialize};

/// How a released press was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapKind {
    Single,
    Double,
}

/// Tracks contact and tap timestamps across gestures
///
/// A release counts as a tap only if it happens within the window after
/// contact. A tap within the window after the previous tap is the second
/// half of a double tap, which closes the cycle.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    last_down_ms: u64,
    last_tap_ms: Option<u64>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contact
    pub fn press(&mut self, time_ms: u64) {
        self.last_down_ms = time_ms;
    }

    /// Forget the pending tap so the next one starts a new cycle
    pub fn invalidate(&mut self) {
        self.last_tap_ms = None;
    }

    /// Classify a release of a press that never committed to a drag
    pub fn release(&mut self, time_ms: u64, window_ms: u64) -> Option<TapKind> {
        if time_ms.saturating_sub(self.last_down_ms) >= window_ms {
            self.invalidate();
            return None;
        }

        match self.last_tap_ms {
            Some(previous) if time_ms.saturating_sub(previous) < window_ms => {
                self.invalidate();
                Some(TapKind::Double)
            }
            _ => {
                self.last_tap_ms = Some(time_ms);
                Some(TapKind::Single)
            }
        }
    }

    /// Timestamp of the tap that opened the current window
    pub fn pending_tap(&self) -> Option<u64> {
        self.last_tap_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u64 = 300;

    fn tap(tracker: &mut TapTracker, down: u64, up: u64) -> Option<TapKind> {
        tracker.press(down);
        tracker.release(up, WINDOW)
    }

    #[test]
    fn test_single_then_double() {
        let mut tracker = TapTracker::new();
        assert_eq!(tap(&mut tracker, 1000, 1050), Some(TapKind::Single));
        assert_eq!(tap(&mut tracker, 1100, 1150), Some(TapKind::Double));
        assert_eq!(tracker.pending_tap(), None);
    }

    #[test]
    fn test_third_tap_restarts_cycle() {
        let mut tracker = TapTracker::new();
        tap(&mut tracker, 1000, 1050);
        tap(&mut tracker, 1100, 1150);
        assert_eq!(tap(&mut tracker, 1200, 1250), Some(TapKind::Single));
        assert_eq!(tap(&mut tracker, 2000, 2050), Some(TapKind::Single));
    }

    #[test]
    fn test_long_press_is_not_a_tap() {
        let mut tracker = TapTracker::new();
        tap(&mut tracker, 1000, 1050);
        assert_eq!(tap(&mut tracker, 1100, 1400), None);
        assert_eq!(tracker.pending_tap(), None);
        assert_eq!(tap(&mut tracker, 1500, 1550), Some(TapKind::Single));
    }

    #[test]
    fn test_gap_outside_window() {
        let mut tracker = TapTracker::new();
        tap(&mut tracker, 1000, 1050);
        assert_eq!(tap(&mut tracker, 1300, 1350), Some(TapKind::Single));
    }

    #[test]
    fn test_invalidate() {
        let mut tracker = TapTracker::new();
        tap(&mut tracker, 1000, 1050);
        tracker.invalidate();
        assert_eq!(tap(&mut tracker, 1100, 1150), Some(TapKind::Single));
    }

    #[test]
    fn test_early_timestamps() {
        // No previous tap must not be mistaken for one at time zero
        let mut tracker = TapTracker::new();
        assert_eq!(tap(&mut tracker, 10, 20), Some(TapKind::Single));
    }
}
