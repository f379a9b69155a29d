//! Drag session bookkeeping and tap classification
//!
//! A gesture session lives from pointer-down on a window header until the
//! matching release. Only one can exist at a time across the whole desktop.

use crate::domain::core::Point;
use crate::domain::window::WindowId;

/// Milliseconds since page load, as delivered by the host event loop
pub type Millis = u64;

/// Thresholds separating a tap from a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapPolicy {
    /// Gesture must be strictly shorter than this (default: 300ms)
    pub max_duration_ms: Millis,
    /// Displacement must be strictly below this (default: 10px)
    pub max_distance: f32,
}

impl Default for TapPolicy {
    fn default() -> Self {
        Self {
            max_duration_ms: 300,
            max_distance: 10.0,
        }
    }
}

impl TapPolicy {
    pub fn is_tap(&self, duration_ms: Millis, distance: f32) -> bool {
        duration_ms < self.max_duration_ms && distance < self.max_distance
    }
}

/// In-progress drag of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSession {
    pub origin: Point,
    pub last: Point,
    pub start_time: Millis,
    pub target: WindowId,
}

impl GestureSession {
    pub fn new(target: WindowId, origin: Point, start_time: Millis) -> Self {
        Self {
            origin,
            last: origin,
            start_time,
            target,
        }
    }

    /// Records a new pointer position, returning the delta from the previous one
    pub fn advance(&mut self, to: Point) -> (i32, i32) {
        let delta = (to.x.saturating_sub(self.last.x), to.y.saturating_sub(self.last.y));
        self.last = to;
        delta
    }

    /// Classifies the finished gesture given its release point and time
    pub fn was_tap(&self, release: Point, end_time: Millis, policy: &TapPolicy) -> bool {
        let duration = end_time.saturating_sub(self.start_time);
        policy.is_tap(duration, self.origin.distance_to(release))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GestureSession {
        GestureSession::new(WindowId::Terminal, Point::new(100, 100), 1_000)
    }

    #[test]
    fn short_still_gesture_is_tap() {
        let policy = TapPolicy::default();
        assert!(session().was_tap(Point::new(103, 104), 1_200, &policy));
    }

    #[test]
    fn slow_gesture_is_not_tap() {
        let policy = TapPolicy::default();
        assert!(!session().was_tap(Point::new(103, 104), 1_400, &policy));
    }

    #[test]
    fn long_gesture_is_not_tap() {
        let policy = TapPolicy::default();
        assert!(!session().was_tap(Point::new(150, 100), 1_100, &policy));
    }

    #[test]
    fn thresholds_are_exclusive() {
        let policy = TapPolicy::default();
        assert!(!policy.is_tap(300, 0.0));
        assert!(!policy.is_tap(0, 10.0));
        assert!(policy.is_tap(299, 9.9));
    }

    #[test]
    fn advance_reports_incremental_delta() {
        let mut session = session();
        assert_eq!(session.advance(Point::new(110, 95)), (10, -5));
        assert_eq!(session.advance(Point::new(110, 100)), (0, 5));
        assert_eq!(session.origin, Point::new(100, 100));
    }

    #[test]
    fn advance_saturates_on_extreme_jumps() {
        let mut session = GestureSession::new(WindowId::Terminal, Point::new(i32::MIN, i32::MAX), 0);
        assert_eq!(session.advance(Point::new(i32::MAX, i32::MIN)), (i32::MAX, i32::MIN));
    }
}
