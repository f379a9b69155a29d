//! Unified pointer and touch gesture tracking
//!
//! Mouse and touch events arrive in different shapes. Two adapters reduce them
//! to one [`InputEvent`] stream, and [`PointerGestureTracker`] turns that
//! stream into drag gestures for window headers.
//!
//! # Invariants
//!
//! 1. At most one gesture session exists; a second pointer-down while one is
//!    open is dropped, not queued.
//! 2. Moves and releases without an open session are dropped.
//! 3. Multi-touch contact never produces input events.
//! 4. A control is activated only by a tap that is released over it.

use tracing::{debug, trace};

use crate::app::state::UiState;
use crate::app::window_manager::WindowManager;
use crate::domain::core::Point;
use crate::domain::gesture::{GestureSession, Millis, TapPolicy};
use crate::domain::window::{WindowControl, WindowId};

/// Normalized pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown { at: Point, time: Millis },
    PointerMove { at: Point, time: Millis },
    PointerUp { at: Point, time: Millis },
    /// The platform aborted the contact (touchcancel)
    PointerCancel { time: Millis },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub at: Point,
    pub time: Millis,
}

/// Mouse events map one to one
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseAdapter;

impl MouseAdapter {
    pub fn normalize(&self, event: &MouseEvent) -> InputEvent {
        let (at, time) = (event.at, event.time);
        match event.kind {
            MouseKind::Down => InputEvent::PointerDown { at, time },
            MouseKind::Move => InputEvent::PointerMove { at, time },
            MouseKind::Up => InputEvent::PointerUp { at, time },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Contacts still on the surface after this event
    pub touches: Vec<Point>,
    /// Contacts that changed in this event
    pub changed: Vec<Point>,
    pub time: Millis,
}

/// Adapter output: the normalized event, if any, plus whether the host should
/// suppress the browser's default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchOutput {
    pub event: Option<InputEvent>,
    pub suppress_default: bool,
}

/// Reduces single-finger touch sequences to pointer events.
///
/// Also tracks successive touch ends so a quick second tap does not zoom the
/// page.
#[derive(Debug, Clone)]
pub struct TouchAdapter {
    double_tap_ms: Millis,
    last_end: Option<Millis>,
}

impl TouchAdapter {
    pub fn new(double_tap_ms: Millis) -> Self {
        Self {
            double_tap_ms,
            last_end: None,
        }
    }

    pub fn normalize(&mut self, event: &TouchEvent) -> TouchOutput {
        let time = event.time;
        let single = |points: &[Point]| if points.len() == 1 { points.first().copied() } else { None };

        match event.phase {
            TouchPhase::Start => TouchOutput {
                event: single(event.touches.as_slice()).map(|at| InputEvent::PointerDown { at, time }),
                suppress_default: false,
            },
            TouchPhase::Move => TouchOutput {
                event: single(event.touches.as_slice()).map(|at| InputEvent::PointerMove { at, time }),
                suppress_default: false,
            },
            TouchPhase::End => {
                let double_tap = self
                    .last_end
                    .is_some_and(|last| time.saturating_sub(last) <= self.double_tap_ms);
                self.last_end = Some(time);

                let released = if event.touches.is_empty() {
                    event.changed.first().copied()
                } else {
                    None
                };
                TouchOutput {
                    event: released.map(|at| InputEvent::PointerUp { at, time }),
                    suppress_default: double_tap,
                }
            }
            TouchPhase::Cancel => TouchOutput {
                event: Some(InputEvent::PointerCancel { time }),
                suppress_default: false,
            },
        }
    }
}

/// Semantic gesture on a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Start { target: WindowId, at: Point, time: Millis },
    Move { target: WindowId, dx: i32, dy: i32, time: Millis },
    End { target: WindowId, at: Point, time: Millis, was_tap: bool },
    Cancel { target: WindowId },
    /// A tap released over a header control
    Activate { target: WindowId, control: WindowControl },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GestureOutput {
    pub gestures: Vec<Gesture>,
    /// Host should block page scroll/zoom for this event
    pub suppress_default: bool,
}

/// Turns normalized pointer input into window drag gestures.
///
/// The session itself lives in [`UiState`] so every component sees the same
/// drag flag.
#[derive(Debug, Clone)]
pub struct PointerGestureTracker {
    policy: TapPolicy,
}

impl PointerGestureTracker {
    pub fn new(policy: TapPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TapPolicy {
        &self.policy
    }

    pub fn handle(&self, state: &mut UiState, windows: &WindowManager, event: InputEvent) -> GestureOutput {
        let mut out = GestureOutput::default();
        if state.is_shutting_down() {
            return out;
        }

        match event {
            InputEvent::PointerDown { at, time } => {
                if state.gesture.is_some() {
                    debug!("pointer down ignored, drag already active");
                    return out;
                }
                if let Some(target) = windows.header_at(state, at) {
                    state.gesture = Some(GestureSession::new(target, at, time));
                    out.gestures.push(Gesture::Start { target, at, time });
                }
            }
            InputEvent::PointerMove { at, time } => {
                if let Some(session) = state.gesture.as_mut() {
                    let (dx, dy) = session.advance(at);
                    trace!(dx, dy, "drag move");
                    out.gestures.push(Gesture::Move {
                        target: session.target,
                        dx,
                        dy,
                        time,
                    });
                    out.suppress_default = true;
                }
            }
            InputEvent::PointerUp { at, time } => {
                if let Some(session) = state.gesture.take() {
                    let target = session.target;
                    let was_tap = session.was_tap(at, time, &self.policy);
                    out.gestures.push(Gesture::End {
                        target,
                        at,
                        time,
                        was_tap,
                    });
                    if was_tap
                        && let Some(control) = windows.get(target).and_then(|window| window.control_at(at))
                    {
                        out.gestures.push(Gesture::Activate { target, control });
                    }
                }
            }
            InputEvent::PointerCancel { .. } => {
                if let Some(session) = state.gesture.take() {
                    out.gestures.push(Gesture::Cancel {
                        target: session.target,
                    });
                }
            }
        }

        out
    }
}
