//! Process-wide UI state
//!
//! The handful of flags every component consults: whether shutdown has begun,
//! which window holds focus, and the single in-flight drag. Components receive
//! this struct by reference instead of reaching for globals.

use crate::domain::core::Viewport;
use crate::domain::gesture::GestureSession;
use crate::domain::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Set once and never cleared; every mutation checks it first
    shutting_down: bool,
    /// The single focused window, if any
    pub focused: Option<WindowId>,
    /// The single active drag, if any
    pub gesture: Option<GestureSession>,
    pub viewport: Viewport,
}

impl UiState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            shutting_down: false,
            focused: None,
            gesture: None,
            viewport,
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Latches the shutdown guard. Returns false if it was already set.
    pub fn begin_shutdown(&mut self) -> bool {
        if self.shutting_down {
            return false;
        }
        self.shutting_down = true;
        self.gesture = None;
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::Point;

    #[test]
    fn initial_state_is_idle() {
        let state = UiState::new(Viewport::new(800, 600));
        assert!(!state.is_shutting_down());
        assert!(state.focused.is_none());
        assert!(!state.is_dragging());
    }

    #[test]
    fn shutdown_latches_once_and_drops_drag() {
        let mut state = UiState::new(Viewport::new(800, 600));
        state.gesture = Some(GestureSession::new(WindowId::Terminal, Point::new(1, 1), 0));

        assert!(state.begin_shutdown());
        assert!(!state.is_dragging());
        assert!(!state.begin_shutdown());
        assert!(state.is_shutting_down());
    }
}
