//! Window manager
//!
//! Owns the fixed window registry and applies open/close/minimize/maximize and
//! drag operations to it. Focus lives in [`UiState`] so that the gesture
//! tracker and interpreter see the same pointer.
//!
//! Every mutating operation checks the shutdown guard first and silently does
//! nothing once shutdown has begun. Return values report whether anything
//! changed so callers can decide on feedback.

use tracing::{debug, trace};

use crate::app::state::UiState;
use crate::domain::core::{Point, Rect, Viewport};
use crate::domain::window::{Window, WindowId, WindowState};

/// Minimum `top` a window may be dragged to (keeps the header below the taskbar)
pub const MIN_TOP: i32 = 30;
/// Distance kept between the viewport bottom and the lowest allowed `top`
pub const BOTTOM_MARGIN: i32 = 100;
/// Horizontal margin kept on both sides
pub const SIDE_MARGIN: i32 = 10;

/// Result of a maximize toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeToggle {
    Maximized,
    Restored,
}

/// Clamps a dragged rectangle into the allowed band of the viewport.
///
/// Bounds are applied as `max(lo, min(value, hi))`, so when the window is
/// wider than the viewport it pins to the left margin instead of panicking.
pub fn clamp_to_viewport(rect: Rect, viewport: Viewport) -> Rect {
    let top = rect.y.min(viewport.height - BOTTOM_MARGIN).max(MIN_TOP);
    let left = rect.x.min(viewport.width - rect.w - SIDE_MARGIN).max(SIDE_MARGIN);
    Rect::new(left, top, rect.w, rect.h)
}

#[derive(Debug, Clone)]
pub struct WindowManager {
    windows: Vec<Window>,
}

impl WindowManager {
    /// Creates the registry with every window closed
    pub fn new(viewport: Viewport, width: i32, height: i32) -> Self {
        let windows = WindowId::ALL
            .into_iter()
            .map(|id| Window::new(id, viewport, width, height))
            .collect();
        Self { windows }
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|window| window.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Resolves a window name from the page (icons, start menu)
    pub fn resolve(&self, name: &str) -> Option<WindowId> {
        let id = WindowId::lookup(name);
        if id.is_none() {
            debug!(name, "unknown window id");
        }
        id
    }

    /// Shows a window and gives it focus.
    ///
    /// The previously focused window only loses focus; its state is untouched.
    pub fn open(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            debug!(%id, "open ignored during shutdown");
            return false;
        }
        let Some(window) = self.get_mut(id) else {
            return false;
        };

        window.state = if window.is_maximized() {
            WindowState::Maximized
        } else {
            WindowState::Open
        };
        window.mark_draggable();

        if let Some(previous) = state.focused.replace(id)
            && previous != id
        {
            trace!(%previous, %id, "focus transferred");
        }
        true
    }

    /// Hides a window. Clears focus if it was focused; nothing is refocused.
    pub fn close(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            debug!(%id, "close ignored during shutdown");
            return false;
        }
        self.close_unguarded(state, id)
    }

    fn close_unguarded(&mut self, state: &mut UiState, id: WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        let was_visible = window.is_visible();
        window.state = WindowState::Closed;
        if state.focused == Some(id) {
            state.focused = None;
        }
        if state.gesture.is_some_and(|gesture| gesture.target == id) {
            state.gesture = None;
        }
        was_visible
    }

    /// Starts the minimize animation. The caller finishes it with
    /// [`finish_minimize`](Self::finish_minimize) once the animation delay elapses.
    pub fn minimize(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            return false;
        }
        match self.get_mut(id) {
            Some(window) if matches!(window.state, WindowState::Open | WindowState::Maximized) => {
                window.state = WindowState::Minimized;
                true
            }
            _ => false,
        }
    }

    /// Closes a window whose minimize animation has finished.
    ///
    /// Does nothing if the window was reopened while animating.
    pub fn finish_minimize(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            return false;
        }
        let animating = self.get(id).is_some_and(|window| window.state == WindowState::Minimized);
        animating && self.close_unguarded(state, id)
    }

    /// Switches a visible window to the full-viewport rectangle
    pub fn maximize(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            return false;
        }
        let viewport = state.viewport;
        match self.get_mut(id) {
            Some(window) if window.state == WindowState::Open => {
                window.maximize(viewport);
                true
            }
            _ => false,
        }
    }

    /// Returns a maximized window to its remembered normal rectangle
    pub fn restore(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            return false;
        }
        match self.get_mut(id) {
            Some(window) if window.state == WindowState::Maximized => {
                window.restore();
                true
            }
            _ => false,
        }
    }

    /// Maximize if normal, restore if maximized
    pub fn toggle_maximize(&mut self, state: &mut UiState, id: WindowId) -> Option<MaximizeToggle> {
        let current = self.get(id)?.state;
        match current {
            WindowState::Open => self.maximize(state, id).then_some(MaximizeToggle::Maximized),
            WindowState::Maximized => self.restore(state, id).then_some(MaximizeToggle::Restored),
            _ => None,
        }
    }

    /// Gives focus to a visible window without changing its state
    pub fn focus(&mut self, state: &mut UiState, id: WindowId) -> bool {
        if state.is_shutting_down() {
            return false;
        }
        match self.get(id) {
            Some(window) if window.is_visible() => {
                state.focused = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Selects one tab of a visible tabbed window; the previous tab is deselected
    pub fn switch_tab(&mut self, state: &mut UiState, id: WindowId, tab: &str) -> bool {
        if state.is_shutting_down() {
            debug!(%id, tab, "tab switch ignored during shutdown");
            return false;
        }
        match self.get_mut(id) {
            Some(window) if window.is_visible() => window.select_tab(tab),
            _ => false,
        }
    }

    /// Moves a window by a drag delta and clamps it into the viewport.
    ///
    /// Clamping happens on every incremental move, so the window never leaves
    /// the allowed band mid-drag.
    pub fn apply_drag(&mut self, state: &mut UiState, id: WindowId, dx: i32, dy: i32) -> Option<Rect> {
        if state.is_shutting_down() {
            return None;
        }
        let viewport = state.viewport;
        let window = self.get_mut(id).filter(|window| window.is_visible())?;
        window.geometry = clamp_to_viewport(window.geometry.translated(dx, dy), viewport);
        trace!(%id, x = window.geometry.x, y = window.geometry.y, "window dragged");
        Some(window.geometry)
    }

    /// Draggable window whose header is under the point, focused window first
    pub fn header_at(&self, state: &UiState, point: Point) -> Option<WindowId> {
        let hit = |window: &Window| window.is_draggable() && window.header_rect().contains(point);

        if let Some(focused) = state.focused.and_then(|id| self.get(id))
            && hit(focused)
        {
            return Some(focused.id);
        }
        self.windows.iter().rev().find(|window| hit(window)).map(|window| window.id)
    }

    /// Forces every window closed. Used by shutdown after the guard is set.
    pub fn close_all(&mut self, state: &mut UiState) -> Vec<WindowId> {
        let ids: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|window| window.is_visible())
            .map(|window| window.id)
            .collect();
        for id in &ids {
            self.close_unguarded(state, *id);
        }
        state.focused = None;
        ids
    }
}
