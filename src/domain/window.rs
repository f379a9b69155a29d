//! Simulated window records
//!
//! Every window the desktop can show exists for the whole page session. The
//! registry is fixed: windows are never created or destroyed, only opened and
//! closed.

use std::fmt;
use std::str::FromStr;

use crate::domain::core::{Point, Rect, Viewport};

/// Height of the draggable header strip at the top of every window
pub const HEADER_HEIGHT: i32 = 44;
/// Side of the square touch target for each header control
pub const CONTROL_SIZE: i32 = 44;

/// Identifier of a window in the fixed registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindowId {
    Terminal,
    About,
    Skills,
    Projects,
    Srat,
    Contact,
    Education,
    Hacking,
}

impl WindowId {
    /// All registry entries in desktop order
    pub const ALL: [WindowId; 8] = [
        WindowId::Terminal,
        WindowId::About,
        WindowId::Skills,
        WindowId::Projects,
        WindowId::Srat,
        WindowId::Contact,
        WindowId::Education,
        WindowId::Hacking,
    ];

    /// Stable name used by commands, desktop icons and notifications
    pub fn name(&self) -> &'static str {
        match self {
            WindowId::Terminal => "terminal",
            WindowId::About => "about",
            WindowId::Skills => "skills",
            WindowId::Projects => "projects",
            WindowId::Srat => "srat",
            WindowId::Contact => "contact",
            WindowId::Education => "education",
            WindowId::Hacking => "hacking",
        }
    }

    /// Whether the window body is split into switchable tabs
    pub fn has_tabs(&self) -> bool {
        matches!(self, WindowId::Projects | WindowId::Hacking)
    }

    /// Looks up a registry entry by name, returning None for unknown ids
    pub fn lookup(name: &str) -> Option<WindowId> {
        WindowId::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an id outside the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown window id '{0}'")]
pub struct UnknownWindowId(pub String);

impl FromStr for WindowId {
    type Err = UnknownWindowId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowId::lookup(s).ok_or_else(|| UnknownWindowId(s.to_string()))
    }
}

/// Display state of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Hidden; geometry is kept but not shown
    Closed,
    /// Shown at its normal rectangle
    Open,
    /// Playing the minimize animation; resolves to Closed
    Minimized,
    /// Shown at the full-viewport rectangle.
    ///
    /// Also produced by `open` when a window was closed while maximized: the
    /// full-viewport rectangle is kept until the window is restored.
    Maximized,
}

/// Header buttons a tap can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowControl {
    Minimize,
    Maximize,
    Close,
}

/// A control and the viewport area that activates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRegion {
    pub control: WindowControl,
    pub rect: Rect,
}

/// One simulated application surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    pub state: WindowState,
    pub geometry: Rect,
    /// Normal rectangle remembered while maximized
    restore_rect: Option<Rect>,
    /// Set once the header has been wired for dragging
    draggable: bool,
    /// Selected tab for tabbed windows; None shows the default content
    active_tab: Option<String>,
}

impl Window {
    /// Creates a closed window centered in the viewport
    pub fn new(id: WindowId, viewport: Viewport, width: i32, height: i32) -> Self {
        Self {
            id,
            state: WindowState::Closed,
            geometry: viewport.centered(width, height),
            restore_rect: None,
            draggable: false,
            active_tab: None,
        }
    }

    /// True while the window is on screen (including the minimize animation)
    pub fn is_visible(&self) -> bool {
        !matches!(self.state, WindowState::Closed)
    }

    pub fn is_maximized(&self) -> bool {
        self.restore_rect.is_some()
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable && self.is_visible()
    }

    pub(crate) fn mark_draggable(&mut self) {
        self.draggable = true;
    }

    pub fn restore_rect(&self) -> Option<Rect> {
        self.restore_rect
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// Id of the content block shown for the active tab, e.g. `web-projects`
    pub fn tab_content_id(&self) -> Option<String> {
        self.active_tab.as_ref().map(|tab| format!("{tab}-{}", self.id))
    }

    /// Makes `tab` the single active tab. Returns false for untabbed windows
    /// and blank tab names.
    pub(crate) fn select_tab(&mut self, tab: &str) -> bool {
        let tab = tab.trim();
        if !self.id.has_tabs() || tab.is_empty() {
            return false;
        }
        self.active_tab = Some(tab.to_lowercase());
        true
    }

    /// Switches to the full-viewport rectangle, remembering the current one
    pub(crate) fn maximize(&mut self, viewport: Viewport) {
        if self.restore_rect.is_none() {
            self.restore_rect = Some(self.geometry);
        }
        self.geometry = viewport.maximized_rect();
        if self.state == WindowState::Open {
            self.state = WindowState::Maximized;
        }
    }

    /// Returns to the remembered normal rectangle
    pub(crate) fn restore(&mut self) {
        if let Some(rect) = self.restore_rect.take() {
            self.geometry = rect;
        }
        if self.state == WindowState::Maximized {
            self.state = WindowState::Open;
        }
    }

    /// Draggable header strip
    pub fn header_rect(&self) -> Rect {
        Rect::new(self.geometry.x, self.geometry.y, self.geometry.w, HEADER_HEIGHT)
    }

    /// Header controls laid out right to left: close, maximize, minimize
    pub fn control_regions(&self) -> [ActionRegion; 3] {
        let right = self.geometry.right();
        let top = self.geometry.y;
        let slot = |index: i32| Rect::new(right - CONTROL_SIZE * (index + 1), top, CONTROL_SIZE, CONTROL_SIZE);
        [
            ActionRegion { control: WindowControl::Minimize, rect: slot(2) },
            ActionRegion { control: WindowControl::Maximize, rect: slot(1) },
            ActionRegion { control: WindowControl::Close, rect: slot(0) },
        ]
    }

    /// Control under the given point, if any
    pub fn control_at(&self, point: Point) -> Option<WindowControl> {
        self.control_regions()
            .into_iter()
            .find(|region| region.rect.contains(point))
            .map(|region| region.control)
    }
}
