//! Rendering collaborator
//!
//! The controller describes what changed; a [`Surface`] decides how it looks.
//! Hosts implement this over their page, tests use [`RecordingSurface`].

use crate::app::interpreter::CommandRecord;
use crate::app::notification::Notification;
use crate::app::shell::{ClockFace, Theme};
use crate::domain::shutdown::ShutdownState;
use crate::domain::window::{Window, WindowId};

pub trait Surface {
    /// Appends one command record to the terminal scrollback
    fn append_output(&mut self, record: &CommandRecord);
    /// Empties the scrollback; the prompt stays usable
    fn clear_output(&mut self);
    fn set_input_line(&mut self, text: &str, caret: usize);
    fn focus_command_line(&mut self);
    fn show_notification(&mut self, notification: &Notification);
    fn hide_notification(&mut self);
    /// Applies a window's visibility and geometry
    fn update_window(&mut self, window: &Window, focused: bool);
    /// Marks `tab` active in a tabbed window and shows only its content block
    fn show_tab(&mut self, window: WindowId, tab: &str, content_id: &str);
    fn set_start_menu(&mut self, open: bool);
    fn set_theme(&mut self, theme: Theme);
    fn set_clock(&mut self, face: &ClockFace);
    fn set_desktop_visible(&mut self, visible: bool);
    /// Starts the spin on the taskbar shutdown control
    fn set_shutdown_control_animating(&mut self);
    fn shutdown_progress(&mut self, state: ShutdownState, message: Option<&str>);
    fn fade_shutdown_screen(&mut self);
    /// Replaces the whole UI with the static powered-off screen
    fn show_power_off_screen(&mut self);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Output(CommandRecord),
    ClearOutput,
    InputLine { text: String, caret: usize },
    FocusCommandLine,
    Notification(String),
    HideNotification,
    Window { id: WindowId, visible: bool, focused: bool },
    Tab { window: WindowId, tab: String, content_id: String },
    StartMenu(bool),
    Theme(Theme),
    Clock(ClockFace),
    DesktopVisible(bool),
    ShutdownControlAnimating,
    ShutdownProgress { percent: u8, message: Option<String> },
    FadeShutdown,
    PowerOff,
}

/// Surface that remembers every call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns everything recorded so far
    pub fn take(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn notifications(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Notification(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn outputs(&self) -> Vec<&CommandRecord> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Output(record) => Some(record),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn append_output(&mut self, record: &CommandRecord) {
        self.calls.push(SurfaceCall::Output(record.clone()));
    }

    fn clear_output(&mut self) {
        self.calls.push(SurfaceCall::ClearOutput);
    }

    fn set_input_line(&mut self, text: &str, caret: usize) {
        self.calls.push(SurfaceCall::InputLine {
            text: text.to_string(),
            caret,
        });
    }

    fn focus_command_line(&mut self) {
        self.calls.push(SurfaceCall::FocusCommandLine);
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.calls.push(SurfaceCall::Notification(notification.text.clone()));
    }

    fn hide_notification(&mut self) {
        self.calls.push(SurfaceCall::HideNotification);
    }

    fn update_window(&mut self, window: &Window, focused: bool) {
        self.calls.push(SurfaceCall::Window {
            id: window.id,
            visible: window.is_visible(),
            focused,
        });
    }

    fn show_tab(&mut self, window: WindowId, tab: &str, content_id: &str) {
        self.calls.push(SurfaceCall::Tab {
            window,
            tab: tab.to_string(),
            content_id: content_id.to_string(),
        });
    }

    fn set_start_menu(&mut self, open: bool) {
        self.calls.push(SurfaceCall::StartMenu(open));
    }

    fn set_theme(&mut self, theme: Theme) {
        self.calls.push(SurfaceCall::Theme(theme));
    }

    fn set_clock(&mut self, face: &ClockFace) {
        self.calls.push(SurfaceCall::Clock(face.clone()));
    }

    fn set_desktop_visible(&mut self, visible: bool) {
        self.calls.push(SurfaceCall::DesktopVisible(visible));
    }

    fn set_shutdown_control_animating(&mut self) {
        self.calls.push(SurfaceCall::ShutdownControlAnimating);
    }

    fn shutdown_progress(&mut self, state: ShutdownState, message: Option<&str>) {
        self.calls.push(SurfaceCall::ShutdownProgress {
            percent: state.progress_percent,
            message: message.map(str::to_string),
        });
    }

    fn fade_shutdown_screen(&mut self) {
        self.calls.push(SurfaceCall::FadeShutdown);
    }

    fn show_power_off_screen(&mut self) {
        self.calls.push(SurfaceCall::PowerOff);
    }
}
