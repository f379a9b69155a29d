//! Application orchestration layer
//!
//! Stateful services (windows, interpreter, notifications, desktop chrome)
//! and the controller that coordinates them with the host collaborators.

pub mod controller;
pub mod interpreter;
pub mod notification;
pub mod shell;
pub mod state;
pub mod window_manager;

pub use controller::{DesktopController, TimerEvent, WELCOME_MESSAGE};
pub use interpreter::{CommandInterpreter, CommandRecord, CommandResult, Effect, OutputBlock};
pub use notification::{Notification, NotificationService};
pub use shell::{ClockFace, StartMenu, Theme};
pub use state::UiState;
pub use window_manager::{MaximizeToggle, WindowManager};
