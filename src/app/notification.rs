//! Transient notification banner
//!
//! A queue of one: a new message replaces whatever is showing. Each message
//! carries a generation number so that the hide timer scheduled for an older
//! message cannot dismiss a newer one.

use tracing::debug;

use crate::app::state::UiState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    /// Whether the host should play the notification chime
    pub chime: bool,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct NotificationService {
    current: Option<Notification>,
    next_generation: u64,
    sound_on: bool,
}

impl NotificationService {
    pub fn new(sound_on: bool) -> Self {
        Self {
            current: None,
            next_generation: 0,
            sound_on,
        }
    }

    /// Shows a message, replacing the current one. Suppressed during shutdown.
    pub fn show(&mut self, state: &UiState, text: impl Into<String>) -> Option<&Notification> {
        let text = text.into();
        if state.is_shutting_down() {
            debug!(%text, "notification suppressed during shutdown");
            return None;
        }

        self.next_generation += 1;
        self.current = Some(Notification {
            text,
            chime: self.sound_on,
            generation: self.next_generation,
        });
        self.current.as_ref()
    }

    /// Hides the message with the given generation. Stale generations are ignored.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(current) if current.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Hides whatever is showing
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    /// Flips the sound setting, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        self.sound_on
    }
}
