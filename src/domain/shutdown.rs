//! Shutdown sequence state machine
//!
//! Driven entirely by ticks supplied from outside, so the sequence can be
//! replayed against virtual time. The host owns the timers; this type only
//! decides what each tick means.
//!
//! # Invariants
//!
//! 1. Progress never decreases and never exceeds 100.
//! 2. Each status message is emitted exactly once and in order, even when the
//!    step size jumps over a threshold value.
//! 3. There is no path back to `Idle`.

use tracing::info;

/// Progress values at which the status message advances
pub const MESSAGE_THRESHOLDS: [u8; 6] = [15, 30, 45, 60, 80, 95];

/// Status messages shown at the matching threshold
pub static MESSAGES: [&str; 6] = [
    "Saving session data...",
    "Closing terminals...",
    "Stopping services...",
    "Syncing file systems...",
    "Powering off...",
    "Goodbye! 👋",
];

/// Stage of the shutdown sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStage {
    Idle,
    /// Progress bar advancing
    Running,
    /// Progress complete, shutdown screen fading out
    FadingOut,
    /// UI replaced by the power-off screen
    Terminal,
}

/// Snapshot of the sequence for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownState {
    pub progress_percent: u8,
    pub stage: ShutdownStage,
}

/// What a single tick changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub progress_percent: u8,
    /// Messages whose thresholds this tick crossed, oldest first
    pub messages: &'static [&'static str],
    /// True on the tick that reached 100
    pub completed: bool,
}

impl TickOutcome {
    /// Newest message crossed on this tick, the one to display
    pub fn message(&self) -> Option<&'static str> {
        self.messages.last().copied()
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownSequencer {
    stage: ShutdownStage,
    progress: u8,
    step: u8,
    next_message: usize,
}

impl ShutdownSequencer {
    /// Creates an idle sequencer advancing `step` percent per tick
    pub fn new(step: u8) -> Self {
        Self {
            stage: ShutdownStage::Idle,
            progress: 0,
            step: step.clamp(1, 100),
            next_message: 0,
        }
    }

    pub fn state(&self) -> ShutdownState {
        ShutdownState {
            progress_percent: self.progress,
            stage: self.stage,
        }
    }

    pub fn stage(&self) -> ShutdownStage {
        self.stage
    }

    pub fn is_started(&self) -> bool {
        self.stage != ShutdownStage::Idle
    }

    /// Leaves Idle. Returns false if the sequence was already started.
    pub fn start(&mut self) -> bool {
        if self.stage != ShutdownStage::Idle {
            return false;
        }
        info!("shutdown sequence started");
        self.stage = ShutdownStage::Running;
        true
    }

    /// Advances progress by one step. Ticks outside `Running` do nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.stage != ShutdownStage::Running {
            return TickOutcome {
                progress_percent: self.progress,
                ..TickOutcome::default()
            };
        }

        self.progress = self.progress.saturating_add(self.step).min(100);

        let first = self.next_message;
        while let Some(&threshold) = MESSAGE_THRESHOLDS.get(self.next_message) {
            if self.progress < threshold {
                break;
            }
            self.next_message += 1;
        }

        let completed = self.progress >= 100;
        if completed {
            info!("shutdown progress complete");
            self.stage = ShutdownStage::FadingOut;
        }

        TickOutcome {
            progress_percent: self.progress,
            messages: &MESSAGES[first..self.next_message],
            completed,
        }
    }

    /// Finishes the fade. Only valid after progress completes.
    pub fn power_off(&mut self) -> bool {
        if self.stage != ShutdownStage::FadingOut {
            return false;
        }
        info!("system powered off");
        self.stage = ShutdownStage::Terminal;
        true
    }
}
