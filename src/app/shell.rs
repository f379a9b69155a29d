//! Desktop chrome outside the windows: start menu, theme and taskbar clock

use std::time::Duration;

use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Notification announcing a switch to this theme
    pub fn announcement(self) -> &'static str {
        match self {
            Theme::Dark => "Theme: Dark Mode",
            Theme::Light => "Theme: Light Mode",
        }
    }
}

/// Start menu open/closed flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartMenu {
    open: bool,
}

impl StartMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu, returning true if it was open
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Text shown in the taskbar clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub time: String,
    pub date: String,
    pub uptime: String,
}

impl ClockFace {
    pub fn new(now: DateTime<FixedOffset>, uptime: Duration) -> Self {
        Self {
            time: now.format("%-I:%M:%S %p").to_string(),
            date: now.format("%a, %-d %b %Y").to_string(),
            uptime: format_uptime(uptime),
        }
    }
}

/// Formats an uptime as `Xd Yh Zm`
pub fn format_uptime(uptime: Duration) -> String {
    let minutes_total = uptime.as_secs() / 60;
    let days = minutes_total / (60 * 24);
    let hours = (minutes_total / 60) % 24;
    let minutes = minutes_total % 60;
    format!("{days}d {hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn theme_toggles_between_two_modes() {
        assert_eq!(Theme::default().toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().announcement(), "Theme: Dark Mode");
    }

    #[test]
    fn start_menu_close_reports_previous_state() {
        let mut menu = StartMenu::default();
        assert!(!menu.close());
        assert!(menu.toggle());
        assert!(menu.close());
        assert!(!menu.is_open());
    }

    #[test]
    fn clock_face_formats_local_time() {
        let now = FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, 21, 5, 9)
            .unwrap();
        let face = ClockFace::new(now, Duration::from_secs(90_061));
        assert_eq!(face.time, "9:05:09 PM");
        assert_eq!(face.date, "Sun, 18 Oct 2026");
        assert_eq!(face.uptime, "1d 1h 1m");
    }

    #[test]
    fn uptime_starts_at_zero() {
        assert_eq!(format_uptime(Duration::ZERO), "0d 0h 0m");
    }
}
