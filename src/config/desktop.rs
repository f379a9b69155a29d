use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::core::Viewport;
use crate::domain::gesture::{Millis, TapPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Viewport dimensions the desktop lays windows out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 1280, height: 800 }
    }
}

/// Normal size of a freshly opened window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 800, height: 500 }
    }
}

/// Every delay the desktop schedules, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub notification_ms: Millis,
    pub minimize_ms: Millis,
    pub shutdown_delay_ms: Millis,
    pub shutdown_tick_ms: Millis,
    pub shutdown_step: u8,
    pub fade_ms: Millis,
    pub power_off_ms: Millis,
    pub help_delay_ms: Millis,
    pub icon_touch_delay_ms: Millis,
    pub focus_delay_ms: Millis,
    pub welcome_delay_ms: Millis,
    pub clock_tick_ms: Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_ms: 3000,
            minimize_ms: 300,
            shutdown_delay_ms: 1000,
            shutdown_tick_ms: 30,
            shutdown_step: 1,
            fade_ms: 500,
            power_off_ms: 1000,
            help_delay_ms: 100,
            icon_touch_delay_ms: 300,
            focus_delay_ms: 100,
            welcome_delay_ms: 1000,
            clock_tick_ms: 1000,
        }
    }
}

/// Tap and double-tap thresholds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub tap_max_ms: Millis,
    pub tap_max_distance: f32,
    pub double_tap_ms: Millis,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_ms: 300,
            tap_max_distance: 10.0,
            double_tap_ms: 300,
        }
    }
}

impl GestureConfig {
    pub fn tap_policy(&self) -> TapPolicy {
        TapPolicy {
            max_duration_ms: self.tap_max_ms,
            max_distance: self.tap_max_distance,
        }
    }
}

/// Identity the canned command responses describe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub user: String,
    pub host: String,
    pub home: String,
    pub shell: String,
    pub groups: Vec<String>,
    pub description: String,
    pub os_name: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user: "sayan".into(),
            host: "kali-portfolio".into(),
            home: "/home/sayan".into(),
            shell: "/bin/web-terminal".into(),
            groups: vec!["srat-cofounder".into(), "developers".into(), "students".into()],
            description: "Co-founder SRat | JEE Aspirant | Frontend Developer".into(),
            os_name: "Kali Linux Portfolio v3.0".into(),
        }
    }
}

impl Profile {
    /// Prompt prefix echoed before each command
    pub fn prompt(&self) -> String {
        format!("root@{}:~#", self.host)
    }

    pub fn working_directory(&self) -> String {
        format!("{}/{}", self.home, self.host)
    }
}

/// Complete desktop configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub viewport: ViewportConfig,
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub gesture: GestureConfig,
    pub profile: Profile,
    pub sound_on: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            window: WindowConfig::default(),
            timing: TimingConfig::default(),
            gesture: GestureConfig::default(),
            profile: Profile::default(),
            sound_on: true,
        }
    }
}

impl DesktopConfig {
    /// Parses and validates a TOML document; missing keys take defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: DesktopConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0 || self.viewport.height <= 0 {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: format!("{}x{} is not a positive size", self.viewport.width, self.viewport.height),
            });
        }
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("{}x{} is not a positive size", self.window.width, self.window.height),
            });
        }
        if !(1..=100).contains(&self.timing.shutdown_step) {
            return Err(ConfigError::Invalid {
                field: "timing.shutdown_step",
                reason: format!("{} is outside 1..=100", self.timing.shutdown_step),
            });
        }
        if self.timing.shutdown_tick_ms == 0 || self.timing.clock_tick_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing",
                reason: "repeating timer periods must be non-zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DesktopConfig::from_toml_str("").unwrap();
        assert_eq!(config, DesktopConfig::default());
        assert_eq!(config.timing.shutdown_tick_ms, 30);
        assert!(config.sound_on);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = DesktopConfig::from_toml_str(
            r#"
            sound_on = false

            [viewport]
            width = 390

            [profile]
            host = "demo-box"
            "#,
        )
        .unwrap();
        assert!(!config.sound_on);
        assert_eq!(config.viewport.width, 390);
        assert_eq!(config.viewport.height, 800);
        assert_eq!(config.profile.prompt(), "root@demo-box:~#");
        assert_eq!(config.profile.user, "sayan");
    }

    #[test]
    fn rejects_out_of_range_step() {
        let err = DesktopConfig::from_toml_str("[timing]\nshutdown_step = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "timing.shutdown_step", .. }));
    }

    #[test]
    fn rejects_non_positive_viewport() {
        let err = DesktopConfig::from_toml_str("[viewport]\nheight = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "viewport", .. }));
    }

    #[test]
    fn reports_parse_errors() {
        let err = DesktopConfig::from_toml_str("viewport = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DesktopConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
