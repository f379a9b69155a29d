//! Configuration module for portfolio-desk
//!
//! Every timing constant, size and canned identity string the desktop uses
//! can be overridden from a TOML file. Missing keys fall back to defaults.

pub mod desktop;

pub use desktop::{
    ConfigError, DesktopConfig, GestureConfig, Profile, TimingConfig, ViewportConfig, WindowConfig,
};
