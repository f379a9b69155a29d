//! Simulated terminal desktop
//!
//! A headless model of a small Linux-style desktop: draggable windows with
//! focus, a command interpreter with canned responses, transient
//! notifications and a timed shutdown sequence. Hosts feed input and time in
//! and render through the [`ui::Surface`] trait.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
pub mod ui;
