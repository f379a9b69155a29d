//! Domain logic and core data structures
//!
//! This module contains pure state and rules that are independent of any
//! host page, timer source or renderer.

pub mod command;
pub mod core;
pub mod gesture;
pub mod shutdown;
pub mod window;
