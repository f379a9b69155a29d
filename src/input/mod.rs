//! Input normalization
//!
//! Keyboard editing for the terminal prompt and pointer/touch gesture
//! tracking for window headers.

pub mod keyboard;
pub mod pointer;

pub use keyboard::{CommandLine, Key, LineAction};
pub use pointer::{
    Gesture, GestureOutput, InputEvent, MouseAdapter, MouseEvent, MouseKind, PointerGestureTracker,
    TouchAdapter, TouchEvent, TouchOutput, TouchPhase,
};
