//! Host collaborators
//!
//! Abstractions over what the hosting page provides: timers and the wall
//! clock. The rest of the crate depends on these traits, never on a concrete
//! event loop.

pub mod clock;
pub mod timer;

pub use clock::{FixedClock, SystemClock, WallClock};
pub use timer::{Scheduler, TimerId, TimerQueue};
