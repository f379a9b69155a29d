//! Wall-clock access
//!
//! Only `date` and the taskbar clock care about calendar time; everything
//! else runs on scheduler milliseconds.

use chrono::{DateTime, FixedOffset, Local};

pub trait WallClock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
